//! Batch results.
//!
//! An [`Animator`](crate::Animator) run produces a [`BatchReport`]: what the
//! sort moved, and one [`SubjectReport`] per frame set describing whether it
//! was animated, skipped, cancelled, or failed.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use loopreel::{AnimateOptions, Animator, FfmpegEncoder, NonInteractive};
//!
//! let animator = Animator::new(AnimateOptions::new(), FfmpegEncoder::new())?;
//! let report = animator.run(Path::new("runs"), &mut NonInteractive)?;
//! print!("{report}");
//! if report.failure_count() > 0 {
//!     eprintln!("some subjects failed");
//! }
//! # Ok::<(), loopreel::LoopreelError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use crate::selection::FrameSelection;
use crate::sort::SortSummary;

/// What happened to one frame set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectOutcome {
    /// The animation was written.
    Animated {
        /// Frames that were used.
        selection: FrameSelection,
        /// Frames handed to the encoder, after reverse and mirror.
        frames: usize,
        /// The animation file.
        output: PathBuf,
        /// The frame-number overlay animation, if requested.
        overlay_output: Option<PathBuf>,
    },
    /// The frame set was passed over without an error, e.g. the user chose
    /// not to replace an existing animation or the selection was invalid in a
    /// non-interactive run.
    Skipped {
        /// Why it was skipped.
        reason: String,
    },
    /// The user cancelled frame selection.
    Cancelled,
    /// Selection, I/O, or encoding failed.
    Failed {
        /// The error message.
        error: String,
    },
}

/// The outcome for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectReport {
    /// Subject name.
    pub subject: String,
    /// Frames found for the subject.
    pub length: u32,
    /// What happened.
    pub outcome: SubjectOutcome,
}

/// Summary of an animation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// What sorting did. `None` when the directory was already sorted.
    pub sort: Option<SortSummary>,
    /// Folder the animations were written to, when animating.
    pub output_folder: Option<PathBuf>,
    /// One entry per frame set, in processing order.
    pub subjects: Vec<SubjectReport>,
}

impl BatchReport {
    /// Subjects that were animated.
    pub fn animated(&self) -> impl Iterator<Item = &SubjectReport> {
        self.subjects
            .iter()
            .filter(|report| matches!(report.outcome, SubjectOutcome::Animated { .. }))
    }

    /// Number of subjects that failed.
    pub fn failure_count(&self) -> usize {
        self.subjects
            .iter()
            .filter(|report| matches!(report.outcome, SubjectOutcome::Failed { .. }))
            .count()
    }

    /// Look up a subject's report by name.
    pub fn subject(&self, subject: &str) -> Option<&SubjectReport> {
        self.subjects.iter().find(|report| report.subject == subject)
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(sort) = &self.sort {
            writeln!(
                f,
                "[SORT] {} frame(s) moved, {} misc image(s), {} left in place",
                sort.moved, sort.misc, sort.skipped
            )?;
            for failure in &sort.failed {
                writeln!(
                    f,
                    "[FAIL] could not move {}: {}",
                    failure.path.display(),
                    failure.reason
                )?;
            }
        }
        for report in &self.subjects {
            match &report.outcome {
                SubjectOutcome::Animated {
                    selection, output, ..
                } => writeln!(
                    f,
                    "[DONE] {}: {selection} -> {}",
                    report.subject,
                    output.display()
                )?,
                SubjectOutcome::Skipped { reason } => {
                    writeln!(f, "[SKIP] {}: {reason}", report.subject)?
                }
                SubjectOutcome::Cancelled => {
                    writeln!(f, "[SKIP] {}: cancelled", report.subject)?
                }
                SubjectOutcome::Failed { error } => {
                    writeln!(f, "[FAIL] {}: {error}", report.subject)?
                }
            }
        }
        if self.subjects.is_empty() {
            writeln!(f, "No frame sets animated.")?;
        }
        Ok(())
    }
}
