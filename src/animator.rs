//! Core [`Animator`] implementation.
//!
//! `Animator` is the main entry point for the crate. It sorts a directory of
//! generated frames into subject folders, then takes each subject's
//! [`FrameSet`] through selection, window extraction, and encoding.
//!
//! Subjects are processed one at a time and independently: a failure, skip,
//! or cancellation only affects the subject it happened to. The only error
//! that ends a run early is failing to create the output folder.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Formatter, Result as FmtResult},
    fs,
    path::{Path, PathBuf},
};

use crate::{
    configuration::AnimateOptions,
    encode::{EncodeRequest, Encoder},
    error::LoopreelError,
    frame_set::FrameSet,
    output::{
        FRAME_TEXT_SUFFIX, animation_stem, ensure_directory, output_folder_name, source_name,
        unique_path,
    },
    progress::{OperationType, ProgressTracker},
    report::{BatchReport, SubjectOutcome, SubjectReport},
    resolution::{Prompter, ResolutionSession, resolve},
    selection::{FrameSelection, NeedsResolution, SelectionProblem, validate},
    sort::{DirectoryLayout, organize},
    window::extract_window,
};

/// Sorts and animates directories of numbered frames.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use loopreel::{AnimateOptions, Animator, FfmpegEncoder, NonInteractive};
///
/// let options = AnimateOptions::new()
///     .with_frame_count(Some(40))
///     .with_mirror(true);
/// let animator = Animator::new(options, FfmpegEncoder::new())?;
/// let report = animator.run(Path::new("bigsleep_runs"), &mut NonInteractive)?;
/// for done in report.animated() {
///     println!("{} animated", done.subject);
/// }
/// # Ok::<(), loopreel::LoopreelError>(())
/// ```
pub struct Animator<E> {
    options: AnimateOptions,
    encoder: E,
}

impl<E> Debug for Animator<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Animator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E: Encoder> Animator<E> {
    /// Create an animator.
    ///
    /// # Errors
    ///
    /// Returns the error from [`AnimateOptions::validate`] for options no
    /// frame set could satisfy.
    pub fn new(options: AnimateOptions, encoder: E) -> Result<Self, LoopreelError> {
        options.validate()?;
        Ok(Self { options, encoder })
    }

    /// The options this animator was created with.
    pub fn options(&self) -> &AnimateOptions {
        &self.options
    }

    /// The encoder animations are handed to.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Sort `directory` and animate every frame set found in it.
    ///
    /// `prompter` answers every question: whether to replace an existing
    /// animation, and which frames to use when the configured selection does
    /// not fit a frame set.
    ///
    /// # Errors
    ///
    /// Fails if `directory` cannot be read or if the output folder cannot be
    /// created. Per-subject problems, including frames that could not be
    /// sorted, are recorded in the returned [`BatchReport`] instead.
    pub fn run(
        &self,
        directory: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<BatchReport, LoopreelError> {
        log::debug!("scanning {}", directory.display());
        let summary = organize(directory, self.options.progress.clone())?;

        let (frame_dirs, source) = match &summary.layout {
            DirectoryLayout::SortedFolder { subject } => {
                let parent = fs::canonicalize(directory)?
                    .parent()
                    .map(source_name)
                    .unwrap_or_else(|| source_name(directory));
                let frame_dir: Result<PathBuf, String> = Ok(directory.to_path_buf());
                (vec![(subject.clone(), frame_dir)], parent)
            }
            DirectoryLayout::SubjectFolders(folders) => {
                let mut subjects: BTreeMap<String, Result<PathBuf, String>> = BTreeMap::new();
                for folder in folders {
                    if let Some(name) = folder.file_name().and_then(|name| name.to_str()) {
                        subjects.insert(name.to_string(), Ok(folder.clone()));
                    }
                }
                // A subject with a frame left behind would animate incompletely.
                for failure in &summary.failed {
                    if let Some(subject) = &failure.subject
                        && !matches!(subjects.get(subject), Some(Err(_)))
                    {
                        let error = format!(
                            "could not sort {}: {}",
                            failure.path.display(),
                            failure.reason
                        );
                        subjects.insert(subject.clone(), Err(error));
                    }
                }
                (subjects.into_iter().collect::<Vec<_>>(), source_name(directory))
            }
        };

        let sort = match summary.layout {
            DirectoryLayout::SortedFolder { .. } => None,
            DirectoryLayout::SubjectFolders(_) => Some(summary),
        };

        if !self.options.animate {
            log::info!("files are in sorted folders");
            return Ok(BatchReport {
                sort,
                output_folder: None,
                subjects: Vec::new(),
            });
        }

        let output_folder = self
            .options
            .output_root
            .join(output_folder_name(&source, &self.options.file_type));
        ensure_directory(&output_folder)?;

        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            OperationType::Animating,
            Some(frame_dirs.len() as u64),
        );
        let mut subjects = Vec::with_capacity(frame_dirs.len());

        for (subject, frame_dir) in frame_dirs {
            let frame_set = frame_dir.and_then(|dir| {
                FrameSet::from_directory(&dir, &subject).map_err(|error| error.to_string())
            });
            let (length, outcome) = match frame_set {
                Ok(frame_set) => (
                    frame_set.length(),
                    self.animate_frame_set(&frame_set, &output_folder, prompter),
                ),
                Err(error) => (0, SubjectOutcome::Failed { error }),
            };

            match &outcome {
                SubjectOutcome::Animated { output, .. } => {
                    log::info!("{subject}: animation written to {}", output.display())
                }
                SubjectOutcome::Skipped { reason } => log::warn!("{subject}: skipped, {reason}"),
                SubjectOutcome::Cancelled => log::info!("{subject}: skipping animation"),
                SubjectOutcome::Failed { error } => log::warn!("{subject}: {error}"),
            }

            tracker.advance(Some(&subject));
            subjects.push(SubjectReport {
                subject,
                length,
                outcome,
            });
        }

        Ok(BatchReport {
            sort,
            output_folder: Some(output_folder),
            subjects,
        })
    }

    /// Select, order, and encode one frame set into `output_folder`.
    ///
    /// Never fails: every problem becomes the returned outcome.
    pub fn animate_frame_set(
        &self,
        frame_set: &FrameSet,
        output_folder: &Path,
        prompter: &mut dyn Prompter,
    ) -> SubjectOutcome {
        match self.try_animate(frame_set, output_folder, prompter) {
            Ok(outcome) => outcome,
            Err(LoopreelError::UserCancelled { .. }) => SubjectOutcome::Cancelled,
            Err(error @ LoopreelError::SelectionUnsatisfiable { .. }) => SubjectOutcome::Skipped {
                reason: error.to_string(),
            },
            Err(error) => SubjectOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    fn try_animate(
        &self,
        frame_set: &FrameSet,
        output_folder: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<SubjectOutcome, LoopreelError> {
        let subject = frame_set.subject();
        let options = &self.options;

        if frame_set.is_empty() {
            return Ok(SubjectOutcome::Skipped {
                reason: "no numbered frames found".to_string(),
            });
        }

        if !options.select_all {
            let existing = output_folder.join(format!("{subject}.{}", options.file_type));
            if existing.exists() {
                let question = format!(
                    "Animation file found: {}. Do you wish to make another?",
                    existing.display()
                );
                if !prompter.confirm(&question, false)? {
                    return Ok(SubjectOutcome::Skipped {
                        reason: format!("{} already exists", existing.display()),
                    });
                }
            }
        }

        let selection = self.select(frame_set, prompter)?;
        let frames = extract_window(&frame_set.paths(), selection, options.order);

        let stem = animation_stem(subject, selection, options.framerate, options.annotate);
        let output = unique_path(output_folder, &stem, &options.file_type)?;
        self.encoder.encode(&EncodeRequest {
            subject,
            frames: &frames,
            output: &output,
            framerate: options.framerate,
            overlay: None,
        })?;

        let overlay_output = match &options.frame_text {
            Some(overlay) => {
                let overlay_stem = format!("{stem}{FRAME_TEXT_SUFFIX}");
                let path = unique_path(output_folder, &overlay_stem, &options.file_type)?;
                self.encoder.encode(&EncodeRequest {
                    subject,
                    frames: &frames,
                    output: &path,
                    framerate: options.framerate,
                    overlay: Some(overlay),
                })?;
                Some(path)
            }
            None => None,
        };

        Ok(SubjectOutcome::Animated {
            selection,
            frames: frames.len(),
            output,
            overlay_output,
        })
    }

    /// Work out which frames of `frame_set` to animate.
    ///
    /// Uses the configured start and count when they fit. Otherwise asks
    /// `prompter`, first whether to fall back to every frame (when every frame
    /// was requested from a later start), then whether to pick new values.
    ///
    /// # Errors
    ///
    /// [`LoopreelError::SelectionUnsatisfiable`] when the selection does not
    /// fit and `prompter` is not interactive, [`LoopreelError::UserCancelled`]
    /// when the user declines or skips.
    pub fn select(
        &self,
        frame_set: &FrameSet,
        prompter: &mut dyn Prompter,
    ) -> Result<FrameSelection, LoopreelError> {
        let subject = frame_set.subject();
        let length = frame_set.length();
        let unsatisfiable = |problem: SelectionProblem| LoopreelError::SelectionUnsatisfiable {
            subject: subject.to_string(),
            problem,
        };

        if self.options.select_all {
            let selection = FrameSelection::full(length);
            selection.check(length).map_err(unsatisfiable)?;
            return Ok(selection);
        }

        let needs = match validate(length, self.options.starting_frame, self.options.frame_count) {
            Ok(selection) => return Ok(selection),
            Err(needs) => needs,
        };

        match needs {
            NeedsResolution::Unsatisfiable(problem @ SelectionProblem::TooFewFrames { .. }) => {
                return Err(unsatisfiable(problem));
            }
            NeedsResolution::ConfirmFullRange { length, .. } => {
                prompter.notice(&format!("Selected too many frames from: {subject}"));
                if prompter.confirm(&format!("Set to max frame amount {length}?"), false)? {
                    return Ok(FrameSelection::full(length));
                }
            }
            NeedsResolution::Unsatisfiable(problem) => {
                prompter.notice(&format!("ERROR: {subject}: {problem}"));
            }
        }

        if !prompter.is_interactive() {
            return Err(unsatisfiable(needs.problem()));
        }
        if !prompter.confirm(&format!("Set new frame values for {subject}?"), true)? {
            return Err(LoopreelError::UserCancelled {
                subject: subject.to_string(),
            });
        }

        let session =
            ResolutionSession::new(subject, length)?.with_start_cancel(self.options.start_cancel);
        resolve(session, prompter)
    }
}
