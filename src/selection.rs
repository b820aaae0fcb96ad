//! Frame window selection and validation.
//!
//! [`validate`] turns a frame set length plus the optional starting frame and
//! frame count supplied by the user into a concrete [`FrameSelection`], or
//! reports why it cannot via [`NeedsResolution`].
//!
//! Defaults favour the most recent frames: a count without a start is anchored
//! to the end of the sequence, and a start without a count runs to the last
//! frame inclusive.
//!
//! # Example
//!
//! ```
//! use loopreel::{FrameSelection, selection::validate};
//!
//! // Last 4 of 10 frames.
//! let selection = validate(10, None, Some(4)).unwrap();
//! assert_eq!(selection, FrameSelection::new(7, 4));
//!
//! // Frame 3 through the end.
//! let selection = validate(10, Some(3), None).unwrap();
//! assert_eq!(selection.count, 8);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// Smallest number of frames that produces an animation.
pub const MIN_ANIMATION_FRAMES: u32 = 2;

/// A resolved, 1-based window into a frame set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSelection {
    /// First frame of the window (1-based, inclusive).
    pub start: u32,
    /// Number of frames in the window.
    pub count: u32,
}

impl FrameSelection {
    /// Create a selection without checking it against any frame set.
    pub fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    /// The whole frame set.
    pub fn full(length: u32) -> Self {
        Self::new(1, length)
    }

    /// Last frame of the window (1-based, inclusive).
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.count).saturating_sub(1)
    }

    /// Check this selection against a frame set of `length` frames.
    pub fn check(&self, length: u32) -> Result<(), SelectionProblem> {
        if length < MIN_ANIMATION_FRAMES {
            return Err(SelectionProblem::TooFewFrames { length });
        }
        if self.count > length {
            return Err(SelectionProblem::TooManyFrames {
                requested: self.count,
                length,
            });
        }
        if self.count < MIN_ANIMATION_FRAMES {
            return Err(SelectionProblem::SingleFrame);
        }
        if self.start < 1 || self.start > length {
            return Err(SelectionProblem::StartBeyondEnd {
                start: self.start,
                length,
            });
        }
        if u64::from(self.start) + u64::from(self.count) - 1 > u64::from(length) {
            return Err(SelectionProblem::WindowOverrun {
                start: self.start,
                count: self.count,
                length,
            });
        }
        Ok(())
    }

    /// Returns `true` if the selection satisfies every window invariant for
    /// `length` frames.
    pub fn is_valid_for(&self, length: u32) -> bool {
        self.check(length).is_ok()
    }
}

impl Display for FrameSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "frames {}..={} ({} total)", self.start, self.end(), self.count)
    }
}

/// The invariant a requested window violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionProblem {
    /// The frame set itself is too short to animate.
    #[error("only {length} frame(s) available, must have more than one frame to animate")]
    TooFewFrames {
        /// Frames in the set.
        length: u32,
    },

    /// More frames were requested than exist.
    #[error("too many frames selected: {requested} (max: {length})")]
    TooManyFrames {
        /// Requested frame count.
        requested: u32,
        /// Frames in the set.
        length: u32,
    },

    /// The window would hold fewer than two frames.
    #[error("must have more than one frame to animate")]
    SingleFrame,

    /// The starting frame lies past the last frame.
    #[error("invalid starting frame {start}; must be at most {length}")]
    StartBeyondEnd {
        /// Requested starting frame.
        start: u32,
        /// Frames in the set.
        length: u32,
    },

    /// The window runs past the last frame.
    #[error("starting frame {start} + frame amount {count} is incompatible with max frame size of {length}")]
    WindowOverrun {
        /// Requested starting frame.
        start: u32,
        /// Requested frame count.
        count: u32,
        /// Frames in the set.
        length: u32,
    },
}

/// Why [`validate`] could not produce a selection on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedsResolution {
    /// Every frame was requested but from a later start. The caller may
    /// confirm falling back to the full range, or reject.
    ConfirmFullRange {
        /// The frame count that was asked for.
        requested: u32,
        /// Frames in the set.
        length: u32,
    },
    /// The request is invalid and must be re-entered or the set skipped.
    Unsatisfiable(SelectionProblem),
}

impl NeedsResolution {
    /// The problem to report when the caller cannot resolve interactively.
    pub fn problem(&self) -> SelectionProblem {
        match *self {
            NeedsResolution::ConfirmFullRange { requested, length } => {
                SelectionProblem::TooManyFrames { requested, length }
            }
            NeedsResolution::Unsatisfiable(problem) => problem,
        }
    }
}

/// Fill in an unset start or count without checking the result.
///
/// Returns `(start, count)` as signed values so a caller can observe a
/// computation that went out of range. The start is clamped to 1 only by
/// [`validate`].
pub fn resolve_defaults(length: u32, start: Option<u32>, count: Option<u32>) -> (i64, i64) {
    let length = i64::from(length);
    match (start, count) {
        (None, None) => (1, length),
        (Some(start), None) => {
            let start = i64::from(start);
            (start, length - start + 1)
        }
        (None, Some(count)) => {
            let count = i64::from(count);
            (length - count + 1, count)
        }
        (Some(start), Some(count)) => (i64::from(start), i64::from(count)),
    }
}

/// Compute a valid window for a frame set of `length` frames.
///
/// `start` and `count` are the user's requested starting frame (1-based) and
/// frame count; `None` means "use the default".
pub fn validate(
    length: u32,
    start: Option<u32>,
    count: Option<u32>,
) -> Result<FrameSelection, NeedsResolution> {
    if length < MIN_ANIMATION_FRAMES {
        return Err(NeedsResolution::Unsatisfiable(
            SelectionProblem::TooFewFrames { length },
        ));
    }

    let start = start.map(|start| start.max(1));

    if let Some(requested) = count {
        if requested > length {
            return Err(NeedsResolution::Unsatisfiable(
                SelectionProblem::TooManyFrames { requested, length },
            ));
        }
        if requested == length {
            return match start {
                None | Some(1) => Ok(FrameSelection::full(length)),
                Some(_) => Err(NeedsResolution::ConfirmFullRange { requested, length }),
            };
        }
    }

    if let Some(start) = start {
        if start > length {
            return Err(NeedsResolution::Unsatisfiable(
                SelectionProblem::StartBeyondEnd { start, length },
            ));
        }
    }

    let (start, count) = resolve_defaults(length, start, count);
    // A start below the first frame falls back to the first frame.
    let start = start.max(1);

    let selection = FrameSelection::new(
        u32::try_from(start).unwrap_or(u32::MAX),
        u32::try_from(count.max(0)).unwrap_or(u32::MAX),
    );
    selection
        .check(length)
        .map_err(NeedsResolution::Unsatisfiable)?;

    log::debug!("selected {selection} of {length}");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_inclusive() {
        assert_eq!(FrameSelection::new(5, 10).end(), 14);
        assert_eq!(FrameSelection::new(1, 2).end(), 2);
    }

    #[test]
    fn zero_start_is_clamped() {
        assert_eq!(validate(6, Some(0), Some(3)), Ok(FrameSelection::new(1, 3)));
        assert_eq!(validate(6, Some(0), None), Ok(FrameSelection::full(6)));
    }

    #[test]
    fn confirm_full_range_reports_too_many() {
        let needs = NeedsResolution::ConfirmFullRange {
            requested: 8,
            length: 8,
        };
        assert_eq!(
            needs.problem(),
            SelectionProblem::TooManyFrames {
                requested: 8,
                length: 8
            }
        );
    }
}
