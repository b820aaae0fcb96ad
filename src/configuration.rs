//! Animation options.
//!
//! [`AnimateOptions`] is a builder that carries the user's frame selection,
//! playback order, output naming, and progress reporting through an
//! [`Animator`](crate::Animator) run.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use loopreel::{AnimateOptions, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let options = AnimateOptions::new()
//!     .with_framerate(24)
//!     .with_frame_count(Some(30))
//!     .with_mirror(true)
//!     .with_progress(Arc::new(LogProgress));
//! assert!(options.validate().is_ok());
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LoopreelError;
use crate::progress::{NoOpProgress, ProgressCallback};
use crate::resolution::StartCancel;
use crate::window::WindowOrder;

/// Default playback rate handed to the encoder.
pub const DEFAULT_FRAMERATE: u32 = 14;

/// Default container / extension of produced animations.
pub const DEFAULT_FILE_TYPE: &str = "mp4";

/// Default directory, relative to the working directory, that receives all
/// animations.
pub const DEFAULT_OUTPUT_ROOT: &str = "AnimatorOutput";

/// Settings for the frame-number overlay animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTextOverlay {
    /// Font file for the overlay. `None` lets the encoder pick its default.
    pub font_file: Option<PathBuf>,
    /// Glyph height in pixels.
    pub font_size: u32,
}

impl Default for FrameTextOverlay {
    fn default() -> Self {
        Self {
            font_file: None,
            font_size: 30,
        }
    }
}

/// Configuration for an animation batch.
///
/// All fields have defaults matching the command line tool: 14 fps, `mp4`
/// output under `./AnimatorOutput`, the full frame range, forward playback.
#[derive(Clone)]
pub struct AnimateOptions {
    pub(crate) framerate: u32,
    pub(crate) starting_frame: Option<u32>,
    pub(crate) frame_count: Option<u32>,
    pub(crate) file_type: String,
    pub(crate) output_root: PathBuf,
    pub(crate) animate: bool,
    pub(crate) order: WindowOrder,
    pub(crate) annotate: bool,
    pub(crate) select_all: bool,
    pub(crate) frame_text: Option<FrameTextOverlay>,
    pub(crate) start_cancel: StartCancel,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for AnimateOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnimateOptions")
            .field("framerate", &self.framerate)
            .field("starting_frame", &self.starting_frame)
            .field("frame_count", &self.frame_count)
            .field("file_type", &self.file_type)
            .field("output_root", &self.output_root)
            .field("animate", &self.animate)
            .field("order", &self.order)
            .field("annotate", &self.annotate)
            .field("select_all", &self.select_all)
            .field("frame_text", &self.frame_text)
            .field("start_cancel", &self.start_cancel)
            .finish()
    }
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimateOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            framerate: DEFAULT_FRAMERATE,
            starting_frame: None,
            frame_count: None,
            file_type: DEFAULT_FILE_TYPE.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            animate: true,
            order: WindowOrder::default(),
            annotate: false,
            select_all: false,
            frame_text: None,
            start_cancel: StartCancel::default(),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the playback rate in frames per second.
    #[must_use]
    pub fn with_framerate(mut self, framerate: u32) -> Self {
        self.framerate = framerate;
        self
    }

    /// Set the 1-based first frame. `None` picks the default for the count.
    #[must_use]
    pub fn with_starting_frame(mut self, starting_frame: Option<u32>) -> Self {
        self.starting_frame = starting_frame;
        self
    }

    /// Set how many frames to animate. `None` uses every remaining frame.
    #[must_use]
    pub fn with_frame_count(mut self, frame_count: Option<u32>) -> Self {
        self.frame_count = frame_count;
        self
    }

    /// Set the output extension (e.g. `mp4`, `gif`, `webm`).
    #[must_use]
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the directory that receives the per-source output folders.
    #[must_use]
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    /// When `false`, only sort files into subject folders.
    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Play the selected frames backwards.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.order.reverse = reverse;
        self
    }

    /// Append the frames backwards for a seamless loop (roughly doubles the
    /// output size).
    #[must_use]
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.order.mirror = mirror;
        self
    }

    /// Add the start, count, and framerate to output filenames.
    #[must_use]
    pub fn with_annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Always animate every frame and never ask anything.
    #[must_use]
    pub fn with_select_all(mut self, select_all: bool) -> Self {
        self.select_all = select_all;
        self
    }

    /// Also produce an animation with the frame number drawn on each frame.
    #[must_use]
    pub fn with_frame_text(mut self, overlay: Option<FrameTextOverlay>) -> Self {
        self.frame_text = overlay;
        self
    }

    /// Choose what skipping the starting-frame question does.
    #[must_use]
    pub fn with_start_cancel(mut self, start_cancel: StartCancel) -> Self {
        self.start_cancel = start_cancel;
        self
    }

    /// Attach a progress callback, invoked once per sorted file and once per
    /// finished subject.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Playback rate in frames per second.
    pub fn framerate(&self) -> u32 {
        self.framerate
    }

    /// Output extension without a leading dot.
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Directory that receives the per-source output folders.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Playback order applied to every window.
    pub fn order(&self) -> WindowOrder {
        self.order
    }

    /// Reject settings no frame set could satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`LoopreelError::InvalidNumericInput`] for a zero framerate,
    /// starting frame, or frame count, and [`LoopreelError::InvalidFileType`]
    /// for an empty file type or one containing a path separator.
    pub fn validate(&self) -> Result<(), LoopreelError> {
        if self.framerate == 0 {
            return Err(LoopreelError::InvalidNumericInput {
                field: "framerate",
                value: self.framerate.to_string(),
            });
        }
        if self.starting_frame == Some(0) {
            return Err(LoopreelError::InvalidNumericInput {
                field: "starting frame",
                value: "0".to_string(),
            });
        }
        if self.frame_count == Some(0) {
            return Err(LoopreelError::InvalidNumericInput {
                field: "frame count",
                value: "0".to_string(),
            });
        }
        if self.file_type.is_empty() || self.file_type.contains(['/', '\\']) {
            return Err(LoopreelError::InvalidFileType(self.file_type.clone()));
        }
        Ok(())
    }
}
