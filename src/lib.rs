//! # loopreel
//!
//! Sort the numbered frames of image-generation runs into per-subject
//! folders and turn each subject into a looping animation.
//!
//! A run produces files such as `sunset.0001.png`, `sunset.0002.png`,
//! `harbor.0001.png`, ... in a single directory. `loopreel` moves every
//! frame into a folder named after its subject, picks a window of frames from
//! each folder, optionally reverses and mirrors it into a ping-pong loop, and
//! hands the result to [`ffmpeg`](https://ffmpeg.org) for encoding.
//!
//! ## Quick Start
//!
//! ### Animate Every Subject
//!
//! ```no_run
//! use std::path::Path;
//!
//! use loopreel::{AnimateOptions, Animator, FfmpegEncoder, NonInteractive};
//!
//! let animator = Animator::new(AnimateOptions::new(), FfmpegEncoder::new()).unwrap();
//! let report = animator.run(Path::new("runs"), &mut NonInteractive).unwrap();
//! print!("{report}");
//! ```
//!
//! ### Pick a Window of Frames
//!
//! ```
//! use loopreel::{FrameSelection, WindowOrder, extract_window, validate};
//!
//! let frames: Vec<u32> = (1..=20).collect();
//! let selection = validate(20, Some(5), Some(10)).unwrap();
//! assert_eq!(selection, FrameSelection::new(5, 10));
//!
//! let order = WindowOrder { reverse: false, mirror: true };
//! let window = extract_window(&frames, selection, order);
//! assert_eq!(window.len(), 18);
//! ```
//!
//! ### Ask for New Values
//!
//! When the configured start and count do not fit a frame set,
//! [`ResolutionSession`] walks the user through choosing new ones. Any
//! [`Prompter`] can drive it; [`ScriptedPrompter`] replays canned answers.
//!
//! ```
//! use loopreel::{ResolutionSession, ScriptedPrompter, resolve};
//!
//! let session = ResolutionSession::new("sunset", 30).unwrap();
//! let mut prompter = ScriptedPrompter::new(["12", "4"]);
//! let selection = resolve(session, &mut prompter).unwrap();
//! assert_eq!((selection.start, selection.count), (4, 12));
//! ```
//!
//! ## Features
//!
//! - **Sorting** of `<subject>.<number>.<ext>` PNG and JPEG frames into
//!   subject folders, with unnumbered images parked in `Unsorted_Files`
//! - **Frame selection** by start frame and count, with defaults, validation,
//!   and interactive recovery
//! - **Reverse and mirror** ordering for seamless loops
//! - **Any ffmpeg output format**, chosen by file extension
//! - **Frame number overlay** rendered as a second animation
//! - **Progress callbacks** for sorting and animating
//!
//! ## Requirements
//!
//! The `ffmpeg` executable must be on `PATH`, or set with
//! [`FfmpegEncoder::with_program`].

pub mod animator;
pub mod configuration;
pub mod encode;
pub mod error;
pub mod frame_set;
pub mod output;
pub mod progress;
pub mod report;
pub mod resolution;
pub mod selection;
pub mod sort;
pub mod window;

pub use animator::Animator;
pub use configuration::{AnimateOptions, FrameTextOverlay};
pub use encode::{EncodeRequest, Encoder, FfmpegEncoder};
pub use error::LoopreelError;
pub use frame_set::{Frame, FrameSet};
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use report::{BatchReport, SubjectOutcome, SubjectReport};
pub use resolution::{
    CountChoice, NonInteractive, Prompter, ResolutionSession, ResolutionState,
    ScriptedPrompter, StartCancel, resolve,
};
pub use selection::{FrameSelection, NeedsResolution, SelectionProblem, validate};
pub use sort::{DirectoryLayout, SortFailure, SortSummary, organize};
pub use window::{WindowOrder, extract_window, mirror};
