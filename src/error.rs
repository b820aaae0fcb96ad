//! Error types for the `loopreel` crate.
//!
//! This module defines [`LoopreelError`], the unified error type returned by
//! every fallible operation in the crate. Errors carry the subject name, the
//! paths involved, and the offending values so that a batch report can explain
//! a skipped subject without extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

use crate::selection::SelectionProblem;

/// The unified error type for all `loopreel` operations.
///
/// Failures are scoped to a single frame set: the batch driver records them
/// per subject and moves on. Only [`LoopreelError::OutputDirectory`] stops a
/// whole run (see [`LoopreelError::is_fatal`]).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoopreelError {
    /// A numeric option (framerate, starting frame, frame count) was zero,
    /// non-numeric, or otherwise out of range.
    #[error("Invalid {field}: {value:?}")]
    InvalidNumericInput {
        /// Name of the option that was rejected.
        field: &'static str,
        /// The value as it was supplied.
        value: String,
    },

    /// The output file type is empty or not a plain extension.
    #[error("Invalid output file type: {0:?}")]
    InvalidFileType(String),

    /// The requested frame window cannot be satisfied by the frame set.
    #[error("Cannot animate {subject}: {problem}")]
    SelectionUnsatisfiable {
        /// Subject whose frames were being selected.
        subject: String,
        /// Which invariant the selection violated.
        problem: SelectionProblem,
    },

    /// The user backed out of frame selection for this subject.
    #[error("Frame selection cancelled for {subject}")]
    UserCancelled {
        /// Subject that was skipped.
        subject: String,
    },

    /// The external encoder could not be started or exited unsuccessfully.
    #[error("Encoder failed for {output}: {reason}")]
    EncoderFailure {
        /// Animation file the encoder was asked to produce.
        output: PathBuf,
        /// Spawn error or exit status description.
        reason: String,
    },

    /// Two files of one subject carry the same frame number.
    #[error("Duplicate frame {index} in {subject}: {first} and {second}")]
    DuplicateFrameIndex {
        /// Subject the frames belong to.
        subject: String,
        /// The frame number both files map to.
        index: u64,
        /// First file seen with this number.
        first: PathBuf,
        /// Second file seen with this number.
        second: PathBuf,
    },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {reason}")]
    OutputDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying reason creation failed.
        reason: String,
    },

    /// An I/O error occurred while scanning, moving, or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}

impl LoopreelError {
    /// Returns `true` if the error must abort the whole batch.
    ///
    /// Everything except a missing output directory is recovered by skipping
    /// the current frame set.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoopreelError::OutputDirectory { .. })
    }

    /// Returns `true` if the error is the user's own cancellation rather than
    /// a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, LoopreelError::UserCancelled { .. })
    }
}
