//! Numbered frame sequences.
//!
//! A [`FrameSet`] is every frame of one subject in one directory, sorted by
//! the frame number embedded in each filename. Filenames follow the pattern
//! `<subject>.<number>.<ext>`, e.g. `sunset_dream.000042.png`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use image::ImageFormat;

use crate::error::LoopreelError;

/// Returns `true` if `path` has an extension the animator picks up (PNG or
/// JPEG).
pub fn is_frame_image(path: &Path) -> bool {
    path.extension()
        .and_then(ImageFormat::from_extension)
        .is_some_and(|format| matches!(format, ImageFormat::Png | ImageFormat::Jpeg))
}

/// Split a filename into its subject and frame number.
///
/// Returns `None` for names without a numeric component right before the
/// extension, and for names whose subject would be empty or only dots.
///
/// ```
/// use loopreel::frame_set::parse_frame_name;
///
/// assert_eq!(
///     parse_frame_name("sunset.v2.0007.png"),
///     Some(("sunset.v2".to_string(), 7)),
/// );
/// assert_eq!(parse_frame_name("sunset.png"), None);
/// ```
pub fn parse_frame_name(file_name: &str) -> Option<(String, u64)> {
    let parts: Vec<&str> = file_name.split('.').collect();
    if parts.len() < 3 {
        return None;
    }

    let number = parts[parts.len() - 2];
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = number.parse::<u64>().ok()?;

    let subject = parts[..parts.len() - 2].join(".");
    // The subject becomes a folder name, so "." and ".." are not allowed.
    if subject.is_empty() || subject.bytes().all(|b| b == b'.') {
        return None;
    }

    Some((subject, index))
}

/// One image of a numbered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Location of the image file.
    pub path: PathBuf,
    /// Frame number parsed from the filename.
    pub index: u64,
}

impl Frame {
    /// Create a frame from a path and its frame number.
    pub fn new(path: impl Into<PathBuf>, index: u64) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }
}

/// All frames of one subject, ordered by frame number.
#[derive(Debug, Clone)]
pub struct FrameSet {
    subject: String,
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Build a frame set, sorting frames by number.
    ///
    /// # Errors
    ///
    /// Returns [`LoopreelError::DuplicateFrameIndex`] if two frames share a
    /// number.
    pub fn new(subject: impl Into<String>, mut frames: Vec<Frame>) -> Result<Self, LoopreelError> {
        let subject = subject.into();
        frames.sort_by_key(|frame| frame.index);

        if let Some(pair) = frames.windows(2).find(|pair| pair[0].index == pair[1].index) {
            return Err(LoopreelError::DuplicateFrameIndex {
                subject,
                index: pair[0].index,
                first: pair[0].path.clone(),
                second: pair[1].path.clone(),
            });
        }

        Ok(Self { subject, frames })
    }

    /// Collect the frames of `subject` found directly inside `directory`.
    ///
    /// Paths are absolute so they can be handed to the encoder regardless of
    /// its working directory. Files of other subjects and non-image files are
    /// ignored.
    pub fn from_directory(directory: &Path, subject: &str) -> Result<Self, LoopreelError> {
        let directory = fs::canonicalize(directory)?;
        let mut frames = Vec::new();

        for entry in fs::read_dir(&directory)? {
            let path = entry?.path();
            if !path.is_file() || !is_frame_image(&path) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if let Some((name, index)) = parse_frame_name(file_name) {
                if name == subject {
                    frames.push(Frame::new(path, index));
                }
            }
        }

        log::debug!(
            "found {} frame(s) of {subject} in {}",
            frames.len(),
            directory.display()
        );
        Self::new(subject, frames)
    }

    /// The subject shared by every frame.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Frames in ascending frame-number order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame paths in ascending frame-number order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.frames.iter().map(|frame| frame.path.clone()).collect()
    }

    /// Number of frames, saturating at `u32::MAX`.
    pub fn length(&self) -> u32 {
        u32::try_from(self.frames.len()).unwrap_or(u32::MAX)
    }

    /// Returns `true` if the set holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns `true` if the set has enough frames to animate.
    pub fn is_animatable(&self) -> bool {
        self.frames.len() >= 2
    }
}
