//! Sorting loose frames into subject folders.
//!
//! Image-generation runs drop every frame of every prompt into one directory.
//! [`organize`] moves each `<subject>.<number>.<ext>` file into a
//! `<subject>/` folder next to it and parks everything else in
//! [`UNSORTED_DIR`]. A directory that already holds a single subject's frames
//! (and no folders) is recognised as sorted and left alone.
//!
//! Moves are never rolled back; re-running the sort on a partially sorted
//! directory simply finishes the job.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::LoopreelError;
use crate::frame_set::{is_frame_image, parse_frame_name};
use crate::progress::{OperationType, ProgressCallback, ProgressTracker};

/// Folder that receives images without a frame number.
pub const UNSORTED_DIR: &str = "Unsorted_Files";

/// An image file found by [`scan_images`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// File name including extension.
    pub name: String,
    /// Subject and frame number, or `None` for misc images.
    pub frame: Option<(String, u64)>,
}

impl ScannedFile {
    /// The subject this file belongs to, if it is a numbered frame.
    pub fn subject(&self) -> Option<&str> {
        self.frame.as_ref().map(|(subject, _)| subject.as_str())
    }
}

/// How a scanned directory is laid out after sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryLayout {
    /// The directory itself is one subject's frame folder.
    SortedFolder {
        /// The subject every frame belongs to.
        subject: String,
    },
    /// One folder per subject, sorted by name.
    SubjectFolders(Vec<PathBuf>),
}

/// Result of [`organize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSummary {
    /// Layout after sorting.
    pub layout: DirectoryLayout,
    /// Frames moved into subject folders.
    pub moved: usize,
    /// Images moved into [`UNSORTED_DIR`].
    pub misc: usize,
    /// Files left in place because their destination already existed.
    pub skipped: usize,
    /// Files that could not be moved, in scan order.
    pub failed: Vec<SortFailure>,
}

impl SortSummary {
    fn new(layout: DirectoryLayout) -> Self {
        Self {
            layout,
            moved: 0,
            misc: 0,
            skipped: 0,
            failed: Vec::new(),
        }
    }

    /// The first move failure recorded for `subject`, if any.
    pub fn failure_for(&self, subject: &str) -> Option<&SortFailure> {
        self.failed
            .iter()
            .find(|failure| failure.subject.as_deref() == Some(subject))
    }
}

/// A file [`organize`] could not move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortFailure {
    /// Subject of the file, or `None` for a misc image.
    pub subject: Option<String>,
    /// The file that stayed where it was.
    pub path: PathBuf,
    /// Why the move failed.
    pub reason: String,
}

/// List the PNG and JPEG files directly inside `directory`, sorted by name.
pub fn scan_images(directory: &Path) -> Result<Vec<ScannedFile>, LoopreelError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() || !is_frame_image(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            log::warn!("ignoring non UTF-8 file name {}", path.display());
            continue;
        };
        let frame = parse_frame_name(&name);
        files.push(ScannedFile { path, name, frame });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Subdirectories of `directory` that may hold frame sets, sorted by name.
///
/// [`UNSORTED_DIR`] is excluded.
pub fn subject_folders(directory: &Path) -> Result<Vec<PathBuf>, LoopreelError> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() && path.file_name().is_some_and(|name| name != UNSORTED_DIR) {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}

/// The shared subject when every file is a frame of the same subject.
fn single_subject(files: &[ScannedFile]) -> Option<String> {
    let first = files.first()?.subject()?;
    files
        .iter()
        .all(|file| file.subject() == Some(first))
        .then(|| first.to_string())
}

/// Move `file` into `folder`, creating it as needed.
///
/// Returns `false` without touching anything when a file of the same name is
/// already there.
fn move_into(file: &ScannedFile, folder: &Path) -> Result<bool, LoopreelError> {
    fs::create_dir_all(folder)?;
    let destination = folder.join(&file.name);
    if destination.exists() {
        log::warn!(
            "not moving {}: {} already exists",
            file.path.display(),
            destination.display()
        );
        return Ok(false);
    }
    fs::rename(&file.path, &destination)?;
    Ok(true)
}

/// Sort the images in `directory` into subject folders.
///
/// `progress` receives one [`OperationType::Sorting`] update per file. A file
/// that cannot be moved is logged and recorded in [`SortSummary::failed`];
/// sorting carries on with the rest.
///
/// # Errors
///
/// Fails only if `directory` itself cannot be read.
pub fn organize(
    directory: &Path,
    progress: Arc<dyn ProgressCallback>,
) -> Result<SortSummary, LoopreelError> {
    let files = scan_images(directory)?;
    let folders = subject_folders(directory)?;

    if folders.is_empty() {
        if let Some(subject) = single_subject(&files) {
            log::debug!("{} is already sorted ({subject})", directory.display());
            return Ok(SortSummary::new(DirectoryLayout::SortedFolder { subject }));
        }
    }

    let mut summary = SortSummary::new(DirectoryLayout::SubjectFolders(Vec::new()));
    let mut tracker =
        ProgressTracker::new(progress, OperationType::Sorting, Some(files.len() as u64));

    for file in &files {
        let folder = match file.subject() {
            Some(subject) => directory.join(subject),
            None => {
                log::info!("sorting misc image {}", file.name);
                directory.join(UNSORTED_DIR)
            }
        };
        match move_into(file, &folder) {
            Ok(true) if file.subject().is_some() => summary.moved += 1,
            Ok(true) => summary.misc += 1,
            Ok(false) => summary.skipped += 1,
            Err(error) => {
                log::warn!("could not move {}: {error}", file.path.display());
                summary.failed.push(SortFailure {
                    subject: file.subject().map(str::to_string),
                    path: file.path.clone(),
                    reason: error.to_string(),
                });
            }
        }
        tracker.advance(file.subject());
    }

    summary.layout = DirectoryLayout::SubjectFolders(subject_folders(directory)?);
    log::debug!(
        "sorted {}: {} frame(s), {} misc, {} skipped, {} failed",
        directory.display(),
        summary.moved,
        summary.misc,
        summary.skipped,
        summary.failed.len()
    );
    Ok(summary)
}
