//! Output locations and file names.
//!
//! Animations land in `<output root>/<source>_<file type>_output/`. Names are
//! never reused: [`unique_path`] appends `(1)`, `(2)`, ... until it finds a
//! free one.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::error::LoopreelError;
use crate::selection::FrameSelection;

/// Suffix of the frame-number overlay animation's stem.
pub const FRAME_TEXT_SUFFIX: &str = "_frameText";

/// Name of the output folder for frames scanned from `source_name`.
pub fn output_folder_name(source_name: &str, file_type: &str) -> String {
    format!("{source_name}_{file_type}_output")
}

/// Best-effort display name of `directory`, used to name its output folder.
///
/// Falls back to the working directory's name for paths such as `.` or `/`
/// that have none.
pub fn source_name(directory: &Path) -> String {
    fs::canonicalize(directory)
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .or_else(|| {
            env::current_dir()
                .ok()
                .and_then(|cwd| cwd.file_name().map(|name| name.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "frames".to_string())
}

/// Create `path` and its parents.
///
/// # Errors
///
/// Returns [`LoopreelError::OutputDirectory`], which aborts the whole batch.
pub fn ensure_directory(path: &Path) -> Result<(), LoopreelError> {
    if path.is_dir() {
        return Ok(());
    }
    log::info!("creating output folder {}", path.display());
    fs::create_dir_all(path).map_err(|error| LoopreelError::OutputDirectory {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

/// File stem of a subject's animation.
///
/// With `annotate`, the selection and framerate are appended, e.g.
/// `sunset(sf5_f10_fr14)`.
pub fn animation_stem(
    subject: &str,
    selection: FrameSelection,
    framerate: u32,
    annotate: bool,
) -> String {
    if annotate {
        format!(
            "{subject}(sf{}_f{}_fr{framerate})",
            selection.start, selection.count
        )
    } else {
        subject.to_string()
    }
}

/// A path in `directory` named `stem.extension` that does not exist yet.
///
/// Tries `stem.extension`, then `stem(1).extension`, `stem(2).extension`, and
/// so on.
pub fn unique_path(directory: &Path, stem: &str, extension: &str) -> Result<PathBuf, LoopreelError> {
    for counter in 0..=u32::MAX {
        let name = if counter == 0 {
            format!("{stem}.{extension}")
        } else {
            format!("{stem}({counter}).{extension}")
        };
        let candidate = directory.join(name);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(LoopreelError::IoError(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("no free file name for {stem}.{extension} in {}", directory.display()),
    )))
}
