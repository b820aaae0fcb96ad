//! Handing a frame list to an external encoder.
//!
//! [`Encoder`] is the seam between frame selection and the tool that actually
//! produces the animation. [`FfmpegEncoder`] runs the `ffmpeg` binary with its
//! concat demuxer, so any container or codec `ffmpeg` infers from the output
//! extension works (`mp4`, `gif`, `webm`, ...).
//!
//! # Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//!
//! use loopreel::{EncodeRequest, Encoder, FfmpegEncoder};
//!
//! let frames = vec![PathBuf::from("/frames/a.0001.png"), PathBuf::from("/frames/a.0002.png")];
//! FfmpegEncoder::new().encode(&EncodeRequest {
//!     subject: "a",
//!     frames: &frames,
//!     output: Path::new("a.gif"),
//!     framerate: 12,
//!     overlay: None,
//! })?;
//! # Ok::<(), loopreel::LoopreelError>(())
//! ```

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use crate::configuration::FrameTextOverlay;
use crate::error::LoopreelError;

/// Everything an encoder needs to produce one animation.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    /// Subject being animated, for diagnostics.
    pub subject: &'a str,
    /// Absolute frame paths in playback order.
    pub frames: &'a [PathBuf],
    /// File to create. Existing files are overwritten.
    pub output: &'a Path,
    /// Playback rate in frames per second.
    pub framerate: u32,
    /// Draw the running frame number on every frame.
    pub overlay: Option<&'a FrameTextOverlay>,
}

/// Produces an animation file from an ordered frame list.
pub trait Encoder {
    /// Encode `request.frames` into `request.output`.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`LoopreelError::EncoderFailure`].
    fn encode(&self, request: &EncodeRequest<'_>) -> Result<(), LoopreelError>;
}

/// Removes a temporary file when dropped.
struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.0.exists() {
            let _ = fs::remove_file(&self.0);
        }
    }
}

/// Encoder backed by the `ffmpeg` command line tool.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegEncoder {
    /// Use `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }

    /// Use a specific `ffmpeg` executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// The executable that will be run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command line arguments for encoding with the concat list at `list`.
    pub fn arguments(&self, list: &Path, request: &EncodeRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-r",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(request.framerate.to_string().into());
        args.extend(["-f", "concat", "-safe", "0", "-i"].map(OsString::from));
        args.push(list.as_os_str().to_os_string());
        if let Some(overlay) = request.overlay {
            args.push("-vf".into());
            args.push(drawtext_filter(overlay).into());
        }
        args.push(request.output.as_os_str().to_os_string());
        args
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, request: &EncodeRequest<'_>) -> Result<(), LoopreelError> {
        let failure = |reason: String| LoopreelError::EncoderFailure {
            output: request.output.to_path_buf(),
            reason,
        };

        if request.frames.is_empty() {
            return Err(failure("no frames to encode".to_string()));
        }

        let mut list_name = request
            .output
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from(request.subject));
        list_name.push(".ffconcat");
        let list_path = request.output.with_file_name(list_name);

        fs::write(&list_path, concat_list(request.frames))
            .map_err(|error| failure(format!("cannot write frame list {}: {error}", list_path.display())))?;
        let _cleanup_guard = CleanupGuard(list_path.clone());

        log::debug!(
            "{}: encoding {} frame(s) at {} fps into {}",
            request.subject,
            request.frames.len(),
            request.framerate,
            request.output.display()
        );

        let status = Command::new(&self.program)
            .args(self.arguments(&list_path, request))
            .status()
            .map_err(|error| failure(format!("cannot run {}: {error}", self.program.display())))?;

        if !status.success() {
            return Err(failure(format!("{} exited with {status}", self.program.display())));
        }
        Ok(())
    }
}

/// An ffconcat script listing `frames` in order.
///
/// Paths are single-quoted; embedded quotes are closed, escaped, and reopened.
pub fn concat_list(frames: &[PathBuf]) -> String {
    let mut list = String::from("ffconcat version 1.0\n");
    for frame in frames {
        let path = frame.to_string_lossy().replace('\'', r"'\''");
        list.push_str(&format!("file '{path}'\n"));
    }
    list
}

/// Backslash-escape every character of `value` found in `special`.
fn escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// The `drawtext` filter stamping `Frame: <n>` in the top-left area.
pub fn drawtext_filter(overlay: &FrameTextOverlay) -> String {
    let mut filter = format!(
        "drawtext=text='Frame\\: %{{frame_num}}':x=w/20:y=0:fontsize={}:fontcolor=black",
        overlay.font_size
    );
    if let Some(font) = &overlay.font_file {
        // Option value escaping first, then filtergraph escaping.
        let value = escape(&font.to_string_lossy(), &['\\', '\'', ':']);
        let value = escape(&value, &['\\', '\'', '[', ']', ',', ';']);
        filter.push_str(":fontfile=");
        filter.push_str(&value);
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_list_quotes_paths() {
        let list = concat_list(&[PathBuf::from("/a/b.0001.png"), PathBuf::from("/a/it's.0002.png")]);
        assert_eq!(
            list,
            "ffconcat version 1.0\nfile '/a/b.0001.png'\nfile '/a/it'\\''s.0002.png'\n"
        );
    }

    #[test]
    fn drawtext_without_font() {
        let filter = drawtext_filter(&FrameTextOverlay::default());
        assert_eq!(
            filter,
            "drawtext=text='Frame\\: %{frame_num}':x=w/20:y=0:fontsize=30:fontcolor=black"
        );
    }

    #[test]
    fn drawtext_escapes_font_path() {
        let overlay = FrameTextOverlay {
            font_file: Some(PathBuf::from("/fonts/a:b.ttf")),
            font_size: 12,
        };
        assert!(drawtext_filter(&overlay).ends_with(":fontfile=/fonts/a\\\\:b.ttf"));
    }
}
