//! Turning a selection into the ordered frame list handed to the encoder.
//!
//! The window is the selected slice of a frame set. Reversal applies to that
//! slice only, and mirroring appends the slice played backwards without
//! repeating its two end frames, so the animation loops seamlessly.
//!
//! # Example
//!
//! ```
//! use loopreel::{FrameSelection, WindowOrder, window::extract_window};
//!
//! let frames = ["a", "b", "c", "d", "e"];
//! let order = WindowOrder { reverse: false, mirror: true };
//! let window = extract_window(&frames, FrameSelection::new(2, 3), order);
//! assert_eq!(window, ["b", "c", "d", "c"]);
//! ```

use crate::selection::FrameSelection;

/// How the selected frames are ordered for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowOrder {
    /// Play the window backwards.
    pub reverse: bool,
    /// Append the window backwards (minus both ends) for a ping-pong loop.
    pub mirror: bool,
}

/// Slice `frames` by a 1-based `selection` and apply `order`.
///
/// The selection is clamped to the available frames, so a selection that was
/// validated against `frames.len()` always yields exactly `count` frames
/// before mirroring.
pub fn extract_window<T: Clone>(frames: &[T], selection: FrameSelection, order: WindowOrder) -> Vec<T> {
    let start = (selection.start.max(1) as usize - 1).min(frames.len());
    let end = start.saturating_add(selection.count as usize).min(frames.len());

    let mut window = frames[start..end].to_vec();
    if order.reverse {
        window.reverse();
    }
    if order.mirror {
        window = mirror(&window);
    }
    window
}

/// `window` followed by its reverse without the first and last element.
///
/// Windows shorter than three frames have no interior, so they are returned
/// unchanged.
pub fn mirror<T: Clone>(window: &[T]) -> Vec<T> {
    let mut mirrored = window.to_vec();
    if window.len() > 2 {
        mirrored.extend(window[1..window.len() - 1].iter().rev().cloned());
    }
    mirrored
}
