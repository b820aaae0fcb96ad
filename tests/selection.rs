//! Frame selection integration tests.
//!
//! These tests cover default filling, the validity boundaries of a window,
//! and the cases that need the user's help.

use loopreel::{
    FrameSelection, NeedsResolution, SelectionProblem, selection::resolve_defaults, validate,
};

// ── Defaults ───────────────────────────────────────────────────────

#[test]
fn no_values_selects_everything() {
    for length in 2..=64 {
        assert_eq!(validate(length, None, None), Ok(FrameSelection::new(1, length)));
    }
}

#[test]
fn count_only_anchors_to_the_end() {
    let selection = validate(20, None, Some(10)).unwrap();
    assert_eq!(selection, FrameSelection::new(11, 10));
    assert_eq!(selection.end(), 20);
}

#[test]
fn start_only_runs_to_the_last_frame() {
    let selection = validate(20, Some(5), None).unwrap();
    assert_eq!(selection, FrameSelection::new(5, 16));
    assert_eq!(selection.end(), 20);
}

#[test]
fn start_on_last_frame_leaves_a_single_frame() {
    assert_eq!(
        validate(20, Some(20), None),
        Err(NeedsResolution::Unsatisfiable(SelectionProblem::SingleFrame))
    );
}

#[test]
fn resolve_defaults_does_not_validate() {
    assert_eq!(resolve_defaults(10, None, Some(4)), (7, 4));
    assert_eq!(resolve_defaults(10, Some(12), None), (12, -1));
    assert_eq!(resolve_defaults(10, Some(3), Some(40)), (3, 40));
}

// ── Explicit windows ───────────────────────────────────────────────

#[test]
fn explicit_window_inside_the_set() {
    assert_eq!(validate(20, Some(5), Some(10)), Ok(FrameSelection::new(5, 10)));
}

#[test]
fn window_ending_on_last_frame_is_valid() {
    assert_eq!(validate(20, Some(11), Some(10)), Ok(FrameSelection::new(11, 10)));
}

#[test]
fn window_running_past_the_end() {
    assert_eq!(
        validate(20, Some(12), Some(10)),
        Err(NeedsResolution::Unsatisfiable(SelectionProblem::WindowOverrun {
            start: 12,
            count: 10,
            length: 20,
        }))
    );
}

#[test]
fn start_past_the_end() {
    assert_eq!(
        validate(20, Some(21), Some(2)),
        Err(NeedsResolution::Unsatisfiable(SelectionProblem::StartBeyondEnd {
            start: 21,
            length: 20,
        }))
    );
}

#[test]
fn single_frame_window_is_rejected() {
    assert_eq!(
        validate(20, Some(3), Some(1)),
        Err(NeedsResolution::Unsatisfiable(SelectionProblem::SingleFrame))
    );
}

#[test]
fn two_frame_window_is_the_minimum() {
    assert_eq!(validate(2, None, None), Ok(FrameSelection::full(2)));
    assert_eq!(validate(20, Some(19), Some(2)), Ok(FrameSelection::new(19, 2)));
}

// ── Frame counts at or above the length ────────────────────────────

#[test]
fn last_frame_pair_is_not_clamped_into_range() {
    assert_eq!(
        validate(5, Some(5), Some(2)),
        Err(NeedsResolution::Unsatisfiable(SelectionProblem::WindowOverrun {
            start: 5,
            count: 2,
            length: 5,
        }))
    );
}

#[test]
fn count_above_length_is_unsatisfiable() {
    assert_eq!(
        validate(20, None, Some(21)),
        Err(NeedsResolution::Unsatisfiable(SelectionProblem::TooManyFrames {
            requested: 21,
            length: 20,
        }))
    );
}

#[test]
fn count_equal_to_length_from_the_start_is_the_full_range() {
    assert_eq!(validate(20, None, Some(20)), Ok(FrameSelection::full(20)));
    assert_eq!(validate(20, Some(1), Some(20)), Ok(FrameSelection::full(20)));
    assert_eq!(validate(10, None, Some(10)), Ok(FrameSelection::new(1, 10)));
}

#[test]
fn count_equal_to_length_from_a_later_start_needs_confirmation() {
    let needs = validate(20, Some(4), Some(20)).unwrap_err();
    assert_eq!(
        needs,
        NeedsResolution::ConfirmFullRange {
            requested: 20,
            length: 20,
        }
    );
    assert_eq!(
        needs.problem(),
        SelectionProblem::TooManyFrames {
            requested: 20,
            length: 20,
        }
    );
}

// ── Short frame sets ───────────────────────────────────────────────

#[test]
fn sets_shorter_than_two_frames_cannot_animate() {
    for length in [0, 1] {
        assert_eq!(
            validate(length, None, None),
            Err(NeedsResolution::Unsatisfiable(SelectionProblem::TooFewFrames { length }))
        );
    }
}

// ── Properties ─────────────────────────────────────────────────────

#[test]
fn every_accepted_selection_fits_its_set() {
    for length in 0..=12 {
        let choices = std::iter::once(None).chain((0..=14).map(Some));
        for start in choices.clone() {
            for count in choices.clone() {
                if let Ok(selection) = validate(length, start, count) {
                    assert!(
                        selection.is_valid_for(length),
                        "{selection} invalid for {length} (start {start:?}, count {count:?})"
                    );
                    assert!(selection.start >= 1);
                    assert!(selection.count >= 2);
                    assert!(selection.end() <= length);
                }
            }
        }
    }
}

#[test]
fn selection_display_is_inclusive() {
    assert_eq!(
        FrameSelection::new(5, 10).to_string(),
        "frames 5..=14 (10 total)"
    );
}
