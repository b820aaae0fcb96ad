//! Interactive frame selection integration tests.
//!
//! Sessions are driven directly with `advance` for state transitions, and
//! through `resolve` with a `ScriptedPrompter` for the full dialogue.

use loopreel::{
    CountChoice, FrameSelection, LoopreelError, ResolutionSession, ResolutionState,
    ScriptedPrompter, SelectionProblem, StartCancel, resolve,
};

fn session(length: u32) -> ResolutionSession {
    ResolutionSession::new("sunset", length).expect("Failed to create session")
}

// ── Frame count step ───────────────────────────────────────────────

#[test]
fn session_starts_with_frame_count() {
    let session = session(20);
    assert_eq!(session.state(), ResolutionState::AwaitingFrameCount);
    assert!(!session.is_finished());
    assert!(session.instructions().contains("MAX FRAMES: 20"));
}

#[test]
fn empty_count_selects_remaining_frames() {
    let mut session = session(20);
    assert_eq!(session.advance(""), None);
    assert_eq!(
        session.state(),
        ResolutionState::AwaitingStartFrame {
            count: CountChoice::AllRemaining,
            max_start: 19,
        }
    );
}

#[test]
fn fixed_count_limits_the_start() {
    let mut session = session(20);
    assert_eq!(session.advance("10"), None);
    assert_eq!(
        session.state(),
        ResolutionState::AwaitingStartFrame {
            count: CountChoice::Fixed(10),
            max_start: 11,
        }
    );
}

#[test]
fn invalid_counts_ask_again() {
    let mut session = session(20);

    let message = session.advance("ten").expect("non-numeric count rejected");
    assert!(message.contains("Invalid frame amount"), "{message}");

    let message = session.advance("1").expect("single frame rejected");
    assert_eq!(message, SelectionProblem::SingleFrame.to_string());

    let message = session.advance("21").expect("too many frames rejected");
    assert!(message.contains("Max: 20"), "{message}");

    assert_eq!(session.state(), ResolutionState::AwaitingFrameCount);
}

#[test]
fn signed_numbers_are_not_frame_values() {
    let mut session = session(20);
    for input in ["+5", "-5", "5.0", "1 0"] {
        let message = session.advance(input).expect("signed count rejected");
        assert!(message.contains("Invalid frame amount"), "{input}: {message}");
    }
    assert_eq!(session.state(), ResolutionState::AwaitingFrameCount);

    assert_eq!(session.advance("5"), None);
    let message = session.advance("+3").expect("signed start rejected");
    assert!(message.contains("Invalid starting frame"), "{message}");
    assert_eq!(
        session.state(),
        ResolutionState::AwaitingStartFrame {
            count: CountChoice::Fixed(5),
            max_start: 16,
        }
    );
}

#[test]
fn skip_at_count_cancels() {
    let mut session = session(20);
    assert_eq!(session.advance("s"), None);
    assert_eq!(session.state(), ResolutionState::Cancelled);
    assert!(session.is_finished());
}

// ── Starting frame step ────────────────────────────────────────────

#[test]
fn empty_start_picks_latest_start_for_fixed_count() {
    let mut session = session(20);
    session.advance("10");
    session.advance("");
    assert_eq!(
        session.state(),
        ResolutionState::Resolved(FrameSelection::new(11, 10))
    );
}

#[test]
fn empty_start_with_remaining_frames_uses_everything() {
    let mut session = session(20);
    session.advance("");
    session.advance("");
    assert_eq!(
        session.state(),
        ResolutionState::Resolved(FrameSelection::full(20))
    );
}

#[test]
fn remaining_frames_from_a_start() {
    let mut session = session(20);
    session.advance("");
    assert_eq!(session.advance("19"), None);
    assert_eq!(
        session.state(),
        ResolutionState::Resolved(FrameSelection::new(19, 2))
    );
}

#[test]
fn start_beyond_max_asks_again() {
    let mut session = session(20);
    session.advance("10");

    let message = session.advance("12").expect("start past max rejected");
    assert!(
        message.contains("Cannot render 10 frames from starting image 12"),
        "{message}"
    );
    assert!(session.advance("0").is_some());
    assert!(session.advance("later").is_some());
    assert!(!session.is_finished());

    assert_eq!(session.advance("11"), None);
    assert_eq!(
        session.state(),
        ResolutionState::Resolved(FrameSelection::new(11, 10))
    );
}

#[test]
fn remaining_frames_reject_last_frame_as_start() {
    let mut session = session(20);
    session.advance("");
    assert!(session.advance("20").is_some());
}

#[test]
fn skip_at_start_goes_back_by_default() {
    let mut session = session(20);
    session.advance("10");
    assert_eq!(session.advance("s"), None);
    assert_eq!(session.state(), ResolutionState::AwaitingFrameCount);
}

#[test]
fn skip_at_start_can_cancel() {
    let mut session = session(20).with_start_cancel(StartCancel::Cancel);
    session.advance("10");
    assert_eq!(session.advance("S"), None);
    assert_eq!(session.state(), ResolutionState::Cancelled);
}

#[test]
fn too_short_set_has_no_session() {
    let error = ResolutionSession::new("tiny", 1).unwrap_err();
    assert!(matches!(
        error,
        LoopreelError::SelectionUnsatisfiable {
            problem: SelectionProblem::TooFewFrames { length: 1 },
            ..
        }
    ));
}

// ── Driving a session with a prompter ──────────────────────────────

#[test]
fn resolve_reports_rejections_and_finishes() {
    let mut prompter = ScriptedPrompter::new(["abc", "10", "15", "5"]);
    let selection = resolve(session(20), &mut prompter).unwrap();

    assert_eq!(selection, FrameSelection::new(5, 10));
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(prompter.prompts().len(), 4);

    // Instructions for each step, plus one message per rejected answer.
    let notices = prompter.notices();
    assert_eq!(notices.len(), 4, "{notices:?}");
    assert!(notices[0].contains("MAX FRAMES: 20"));
    assert!(notices[1].contains("Invalid frame amount"));
    assert!(notices[2].contains("MAX #: 11"));
    assert!(notices[3].contains("Cannot render"));
}

#[test]
fn resolve_goes_back_and_reselects() {
    let mut prompter = ScriptedPrompter::new(["10", "s", "4", ""]);
    let selection = resolve(session(20), &mut prompter).unwrap();
    assert_eq!(selection, FrameSelection::new(17, 4));

    let count_instructions = prompter
        .notices()
        .iter()
        .filter(|notice| notice.contains("MAX FRAMES"))
        .count();
    assert_eq!(count_instructions, 2);
}

#[test]
fn resolve_cancel_is_a_cancellation() {
    let mut prompter = ScriptedPrompter::new(["s"]);
    let error = resolve(session(20), &mut prompter).unwrap_err();
    assert!(error.is_cancellation());
    assert!(!error.is_fatal());
    assert_eq!(error.to_string(), "Frame selection cancelled for sunset");
}

#[test]
fn resolve_propagates_missing_input() {
    let mut prompter = ScriptedPrompter::new(["10"]);
    let error = resolve(session(20), &mut prompter).unwrap_err();
    assert!(matches!(error, LoopreelError::IoError(_)));
}

#[test]
fn sessions_do_not_share_answers() {
    let mut prompter = ScriptedPrompter::new(["s", "", ""]);

    let first = resolve(session(20), &mut prompter);
    assert!(first.unwrap_err().is_cancellation());

    let second = resolve(ResolutionSession::new("harbor", 8).unwrap(), &mut prompter).unwrap();
    assert_eq!(second, FrameSelection::full(8));
}
