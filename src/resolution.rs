//! Interactive frame selection.
//!
//! When the requested window is invalid, the user picks a frame count and then
//! a starting frame. [`ResolutionSession`] is that dialogue as a plain state
//! machine fed one line of input at a time, and [`resolve`] drives it through
//! a [`Prompter`].
//!
//! Each frame set gets its own session, so nothing typed for one subject
//! carries over to the next.
//!
//! # Example
//!
//! ```
//! use loopreel::{FrameSelection, ResolutionSession, ScriptedPrompter, resolution::resolve};
//!
//! let session = ResolutionSession::new("sunset", 20)?;
//! // Ten frames, then accept the suggested (latest possible) start.
//! let mut prompter = ScriptedPrompter::new(["10", ""]);
//! let selection = resolve(session, &mut prompter)?;
//! assert_eq!(selection, FrameSelection::new(11, 10));
//! # Ok::<(), loopreel::LoopreelError>(())
//! ```

use std::collections::VecDeque;
use std::io::{Error as IoError, ErrorKind, Result as IoResult};

use crate::error::LoopreelError;
use crate::selection::{FrameSelection, MIN_ANIMATION_FRAMES, SelectionProblem};

/// Input that skips the current step.
pub const SKIP_TOKEN: &str = "s";

/// The "ask the user" capability.
///
/// The terminal implementation lives in the `loopreel` binary; the library
/// ships [`NonInteractive`] (decline everything) and [`ScriptedPrompter`]
/// (replay canned answers).
pub trait Prompter {
    /// Whether a human can answer. Non-interactive prompters make the batch
    /// skip invalid frame sets instead of starting a dialogue.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Ask for one line of free-form input.
    fn input(&mut self, prompt: &str) -> IoResult<String>;

    /// Ask a yes/no question. `default` is the answer for empty input.
    fn confirm(&mut self, question: &str, default: bool) -> IoResult<bool>;

    /// Show a message that needs no answer.
    fn notice(&mut self, message: &str);
}

/// A prompter for unattended runs: declines every question and never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }

    fn input(&mut self, prompt: &str) -> IoResult<String> {
        Err(IoError::new(
            ErrorKind::Unsupported,
            format!("no interactive input available for: {prompt}"),
        ))
    }

    fn confirm(&mut self, question: &str, _default: bool) -> IoResult<bool> {
        log::debug!("declining without input: {question}");
        Ok(false)
    }

    fn notice(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// Replays a fixed list of answers, in order, to both [`Prompter::input`] and
/// [`Prompter::confirm`].
///
/// Confirmations accept `y`/`yes` and `n`/`no` (any case); an empty answer
/// takes the question's default. Running out of answers is an
/// [`ErrorKind::UnexpectedEof`] error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that answers with `answers`.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Every prompt and question asked so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every notice shown so far.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> IoResult<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            IoError::new(
                ErrorKind::UnexpectedEof,
                format!("no scripted answer left for: {prompt}"),
            )
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> IoResult<String> {
        self.next_answer(prompt)
    }

    fn confirm(&mut self, question: &str, default: bool) -> IoResult<bool> {
        let answer = self.next_answer(question)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(IoError::new(
                ErrorKind::InvalidInput,
                format!("not a yes/no answer: {other:?}"),
            )),
        }
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// What to do when the user skips the starting-frame question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartCancel {
    /// Return to the frame count question.
    #[default]
    GoBack,
    /// Abandon this frame set.
    Cancel,
}

/// The frame count chosen in the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountChoice {
    /// Every frame from the chosen start to the last frame.
    AllRemaining,
    /// Exactly this many frames.
    Fixed(u32),
}

/// Where a [`ResolutionSession`] currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Waiting for the number of frames.
    AwaitingFrameCount,
    /// Waiting for the starting frame, which may be at most `max_start`.
    AwaitingStartFrame {
        /// Frame count picked in the previous step.
        count: CountChoice,
        /// Highest start that still fits the window.
        max_start: u32,
    },
    /// A valid selection was made.
    Resolved(FrameSelection),
    /// The user skipped this frame set.
    Cancelled,
}

/// One subject's frame selection dialogue.
#[derive(Debug, Clone)]
pub struct ResolutionSession {
    subject: String,
    length: u32,
    state: ResolutionState,
    on_start_cancel: StartCancel,
}

impl ResolutionSession {
    /// Start a dialogue for `subject`, which has `length` frames.
    ///
    /// # Errors
    ///
    /// Fails with [`LoopreelError::SelectionUnsatisfiable`] when the set has
    /// fewer than two frames, since no answer could make it animatable.
    pub fn new(subject: impl Into<String>, length: u32) -> Result<Self, LoopreelError> {
        let subject = subject.into();
        if length < MIN_ANIMATION_FRAMES {
            return Err(LoopreelError::SelectionUnsatisfiable {
                subject,
                problem: SelectionProblem::TooFewFrames { length },
            });
        }
        Ok(Self {
            subject,
            length,
            state: ResolutionState::AwaitingFrameCount,
            on_start_cancel: StartCancel::default(),
        })
    }

    /// Choose what skipping the starting frame does.
    #[must_use]
    pub fn with_start_cancel(mut self, on_start_cancel: StartCancel) -> Self {
        self.on_start_cancel = on_start_cancel;
        self
    }

    /// The subject being resolved.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Frames available.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Current state.
    pub fn state(&self) -> ResolutionState {
        self.state
    }

    /// Returns `true` once the session is resolved or cancelled.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            ResolutionState::Resolved(_) | ResolutionState::Cancelled
        )
    }

    /// Text explaining the current question, shown before prompting.
    pub fn instructions(&self) -> String {
        match self.state {
            ResolutionState::AwaitingFrameCount => format!(
                "{}: enter new frame amount (MAX FRAMES: {})\n(Entering nothing selects max frames | Enter '{SKIP_TOKEN}' to skip animation)",
                self.subject, self.length
            ),
            ResolutionState::AwaitingStartFrame { count, max_start } => {
                let tip = match count {
                    CountChoice::AllRemaining => "Entering nothing uses all frames.",
                    CountChoice::Fixed(_) => {
                        "Entering nothing sets starting frame as high as possible."
                    }
                };
                let back = match self.on_start_cancel {
                    StartCancel::GoBack => "go back to set frame amount",
                    StartCancel::Cancel => "skip animation",
                };
                format!(
                    "Select starting frame (MAX #: {max_start})\n({tip} | Enter '{SKIP_TOKEN}' to {back})"
                )
            }
            ResolutionState::Resolved(selection) => format!("{}: {selection}", self.subject),
            ResolutionState::Cancelled => format!("{}: skipped", self.subject),
        }
    }

    /// The one-line prompt for the current question.
    pub fn prompt(&self) -> &'static str {
        match self.state {
            ResolutionState::AwaitingFrameCount => "Enter amount of frames",
            ResolutionState::AwaitingStartFrame { .. } => "Enter starting frame selection",
            ResolutionState::Resolved(_) | ResolutionState::Cancelled => "",
        }
    }

    /// Feed one line of input.
    ///
    /// Returns a message to show the user when the input was rejected and the
    /// question is asked again. Input after the session finished is ignored.
    pub fn advance(&mut self, input: &str) -> Option<String> {
        let input = input.trim();
        match self.state {
            ResolutionState::AwaitingFrameCount => self.advance_frame_count(input),
            ResolutionState::AwaitingStartFrame { count, max_start } => {
                self.advance_start_frame(input, count, max_start)
            }
            ResolutionState::Resolved(_) | ResolutionState::Cancelled => None,
        }
    }

    fn advance_frame_count(&mut self, input: &str) -> Option<String> {
        if input.is_empty() {
            self.state = ResolutionState::AwaitingStartFrame {
                count: CountChoice::AllRemaining,
                max_start: self.length - 1,
            };
            return None;
        }
        if input.eq_ignore_ascii_case(SKIP_TOKEN) {
            self.state = ResolutionState::Cancelled;
            return None;
        }

        let Some(frames) = parse_number(input) else {
            return Some(format!("Invalid frame amount: {input:?}"));
        };
        if frames < MIN_ANIMATION_FRAMES {
            return Some(SelectionProblem::SingleFrame.to_string());
        }
        if frames > self.length {
            return Some(format!("Too many frames selected. (Max: {})", self.length));
        }

        self.state = ResolutionState::AwaitingStartFrame {
            count: CountChoice::Fixed(frames),
            max_start: self.length - frames + 1,
        };
        None
    }

    fn advance_start_frame(
        &mut self,
        input: &str,
        count: CountChoice,
        max_start: u32,
    ) -> Option<String> {
        if input.is_empty() {
            let start = match count {
                CountChoice::AllRemaining => 1,
                CountChoice::Fixed(_) => max_start,
            };
            self.finish(start, count);
            return None;
        }
        if input.eq_ignore_ascii_case(SKIP_TOKEN) {
            self.state = match self.on_start_cancel {
                StartCancel::GoBack => ResolutionState::AwaitingFrameCount,
                StartCancel::Cancel => ResolutionState::Cancelled,
            };
            return None;
        }

        let Some(start) = parse_number(input) else {
            return Some(format!("Invalid starting frame: {input:?}"));
        };
        if start < 1 {
            return Some("Invalid starting frame.".to_string());
        }
        if start > max_start {
            let frames = match count {
                CountChoice::AllRemaining => self.length.saturating_sub(start) + 1,
                CountChoice::Fixed(frames) => frames,
            };
            return Some(format!(
                "{} Error: Cannot render {frames} frames from starting image {start} (Image amount: {}, max start: {max_start})",
                self.subject, self.length
            ));
        }

        self.finish(start, count);
        None
    }

    fn finish(&mut self, start: u32, count: CountChoice) {
        let frames = match count {
            CountChoice::AllRemaining => self.length - start + 1,
            CountChoice::Fixed(frames) => frames,
        };
        self.state = ResolutionState::Resolved(FrameSelection::new(start, frames));
    }
}

/// A plain run of ASCII digits. Signs and whitespace are rejected.
fn parse_number(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Run `session` to completion, asking `prompter` for every answer.
///
/// # Errors
///
/// Returns [`LoopreelError::UserCancelled`] if the user skips the frame set,
/// and [`LoopreelError::IoError`] if the prompter cannot read input.
pub fn resolve(
    mut session: ResolutionSession,
    prompter: &mut dyn Prompter,
) -> Result<FrameSelection, LoopreelError> {
    let mut shown = None;
    loop {
        match session.state() {
            ResolutionState::Resolved(selection) => {
                log::debug!("{}: resolved {selection}", session.subject());
                return Ok(selection);
            }
            ResolutionState::Cancelled => {
                return Err(LoopreelError::UserCancelled {
                    subject: session.subject().to_string(),
                });
            }
            state => {
                if shown != Some(state) {
                    prompter.notice(&session.instructions());
                    shown = Some(state);
                }
                let answer = prompter.input(session.prompt())?;
                if let Some(message) = session.advance(&answer) {
                    prompter.notice(&message);
                }
            }
        }
    }
}
