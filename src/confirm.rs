//! Exit confirmation state machine.
//!
//! Guarding the goodbye path: the user must answer a yes/no prompt before
//! the session ends. Invalid answers re-prompt and reset the attempt
//! counter (the literal retry policy, reproduced rather than improved), so
//! a distracted user can never be logged out by typos. Exhausting the slot
//! budget (or the answer source) cancels the shutdown; cancellation, not
//! exit, is the safe default.

use crate::session::Mode;

/// Answer slots before the flow gives up and cancels.
pub const MAX_ANSWER_SLOTS: u32 = 5;

/// Decisive result of a confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The user confirmed: end the session.
    Confirmed,
    /// The user canceled (explicitly, or by exhausting the flow).
    Canceled,
}

/// Internal machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingAnswer,
    Confirmed,
    Canceled,
}

/// Bounded-retry yes/no state machine.
///
/// The accepted tokens depend on the acquisition mode: typed sessions
/// answer `y`/`n` (input is normalized before it reaches the flow), spoken
/// sessions answer `yes`/`no`.
#[derive(Debug)]
pub struct ConfirmationFlow {
    affirmative: &'static str,
    negative: &'static str,
    state: State,
    slots_used: u32,
}

impl ConfirmationFlow {
    /// Create a flow with the answer tokens for `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        let (affirmative, negative) = match mode {
            Mode::Text => ("y", "n"),
            Mode::Voice => ("yes", "no"),
        };
        Self {
            affirmative,
            negative,
            state: State::AwaitingAnswer,
            slots_used: 0,
        }
    }

    /// The prompt shown (and spoken) when the flow starts or re-prompts.
    pub fn prompt(&self) -> &'static str {
        "Are you sure you want to say Goodbye? Please input Y to confirm, or N to cancel: "
    }

    /// Feedback for an answer that was neither token.
    pub fn invalid_notice(&self) -> &'static str {
        "Invalid Input Received, Please Try Again (Y/N): "
    }

    /// Offer one normalized answer to the machine.
    ///
    /// Returns the decisive outcome, or `None` while the machine keeps
    /// waiting. An invalid answer resets the slot counter to zero; it does
    /// not count against the budget. If [`MAX_ANSWER_SLOTS`] slots are ever
    /// consumed without a decision the flow ends as `Canceled`.
    pub fn offer(&mut self, answer: &str) -> Option<ConfirmOutcome> {
        debug_assert_eq!(self.state, State::AwaitingAnswer);

        // Budget backstop, checked at acquisition time like the original
        // loop bound. Resets below keep it from tripping on invalid input.
        if self.slots_used >= MAX_ANSWER_SLOTS {
            self.state = State::Canceled;
            return Some(ConfirmOutcome::Canceled);
        }
        self.slots_used += 1;

        if answer == self.affirmative {
            self.state = State::Confirmed;
            return Some(ConfirmOutcome::Confirmed);
        }
        if answer == self.negative {
            self.state = State::Canceled;
            return Some(ConfirmOutcome::Canceled);
        }

        // Invalid answer: stay in AwaitingAnswer, restart the budget.
        self.slots_used = 0;
        None
    }

    /// Drive the machine to a decision with an answer source.
    ///
    /// `acquire` yields one normalized answer per call, or `None` when the
    /// source is exhausted (EOF), which cancels. `notify` receives the
    /// re-prompt text after each invalid answer.
    pub fn run_with(
        mut self,
        mut acquire: impl FnMut() -> Option<String>,
        mut notify: impl FnMut(&str),
    ) -> ConfirmOutcome {
        loop {
            let Some(answer) = acquire() else {
                return ConfirmOutcome::Canceled;
            };
            match self.offer(&answer) {
                Some(outcome) => return outcome,
                None => notify(self.invalid_notice()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn affirmative_confirms_immediately() {
        let mut flow = ConfirmationFlow::for_mode(Mode::Text);
        assert_eq!(flow.offer("y"), Some(ConfirmOutcome::Confirmed));
    }

    #[test]
    fn negative_cancels_immediately() {
        let mut flow = ConfirmationFlow::for_mode(Mode::Text);
        assert_eq!(flow.offer("n"), Some(ConfirmOutcome::Canceled));
    }

    #[test]
    fn voice_mode_uses_spoken_tokens() {
        let mut flow = ConfirmationFlow::for_mode(Mode::Voice);
        assert_eq!(flow.offer("y"), None);
        assert_eq!(flow.offer("yes"), Some(ConfirmOutcome::Confirmed));

        let mut flow = ConfirmationFlow::for_mode(Mode::Voice);
        assert_eq!(flow.offer("no"), Some(ConfirmOutcome::Canceled));
    }

    #[test]
    fn invalid_answers_reset_the_budget() {
        // Five invalid answers in a row, then an affirmative: the resets
        // keep the budget from ever being exceeded, so the flow confirms.
        let mut flow = ConfirmationFlow::for_mode(Mode::Text);
        for _ in 0..5 {
            assert_eq!(flow.offer("maybe"), None);
        }
        assert_eq!(flow.offer("y"), Some(ConfirmOutcome::Confirmed));
    }

    #[test]
    fn run_with_replays_prompt_on_invalid() {
        let answers = vec!["what", "huh", "y"];
        let mut iter = answers.into_iter();
        let mut notices = 0;
        let outcome = ConfirmationFlow::for_mode(Mode::Text).run_with(
            || iter.next().map(str::to_owned),
            |_| notices += 1,
        );
        assert_eq!(outcome, ConfirmOutcome::Confirmed);
        assert_eq!(notices, 2);
    }

    #[test]
    fn exhausted_answer_source_cancels() {
        let outcome =
            ConfirmationFlow::for_mode(Mode::Text).run_with(|| None, |_| {});
        assert_eq!(outcome, ConfirmOutcome::Canceled);
    }
}
