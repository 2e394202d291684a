//! Terminal session control loop.
//!
//! One iteration per utterance: read the acquisition mode, pull one
//! utterance from the matching source, resolve it against the trigger
//! table, execute, and decide whether to continue, confirm an exit, or
//! stop. The loop owns the only alarm await in this variant, so at most
//! one blocking alarm call can ever be outstanding.

use crate::actions::{Assistant, FAREWELL, GREETING, Reply};
use crate::alarm::AlarmScheduler;
use crate::confirm::{ConfirmOutcome, ConfirmationFlow};
use crate::error::Result;
use crate::registry::{ActionRegistry, Intent};
use crate::speech::{SpeechRecognizer, SpeechSynthesizer};
use crate::utterance::normalize;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Utterance acquisition mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Read typed lines.
    #[default]
    Text,
    /// Ask the speech recognizer.
    Voice,
}

/// Source of typed input lines.
pub trait LineInput: Send {
    /// Read one line, `None` on end of input.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reader fails.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// [`LineInput`] over stdin.
#[derive(Debug, Default)]
pub struct StdinInput;

impl LineInput for StdinInput {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// The terminal-variant control loop.
pub struct SessionLoop {
    assistant: Assistant,
    registry: ActionRegistry,
    alarms: AlarmScheduler,
    recognizer: Box<dyn SpeechRecognizer>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    input: Box<dyn LineInput>,
    mode: Mode,
}

impl SessionLoop {
    /// Assemble a session starting in `mode`.
    pub fn new(
        assistant: Assistant,
        alarms: AlarmScheduler,
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        input: Box<dyn LineInput>,
        mode: Mode,
    ) -> Self {
        Self {
            assistant,
            registry: ActionRegistry::standard(),
            alarms,
            recognizer,
            synthesizer,
            input,
            mode,
        }
    }

    /// Run until a confirmed goodbye or end of input.
    ///
    /// # Errors
    ///
    /// Propagates the first action or acquisition error; in this variant an
    /// uncaught error ends the process.
    pub async fn run(mut self) -> Result<()> {
        self.emit(GREETING);

        loop {
            // Mode is read once per iteration; a mode-change action takes
            // effect at the next acquisition.
            let Some(raw) = self.acquire().await? else {
                info!("input exhausted, session over");
                return Ok(());
            };
            let utterance = normalize(&raw);
            if utterance.is_empty() {
                continue;
            }

            let intent = self.registry.resolve(&utterance);
            debug!("resolved {intent:?} for utterance");

            // Voice-mode notes are dictated in a second utterance and
            // recorded verbatim, without the command-word filter.
            if intent == Intent::TakeNote && self.mode == Mode::Voice {
                self.dictate_note().await?;
                continue;
            }

            match self.assistant.execute(intent, &utterance).await? {
                Reply::Text(text) => self.emit(&text),
                Reply::ModeChange { mode, text } => {
                    self.mode = mode;
                    self.emit(&text);
                }
                Reply::Alarm { hour, text } => {
                    // Blocking contract: this loop waits out the alarm, so
                    // at most one can be outstanding per session.
                    let handle = self.alarms.schedule(hour)?;
                    handle.wait().await;
                    self.emit(&text);
                }
                Reply::ExitRequested => match self.confirm_exit().await? {
                    ConfirmOutcome::Confirmed => {
                        self.emit(FAREWELL);
                        return Ok(());
                    }
                    ConfirmOutcome::Canceled => {
                        self.emit("Shutdown Request Canceled.");
                    }
                },
            }
        }
    }

    /// Pull one raw utterance from the mode's source.
    async fn acquire(&mut self) -> Result<Option<String>> {
        match self.mode {
            Mode::Text => self.input.read_line(),
            Mode::Voice => self.recognizer.listen().await.map(Some),
        }
    }

    /// Drive the exit confirmation to a decision.
    async fn confirm_exit(&mut self) -> Result<ConfirmOutcome> {
        let mut flow = ConfirmationFlow::for_mode(self.mode);
        self.emit(flow.prompt());

        loop {
            let Some(answer) = self.acquire().await? else {
                // Exhausted input never exits silently; cancel instead.
                return Ok(ConfirmOutcome::Canceled);
            };
            match flow.offer(&normalize(&answer)) {
                Some(outcome) => return Ok(outcome),
                None => self.emit(flow.invalid_notice()),
            }
        }
    }

    /// Voice-mode note flow: prompt, listen once, record verbatim.
    async fn dictate_note(&mut self) -> Result<()> {
        self.emit("What would you like me to make note of?");
        let dictated = normalize(&self.recognizer.listen().await?);
        if let Reply::Text(text) = self.assistant.record_note_verbatim(&dictated)? {
            self.emit(&text);
        }
        Ok(())
    }

    /// Print a response and hand it to the synthesizer.
    fn emit(&self, text: &str) {
        println!("{text}");
        self.synthesizer.speak(text);
    }
}
