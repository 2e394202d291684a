//! Action execution.
//!
//! [`Assistant`] owns the collaborators and turns a resolved intent into a
//! response. Control-flow actions (mode switches, alarms, the exit path) do
//! not complete here; they surface as [`Reply`] variants so each entry
//! point can apply its own policy: the terminal loop blocks on alarms and
//! runs the exit confirmation, the served handler arms alarms in the
//! background and translates goodbye into a shutdown signal.

use crate::alarm::parse_alarm_hour;
use crate::config::AssistantConfig;
use crate::dialogue::DialogueEngine;
use crate::encyclopedia::Encyclopedia;
use crate::error::{AssistantError, Result};
use crate::launch::{ProgramLauncher, SystemOpener};
use crate::notes::NoteLog;
use crate::registry::Intent;
use crate::session::Mode;
use crate::utterance::strip_note_words;
use chrono::{Datelike, Local};
use tracing::info;

/// Fixed identity response.
pub const IDENTITY_RESPONSE: &str = "I am your virtual desktop assistant Vai, \
feel free to ask me anything. If you need help use the command HELP for options.";

/// Greeting printed and spoken when an interactive session starts.
pub const GREETING: &str =
    "Greetings, I am your Virtual Assistant. How can I be of assistance?";

/// Farewell for a confirmed exit.
pub const FAREWELL: &str = "Goodbye! Until next time.";

/// Outcome of executing one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain response text; the session continues.
    Text(String),
    /// The session should switch acquisition mode, then continue.
    ModeChange {
        /// Mode to switch to.
        mode: Mode,
        /// Response text for the user.
        text: String,
    },
    /// An alarm was requested; the entry point decides whether to await it.
    Alarm {
        /// Target hour of day, already validated to parse (range checking
        /// happens when the scheduler computes the deadline).
        hour: u32,
        /// Confirmation text for the user.
        text: String,
    },
    /// A goodbye trigger fired; the entry point runs its exit policy.
    ExitRequested,
}

/// Executes intents against the collaborator set.
pub struct Assistant {
    config: AssistantConfig,
    notes: NoteLog,
    launcher: ProgramLauncher,
    opener: Box<dyn SystemOpener>,
    dialogue: Box<dyn DialogueEngine>,
    encyclopedia: Box<dyn Encyclopedia>,
}

impl Assistant {
    /// Assemble an assistant from configuration and collaborators.
    pub fn new(
        config: AssistantConfig,
        opener: Box<dyn SystemOpener>,
        dialogue: Box<dyn DialogueEngine>,
        encyclopedia: Box<dyn Encyclopedia>,
    ) -> Self {
        let notes = NoteLog::new(config.resources.note_file.clone());
        let launcher = ProgramLauncher::new(config.resources.paths_dir.clone());
        Self {
            config,
            notes,
            launcher,
            opener,
            dialogue,
            encyclopedia,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Execute one resolved intent for a normalized utterance.
    ///
    /// # Errors
    ///
    /// Propagates collaborator and resource errors; per the error policy
    /// only the caller decides whether that ends the process (terminal) or
    /// becomes a generic server error (served).
    pub async fn execute(&mut self, intent: Intent, utterance: &str) -> Result<Reply> {
        info!("executing {intent:?}");
        match intent {
            Intent::OpenBrowser => self.open_browser(),
            Intent::WebSearch => self.web_search(utterance),
            Intent::DayOfWeek => Ok(Reply::Text(day_phrase(Local::now().date_naive()))),
            Intent::TimeOfDay => {
                let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
                Ok(Reply::Text(clock_phrase(&stamp)))
            }
            Intent::Encyclopedia => self.encyclopedia_lookup(utterance).await,
            Intent::Identity => Ok(Reply::Text(IDENTITY_RESPONSE.to_owned())),
            Intent::TakeNote => self.take_note(utterance),
            Intent::OpenEmail => self.open_email(),
            Intent::SetAlarm => {
                let hour = parse_alarm_hour(utterance)?;
                Ok(Reply::Alarm {
                    hour,
                    text: format!("Setting Alarm for {hour} hours."),
                })
            }
            Intent::LaunchProgram => self.launch_program(utterance),
            Intent::EnableVoice => Ok(Reply::ModeChange {
                mode: Mode::Voice,
                text: "Voice control enabled. Please input any text before speaking \
                       to enable microphone."
                    .to_owned(),
            }),
            Intent::DisableVoice => Ok(Reply::ModeChange {
                mode: Mode::Text,
                text: "Voice control disabled.".to_owned(),
            }),
            Intent::PlayMedia => self.play_media(utterance),
            Intent::Help => self.help(),
            Intent::Goodbye => Ok(Reply::ExitRequested),
            Intent::Chat => {
                let response = self.dialogue.respond(utterance).await?;
                Ok(Reply::Text(response))
            }
        }
    }

    fn open_browser(&self) -> Result<Reply> {
        self.opener.open_url(&self.config.links.home_url)?;
        Ok(Reply::Text("Launching google.com".to_owned()))
    }

    fn web_search(&self, utterance: &str) -> Result<Reply> {
        // Remove every occurrence of the trigger word; the remainder goes
        // onto the search URL verbatim.
        let term = utterance.replace("google", "");
        let url = format!("{}{term}", self.config.links.search_url_prefix);
        self.opener.open_url(&url)?;
        Ok(Reply::Text(format!("Googling: {term}")))
    }

    async fn encyclopedia_lookup(&self, utterance: &str) -> Result<Reply> {
        let term = utterance.replace("wikipedia", "");
        let sentence = self.encyclopedia.summary(&term).await?;
        Ok(Reply::Text(format!("According to wikipedia: {sentence}")))
    }

    fn take_note(&mut self, utterance: &str) -> Result<Reply> {
        let note = strip_note_words(utterance);
        self.notes.append(&note)?;
        Ok(Reply::Text(
            "The note has been recorded and saved in the notes folder in the \
             installation directory."
                .to_owned(),
        ))
    }

    /// Append a dictated note verbatim, skipping the word filter.
    ///
    /// Used by the voice-mode note flow, where the note is acquired in a
    /// second utterance that carries no command words.
    pub fn record_note_verbatim(&mut self, note: &str) -> Result<Reply> {
        self.notes.append(note)?;
        Ok(Reply::Text(
            "The note has been recorded and saved in the notes folder in the \
             installation directory."
                .to_owned(),
        ))
    }

    fn open_email(&self) -> Result<Reply> {
        self.opener.open_url(&self.config.links.webmail_url)?;
        Ok(Reply::Text("Launching Gmail".to_owned()))
    }

    fn launch_program(&self, utterance: &str) -> Result<Reply> {
        let name = utterance.replace("launch program ", "");
        self.launcher.launch(&name)?;
        Ok(Reply::Text(format!("Launching Program: {name}")))
    }

    fn play_media(&self, utterance: &str) -> Result<Reply> {
        let file = format!("{}.mp3", utterance.replace("play ", ""));
        let path = self.config.resources.media_dir.join(&file);
        self.opener.open_path(&path)?;
        Ok(Reply::Text(format!("Playing song labeled: {file}")))
    }

    fn help(&self) -> Result<Reply> {
        let text = std::fs::read_to_string(&self.config.resources.help_file).map_err(|e| {
            AssistantError::Resource(format!(
                "cannot read help text {}: {e}",
                self.config.resources.help_file.display()
            ))
        })?;
        Ok(Reply::Text(text))
    }
}

/// Weekday phrase for a date.
///
/// The mapping key is ISO `weekday() + 1`: Monday is 0-based in the date
/// library, so 1–7 covers Monday through Sunday.
pub fn day_phrase(date: chrono::NaiveDate) -> String {
    let day = match date.weekday().num_days_from_monday() + 1 {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Sunday",
    };
    format!("Today is {day}")
}

/// Clock phrase from an ISO-formatted local timestamp.
///
/// Hour and minute are taken at fixed character offsets of the timestamp
/// string (11–13 and 14–16), ignoring seconds and below.
pub fn clock_phrase(stamp: &str) -> String {
    let hour = stamp.get(11..13).unwrap_or("00");
    let minute = stamp.get(14..16).unwrap_or("00");
    format!("It is {hour} hours and {minute} minutes.")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::registry::ActionRegistry;
    use crate::test_utils::{RecordingOpener, StaticEncyclopedia, scripted_assistant};
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[test]
    fn day_phrase_covers_all_seven_days() {
        // 2024-01-01 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expected = [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ];
        for (offset, day) in expected.iter().enumerate() {
            let date = monday + chrono::Days::new(offset as u64);
            assert_eq!(day_phrase(date), format!("Today is {day}"));
        }
    }

    #[test]
    fn day_phrase_known_wednesday() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(day_phrase(wednesday), "Today is Wednesday");
    }

    #[test]
    fn clock_phrase_uses_fixed_offsets() {
        assert_eq!(
            clock_phrase("2024-01-01 09:05:30.123"),
            "It is 09 hours and 05 minutes."
        );
        assert_eq!(
            clock_phrase("2024-12-31 23:59:59.999"),
            "It is 23 hours and 59 minutes."
        );
    }

    #[tokio::test]
    async fn open_google_opens_home_not_search() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(Arc::clone(&opener));
        let registry = ActionRegistry::standard();

        let utterance = "open google for me please";
        let intent = registry.resolve(utterance);
        let reply = assistant.execute(intent, utterance).await.unwrap();

        assert_eq!(reply, Reply::Text("Launching google.com".to_owned()));
        assert_eq!(opener.opened_urls(), vec!["https://www.google.com".to_owned()]);
    }

    #[tokio::test]
    async fn web_search_strips_every_google_occurrence() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(Arc::clone(&opener));

        let reply = assistant
            .execute(Intent::WebSearch, "google google rust traits")
            .await
            .unwrap();

        let Reply::Text(text) = reply else {
            panic!("expected text reply");
        };
        assert!(!text.replace("Googling", "").contains("google"));
        let urls = opener.opened_urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("https://letmegooglethat.com/?q="));
        assert!(!urls[0].contains("google rust"));
        assert!(urls[0].ends_with("rust traits"));
    }

    #[tokio::test]
    async fn take_note_filters_command_words_only() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, dir) = scripted_assistant(opener);

        assistant
            .execute(Intent::TakeNote, "make a note buy milk")
            .await
            .unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("notes").join("assistant_note.txt")).unwrap();
        assert_eq!(contents, "buy milk\r\n");
    }

    #[tokio::test]
    async fn encyclopedia_reply_is_prefixed() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let reply = assistant
            .execute(Intent::Encyclopedia, "from wikipedia nikola tesla")
            .await
            .unwrap();

        assert_eq!(
            reply,
            Reply::Text(format!(
                "According to wikipedia: {}",
                StaticEncyclopedia::SENTENCE
            ))
        );
    }

    #[tokio::test]
    async fn alarm_request_surfaces_hour_to_the_caller() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let reply = assistant
            .execute(Intent::SetAlarm, "set alarm for 9 hours")
            .await
            .unwrap();

        assert_eq!(
            reply,
            Reply::Alarm {
                hour: 9,
                text: "Setting Alarm for 9 hours.".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn mode_changes_surface_to_the_caller() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let enable = assistant.execute(Intent::EnableVoice, "enable voice").await.unwrap();
        assert!(matches!(enable, Reply::ModeChange { mode: Mode::Voice, .. }));

        let disable = assistant
            .execute(Intent::DisableVoice, "disable voice")
            .await
            .unwrap();
        assert!(matches!(disable, Reply::ModeChange { mode: Mode::Text, .. }));
    }

    #[tokio::test]
    async fn play_media_appends_extension_and_media_dir() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, dir) = scripted_assistant(Arc::clone(&opener));

        let reply = assistant
            .execute(Intent::PlayMedia, "play lateralus")
            .await
            .unwrap();

        assert_eq!(
            reply,
            Reply::Text("Playing song labeled: lateralus.mp3".to_owned())
        );
        let expected = dir
            .path()
            .join("audio")
            .join("lateralus.mp3")
            .display()
            .to_string();
        assert_eq!(opener.opened_paths(), vec![expected]);
    }

    #[tokio::test]
    async fn help_is_idempotent() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let first = assistant.execute(Intent::Help, "help").await.unwrap();
        let second = assistant.execute(Intent::Help, "help").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn goodbye_requests_exit() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let reply = assistant.execute(Intent::Goodbye, "goodbye").await.unwrap();
        assert_eq!(reply, Reply::ExitRequested);
    }

    #[tokio::test]
    async fn chat_forwards_to_the_dialogue_engine() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let reply = assistant
            .execute(Intent::Chat, "how are you today")
            .await
            .unwrap();
        assert_eq!(
            reply,
            Reply::Text(crate::dialogue::DEFAULT_RESPONSE.to_owned())
        );
    }

    #[tokio::test]
    async fn missing_program_path_file_propagates() {
        let opener = Arc::new(RecordingOpener::default());
        let (mut assistant, _dir) = scripted_assistant(opener);

        let err = assistant
            .execute(Intent::LaunchProgram, "launch program ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::Resource(_)));
    }
}
