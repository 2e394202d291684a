//! Shared test fakes for the collaborator seams.
//!
//! Consolidates helpers used by the `actions`, `alarm`, and `session`
//! test modules.

use crate::actions::Assistant;
use crate::config::AssistantConfig;
use crate::dialogue::CannedDialogue;
use crate::encyclopedia::Encyclopedia;
use crate::error::Result;
use crate::launch::SystemOpener;
use crate::speech::{SpeechRecognizer, SpeechSynthesizer};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// [`SystemOpener`] that records every request instead of touching the OS.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    urls: Mutex<Vec<String>>,
    paths: Mutex<Vec<String>>,
}

impl RecordingOpener {
    /// URLs opened so far, in order.
    pub fn opened_urls(&self) -> Vec<String> {
        self.urls.lock().expect("urls lock").clone()
    }

    /// Paths opened so far, in order.
    pub fn opened_paths(&self) -> Vec<String> {
        self.paths.lock().expect("paths lock").clone()
    }
}

impl SystemOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        self.urls.lock().expect("urls lock").push(url.to_owned());
        Ok(())
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        self.paths
            .lock()
            .expect("paths lock")
            .push(path.display().to_string());
        Ok(())
    }
}

/// Opener adapter so tests can hold the recording half while the assistant
/// owns a boxed handle to the same state.
#[derive(Debug, Clone)]
pub struct SharedOpener(pub Arc<RecordingOpener>);

impl SystemOpener for SharedOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        self.0.open_url(url)
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        self.0.open_path(path)
    }
}

/// Encyclopedia fake with one fixed answer.
#[derive(Debug, Default)]
pub struct StaticEncyclopedia;

impl StaticEncyclopedia {
    /// The sentence returned for every term.
    pub const SENTENCE: &'static str =
        "Nikola Tesla was a Serbian-American inventor and electrical engineer.";
}

#[async_trait]
impl Encyclopedia for StaticEncyclopedia {
    async fn summary(&self, _term: &str) -> Result<String> {
        Ok(Self::SENTENCE.to_owned())
    }
}

/// Recognizer that replays a fixed script of utterances.
#[derive(Debug)]
pub struct ScriptedRecognizer {
    script: Vec<String>,
    next: usize,
}

impl ScriptedRecognizer {
    /// Create a recognizer that yields `script` entries in order, then the
    /// recognition-failure sentinel forever.
    pub fn new(script: &[&str]) -> Self {
        Self {
            script: script.iter().map(|s| (*s).to_owned()).collect(),
            next: 0,
        }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen(&mut self) -> Result<String> {
        let utterance = self
            .script
            .get(self.next)
            .cloned()
            .unwrap_or_else(|| crate::utterance::NO_RESULT.to_owned());
        self.next += 1;
        Ok(utterance)
    }
}

/// Synthesizer that records everything it was asked to speak.
#[derive(Debug, Default, Clone)]
pub struct RecordingSynthesizer {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSynthesizer {
    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().expect("spoken lock").clone()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str) {
        self.spoken.lock().expect("spoken lock").push(text.to_owned());
    }
}

/// Build an assistant over a temp directory with all collaborators faked.
///
/// The directory holds the note log, paths dir, media dir, and a help file
/// with [`HELP_TEXT`]; it must outlive the assistant, so it is returned.
pub fn scripted_assistant(opener: Arc<RecordingOpener>) -> (Assistant, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = AssistantConfig::default();
    config.resources.note_file = dir.path().join("notes").join("assistant_note.txt");
    config.resources.paths_dir = dir.path().join("paths");
    config.resources.media_dir = dir.path().join("audio");
    config.resources.help_file = dir.path().join("help.txt");
    std::fs::write(&config.resources.help_file, HELP_TEXT).expect("write help");

    let assistant = Assistant::new(
        config,
        Box::new(SharedOpener(opener)),
        Box::new(CannedDialogue),
        Box::new(StaticEncyclopedia),
    );
    (assistant, dir)
}

/// Help text written into scripted-assistant fixtures.
pub const HELP_TEXT: &str = "Commands: open google, google <term>, what day is it, \
what time is it, from wikipedia <term>, who are you, make a note <text>, \
open email, set alarm for <N> hours, launch program <name>, enable voice, \
disable voice, play <name>, help, goodbye.\n";
