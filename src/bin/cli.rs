//! Terminal binary: the assistant without the web UI.
//!
//! Prompts for the starting acquisition mode, then runs the session loop
//! until a confirmed goodbye. An uncaught action error ends the process,
//! which is this variant's documented error policy.

use std::sync::Arc;
use vai::alarm::AlarmScheduler;
use vai::dialogue::{CannedDialogue, DialogueEngine, HttpDialogueEngine};
use vai::encyclopedia::WikipediaClient;
use vai::launch::{DesktopOpener, SystemOpener};
use vai::session::{LineInput, StdinInput};
use vai::speech::{NullRecognizer, SilentSynthesizer};
use vai::{Assistant, AssistantConfig, Mode, SessionLoop};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vai=info")),
        )
        .init();

    let config = AssistantConfig::load_default()?;

    let mut input = StdinInput;
    let mode = prompt_start_mode(&mut input)?;

    let opener = Arc::new(DesktopOpener);
    let dialogue: Box<dyn DialogueEngine> = match &config.dialogue.endpoint {
        Some(endpoint) => Box::new(HttpDialogueEngine::new(endpoint.clone())),
        None => Box::new(CannedDialogue),
    };
    let encyclopedia = Box::new(WikipediaClient::new(config.encyclopedia.base_url.clone()));
    let alarms = AlarmScheduler::new(
        Arc::clone(&opener) as Arc<dyn SystemOpener>,
        config.resources.media_dir.join(&config.alarm.sound_file),
    );
    let assistant = Assistant::new(config, Box::new(opener), dialogue, encyclopedia);

    let session = SessionLoop::new(
        assistant,
        alarms,
        Box::new(NullRecognizer),
        Box::new(SilentSynthesizer),
        Box::new(input),
        mode,
    );
    session.run().await?;
    Ok(())
}

/// Ask for the starting mode until the answer is 1 (text) or 2 (speech).
fn prompt_start_mode(input: &mut dyn LineInput) -> anyhow::Result<Mode> {
    loop {
        println!("Please input 1 for Text, or 2 for Speech: ");
        let Some(answer) = input.read_line()? else {
            anyhow::bail!("no input for start mode");
        };
        match answer.trim() {
            "1" => return Ok(Mode::Text),
            "2" => return Ok(Mode::Voice),
            _ => println!("Invalid Response..."),
        }
    }
}
