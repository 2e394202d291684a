//! Served binary: the assistant behind the local web UI.
//!
//! Binds the configured address, optionally opens the UI in the default
//! browser, and serves until a goodbye utterance signals graceful shutdown.

use std::sync::Arc;
use tracing::warn;
use vai::AssistantConfig;
use vai::dialogue::{CannedDialogue, DialogueEngine, HttpDialogueEngine};
use vai::encyclopedia::WikipediaClient;
use vai::launch::{DesktopOpener, SystemOpener};
use vai::server::{AppState, run_server};
use vai::speech::{NullRecognizer, SilentSynthesizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vai=info")),
        )
        .init();

    let config = AssistantConfig::load_default()?;
    let server_config = config.server.clone();

    let opener = Arc::new(DesktopOpener);
    let dialogue: Box<dyn DialogueEngine> = match &config.dialogue.endpoint {
        Some(endpoint) => Box::new(HttpDialogueEngine::new(endpoint.clone())),
        None => Box::new(CannedDialogue),
    };
    let encyclopedia = Box::new(WikipediaClient::new(config.encyclopedia.base_url.clone()));

    let state = AppState::new(
        config,
        Arc::clone(&opener) as Arc<dyn SystemOpener>,
        dialogue,
        encyclopedia,
        Box::new(NullRecognizer),
        Arc::new(SilentSynthesizer),
    );

    if server_config.open_ui_on_start {
        let ui_url = format!("http://{}:{}/", server_config.host, server_config.port);
        if let Err(e) = opener.open_url(&ui_url) {
            warn!("cannot open UI in browser: {e}");
        }
    }

    run_server(&server_config, state).await
}
