//! Generic dialogue-response collaborator.
//!
//! Anything that did not match a trigger is forwarded here verbatim. The
//! engine's contract is "most similar known response" and is opaque to the
//! core; this module only knows how to ask.

use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reply given when no dialogue service is configured or the engine has
/// nothing better.
pub const DEFAULT_RESPONSE: &str = "I do not understand your statement. Please try again.";

/// Dialogue-response engine seam.
#[async_trait]
pub trait DialogueEngine: Send + Sync {
    /// Produce a response for one utterance.
    async fn respond(&self, utterance: &str) -> Result<String>;
}

/// Engine that always answers with [`DEFAULT_RESPONSE`].
///
/// Used when no endpoint is configured, so a bare install still converses
/// (poorly) instead of failing every chat turn.
#[derive(Debug, Default)]
pub struct CannedDialogue;

#[async_trait]
impl DialogueEngine for CannedDialogue {
    async fn respond(&self, _utterance: &str) -> Result<String> {
        Ok(DEFAULT_RESPONSE.to_owned())
    }
}

#[derive(Serialize)]
struct RespondRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct RespondReply {
    reply: String,
}

/// Dialogue engine backed by an HTTP service.
///
/// Sends `POST {base_url}/respond` with `{"text": "<utterance>"}` and
/// expects `{"reply": "<response>"}` back.
pub struct HttpDialogueEngine {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDialogueEngine {
    /// Create an engine against the given service base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/respond", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl DialogueEngine for HttpDialogueEngine {
    async fn respond(&self, utterance: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&RespondRequest { text: utterance })
            .send()
            .await
            .map_err(|e| AssistantError::Dialogue(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AssistantError::Dialogue(format!(
                "engine returned {}",
                response.status()
            )));
        }

        let reply: RespondReply = response
            .json()
            .await
            .map_err(|e| AssistantError::Dialogue(format!("bad engine reply: {e}")))?;
        Ok(reply.reply)
    }
}
