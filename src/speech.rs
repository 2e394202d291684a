//! Speech collaborator seams.
//!
//! Actual audio capture, decoding, and synthesis live outside this crate;
//! the core only needs one call in each direction. Implementations plug in
//! here the same way channel adapters do in a messaging gateway.

use crate::error::Result;
use crate::utterance::{NO_RESULT, normalize};
use async_trait::async_trait;

/// One-shot speech acquisition.
///
/// A single call listens for one utterance and returns it normalized.
/// Recognition failure is not an error: the implementation returns the
/// [`NO_RESULT`] sentinel and the core routes it like any other utterance.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listen for one utterance.
    async fn listen(&mut self) -> Result<String>;
}

/// Fire-and-forget speech synthesis. Assumed always to succeed.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the given text. Returns once playback has been handed off.
    fn speak(&self, text: &str);
}

/// Recognizer for deployments without a speech stack: every listen attempt
/// reports recognition failure, so voice mode degrades to the dialogue
/// fallback instead of erroring.
#[derive(Debug, Default)]
pub struct NullRecognizer;

#[async_trait]
impl SpeechRecognizer for NullRecognizer {
    async fn listen(&mut self) -> Result<String> {
        Ok(normalize(NO_RESULT))
    }
}

/// Synthesizer that discards all output.
#[derive(Debug, Default)]
pub struct SilentSynthesizer;

impl SpeechSynthesizer for SilentSynthesizer {
    fn speak(&self, _text: &str) {}
}
