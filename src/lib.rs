//! Vai: voice/text virtual assistant.
//!
//! Free-form utterances are routed through an ordered first-match-wins
//! trigger table to a fixed set of actions (web search, time/date lookup,
//! note-taking, program launch, alarms, exit), falling through to a generic
//! dialogue engine when nothing matches.
//!
//! # Architecture
//!
//! The dispatch core is shared by two entry points:
//! - **Terminal** (`vai`): an unbounded session loop with an interactive
//!   exit confirmation and a blocking alarm wait.
//! - **Served** (`vai-server`): an axum handler running one dispatch cycle
//!   per request, with background alarms and graceful shutdown on goodbye.
//!
//! Speech recognition/synthesis, the dialogue engine, and the encyclopedia
//! are collaborators behind narrow traits; the core only ever makes one
//! call in each direction.

pub mod actions;
pub mod alarm;
pub mod config;
pub mod confirm;
pub mod dialogue;
pub mod encyclopedia;
pub mod error;
pub mod launch;
pub mod notes;
pub mod registry;
pub mod server;
pub mod session;
pub mod speech;
pub mod utterance;

#[cfg(test)]
pub mod test_utils;

pub use actions::{Assistant, Reply};
pub use config::AssistantConfig;
pub use confirm::{ConfirmOutcome, ConfirmationFlow};
pub use error::{AssistantError, Result};
pub use registry::{ActionRegistry, Intent};
pub use session::{Mode, SessionLoop};
