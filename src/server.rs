//! HTTP-served variant.
//!
//! Routes:
//! - `GET /`: the UI shell.
//! - `GET /get?Message=<text>`: one acquire-dispatch-execute cycle,
//!   plain-text response body.
//! - `GET /alarm`: status of the armed alarm, if any.
//! - `GET /alarm/cancel`: cancel the armed alarm.
//!
//! Unlike the terminal loop this handler is stateless per call except for
//! the shared session state (mode flag, armed alarm), which concurrent
//! requests guard with mutexes. A goodbye here does not confirm: it signals
//! graceful shutdown of the whole process after the farewell response is
//! delivered. Any action error becomes a generic server error while the
//! process keeps running.

use crate::actions::{Assistant, Reply};
use crate::alarm::{AlarmHandle, AlarmScheduler, AlarmStatus};
use crate::config::{AssistantConfig, ServerConfig};
use crate::error::{AssistantError, Result};
use crate::launch::SystemOpener;
use crate::registry::ActionRegistry;
use crate::session::Mode;
use crate::speech::{SpeechRecognizer, SpeechSynthesizer};
use crate::utterance::normalize;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::{Arc, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Shared state behind the request handlers.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<ActionRegistry>,
    assistant: Arc<tokio::sync::Mutex<Assistant>>,
    mode: Arc<std::sync::Mutex<Mode>>,
    recognizer: Arc<tokio::sync::Mutex<Box<dyn SpeechRecognizer>>>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    alarms: AlarmScheduler,
    armed: Arc<std::sync::Mutex<Option<AlarmHandle>>>,
    shutdown: CancellationToken,
}

impl AppState {
    /// Assemble served-session state from configuration and collaborators.
    pub fn new(
        config: AssistantConfig,
        opener: Arc<dyn SystemOpener>,
        dialogue: Box<dyn crate::dialogue::DialogueEngine>,
        encyclopedia: Box<dyn crate::encyclopedia::Encyclopedia>,
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let sound_path = config.resources.media_dir.join(&config.alarm.sound_file);
        let mode = config.server.start_mode;
        let alarms = AlarmScheduler::new(Arc::clone(&opener), sound_path);
        let assistant = Assistant::new(config, Box::new(opener), dialogue, encyclopedia);
        Self {
            registry: Arc::new(ActionRegistry::standard()),
            assistant: Arc::new(tokio::sync::Mutex::new(assistant)),
            mode: Arc::new(std::sync::Mutex::new(mode)),
            recognizer: Arc::new(tokio::sync::Mutex::new(recognizer)),
            synthesizer,
            alarms,
            armed: Arc::new(std::sync::Mutex::new(None)),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token canceled when a goodbye requests shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Lock the mode flag, mapping a poisoned mutex to a server error.
    fn lock_mode(&self) -> Result<MutexGuard<'_, Mode>> {
        self.mode
            .lock()
            .map_err(|e| AssistantError::Server(format!("mode lock poisoned: {e}")))
    }

    /// Lock the armed-alarm slot, mapping a poisoned mutex to a server error.
    fn lock_armed(&self) -> Result<MutexGuard<'_, Option<AlarmHandle>>> {
        self.armed
            .lock()
            .map_err(|e| AssistantError::Server(format!("alarm lock poisoned: {e}")))
    }
}

#[derive(serde::Deserialize)]
struct MessageQuery {
    #[serde(rename = "Message", default)]
    message: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui_shell))
        .route("/get", get(get_response))
        .route("/alarm", get(alarm_status))
        .route("/alarm/cancel", get(alarm_cancel))
        .with_state(state)
}

/// Bind and serve until a goodbye (or external cancel) shuts us down.
///
/// # Errors
///
/// Returns an error when the listener cannot bind or the server fails.
pub async fn run_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    let shutdown = state.shutdown_token();
    let app = router(state);

    info!("assistant listening on http://{local_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("assistant shut down");
    Ok(())
}

async fn ui_shell() -> Html<&'static str> {
    Html(include_str!("../assets/ui/index.html"))
}

async fn get_response(State(state): State<AppState>, Query(query): Query<MessageQuery>) -> Response {
    match dispatch_cycle(&state, query.message).await {
        Ok(text) => text.into_response(),
        Err(e) => {
            // Failures surface as a generic server error; the process
            // keeps serving.
            error!("dispatch failed: {e}");
            generic_error()
        }
    }
}

fn generic_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

/// One acquire-dispatch-execute cycle.
async fn dispatch_cycle(state: &AppState, message: String) -> Result<String> {
    // Mode is read once per cycle and decides the acquisition source:
    // voice sessions listen on the microphone and ignore the query text.
    let mode = *state.lock_mode()?;
    let raw = match mode {
        Mode::Text => message,
        Mode::Voice => state.recognizer.lock().await.listen().await?,
    };
    let utterance = normalize(&raw);

    let intent = state.registry.resolve(&utterance);
    let reply = state
        .assistant
        .lock()
        .await
        .execute(intent, &utterance)
        .await?;

    let text = match reply {
        Reply::Text(text) => text,
        Reply::ModeChange { mode, text } => {
            *state.lock_mode()? = mode;
            text
        }
        Reply::Alarm { hour, text } => {
            arm_alarm(state, hour)?;
            text
        }
        Reply::ExitRequested => {
            info!("goodbye received, shutting down");
            state.shutdown.cancel();
            "Goodbye.".to_owned()
        }
    };

    state.synthesizer.speak(&text);
    Ok(text)
}

/// Arm the alarm unless one is already pending.
fn arm_alarm(state: &AppState, hour: u32) -> Result<()> {
    let mut armed = state.lock_armed()?;
    if armed
        .as_ref()
        .is_some_and(|handle| handle.status() == AlarmStatus::Pending)
    {
        return Err(AssistantError::Alarm(
            "an alarm is already pending".to_owned(),
        ));
    }
    *armed = Some(state.alarms.schedule(hour)?);
    Ok(())
}

async fn alarm_status(State(state): State<AppState>) -> Response {
    let armed = match state.lock_armed() {
        Ok(guard) => guard,
        Err(e) => {
            error!("alarm status failed: {e}");
            return generic_error();
        }
    };
    let payload = match armed.as_ref() {
        None => serde_json::json!({ "status": "none" }),
        Some(handle) => serde_json::json!({
            "status": status_label(handle.status()),
            "deadline": handle.deadline().to_string(),
        }),
    };
    Json(payload).into_response()
}

async fn alarm_cancel(State(state): State<AppState>) -> Response {
    let armed = match state.lock_armed() {
        Ok(guard) => guard,
        Err(e) => {
            error!("alarm cancel failed: {e}");
            return generic_error();
        }
    };
    match armed.as_ref() {
        None => Json(serde_json::json!({ "status": "none" })).into_response(),
        Some(handle) => {
            // Canceling after the fire is a no-op; report what actually
            // happened.
            handle.cancel();
            Json(serde_json::json!({ "status": status_label(handle.status()) })).into_response()
        }
    }
}

fn status_label(status: AlarmStatus) -> &'static str {
    match status {
        AlarmStatus::Pending => "pending",
        AlarmStatus::Fired => "fired",
        AlarmStatus::Canceled => "canceled",
    }
}
