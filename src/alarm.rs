//! Alarm scheduling.
//!
//! An alarm is a one-shot timer: compute the deadline for a target hour,
//! sleep until it elapses, then open the configured alarm sound with the OS
//! default handler. The wait runs as a spawned task holding a cancellation
//! token, so callers choose between awaiting the fire (terminal sessions)
//! and leaving it armed in the background (served sessions, which expose
//! status and cancel instead of blocking a request).
//!
//! The deadline is the target hour on the *current* date. It does not roll
//! to the next day when that hour has already passed; a past deadline means
//! a zero-length sleep and an immediate fire. Historical behavior, kept
//! deliberately; see DESIGN.md.

use crate::error::{AssistantError, Result};
use crate::launch::SystemOpener;
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Status of an armed alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStatus {
    /// Still waiting for the deadline.
    Pending,
    /// The deadline elapsed and the notification ran.
    Fired,
    /// Canceled before firing.
    Canceled,
}

/// Compute the alarm deadline for `hour` relative to `now`.
///
/// # Errors
///
/// Returns an alarm error when `hour` is outside 0–23.
pub fn deadline_for_hour(now: NaiveDateTime, hour: u32) -> Result<NaiveDateTime> {
    now.date()
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| AssistantError::Alarm(format!("hour out of range: {hour}")))
}

/// Parse the target hour out of a "set alarm for N hours" utterance.
///
/// # Errors
///
/// Returns an alarm error when no integer can be extracted.
pub fn parse_alarm_hour(utterance: &str) -> Result<u32> {
    let remainder = utterance.replace("set alarm for", "").replace("hours", "");
    remainder
        .trim()
        .parse::<u32>()
        .map_err(|_| AssistantError::Alarm(format!("cannot parse alarm hour from: {utterance}")))
}

/// Handle to one armed alarm.
pub struct AlarmHandle {
    deadline: NaiveDateTime,
    cancel: CancellationToken,
    fired: tokio::sync::watch::Receiver<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl AlarmHandle {
    /// The computed deadline.
    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    /// Current status.
    pub fn status(&self) -> AlarmStatus {
        if *self.fired.borrow() {
            AlarmStatus::Fired
        } else if self.cancel.is_cancelled() {
            AlarmStatus::Canceled
        } else {
            AlarmStatus::Pending
        }
    }

    /// Cancel the alarm. A no-op after the fire.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the alarm fires or is canceled.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// One-shot alarm scheduler.
#[derive(Clone)]
pub struct AlarmScheduler {
    opener: Arc<dyn SystemOpener>,
    sound_path: PathBuf,
}

impl AlarmScheduler {
    /// Create a scheduler that notifies by opening `sound_path`.
    pub fn new(opener: Arc<dyn SystemOpener>, sound_path: impl Into<PathBuf>) -> Self {
        Self {
            opener,
            sound_path: sound_path.into(),
        }
    }

    /// Arm an alarm for `hour` o'clock and return its handle.
    ///
    /// The returned handle is the only reference to the alarm; dropping it
    /// detaches the timer but does not cancel it.
    ///
    /// # Errors
    ///
    /// Returns an alarm error when the hour is outside 0–23.
    pub fn schedule(&self, hour: u32) -> Result<AlarmHandle> {
        let now = Local::now().naive_local();
        let deadline = deadline_for_hour(now, hour)?;
        Ok(self.arm(deadline, wait_duration(now, deadline)))
    }

    /// Spawn the timer task for an already-computed deadline.
    fn arm(&self, deadline: NaiveDateTime, sleep: std::time::Duration) -> AlarmHandle {
        info!(
            "alarm armed for {deadline} ({}s from now)",
            sleep.as_secs()
        );

        let cancel = CancellationToken::new();
        let (fired_tx, fired_rx) = tokio::sync::watch::channel(false);
        let opener = Arc::clone(&self.opener);
        let sound_path = self.sound_path.clone();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(sleep) => {
                    info!("alarm fired");
                    if let Err(e) = opener.open_path(&sound_path) {
                        warn!("alarm sound failed: {e}");
                    }
                    let _ = fired_tx.send(true);
                }
                () = task_cancel.cancelled() => {
                    info!("alarm canceled before firing");
                }
            }
        });

        AlarmHandle {
            deadline,
            cancel,
            fired: fired_rx,
            task,
        }
    }
}

/// Time remaining until the deadline, clamped at zero.
///
/// A deadline already in the past (the non-rolling case) yields a zero
/// duration: the alarm fires immediately.
fn wait_duration(now: NaiveDateTime, deadline: NaiveDateTime) -> std::time::Duration {
    (deadline - now)
        .max(TimeDelta::zero())
        .to_std()
        .unwrap_or_default()
}
