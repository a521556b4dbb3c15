//! General error slot and its auto-clear timer.
//!
//! The slot is shared with a spawned task, so it lives behind a mutex. Each
//! write bumps a token; a timer only clears the message it was started for.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Slot {
    message: Option<String>,
    token: u64,
}

/// The form's general error message, shareable with its timer.
#[derive(Clone, Debug, Default)]
pub(crate) struct GeneralError(Arc<Mutex<Slot>>);

impl GeneralError {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.lock().message.clone()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.lock().message.is_some()
    }

    /// Replace the message and return the token identifying this write.
    pub(crate) fn set(&self, message: Option<String>) -> u64 {
        let mut slot = self.lock();
        slot.token += 1;
        slot.message = message;
        slot.token
    }

    /// Clear the message if no newer write happened since `token`.
    pub(crate) fn clear_if_current(&self, token: u64) -> bool {
        let mut slot = self.lock();
        if slot.token == token {
            slot.message = None;
            true
        } else {
            false
        }
    }
}

/// A pending auto-clear. Dropping it cancels the timer.
#[derive(Debug)]
pub(crate) struct AutoClearTimer {
    handle: JoinHandle<()>,
}

impl AutoClearTimer {
    /// Spawn a timer on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime; the message then stays
    /// until replaced or cleared.
    pub(crate) fn start(
        slot: GeneralError,
        token: u64,
        after: Duration,
        form: Uuid,
    ) -> Option<Self> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(form = %form, "No tokio runtime available; general error will not auto-clear");
                return None;
            }
        };

        let handle = runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if slot.clear_if_current(token) {
                debug!(form = %form, "General error auto-cleared");
            } else {
                debug!(form = %form, "Auto-clear skipped; general error was replaced");
            }
        });

        Some(Self { handle })
    }
}

impl Drop for AutoClearTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
