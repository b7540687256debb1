//! Watch-and-rebuild loop.
//!
//! # Architecture
//!
//! ```text
//! SiteWatcher
//!   notify thread (callback)
//!     ChangeAdmission
//!       ChangeFilter  -> is this path interesting?
//!       RebuildGate   -> debounced, and no rebuild already running?
//!         | accepted paths over an mpsc channel
//!   rebuild thread
//!     RebuildHandler::run -> reload, re-render; errors are logged, never fatal
//! ```
//!
//! Events are stamped and judged on the notify thread as they arrive, while
//! the rebuild runs on its own thread. An event that arrives while a rebuild
//! is in flight sees the gate in `Rebuilding` and is dropped, not queued.

mod filter;
mod gate;
mod watcher;

pub use filter::ChangeFilter;
pub use gate::{GateState, RebuildGate, Rejection};
pub use watcher::SiteWatcher;

use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::constants::DEBOUNCE_INTERVAL;
use crate::core::user_friendly_error;

/// The rebuild action run for an accepted change. Returns a short summary
/// line printed on success.
pub type RebuildFn = Box<dyn FnMut() -> Result<String> + Send>;

/// What happened to one change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Path does not match the filter
    Ignored,
    /// Refused by the gate
    Rejected(Rejection),
    /// Rebuild ran and succeeded
    Rebuilt(String),
    /// Rebuild ran and failed; the loop keeps running
    Failed(String),
}

/// Filter plus shared gate. Cloned onto the notify thread.
#[derive(Debug, Clone)]
pub(crate) struct ChangeAdmission {
    filter: ChangeFilter,
    gate: Arc<Mutex<RebuildGate>>,
}

impl ChangeAdmission {
    /// Decide whether a change of `path` observed at `now` starts a rebuild.
    /// On `Ok` the gate is left in `Rebuilding`.
    pub(crate) fn admit(&self, path: &Path, now: Instant) -> Result<(), WatchOutcome> {
        if !self.filter.matches(path) {
            tracing::trace!("Ignoring change to {}", path.display());
            return Err(WatchOutcome::Ignored);
        }
        if let Err(rejection) = lock_gate(&self.gate).try_begin(now) {
            tracing::debug!("Skipping change to {} ({:?})", path.display(), rejection);
            return Err(WatchOutcome::Rejected(rejection));
        }
        Ok(())
    }
}

fn lock_gate(gate: &Mutex<RebuildGate>) -> MutexGuard<'_, RebuildGate> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Filter, gate, and rebuild action for one watch session.
pub struct RebuildHandler {
    admission: ChangeAdmission,
    rebuild: RebuildFn,
}

impl std::fmt::Debug for RebuildHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RebuildHandler").field("admission", &self.admission).finish_non_exhaustive()
    }
}

impl RebuildHandler {
    pub fn new<F>(filter: ChangeFilter, rebuild: F) -> Self
    where
        F: FnMut() -> Result<String> + Send + 'static,
    {
        Self {
            admission: ChangeAdmission {
                filter,
                gate: Arc::new(Mutex::new(RebuildGate::new(DEBOUNCE_INTERVAL))),
            },
            rebuild: Box::new(rebuild),
        }
    }

    pub fn filter(&self) -> &ChangeFilter {
        &self.admission.filter
    }

    pub(crate) fn admission(&self) -> ChangeAdmission {
        self.admission.clone()
    }

    /// Admit and, if accepted, rebuild inline.
    #[cfg(test)]
    pub(crate) fn on_change(&mut self, path: &Path, now: Instant) -> WatchOutcome {
        match self.admission.admit(path, now) {
            Ok(()) => self.run(path),
            Err(outcome) => outcome,
        }
    }

    /// Run the rebuild for an admitted change of `path`, then reopen the gate.
    pub(crate) fn run(&mut self, path: &Path) -> WatchOutcome {
        println!("\n{} changed, reloading...", path.display());
        let result = (self.rebuild)();
        lock_gate(&self.admission.gate).finish();

        match result {
            Ok(summary) => {
                println!("{summary}");
                WatchOutcome::Rebuilt(summary)
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::warn!("Rebuild after change to {} failed: {}", path.display(), message);
                user_friendly_error(e).display();
                WatchOutcome::Failed(message)
            }
        }
    }
}
