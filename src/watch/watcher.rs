//! notify-backed watcher driving a [`RebuildHandler`].

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};
use std::thread::JoinHandle;
use std::time::Instant;

use super::{ChangeFilter, RebuildHandler};

/// A running watch session: the notify watcher plus the rebuild thread.
pub struct SiteWatcher {
    watcher: RecommendedWatcher,
    worker: JoinHandle<()>,
    roots: Vec<PathBuf>,
}

impl std::fmt::Debug for SiteWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteWatcher").field("roots", &self.roots).finish_non_exhaustive()
    }
}

impl SiteWatcher {
    /// Start watching the directories `handler`'s filter needs.
    ///
    /// [`ChangeFilter::Exact`] watches the parent directories of its files
    /// non-recursively, so editors that save by rename are still seen.
    /// [`ChangeFilter::Suffix`] watches its roots recursively.
    ///
    /// The notify callback only stamps and admits events; accepted paths are
    /// handed to a dedicated thread that runs the rebuild.
    pub fn start(handler: RebuildHandler) -> Result<Self> {
        let roots = handler.filter().watch_roots();
        let mode = match handler.filter() {
            ChangeFilter::Exact {
                ..
            } => RecursiveMode::NonRecursive,
            ChangeFilter::Suffix {
                ..
            } => RecursiveMode::Recursive,
        };

        let admission = handler.admission();
        let (tx, rx) = channel::<PathBuf>();
        let worker = std::thread::Builder::new()
            .name("folio-rebuild".to_string())
            .spawn(move || rebuild_loop(handler, rx))
            .context("Failed to spawn rebuild thread")?;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if is_modification(&event.kind) => {
                let now = Instant::now();
                for path in event.paths {
                    if admission.admit(&path, now).is_ok() && tx.send(path).is_err() {
                        tracing::debug!("Rebuild thread has exited");
                    }
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("File watch error: {}", e),
        })
        .context("Failed to create file watcher")?;

        for root in &roots {
            watcher
                .watch(root, mode)
                .with_context(|| format!("Failed to watch {}", root.display()))?;
            tracing::debug!("Watching {} ({:?})", root.display(), mode);
        }

        Ok(Self {
            watcher,
            worker,
            roots,
        })
    }

    /// Directories being watched.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Stop watching, let any running rebuild finish, and join both threads.
    pub fn stop(mut self) {
        for root in &self.roots {
            if let Err(e) = self.watcher.unwatch(root) {
                tracing::debug!("Failed to unwatch {}: {}", root.display(), e);
            }
        }
        // Dropping the watcher drops the callback and with it the sender,
        // which ends the rebuild loop.
        drop(self.watcher);
        if self.worker.join().is_err() {
            tracing::warn!("Rebuild thread panicked");
        }
        tracing::debug!("File watcher stopped");
    }
}

fn rebuild_loop(mut handler: RebuildHandler, rx: Receiver<PathBuf>) {
    while let Ok(path) = rx.recv() {
        handler.run(&path);
    }
}

/// Content or name changes and newly created files. Creation covers
/// editors that save by writing a temp file and renaming it into place.
fn is_modification(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}
