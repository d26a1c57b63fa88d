//! SdkLoader - load-once map SDK initialization
//!
//! Every caller gets the same [`SdkLoad`] future for a given attempt, so any
//! number of components mounting at once cause a single script injection.
//!
//! ```text
//!           load()                 script ok + initialize()
//!   Idle ───────────► Pending(n) ─────────────────────────► Ready
//!    ▲                    │
//!    └────────────────────┘
//!       script error (probe status, reject)
//! ```
//!
//! A failed attempt is never retried by the loader. It only returns to
//! `Idle`, so the next explicit `load()` starts attempt `n + 1`.
//!
//! Each attempt is spawned on the tokio runtime when it is registered, so it
//! runs to completion even if every caller drops its handle.

use super::environment::{SdkEnvironment, StatusProbe};
use super::error::SdkLoadError;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use url::Url;

/// Shared handle to a load attempt; clone and await freely
pub type SdkLoad = Shared<BoxFuture<'static, Result<(), SdkLoadError>>>;

enum LoadState {
    Idle,
    Pending { attempt: u64, load: SdkLoad },
    Ready,
}

struct Tracker {
    state: LoadState,
    attempts: u64,
}

fn lock(tracker: &Mutex<Tracker>) -> MutexGuard<'_, Tracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Loads the map SDK at most once per page lifetime
#[derive(Clone)]
pub struct SdkLoader {
    environment: Arc<dyn SdkEnvironment>,
    probe: Arc<dyn StatusProbe>,
    script_url: Url,
    tracker: Arc<Mutex<Tracker>>,
}

impl SdkLoader {
    pub fn new(
        script_url: Url,
        environment: Arc<dyn SdkEnvironment>,
        probe: Arc<dyn StatusProbe>,
    ) -> Self {
        Self {
            environment,
            probe,
            script_url,
            tracker: Arc::new(Mutex::new(Tracker {
                state: LoadState::Idle,
                attempts: 0,
            })),
        }
    }

    /// Make sure the SDK is loaded and initialized
    ///
    /// The decision is made here, synchronously: an in-flight attempt is
    /// shared, a loaded SDK resolves immediately, otherwise a new attempt is
    /// registered and started before this returns. Dropping the returned
    /// future does not cancel the attempt.
    ///
    /// Outside a tokio runtime the attempt cannot be spawned and only starts
    /// once the returned future is awaited.
    pub fn load(&self) -> SdkLoad {
        let mut tracker = lock(&self.tracker);

        match &tracker.state {
            LoadState::Ready => return resolved(),
            LoadState::Pending { attempt, load } => {
                log::debug!("sdk: joining load attempt {}", attempt);
                return load.clone();
            }
            LoadState::Idle => {}
        }

        if self.environment.is_loaded() {
            log::debug!("sdk: namespace already present, skipping injection");
            tracker.state = LoadState::Ready;
            return resolved();
        }

        tracker.attempts += 1;
        let attempt = tracker.attempts;
        let load = run_attempt(
            attempt,
            self.environment.clone(),
            self.probe.clone(),
            self.script_url.clone(),
            Arc::downgrade(&self.tracker),
        )
        .boxed()
        .shared();

        tracker.state = LoadState::Pending {
            attempt,
            load: load.clone(),
        };
        log::info!("sdk: starting load attempt {}", attempt);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(load.clone());
            }
            Err(_) => log::warn!("sdk: no tokio runtime, attempt {} runs when awaited", attempt),
        }

        load
    }

    /// Whether the SDK can be used right now
    ///
    /// While an attempt is in flight this is `false` even if the namespace
    /// already exists: the script has run but `initialize()` has not finished.
    pub fn is_ready(&self) -> bool {
        match lock(&self.tracker).state {
            LoadState::Ready => true,
            LoadState::Pending { .. } => false,
            LoadState::Idle => self.environment.is_loaded(),
        }
    }

    /// Whether an attempt is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(lock(&self.tracker).state, LoadState::Pending { .. })
    }

    /// Number of script injections started so far
    pub fn attempts(&self) -> u64 {
        lock(&self.tracker).attempts
    }

    pub fn script_url(&self) -> &Url {
        &self.script_url
    }
}

impl std::fmt::Debug for SdkLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkLoader")
            .field("endpoint", &self.script_url.path())
            .field("attempts", &self.attempts())
            .finish()
    }
}

fn resolved() -> SdkLoad {
    future::ready(Ok(())).boxed().shared()
}

async fn run_attempt(
    attempt: u64,
    environment: Arc<dyn SdkEnvironment>,
    probe: Arc<dyn StatusProbe>,
    script_url: Url,
    tracker: Weak<Mutex<Tracker>>,
) -> Result<(), SdkLoadError> {
    match environment.inject_script(&script_url).await {
        Ok(()) => {
            environment.initialize().await;
            settle(&tracker, attempt, LoadState::Ready);
            log::info!("sdk: ready (attempt {})", attempt);
            Ok(())
        }
        Err(failure) => {
            // Back to Idle first so a later call can retry while we diagnose
            settle(&tracker, attempt, LoadState::Idle);
            log::warn!("sdk: attempt {} failed: {}", attempt, failure);

            let error = diagnose(probe.as_ref(), &script_url).await;
            log::warn!("sdk: attempt {} classified as {:?}", attempt, error);
            Err(error)
        }
    }
}

/// Replace the state, unless a newer attempt already took over
fn settle(tracker: &Weak<Mutex<Tracker>>, attempt: u64, next: LoadState) {
    let Some(tracker) = tracker.upgrade() else {
        return;
    };
    let mut tracker = lock(&tracker);
    if matches!(tracker.state, LoadState::Pending { attempt: current, .. } if current == attempt) {
        tracker.state = next;
    }
}

async fn diagnose(probe: &dyn StatusProbe, script_url: &Url) -> SdkLoadError {
    match probe.probe(script_url).await {
        Ok(status) => SdkLoadError::from_status(status),
        Err(e) => {
            log::warn!("sdk: {}", e);
            SdkLoadError::NetworkUnreachable
        }
    }
}
