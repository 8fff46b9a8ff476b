//! Settle timers driving the tutorial state machine.
//!
//! Arriving at a step schedules a settle after a fixed delay. Any later
//! arrival, navigation away, teardown or drop cancels the pending settle, so
//! a step the user merely passed through is never completed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::state::{ArriveOutcome, TutorialSnapshot, TutorialState};
use super::types::TutorialStep;

struct Shared {
    state: Mutex<TutorialState>,
    /// Bumped on every arrival or cancellation; a timer only settles if it
    /// still carries the current generation.
    generation: AtomicU64,
    snapshots: watch::Sender<TutorialSnapshot>,
}

impl Shared {
    async fn settle(&self, step: TutorialStep, generation: u64) {
        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(%step, "Superseded settle timer ignored");
            return;
        }
        if state.settle(step) {
            info!(%step, finished = state.is_finished(), "Tutorial step completed");
            self.snapshots.send_replace(state.snapshot());
        }
    }

    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

struct PendingSettle {
    step: TutorialStep,
    handle: JoinHandle<()>,
}

/// Timer-driven onboarding tutorial.
///
/// State is owned by the engine instance and injected where needed; nothing
/// is process-global. Methods that schedule timers must run inside a Tokio
/// runtime.
pub struct TutorialEngine {
    shared: Arc<Shared>,
    settle_delay: Duration,
    pending: Mutex<Option<PendingSettle>>,
}

impl TutorialEngine {
    /// Creates an engine completing steps after `settle_delay`.
    #[must_use]
    pub fn new(settle_delay: Duration) -> Self {
        let state = TutorialState::new();
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                generation: AtomicU64::new(0),
                snapshots,
            }),
            settle_delay,
            pending: Mutex::new(None),
        }
    }

    /// Delay between arrival and completion.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// The user reached `step`. Cancels any pending settle and, unless the
    /// step is already completed, schedules a new one.
    pub async fn arrive_at(&self, step: TutorialStep) -> ArriveOutcome {
        let mut pending = self.pending.lock().await;
        Self::cancel(&mut pending);
        let generation = self.shared.bump();

        let outcome = {
            let mut state = self.shared.state.lock().await;
            let outcome = state.arrive_at(step);
            self.shared.snapshots.send_replace(state.snapshot());
            outcome
        };

        if outcome == ArriveOutcome::Activated {
            let shared = Arc::clone(&self.shared);
            let delay = self.settle_delay;
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                shared.settle(step, generation).await;
            });
            *pending = Some(PendingSettle { step, handle });
            debug!(%step, delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX), "Settle scheduled");
        }
        outcome
    }

    /// The user navigated to `route`.
    ///
    /// Routes outside the tutorial cancel the pending settle and clear the
    /// active step; they return `None`.
    pub async fn arrive_route(&self, route: &str) -> Option<ArriveOutcome> {
        match TutorialStep::from_route(route) {
            Some(step) => Some(self.arrive_at(step).await),
            None => {
                self.leave().await;
                None
            }
        }
    }

    /// The user left the tutorial's sections.
    pub async fn leave(&self) {
        let mut pending = self.pending.lock().await;
        Self::cancel(&mut pending);
        self.shared.bump();

        let mut state = self.shared.state.lock().await;
        state.leave();
        self.shared.snapshots.send_replace(state.snapshot());
    }

    /// The view holding the timer is torn down. Cancels the pending settle
    /// and keeps progress as is.
    pub async fn teardown(&self) {
        let mut pending = self.pending.lock().await;
        Self::cancel(&mut pending);
        self.shared.bump();
    }

    /// Clears all progress and cancels the pending settle.
    pub async fn reset(&self) {
        let mut pending = self.pending.lock().await;
        Self::cancel(&mut pending);
        self.shared.bump();

        let mut state = self.shared.state.lock().await;
        state.reset();
        self.shared.snapshots.send_replace(state.snapshot());
        info!("Tutorial reset");
    }

    /// Step with a settle timer still running.
    pub async fn pending_step(&self) -> Option<TutorialStep> {
        self.pending
            .lock()
            .await
            .as_ref()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.step)
    }

    /// Current progress.
    #[must_use]
    pub fn snapshot(&self) -> TutorialSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// Receives progress after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TutorialSnapshot> {
        self.shared.snapshots.subscribe()
    }

    fn cancel(pending: &mut Option<PendingSettle>) {
        if let Some(previous) = pending.take() {
            if !previous.handle.is_finished() {
                debug!(step = %previous.step, "Pending settle cancelled");
            }
            previous.handle.abort();
        }
    }
}

impl Drop for TutorialEngine {
    fn drop(&mut self) {
        Self::cancel(self.pending.get_mut());
    }
}
