//! Simulated upload: a timer task that reports progress until 100%.

use std::time::Duration;

use tokio::{
    runtime::{Handle, TryCurrentError},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_TICK: Duration = Duration::from_millis(200);
pub const DEFAULT_STEP: u8 = 5;
pub const DEFAULT_FINALIZE_DELAY: Duration = Duration::from_millis(500);
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSimulation {
    pub tick: Duration,
    pub step: u8,
    pub finalize_delay: Duration,
}

impl Default for UploadSimulation {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            step: DEFAULT_STEP,
            finalize_delay: DEFAULT_FINALIZE_DELAY,
        }
    }
}

impl UploadSimulation {
    fn effective_step(&self) -> u8 {
        self.step.clamp(1, 100)
    }

    /// Number of progress events emitted before completion.
    pub fn ticks_to_complete(&self) -> u32 {
        100u32.div_ceil(u32::from(self.effective_step()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    Progress(u8),
    Finished,
}

/// Handle to a running simulated upload. Dropping the handle aborts the timer.
pub struct UploadTask {
    id: Uuid,
    events: mpsc::Receiver<UploadEvent>,
    handle: JoinHandle<()>,
}

impl UploadTask {
    /// Starts the timer on the current tokio runtime. Fails outside a runtime.
    pub fn spawn(simulation: UploadSimulation) -> Result<Self, TryCurrentError> {
        let runtime = Handle::try_current()?;
        let id = Uuid::new_v4();
        let (tx, events) = mpsc::channel(32);
        let step = simulation.effective_step();
        let tick = simulation.tick.max(MIN_TICK);

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            // The first tick completes immediately.
            ticker.tick().await;

            let mut progress: u8 = 0;
            while progress < 100 {
                ticker.tick().await;
                progress = progress.saturating_add(step).min(100);
                if tx.send(UploadEvent::Progress(progress)).await.is_err() {
                    debug!(upload_id = %id, "upload receiver dropped mid-progress");
                    return;
                }
            }

            tokio::time::sleep(simulation.finalize_delay).await;
            let _ = tx.send(UploadEvent::Finished).await;
        });

        Ok(Self { id, events, handle })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for the next event; `None` once the task is done or aborted.
    pub async fn next_event(&mut self) -> Option<UploadEvent> {
        self.events.recv().await
    }

    pub fn cancel(self) {
        debug!(upload_id = %self.id, "cancelling simulated upload");
        self.abort();
    }

    /// Stops the timer. The event stream ends without `Finished`.
    pub(crate) fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for UploadTask {
    fn drop(&mut self) {
        self.abort();
    }
}
