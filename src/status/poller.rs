use crate::api::{ApiClient, Status};
use crate::auth::Session;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub const STATUS_PATH: &str = "status";

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
    /// Terminal; a stopped poller cannot be restarted.
    Stopped,
}

/// Periodically fetches a status snapshot and broadcasts it to subscribers.
///
/// Each tick issues exactly one authenticated fetch as its own task, so a
/// slow response never delays the next tick; overlapping in-flight fetches
/// across ticks are permitted and not coalesced. A failed fetch is dropped
/// silently: status polling is best-effort telemetry and a transient error
/// must not stop the loop.
pub struct StatusPoller {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    interval: Duration,
    state: Mutex<PollerState>,
    // Shared with the per-tick tasks. stop() empties the slot under the
    // lock, so a fetch that was in flight at stop time cannot publish.
    sender: Arc<Mutex<Option<broadcast::Sender<Status>>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusPoller {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>, interval: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            api,
            session,
            interval,
            state: Mutex::new(PollerState::Idle),
            sender: Arc::new(Mutex::new(Some(sender))),
            task: Mutex::new(None),
        }
    }

    pub fn state(&self) -> PollerState {
        *self.state.lock()
    }

    /// Receive every snapshot published from now on. Returns `None` once the
    /// poller has been stopped.
    pub fn subscribe(&self) -> Option<broadcast::Receiver<Status>> {
        self.sender.lock().as_ref().map(|tx| tx.subscribe())
    }

    /// Begins polling: one immediate fetch, then one per interval.
    pub fn start(&self) {
        let mut state = self.state.lock();
        if *state != PollerState::Idle {
            log::warn!("Status poller start ignored in state {:?}", *state);
            return;
        }
        *state = PollerState::Polling;
        drop(state);

        log::info!("Starting status polling every {:?}", self.interval);

        let api = self.api.clone();
        let session = self.session.clone();
        let sender = self.sender.clone();
        let period = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                let api = api.clone();
                let session = session.clone();
                let sender = sender.clone();
                tokio::spawn(async move {
                    match api
                        .get_entity::<Status>(STATUS_PATH, session.auth_headers())
                        .await
                    {
                        Ok(mut status) => {
                            status.terminate_log_lines();
                            if let Some(tx) = sender.lock().as_ref() {
                                tx.send(status).ok();
                            }
                        }
                        Err(err) => log::debug!("Status poll failed: {}", err),
                    }
                });
            }
        });

        *self.task.lock() = Some(task);
    }

    /// Terminal teardown: cancels the ticker and closes the publish channel
    /// so no further snapshots are delivered and no further subscriptions
    /// can be made. Safe to call more than once, or without a prior start.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if *state == PollerState::Stopped {
            return;
        }
        *state = PollerState::Stopped;
        drop(state);

        log::info!("Stopping status polling");

        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        self.sender.lock().take();
    }
}
