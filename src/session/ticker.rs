//! Session Ticker
//!
//! Periodic tick source for attendance sessions. Each tick carries the whole
//! seconds elapsed since the ticker started, so a ticker must be started
//! after the session's `Start` event; `AttendanceSession::start_ticking`
//! does both. Stopping or dropping the ticker aborts its task, which closes
//! the event channel.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::SessionEvent;

pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Tick once per second
    pub fn every_second(events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self::start(Duration::from_secs(1), events)
    }

    /// Spawn the tick task on the current tokio runtime
    pub fn start(period: Duration, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut interval = time::interval_at(started + period, period);

            loop {
                interval.tick().await;
                let elapsed = started.elapsed().as_secs();
                if events.send(SessionEvent::Tick(elapsed)).is_err() {
                    log::debug!("ticker receiver dropped, stopping");
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop ticking and wait for the task to wind down
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => log::error!("ticker task failed: {}", e),
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
