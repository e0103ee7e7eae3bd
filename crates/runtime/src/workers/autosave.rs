//! Periodic snapshot worker.
//!
//! Default-off; enabled through the session builder. Ticks on a fixed
//! interval and asks the session worker to persist. Ticks never block or
//! await gameplay commands, and a failed save surfaces as a soft error on
//! the session rather than stopping this worker.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::session::Command;

pub(crate) struct AutosaveWorker {
    period: Duration,
    command_tx: mpsc::Sender<Command>,
    stop_rx: watch::Receiver<bool>,
}

impl AutosaveWorker {
    pub(crate) fn new(
        period: Duration,
        command_tx: mpsc::Sender<Command>,
        stop_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            period,
            command_tx,
            stop_rx,
        }
    }

    pub(crate) async fn run(mut self) {
        info!("AutosaveWorker started: period={:?}", self.period);

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of tokio's interval fires immediately; skip it so
        // the first save happens one full period after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("Autosave tick");
                    if self
                        .command_tx
                        .send(Command::Save { reply: None })
                        .await
                        .is_err()
                    {
                        debug!("Session worker gone, stopping autosave");
                        break;
                    }
                }
                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("AutosaveWorker stopped");
    }
}
