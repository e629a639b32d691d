// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic lux refresh.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::control::DeviceController;
use crate::protocol::{IntentClassifier, StateStore};

/// Background task that refreshes the lux reading at the controller's
/// configured interval.
///
/// Readings go into the controller state and out on a watch channel. The
/// task stops when the monitor is dropped.
#[derive(Debug)]
pub struct LuxMonitor {
    handle: JoinHandle<()>,
    readings: watch::Receiver<u32>,
}

impl LuxMonitor {
    /// Starts polling. Must be called inside a Tokio runtime.
    pub fn spawn<S, C>(controller: DeviceController<S, C>) -> Self
    where
        S: StateStore + Send + Sync + 'static,
        C: IntentClassifier + Send + Sync + 'static,
    {
        let (tx, readings) = watch::channel(controller.state().last_lux());
        let period = controller.config().lux_interval();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match controller.refresh_lux().await {
                    Ok(lux) => {
                        tx.send_if_modified(|last| std::mem::replace(last, lux) != lux);
                    }
                    Err(err) => tracing::warn!(error = %err, "Lux refresh failed"),
                }
            }
        });

        Self { handle, readings }
    }

    /// Returns a receiver that is notified when the reading changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.readings.clone()
    }

    /// Returns the most recent reading.
    #[must_use]
    pub fn latest(&self) -> u32 {
        *self.readings.borrow()
    }
}

impl Drop for LuxMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
