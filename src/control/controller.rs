// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Async orchestration of classifier, façade and store.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{Mutex, Semaphore};

use crate::command::{DeviceCommand, build_prompt, resolve};
use crate::config::ControllerConfig;
use crate::error::{Error, ProtocolError};
use crate::protocol::{IntentClassifier, StateStore};
use crate::state::{DeviceState, StorePath, StoreWrite};
use crate::telemetry::lux_from_value;

use super::{Notice, apply};

/// Drives one device: voice utterances and UI events in, store writes out.
///
/// The controller owns the only [`DeviceState`]. Each command is applied
/// optimistically: the next state is committed before the store writes are
/// attempted and is kept even if a write fails. Failures are reported in the
/// returned [`CommandReport`].
///
/// Commands execute one at a time, so each command's writes reach the store
/// as one batch, in the order the states were committed.
///
/// At most one utterance is classified at a time; a second call while one is
/// in flight gets [`Error::ClassifierBusy`].
///
/// Clones share the same state, store and classifier.
///
/// # Examples
///
/// ```
/// use voxlight::control::DeviceController;
/// use voxlight::command::DeviceCommand;
/// use voxlight::protocol::{IntentClassifier, MemoryStore};
/// use voxlight::ProtocolError;
///
/// struct AlwaysOn;
///
/// impl IntentClassifier for AlwaysOn {
///     async fn classify(&self, _prompt: &str) -> Result<String, ProtocolError> {
///         Ok(r#"{"action":"led_on"}"#.to_string())
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> voxlight::Result<()> {
/// let controller = DeviceController::new(MemoryStore::new(), AlwaysOn);
/// let report = controller.handle_utterance("불 켜줘").await?;
/// assert_eq!(report.command(), &DeviceCommand::LedOn);
/// assert!(controller.state().led_on());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeviceController<S, C> {
    store: Arc<S>,
    classifier: Arc<C>,
    state: Arc<RwLock<DeviceState>>,
    slot: Arc<Semaphore>,
    batch: Arc<Mutex<()>>,
    config: ControllerConfig,
}

impl<S, C> Clone for DeviceController<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            classifier: Arc::clone(&self.classifier),
            state: Arc::clone(&self.state),
            slot: Arc::clone(&self.slot),
            batch: Arc::clone(&self.batch),
            config: self.config,
        }
    }
}

impl<S: StateStore, C: IntentClassifier> DeviceController<S, C> {
    /// Creates a controller with default timing and an all-off state.
    pub fn new(store: S, classifier: C) -> Self {
        Self::with_config(store, classifier, ControllerConfig::default())
    }

    /// Creates a controller with the given timing.
    pub fn with_config(store: S, classifier: C, config: ControllerConfig) -> Self {
        Self {
            store: Arc::new(store),
            classifier: Arc::new(classifier),
            state: Arc::new(RwLock::new(DeviceState::new())),
            slot: Arc::new(Semaphore::new(1)),
            batch: Arc::new(Mutex::new(())),
            config,
        }
    }

    /// Replaces the starting state.
    #[must_use]
    pub fn with_state(self, state: DeviceState) -> Self {
        *self.state.write() = state;
        self
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Returns the timing configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns the state store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Classifies an utterance and executes the resulting command.
    ///
    /// Classifier failures and timeouts resolve to
    /// [`DeviceCommand::Unknown`], which is executed like any other command
    /// (no writes, [`Notice::NotUnderstood`]).
    ///
    /// # Errors
    ///
    /// Returns `Error::ClassifierBusy` if another utterance is being
    /// classified. Nothing is executed in that case.
    pub async fn handle_utterance(&self, utterance: &str) -> Result<CommandReport, Error> {
        let command = match self.classify(utterance).await {
            Ok(command) => command,
            Err(Error::ClassifierBusy) => return Err(Error::ClassifierBusy),
            Err(err) => {
                tracing::warn!(error = %err, "Classifier failed, treating utterance as unknown");
                DeviceCommand::Unknown
            }
        };
        Ok(self.execute(command).await)
    }

    /// Classifies an utterance without executing it.
    ///
    /// # Errors
    ///
    /// - `Error::ClassifierBusy` if another utterance is being classified
    /// - `Error::ClassifierUnavailable` if the classifier failed or timed out
    pub async fn classify(&self, utterance: &str) -> Result<DeviceCommand, Error> {
        let Ok(_permit) = self.slot.try_acquire() else {
            return Err(Error::ClassifierBusy);
        };

        let prompt = build_prompt(utterance);
        let limit = self.config.classify_timeout();
        tracing::debug!(utterance = %utterance, "Classifying utterance");

        let raw = tokio::time::timeout(limit, self.classifier.classify(&prompt))
            .await
            .map_err(|_| ProtocolError::Timeout(millis(limit)))
            .and_then(|result| result)
            .map_err(Error::ClassifierUnavailable)?;

        Ok(resolve(&raw))
    }

    /// Applies a command and writes its effects to the store.
    ///
    /// The store writes run in order; a failed write does not stop the
    /// ones after it and does not roll back the local state. A concurrent
    /// call waits until this command's writes are done.
    pub async fn execute(&self, command: DeviceCommand) -> CommandReport {
        // Held until every write of this command has been attempted.
        let _batch = self.batch.lock().await;

        let transition = {
            let mut state = self.state.write();
            let transition = apply(&command, &state);
            *state = transition.state().clone();
            transition
        };
        let (state, writes, notice) = transition.into_parts();

        let mut failures = Vec::new();
        for write in &writes {
            if let Err(source) = self.store.set(write).await {
                tracing::warn!(path = %write.path(), error = %source, "Store write failed");
                failures.push(Error::StoreWriteFailed {
                    path: write.path().to_string(),
                    source,
                });
            }
        }

        if command.is_unknown() {
            tracing::info!("Command not recognized");
        } else {
            tracing::info!(command = %command, failed = failures.len(), "Command executed");
        }

        CommandReport {
            command,
            state,
            writes,
            notice,
            failures,
        }
    }

    /// Reads the current lux value from the store into the state.
    ///
    /// A missing or non-numeric value reads as 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreReadFailed` if the store cannot be read. The
    /// previous reading is kept.
    pub async fn refresh_lux(&self) -> Result<u32, Error> {
        let path = StorePath::SensorLux;
        let value = self
            .store
            .get(path)
            .await
            .map_err(|source| Error::StoreReadFailed {
                path: path.to_string(),
                source,
            })?;

        let lux = value.as_ref().and_then(lux_from_value).unwrap_or(0);
        self.state.write().set_last_lux(lux);
        Ok(lux)
    }
}

/// What happened when a command was executed.
#[derive(Debug)]
pub struct CommandReport {
    command: DeviceCommand,
    state: DeviceState,
    writes: Vec<StoreWrite>,
    notice: Notice,
    failures: Vec<Error>,
}

impl CommandReport {
    /// The executed command.
    #[must_use]
    pub fn command(&self) -> &DeviceCommand {
        &self.command
    }

    /// The state after the command.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Every write that was attempted, in order.
    #[must_use]
    pub fn writes(&self) -> &[StoreWrite] {
        &self.writes
    }

    /// Feedback for the command itself.
    #[must_use]
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Failed writes, as `Error::StoreWriteFailed`.
    #[must_use]
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// Returns `true` if the command was recognized and every write succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.command.is_unknown() && self.failures.is_empty()
    }

    /// Everything to show the user: the command notice, followed by
    /// [`Notice::StoreWriteFailed`] if any write failed.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices = vec![self.notice.clone()];
        if !self.failures.is_empty() {
            notices.push(Notice::StoreWriteFailed);
        }
        notices
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
