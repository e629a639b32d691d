// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Voxlight - voice control for a cloud-mirrored light device.
//!
//! The device (an RGB LED, a small LCD and an ambient light sensor) mirrors
//! a JSON tree in a realtime database. This library turns free-form Korean
//! voice commands into writes to that tree.
//!
//! # Pipeline
//!
//! 1. An utterance is wrapped in a few-shot prompt ([`command::build_prompt`])
//!    and sent to an [`IntentClassifier`](protocol::IntentClassifier).
//! 2. The answer is resolved into a [`DeviceCommand`] ([`resolve`]). Anything
//!    that cannot be understood becomes [`DeviceCommand::Unknown`].
//! 3. The command is applied to the current [`DeviceState`] ([`apply`]),
//!    producing the next state, the ordered [`StoreWrite`]s and a [`Notice`].
//! 4. [`DeviceController`] commits the state and sends the writes to a
//!    [`StateStore`](protocol::StateStore).
//!
//! # Supported Features
//!
//! - **LED**: on/off, named colors, direct RGB and HSV picks
//! - **LCD**: on/off, text up to 32 characters
//! - **Light sensor**: periodic lux polling with a brightness label
//!
//! # Quick Start
//!
//! ```no_run
//! use voxlight::DeviceController;
//! use voxlight::protocol::{FirebaseConfig, GeminiConfig};
//!
//! #[tokio::main]
//! async fn main() -> voxlight::Result<()> {
//!     let store = FirebaseConfig::from_env()?.into_client()?;
//!     let classifier = GeminiConfig::from_env()?.into_client()?;
//!     let controller = DeviceController::new(store, classifier);
//!
//!     let report = controller.handle_utterance("빨간색으로 바꿔줘").await?;
//!     for notice in report.notices() {
//!         println!("{notice}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Without a network
//!
//! ```
//! use voxlight::{DeviceCommand, DeviceController, RgbColor};
//! use voxlight::protocol::{IntentClassifier, MemoryStore};
//! use voxlight::state::StorePath;
//!
//! struct Offline;
//!
//! impl IntentClassifier for Offline {
//!     async fn classify(&self, _prompt: &str) -> Result<String, voxlight::ProtocolError> {
//!         Err(voxlight::ProtocolError::ConnectionFailed("offline".into()))
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = MemoryStore::new();
//! let controller = DeviceController::new(store.clone(), Offline);
//!
//! // UI events skip the classifier.
//! let report = controller.execute(DeviceCommand::SetRgb(RgbColor::new(0, 0, 255))).await;
//! assert!(report.is_success());
//! assert_eq!(store.value(StorePath::LedEnabled), Some(serde_json::json!(true)));
//! # }
//! ```

pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod protocol;
pub mod state;
pub mod telemetry;
pub mod types;

pub use command::{DeviceCommand, resolve};
pub use config::ControllerConfig;
pub use control::{CommandReport, DeviceController, Notice, Transition, apply};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{IntentClassifier, MemoryStore, StateStore};
#[cfg(feature = "http")]
pub use protocol::{FirebaseConfig, FirebaseStore, GeminiClassifier, GeminiConfig};
pub use state::{DeviceState, StorePath, StoreWrite};
pub use telemetry::{LuxDisplay, LuxLevel, LuxMonitor};
pub use types::{ColorSample, LcdText, RgbColor};
