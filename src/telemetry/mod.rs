// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ambient light sensor telemetry.
//!
//! The device publishes its reading at `sensors/lux`; this client only ever
//! reads it. [`LuxMonitor`] keeps the controller's copy fresh and
//! [`LuxDisplay`] turns the state into what the sensor panel shows.
//!
//! # Examples
//!
//! ```
//! use voxlight::telemetry::{LuxLevel, lux_from_value};
//!
//! let lux = lux_from_value(&serde_json::json!(42)).unwrap();
//! assert_eq!(LuxLevel::classify(lux), LuxLevel::Dark);
//! ```

mod lux;
mod monitor;

pub use lux::{LuxDisplay, LuxLevel, lux_from_value};
pub use monitor::LuxMonitor;
