// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device control.
//!
//! [`apply`] is the pure core: a command and a prior state in, the next
//! state, the ordered store writes and a user notice out. [`DeviceController`]
//! wraps it with the classifier call, the store writes and the single shared
//! state.
//!
//! # State rules
//!
//! | Command | State | Writes |
//! |---------|-------|--------|
//! | `LedOn` | white if it was black | `controls/rgb`, `controls/led/enabled=true` |
//! | `LedOff` | black | `controls/rgb=(0,0,0)`, `controls/led/enabled=false` |
//! | `SetColor`, `SetRgb` | color, LED follows | `controls/rgb`, then `controls/led/enabled=true` unless black (`=false` if black turned it off) |
//! | `SensorOn`, `SensorOff` | sensor flag | none |
//! | `LcdOn`, `LcdOff` | LCD flag | `controls/lcd/enabled` |
//! | `LcdText` | text, LCD on | `display={text, enabled:true}` |
//! | `Unknown` | unchanged | none |

mod controller;
mod facade;
mod notice;

pub use controller::{CommandReport, DeviceController};
pub use facade::{Transition, apply};
pub use notice::Notice;
