// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state and state store writes.
//!
//! [`DeviceState`] is the local mirror of what the screen shows.
//! [`StoreWrite`] is one `(path, value)` effect destined for the external
//! state store.
//!
//! # Examples
//!
//! ```
//! use voxlight::state::{StorePath, StoreWrite};
//! use voxlight::types::RgbColor;
//!
//! let write = StoreWrite::rgb(RgbColor::white());
//! assert_eq!(write.path(), StorePath::Rgb);
//! assert_eq!(write.path().as_str(), "controls/rgb");
//! ```

mod device_state;
mod store_write;

pub use device_state::DeviceState;
pub use store_write::{StorePath, StoreWrite};
