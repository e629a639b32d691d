// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for device control.
//!
//! # Types
//!
//! - [`RgbColor`] - The triple written to `controls/rgb`
//! - [`ColorSample`] - HSV in slider units (Hue 0-360, Saturation/Value 0-100)
//! - [`Hsv`] - Floating point HSV used by the conversion
//! - [`LcdText`] - LCD text, truncated to 32 characters
//!
//! Spoken color names are resolved with [`lookup_color`] and [`color_for_name`].

mod color;
mod color_name;
mod lcd_text;
mod rgb_color;

pub use color::ColorSample;
pub use color_name::{DEFAULT_COLOR_NAME, color_for_name, lookup_color};
pub use lcd_text::LcdText;
pub use rgb_color::{Hsv, RgbColor};
