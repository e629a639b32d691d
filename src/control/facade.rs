// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command to state transition and store writes.

use crate::command::DeviceCommand;
use crate::state::{DeviceState, StoreWrite};
use crate::types::{RgbColor, color_for_name};

use super::Notice;

/// The result of applying one command to a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    state: DeviceState,
    writes: Vec<StoreWrite>,
    notice: Notice,
}

impl Transition {
    /// The state after the command.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Store writes to perform, in order.
    #[must_use]
    pub fn writes(&self) -> &[StoreWrite] {
        &self.writes
    }

    /// Feedback for the user.
    #[must_use]
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Returns `false` if the command was [`DeviceCommand::Unknown`].
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.notice != Notice::NotUnderstood
    }

    /// Splits the transition into its parts.
    #[must_use]
    pub fn into_parts(self) -> (DeviceState, Vec<StoreWrite>, Notice) {
        (self.state, self.writes, self.notice)
    }
}

/// Applies a command to a state.
///
/// Pure: the prior state is not touched and nothing is written. The LED
/// switch always follows the color, so the result keeps
/// `led_on == !rgb.is_black()`.
///
/// # Examples
///
/// ```
/// use voxlight::command::DeviceCommand;
/// use voxlight::control::apply;
/// use voxlight::state::{DeviceState, StoreWrite};
/// use voxlight::types::RgbColor;
///
/// let transition = apply(&DeviceCommand::LedOn, &DeviceState::new());
/// assert!(transition.state().led_on());
/// assert_eq!(transition.state().rgb(), RgbColor::white());
/// assert_eq!(
///     transition.writes(),
///     &[StoreWrite::rgb(RgbColor::white()), StoreWrite::led_enabled(true)]
/// );
/// ```
#[must_use]
pub fn apply(command: &DeviceCommand, prior: &DeviceState) -> Transition {
    let mut state = prior.clone();
    let mut writes = Vec::new();

    let notice = match command {
        DeviceCommand::LedOn => {
            let rgb = if prior.rgb().is_black() {
                RgbColor::white()
            } else {
                prior.rgb()
            };
            state.set_led(rgb);
            writes.push(StoreWrite::rgb(rgb));
            writes.push(StoreWrite::led_enabled(true));
            Notice::LedOn
        }
        DeviceCommand::LedOff => {
            state.set_led(RgbColor::black());
            writes.push(StoreWrite::rgb(RgbColor::black()));
            writes.push(StoreWrite::led_enabled(false));
            Notice::LedOff
        }
        DeviceCommand::SetColor { name } => {
            set_color(prior, &mut state, &mut writes, color_for_name(name).to_rgb());
            Notice::ColorChanged(name.clone())
        }
        DeviceCommand::SetRgb(rgb) => {
            set_color(prior, &mut state, &mut writes, *rgb);
            Notice::RgbChanged(*rgb)
        }
        DeviceCommand::SensorOn => {
            state.set_sensor_on(true);
            Notice::SensorOn
        }
        DeviceCommand::SensorOff => {
            state.set_sensor_on(false);
            Notice::SensorOff
        }
        DeviceCommand::LcdOn => {
            state.set_lcd_on(true);
            writes.push(StoreWrite::lcd_enabled(true));
            Notice::LcdOn
        }
        DeviceCommand::LcdOff => {
            state.set_lcd_on(false);
            writes.push(StoreWrite::lcd_enabled(false));
            Notice::LcdOff
        }
        DeviceCommand::LcdText(text) => {
            state.set_lcd_text(text.clone());
            state.set_lcd_on(true);
            writes.push(StoreWrite::display(text, true));
            Notice::LcdText(text.clone())
        }
        DeviceCommand::Unknown => Notice::NotUnderstood,
    };

    debug_assert!(state.is_consistent());
    tracing::debug!(command = %command, writes = writes.len(), "Applied command");

    Transition {
        state,
        writes,
        notice,
    }
}

// A non-black color switches the LED on. Black switches it off, and the
// switch is only written when it actually flips.
fn set_color(
    prior: &DeviceState,
    state: &mut DeviceState,
    writes: &mut Vec<StoreWrite>,
    rgb: RgbColor,
) {
    state.set_led(rgb);
    writes.push(StoreWrite::rgb(rgb));
    if !rgb.is_black() {
        writes.push(StoreWrite::led_enabled(true));
    } else if prior.led_on() {
        writes.push(StoreWrite::led_enabled(false));
    }
}
