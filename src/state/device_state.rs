// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local mirror of the device state.

use crate::types::{LcdText, RgbColor};

/// What the control screen currently shows.
///
/// Only [`control::apply`](crate::control::apply) produces new states from
/// commands. The public `with_*` constructors exist to describe a starting
/// point and keep the LED invariant: `led_on()` is `true` exactly when
/// `rgb()` is not black.
///
/// # Examples
///
/// ```
/// use voxlight::state::DeviceState;
/// use voxlight::types::RgbColor;
///
/// let state = DeviceState::new();
/// assert!(!state.led_on());
/// assert!(state.rgb().is_black());
///
/// let state = DeviceState::new().with_led_color(RgbColor::new(0, 0, 255));
/// assert!(state.led_on());
/// assert!(state.is_consistent());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    led_on: bool,
    rgb: RgbColor,
    lcd_on: bool,
    lcd_text: LcdText,
    sensor_on: bool,
    last_lux: u32,
}

impl DeviceState {
    /// Creates a state with everything off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the LED color; the LED is on unless the color is black.
    #[must_use]
    pub fn with_led_color(mut self, rgb: RgbColor) -> Self {
        self.set_led(rgb);
        self
    }

    /// Sets the LCD flag and text.
    #[must_use]
    pub fn with_lcd(mut self, on: bool, text: LcdText) -> Self {
        self.lcd_on = on;
        self.lcd_text = text;
        self
    }

    /// Sets whether the lux reading is shown.
    #[must_use]
    pub fn with_sensor(mut self, on: bool) -> Self {
        self.sensor_on = on;
        self
    }

    /// Sets the last lux reading.
    #[must_use]
    pub fn with_lux(mut self, lux: u32) -> Self {
        self.last_lux = lux;
        self
    }

    // ========== LED ==========

    /// Returns `true` if the LED switch is on.
    #[must_use]
    pub fn led_on(&self) -> bool {
        self.led_on
    }

    /// Returns the LED color.
    #[must_use]
    pub fn rgb(&self) -> RgbColor {
        self.rgb
    }

    pub(crate) fn set_led(&mut self, rgb: RgbColor) {
        self.rgb = rgb;
        self.led_on = !rgb.is_black();
    }

    // ========== LCD ==========

    /// Returns `true` if the LCD is on.
    #[must_use]
    pub fn lcd_on(&self) -> bool {
        self.lcd_on
    }

    /// Returns the last text sent to the LCD.
    #[must_use]
    pub fn lcd_text(&self) -> &LcdText {
        &self.lcd_text
    }

    pub(crate) fn set_lcd_on(&mut self, on: bool) {
        self.lcd_on = on;
    }

    pub(crate) fn set_lcd_text(&mut self, text: LcdText) {
        self.lcd_text = text;
    }

    // ========== Light sensor ==========

    /// Returns `true` if the lux reading is shown.
    #[must_use]
    pub fn sensor_on(&self) -> bool {
        self.sensor_on
    }

    /// Returns the last lux reading from the store.
    #[must_use]
    pub fn last_lux(&self) -> u32 {
        self.last_lux
    }

    pub(crate) fn set_sensor_on(&mut self, on: bool) {
        self.sensor_on = on;
    }

    pub(crate) fn set_last_lux(&mut self, lux: u32) {
        self.last_lux = lux;
    }

    /// Returns `true` if the LED switch agrees with the color.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.led_on != self.rgb.is_black()
    }
}
