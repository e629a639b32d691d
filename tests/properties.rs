// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tests for command resolution and state transitions.

use proptest::prelude::*;
use voxlight::command::{DeviceCommand, resolve};
use voxlight::control::apply;
use voxlight::state::{DeviceState, StorePath};
use voxlight::types::{ColorSample, RgbColor};

fn any_command() -> impl Strategy<Value = DeviceCommand> {
    prop_oneof![
        Just(DeviceCommand::LedOn),
        Just(DeviceCommand::LedOff),
        Just(DeviceCommand::SensorOn),
        Just(DeviceCommand::SensorOff),
        Just(DeviceCommand::LcdOn),
        Just(DeviceCommand::LcdOff),
        Just(DeviceCommand::Unknown),
        "[가-힣a-z ]{0,40}".prop_map(|text: String| DeviceCommand::lcd_text(text)),
        prop::sample::select(vec!["빨간색", "파란색", "흰색", "보라", "검정색", "없는색"])
            .prop_map(|name: &str| DeviceCommand::color(name)),
        (any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(r, g, b)| DeviceCommand::SetRgb(RgbColor::new(r, g, b))),
        (0u16..360, 0u8..=100, 0u8..=100).prop_map(|(h, s, v)| {
            DeviceCommand::from_sample(ColorSample::new(h, s, v).unwrap())
        }),
    ]
}

proptest! {
    #[test]
    fn resolve_never_panics(raw in ".{0,200}") {
        let _ = resolve(&raw);
    }

    #[test]
    fn resolve_handles_arbitrary_actions(action in "[a-z_]{0,12}", color in "[가-힣]{0,4}") {
        let raw = format!(r#"{{"action":"{action}","color":"{color}","r":1,"g":2,"b":3}}"#);
        let _ = resolve(&raw);
    }

    #[test]
    fn led_follows_color_over_any_sequence(commands in prop::collection::vec(any_command(), 0..30)) {
        let mut state = DeviceState::new();
        for command in &commands {
            state = apply(command, &state).into_parts().0;
            prop_assert_eq!(state.led_on(), !state.rgb().is_black());
        }
    }

    #[test]
    fn unknown_changes_nothing(commands in prop::collection::vec(any_command(), 0..10)) {
        let mut state = DeviceState::new();
        for command in &commands {
            state = apply(command, &state).into_parts().0;
        }
        let transition = apply(&DeviceCommand::Unknown, &state);
        prop_assert_eq!(transition.state(), &state);
        prop_assert!(transition.writes().is_empty());
    }

    #[test]
    fn led_off_is_idempotent(commands in prop::collection::vec(any_command(), 0..10)) {
        let mut state = DeviceState::new();
        for command in &commands {
            state = apply(command, &state).into_parts().0;
        }
        let once = apply(&DeviceCommand::LedOff, &state);
        let twice = apply(&DeviceCommand::LedOff, once.state());
        prop_assert_eq!(once.state(), twice.state());
        prop_assert_eq!(once.writes(), twice.writes());
    }

    #[test]
    fn sensor_commands_never_write(on in any::<bool>(), commands in prop::collection::vec(any_command(), 0..10)) {
        let mut state = DeviceState::new();
        for command in &commands {
            state = apply(command, &state).into_parts().0;
        }
        let command = if on { DeviceCommand::SensorOn } else { DeviceCommand::SensorOff };
        let transition = apply(&command, &state);
        prop_assert_eq!(transition.state().sensor_on(), on);
        prop_assert!(transition.writes().iter().all(|w| w.path() != StorePath::SensorLux));
        prop_assert!(transition.writes().is_empty());
    }
}
