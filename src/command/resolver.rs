// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classifier output to [`DeviceCommand`] resolution.
//!
//! The classifier is a generative model, so its output is untrusted text.
//! Every field is decoded leniently: a field of the wrong type counts as
//! missing, and every missing field has an explicit default. [`resolve`] is
//! total; [`try_resolve`] reports why output was rejected.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::{DEFAULT_COLOR_NAME, LcdText, RgbColor};

use super::DeviceCommand;

/// Resolves raw classifier output into a command.
///
/// Never fails: anything that is not a recognized action becomes
/// [`DeviceCommand::Unknown`].
#[must_use]
pub fn resolve(raw: &str) -> DeviceCommand {
    match try_resolve(raw) {
        Ok(command) => command,
        Err(err) => {
            tracing::warn!(error = %err, raw = %raw, "Classifier output not recognized");
            DeviceCommand::Unknown
        }
    }
}

/// Resolves raw classifier output, reporting why it was rejected.
///
/// # Errors
///
/// - [`ParseError::Json`] if the body is not valid JSON
/// - [`ParseError::UnexpectedFormat`] if the JSON is not an object
/// - [`ParseError::MissingField`] if there is no string `action`
/// - [`ParseError::UnrecognizedAction`] for any other action name
pub fn try_resolve(raw: &str) -> Result<DeviceCommand, ParseError> {
    let value = first_value(strip_code_fence(raw))?;
    if !value.is_object() {
        return Err(ParseError::UnexpectedFormat(format!(
            "expected a JSON object, got {value}"
        )));
    }

    let payload = IntentPayload::deserialize(value)?;
    let action: Action = payload
        .action
        .as_deref()
        .ok_or_else(|| ParseError::MissingField("action".to_string()))?
        .parse()?;

    let command = match action {
        Action::LedOn => DeviceCommand::LedOn,
        Action::LedOff => DeviceCommand::LedOff,
        Action::SensorOn => DeviceCommand::SensorOn,
        Action::SensorOff => DeviceCommand::SensorOff,
        Action::LcdOn => DeviceCommand::LcdOn,
        Action::LcdOff => DeviceCommand::LcdOff,
        Action::LcdText => DeviceCommand::LcdText(
            payload
                .text
                .map_or_else(LcdText::placeholder, LcdText::new),
        ),
        Action::LedColor => DeviceCommand::SetColor {
            name: payload
                .color
                .unwrap_or_else(|| DEFAULT_COLOR_NAME.to_string()),
        },
        Action::Rgb => match payload.color {
            Some(name) => DeviceCommand::SetColor { name },
            None => DeviceCommand::SetRgb(RgbColor::clamped(
                channel(payload.r),
                channel(payload.g),
                channel(payload.b),
            )),
        },
    };

    tracing::debug!(command = %command, "Resolved classifier output");
    Ok(command)
}

/// Strips an optional Markdown code fence and surrounding whitespace.
///
/// ```
/// use voxlight::command::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
/// assert_eq!(strip_code_fence("  {}  "), "{}");
/// ```
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Language tag, e.g. ```json
    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

// Models sometimes wrap the object in prose. Parse the first JSON value
// starting at the first brace and ignore whatever follows it.
fn first_value(body: &str) -> Result<Value, ParseError> {
    let body = body.find('{').map_or(body, |start| &body[start..]);
    serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| ParseError::UnexpectedFormat("empty classifier output".to_string()))?
        .map_err(ParseError::from)
}

#[allow(clippy::cast_possible_truncation)]
fn channel(value: Option<f64>) -> i64 {
    // Saturating cast; fractions truncate toward zero.
    value.map_or(0, |v| v as i64)
}

/// The recognized classifier actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    LedOn,
    LedOff,
    SensorOn,
    SensorOff,
    LcdOn,
    LcdOff,
    LcdText,
    LedColor,
    Rgb,
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "led_on" => Ok(Self::LedOn),
            "led_off" => Ok(Self::LedOff),
            "sensor_on" => Ok(Self::SensorOn),
            "sensor_off" => Ok(Self::SensorOff),
            "lcd_on" => Ok(Self::LcdOn),
            "lcd_off" => Ok(Self::LcdOff),
            "lcd_text" => Ok(Self::LcdText),
            "led_color" => Ok(Self::LedColor),
            "rgb" => Ok(Self::Rgb),
            _ => Err(ParseError::UnrecognizedAction(s.to_string())),
        }
    }
}

/// Classifier JSON with every field optional and type-checked.
#[derive(Debug, Default, Deserialize)]
struct IntentPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    color: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    r: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    b: Option<f64>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_actions() {
        let cases = [
            ("led_on", DeviceCommand::LedOn),
            ("led_off", DeviceCommand::LedOff),
            ("sensor_on", DeviceCommand::SensorOn),
            ("sensor_off", DeviceCommand::SensorOff),
            ("lcd_on", DeviceCommand::LcdOn),
            ("lcd_off", DeviceCommand::LcdOff),
        ];
        for (action, expected) in cases {
            let raw = format!(r#"{{"action":"{action}"}}"#);
            assert_eq!(resolve(&raw), expected, "{action}");
        }
    }

    #[test]
    fn action_is_case_insensitive() {
        assert_eq!(resolve(r#"{"action":" LED_ON "}"#), DeviceCommand::LedOn);
    }

    #[test]
    fn fenced_output() {
        let raw = "```json\n{\"action\":\"led_off\"}\n```";
        assert_eq!(resolve(raw), DeviceCommand::LedOff);

        let raw = "```{\"action\":\"led_off\"}```";
        assert_eq!(resolve(raw), DeviceCommand::LedOff);
    }

    #[test]
    fn fenced_malformed_body_is_unknown() {
        let raw = "```json {bad} ```";
        assert!(matches!(try_resolve(raw), Err(ParseError::Json(_))));
        assert_eq!(resolve(raw), DeviceCommand::Unknown);
    }

    #[test]
    fn object_wrapped_in_prose() {
        let raw = r#"Sure! {"action":"sensor_on"} Anything else?"#;
        assert_eq!(resolve(raw), DeviceCommand::SensorOn);
    }

    #[test]
    fn trailing_prose_after_object() {
        assert_eq!(resolve(r#"{"action":"led_on"} 입니다"#), DeviceCommand::LedOn);
        assert_eq!(
            resolve("```json\n{\"action\":\"lcd_off\"}\n```\n도움이 되었나요?"),
            DeviceCommand::LcdOff
        );
        assert_eq!(
            resolve(r#"{"action":"led_color","color":"파란색"} {"action":"led_off"}"#),
            DeviceCommand::color("파란색")
        );
    }

    #[test]
    fn empty_output_is_unexpected_format() {
        assert!(matches!(try_resolve("  "), Err(ParseError::UnexpectedFormat(_))));
    }

    #[test]
    fn named_color() {
        let cmd = resolve(r#"{"action":"led_color","color":"빨간색"}"#);
        assert_eq!(cmd, DeviceCommand::color("빨간색"));
    }

    #[test]
    fn led_color_without_color_defaults_to_white_name() {
        let cmd = resolve(r#"{"action":"led_color"}"#);
        assert_eq!(cmd, DeviceCommand::color(DEFAULT_COLOR_NAME));

        let cmd = resolve(r#"{"action":"led_color","color":42}"#);
        assert_eq!(cmd, DeviceCommand::color(DEFAULT_COLOR_NAME));
    }

    #[test]
    fn rgb_with_color_name() {
        let cmd = resolve(r#"{"action":"rgb","color":"파란색","r":1,"g":2,"b":3}"#);
        assert_eq!(cmd, DeviceCommand::color("파란색"));
    }

    #[test]
    fn rgb_channels_are_clamped() {
        let cmd = resolve(r#"{"action":"rgb","r":300,"g":-5,"b":10}"#);
        assert_eq!(cmd, DeviceCommand::SetRgb(RgbColor::new(255, 0, 10)));
    }

    #[test]
    fn rgb_missing_or_mistyped_channels_default_to_zero() {
        let cmd = resolve(r#"{"action":"rgb","r":"255","b":12.9}"#);
        assert_eq!(cmd, DeviceCommand::SetRgb(RgbColor::new(0, 0, 12)));

        let cmd = resolve(r#"{"action":"rgb"}"#);
        assert_eq!(cmd, DeviceCommand::SetRgb(RgbColor::black()));

        let cmd = resolve(r#"{"action":"rgb","r":1e300,"g":null,"b":[1]}"#);
        assert_eq!(cmd, DeviceCommand::SetRgb(RgbColor::new(255, 0, 0)));
    }

    #[test]
    fn lcd_text_is_truncated() {
        let long = "a".repeat(40);
        let raw = format!(r#"{{"action":"lcd_text","text":"{long}"}}"#);
        assert_eq!(resolve(&raw), DeviceCommand::lcd_text("a".repeat(32)));
    }

    #[test]
    fn lcd_text_missing_uses_placeholder() {
        let cmd = resolve(r#"{"action":"lcd_text"}"#);
        assert_eq!(cmd, DeviceCommand::LcdText(LcdText::placeholder()));

        let cmd = resolve(r#"{"action":"lcd_text","text":{"nested":true}}"#);
        assert_eq!(cmd, DeviceCommand::LcdText(LcdText::placeholder()));
    }

    #[test]
    fn missing_action() {
        let err = try_resolve(r#"{"color":"빨간색"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "action"));

        let err = try_resolve(r#"{"action":7}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn unrecognized_action() {
        let err = try_resolve(r#"{"action":"dance"}"#).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedAction(ref a) if a == "dance"));
        assert_eq!(resolve(r#"{"action":"dance"}"#), DeviceCommand::Unknown);
    }

    #[test]
    fn non_object_json() {
        assert!(matches!(
            try_resolve("[1, 2, 3]"),
            Err(ParseError::UnexpectedFormat(_))
        ));
        assert!(matches!(
            try_resolve("\"led_on\""),
            Err(ParseError::UnexpectedFormat(_))
        ));
    }

    #[test]
    fn garbage_is_unknown() {
        for raw in ["", "   ", "```", "null", "{", "}{", "불 켜줘", "{\"action\":"] {
            assert_eq!(resolve(raw), DeviceCommand::Unknown, "{raw:?}");
        }
    }

    #[test]
    fn strip_fence_variants() {
        assert_eq!(strip_code_fence("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}"), "{}");
        assert_eq!(strip_code_fence("{}"), "{}");
    }
}
