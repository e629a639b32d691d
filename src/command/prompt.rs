// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Few-shot instruction prompt for the intent classifier.

const INSTRUCTIONS: &str = r#"다음 중 하나만 JSON으로 답해:
- 불 켜줘, LED 켜줘 → {"action":"led_on"}
- 불 꺼줘, LED 꺼줘 → {"action":"led_off"}
- 센서 켜줘 → {"action":"sensor_on"}
- 센서 꺼줘 → {"action":"sensor_off"}
- LCD 켜줘 → {"action":"lcd_on"}
- LCD 꺼줘 → {"action":"lcd_off"}
- LCD에 (.*) 띄워줘, (.*) 표시해줘 → {"action":"lcd_text","text":"$1"}
- (.*) 색으로 바꿔줘, (.*) 색으로 설정해줘 → {"action":"led_color","color":"$1"}
- 빨강 (r) 초록 (g) 파랑 (b)으로 설정해줘 → {"action":"rgb","r":r,"g":g,"b":b}
해당하는 것이 없으면 {"action":"unknown"}"#;

/// Builds the classifier prompt for one utterance.
///
/// Double quotes in the utterance are replaced so the transcript cannot
/// close the quoted string it is embedded in.
///
/// ```
/// use voxlight::command::build_prompt;
///
/// let prompt = build_prompt("불 켜줘");
/// assert!(prompt.starts_with("\"불 켜줘\" →"));
/// assert!(prompt.contains(r#"{"action":"led_on"}"#));
/// ```
#[must_use]
pub fn build_prompt(utterance: &str) -> String {
    let utterance = utterance.trim().replace('"', "'");
    format!("\"{utterance}\" → {INSTRUCTIONS}")
}
