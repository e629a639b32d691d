// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP store and classifier using wiremock.

#![cfg(feature = "http")]

use serde_json::json;
use voxlight::protocol::{
    FirebaseConfig, FirebaseStore, GeminiClassifier, GeminiConfig, IntentClassifier, StateStore,
};
use voxlight::state::{StorePath, StoreWrite};
use voxlight::types::{LcdText, RgbColor};
use voxlight::{DeviceCommand, DeviceController, ProtocolError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn store_for(server: &MockServer) -> FirebaseStore {
    FirebaseConfig::new(server.uri()).into_client().unwrap()
}

fn classifier_for(server: &MockServer) -> GeminiClassifier {
    GeminiConfig::new("test-key")
        .with_base_url(server.uri())
        .into_client()
        .unwrap()
}

fn gemini_answer(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

// ============================================================================
// FirebaseStore Tests
// ============================================================================

mod firebase_store {
    use super::*;

    #[tokio::test]
    async fn put_rgb_under_device_root() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/smart_home/device_01/controls/rgb.json"))
            .and(body_json(json!({ "r": 255, "g": 0, "b": 0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "r": 255, "g": 0, "b": 0 })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = store_for(&mock_server);
        store
            .set(&StoreWrite::rgb(RgbColor::new(255, 0, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn put_display_with_auth_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/home/display.json"))
            .and(query_param("auth", "secret"))
            .and(body_json(json!({ "text": "안녕", "enabled": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = FirebaseConfig::new(mock_server.uri())
            .with_root("home")
            .with_auth("secret")
            .into_client()
            .unwrap();

        store
            .set(&StoreWrite::display(&LcdText::new("안녕"), true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_lux_value() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/smart_home/device_01/sensors/lux.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(321)))
            .mount(&mock_server)
            .await;

        let store = store_for(&mock_server);
        let value = store.get(StorePath::SensorLux).await.unwrap();
        assert_eq!(value, Some(json!(321)));
    }

    #[tokio::test]
    async fn get_missing_value_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let store = store_for(&mock_server);
        assert_eq!(store.get(StorePath::SensorLux).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Permission denied" })))
            .mount(&mock_server)
            .await;

        let store = store_for(&mock_server);
        let result = store.set(&StoreWrite::led_enabled(true)).await;
        assert!(matches!(result, Err(ProtocolError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn server_error_is_connection_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let store = store_for(&mock_server);
        let err = store.get(StorePath::SensorLux).await.unwrap_err();
        match err {
            ProtocolError::ConnectionFailed(message) => assert!(message.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

// ============================================================================
// GeminiClassifier Tests
// ============================================================================

mod gemini_classifier {
    use super::*;

    #[tokio::test]
    async fn sends_prompt_with_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_answer(r#"{"action":"led_on"}"#)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let classifier = classifier_for(&mock_server);
        let text = classifier.classify("hello").await.unwrap();
        assert_eq!(text, r#"{"action":"led_on"}"#);
    }

    #[tokio::test]
    async fn joins_text_parts_of_first_candidate() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "{\"action\":" }, { "text": "\"lcd_on\"}" }] } },
                    { "content": { "parts": [{ "text": "ignored" }] } }
                ]
            })))
            .mount(&mock_server)
            .await;

        let classifier = classifier_for(&mock_server);
        let text = classifier.classify("p").await.unwrap();
        assert_eq!(text, r#"{"action":"lcd_on"}"#);
    }

    #[tokio::test]
    async fn no_candidates_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&mock_server)
            .await;

        let classifier = classifier_for(&mock_server);
        let result = classifier.classify("p").await;
        assert!(matches!(result, Err(ProtocolError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn server_error_carries_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&mock_server)
            .await;

        let classifier = classifier_for(&mock_server);
        match classifier.classify("p").await.unwrap_err() {
            ProtocolError::ConnectionFailed(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("internal"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn forbidden_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let classifier = classifier_for(&mock_server);
        let result = classifier.classify("p").await;
        assert!(matches!(result, Err(ProtocolError::AuthenticationFailed)));
    }
}

// ============================================================================
// End-to-end Tests
// ============================================================================

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn fenced_color_answer_reaches_store() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_answer(
                "```json\n{\"action\":\"led_color\",\"color\":\"파란색\"}\n```",
            )))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/smart_home/device_01/controls/rgb.json"))
            .and(body_json(json!({ "r": 0, "g": 0, "b": 255 })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/smart_home/device_01/controls/led/enabled.json"))
            .and(body_json(json!(true)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let controller =
            DeviceController::new(store_for(&mock_server), classifier_for(&mock_server));
        let report = controller.handle_utterance("파란색으로 바꿔줘").await.unwrap();

        assert_eq!(report.command(), &DeviceCommand::color("파란색"));
        assert!(report.is_success());
        assert_eq!(controller.state().rgb(), RgbColor::new(0, 0, 255));
        assert!(controller.state().led_on());
    }

    #[tokio::test]
    async fn classifier_outage_writes_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let controller =
            DeviceController::new(store_for(&mock_server), classifier_for(&mock_server));
        let report = controller.handle_utterance("불 켜줘").await.unwrap();

        assert!(report.command().is_unknown());
        assert!(report.writes().is_empty());
        assert!(!controller.state().led_on());
    }
}
