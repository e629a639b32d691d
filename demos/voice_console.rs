// SPDX-License-Identifier: MPL-2.0

//! Interactive console: type a voice command, see what the device would do.
//!
//! With `FIREBASE_DATABASE_URL` and `GEMINI_API_KEY` set, commands go to the
//! real database and classifier. Otherwise an in-memory store and a keyword
//! matcher stand in for them.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=voxlight=debug cargo run --example voice_console
//! ```
//!
//! Lines starting with `/` are console commands:
//!
//! - `/state` prints the current device state
//! - `/lux` prints the light sensor panel
//! - `/quit` exits

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use voxlight::protocol::{IntentClassifier, MemoryStore, StateStore};
use voxlight::{
    DeviceController, FirebaseConfig, GeminiConfig, LuxDisplay, LuxMonitor, ProtocolError,
};

/// Offline stand-in for the classifier.
struct KeywordClassifier;

impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, prompt: &str) -> Result<String, ProtocolError> {
        // The prompt starts with the quoted utterance.
        let utterance = prompt
            .strip_prefix('"')
            .and_then(|rest| rest.split('"').next())
            .unwrap_or(prompt);

        let answer = if utterance.contains("센서") {
            if utterance.contains("꺼") {
                r#"{"action":"sensor_off"}"#
            } else {
                r#"{"action":"sensor_on"}"#
            }
        } else if utterance.contains("화면") || utterance.contains("LCD") {
            if utterance.contains("꺼") {
                r#"{"action":"lcd_off"}"#
            } else {
                r#"{"action":"lcd_on"}"#
            }
        } else if let Some(color) = ["빨간", "파란", "초록", "노란", "보라", "분홍", "주황", "하늘"]
            .into_iter()
            .find(|stem| utterance.contains(stem))
        {
            return Ok(format!(r#"{{"action":"led_color","color":"{color}색"}}"#));
        } else if utterance.contains("꺼") {
            r#"{"action":"led_off"}"#
        } else if utterance.contains("켜") {
            r#"{"action":"led_on"}"#
        } else {
            r#"{"action":"unknown"}"#
        };
        Ok(answer.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("voxlight=info")),
        )
        .init();

    match (FirebaseConfig::from_env(), GeminiConfig::from_env()) {
        (Ok(firebase), Ok(gemini)) => {
            println!("Using {} and {}", firebase.base_url(), gemini.model());
            let controller = DeviceController::new(firebase.into_client()?, gemini.into_client()?);
            run(controller).await
        }
        _ => {
            println!("FIREBASE_DATABASE_URL or GEMINI_API_KEY not set, running offline");
            let controller = DeviceController::new(MemoryStore::new(), KeywordClassifier);
            run(controller).await
        }
    }
}

async fn run<S, C>(controller: DeviceController<S, C>) -> Result<(), Box<dyn std::error::Error>>
where
    S: StateStore + Send + Sync + 'static,
    C: IntentClassifier + Send + Sync + 'static,
{
    let _monitor = LuxMonitor::spawn(controller.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a command (e.g. \"불 켜줘\"), or /quit");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "/quit" => break,
            "/state" => println!("{:?}", controller.state()),
            "/lux" => {
                let panel = LuxDisplay::for_state(&controller.state());
                println!("{} [{}/1000] {}", panel.text(), panel.progress(), panel.status());
            }
            utterance => match controller.handle_utterance(utterance).await {
                Ok(report) => {
                    for notice in report.notices() {
                        println!("> {notice}");
                    }
                }
                Err(err) => eprintln!("! {err}"),
            },
        }
    }

    Ok(())
}
