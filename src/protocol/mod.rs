// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External collaborators: the state store and the intent classifier.
//!
//! Both are opaque services reached through a trait so the controller can
//! run against the real backends or against in-process stand-ins.
//!
//! # Implementations
//!
//! - [`FirebaseStore`]: Firebase Realtime Database over its REST API
//! - [`GeminiClassifier`]: Gemini `generateContent` over HTTP
//! - [`MemoryStore`]: in-process store for offline runs and tests

#[cfg(feature = "http")]
mod firebase;
#[cfg(feature = "http")]
mod gemini;
mod memory;

#[cfg(feature = "http")]
pub use firebase::{FirebaseConfig, FirebaseStore};
#[cfg(feature = "http")]
pub use gemini::{GeminiClassifier, GeminiConfig};
pub use memory::MemoryStore;

use std::future::Future;

use serde_json::Value;

use crate::error::ProtocolError;
use crate::state::{StorePath, StoreWrite};

/// A key-value tree addressed by [`StorePath`].
pub trait StateStore {
    /// Reads the value at `path`. `None` means nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the store cannot be reached.
    fn get(
        &self,
        path: StorePath,
    ) -> impl Future<Output = Result<Option<Value>, ProtocolError>> + Send;

    /// Replaces the value at the write's path.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the store cannot be reached or rejects
    /// the write.
    fn set(&self, write: &StoreWrite) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

/// A natural language to intent classifier.
pub trait IntentClassifier {
    /// Sends a prompt and returns the raw text answer.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the classifier cannot be reached or
    /// answers without text.
    fn classify(&self, prompt: &str) -> impl Future<Output = Result<String, ProtocolError>> + Send;
}
