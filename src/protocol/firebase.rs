// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firebase Realtime Database over its REST API.
//!
//! Each path is a JSON document at `<database>/<root>/<path>.json`. Writes
//! are `PUT`s that replace the value, reads are `GET`s where `null` means
//! nothing is stored.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::config::{optional_env, required_env};
use crate::error::{Error, ProtocolError};
use crate::protocol::StateStore;
use crate::state::{StorePath, StoreWrite};

// ============================================================================
// FirebaseConfig
// ============================================================================

/// Configuration for a Firebase Realtime Database device tree.
///
/// # Examples
///
/// ```
/// use voxlight::protocol::FirebaseConfig;
/// use std::time::Duration;
///
/// let config = FirebaseConfig::new("https://example-default-rtdb.firebaseio.com/")
///     .with_root("smart_home/device_02")
///     .with_auth("secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(
///     config.base_url(),
///     "https://example-default-rtdb.firebaseio.com/smart_home/device_02"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    database_url: String,
    root: String,
    auth: Option<String>,
    timeout: Duration,
}

impl FirebaseConfig {
    /// Default device root inside the database.
    pub const DEFAULT_ROOT: &'static str = "smart_home/device_01";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given database URL.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            root: Self::DEFAULT_ROOT.to_string(),
            auth: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// - `FIREBASE_DATABASE_URL` (required)
    /// - `FIREBASE_DEVICE_ROOT` (optional)
    /// - `FIREBASE_AUTH` (optional database secret or ID token)
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the database URL is not set.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::new(required_env("FIREBASE_DATABASE_URL")?);
        if let Some(root) = optional_env("FIREBASE_DEVICE_ROOT") {
            config = config.with_root(root);
        }
        if let Some(auth) = optional_env("FIREBASE_AUTH") {
            config = config.with_auth(auth);
        }
        Ok(config)
    }

    /// Sets the device root, e.g. `smart_home/device_01`.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the `auth` query parameter sent with every request.
    #[must_use]
    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the device root.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the URL of the device root, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let database = self.database_url.trim_end_matches('/');
        let root = self.root.trim_matches('/');
        if root.is_empty() {
            database.to_string()
        } else {
            format!("{database}/{root}")
        }
    }

    /// Creates a `FirebaseStore` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is not http(s) or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<FirebaseStore, ProtocolError> {
        if !(self.database_url.starts_with("https://") || self.database_url.starts_with("http://"))
        {
            return Err(ProtocolError::InvalidAddress(self.database_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(FirebaseStore {
            base_url: self.base_url(),
            client,
            auth: self.auth,
        })
    }
}

// ============================================================================
// FirebaseStore
// ============================================================================

/// [`StateStore`] backed by a Firebase Realtime Database.
///
/// ```no_run
/// use voxlight::protocol::{FirebaseConfig, StateStore};
/// use voxlight::state::StoreWrite;
///
/// # async fn example() -> voxlight::Result<()> {
/// let store = FirebaseConfig::from_env()?.into_client()?;
/// store.set(&StoreWrite::led_enabled(true)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    base_url: String,
    client: Client,
    auth: Option<String>,
}

impl FirebaseStore {
    /// Returns the URL of the device root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the REST URL for a path.
    fn url_for(&self, path: StorePath) -> String {
        match &self.auth {
            Some(auth) => format!(
                "{}/{}.json?auth={}",
                self.base_url,
                path.as_str(),
                urlencoding::encode(auth)
            ),
            None => format!("{}/{}.json", self.base_url, path.as_str()),
        }
    }
}

impl StateStore for FirebaseStore {
    async fn get(&self, path: StorePath) -> Result<Option<Value>, ProtocolError> {
        tracing::debug!(path = %path, "Reading from store");

        let response = self
            .client
            .get(self.url_for(path))
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        let response = check_status(response)?;

        let value: Value = response.json().await.map_err(ProtocolError::Http)?;
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }

    async fn set(&self, write: &StoreWrite) -> Result<(), ProtocolError> {
        tracing::debug!(path = %write.path(), value = %write.value(), "Writing to store");

        let response = self
            .client
            .put(self.url_for(write.path()))
            .json(write.value())
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProtocolError::AuthenticationFailed);
    }
    if !status.is_success() {
        return Err(ProtocolError::ConnectionFailed(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }
    Ok(response)
}
