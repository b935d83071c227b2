// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Authentication support for Humanitec API requests
//!
//! This module provides the `add_auth_headers` request editor that the
//! client runs before every request. It adds the bearer token and the
//! composite `Humanitec-User-Agent` header.

use std::sync::{Arc, RwLock};

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the application and SDK identification
pub const USER_AGENT_HEADER: HeaderName = HeaderName::from_static("humanitec-user-agent");

/// Authentication state shared by a client and its clones
///
/// The token lives behind a lock so it can be replaced on a live client
/// (see [`crate::Client::set_token`]).
#[derive(Clone, Debug)]
pub struct AuthConfig {
    token: Arc<RwLock<SecretString>>,
    user_agent: String,
}

impl AuthConfig {
    /// Create a new AuthConfig
    ///
    /// # Arguments
    /// * `token` - API token; may be empty, in which case every request
    ///   fails with [`Error::MissingToken`] until a token is set
    /// * `user_agent` - Value for the `Humanitec-User-Agent` header
    pub fn new(token: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(SecretString::from(token.into()))),
            user_agent: user_agent.into(),
        }
    }

    /// Replace the token used for subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        let mut current = self.token.write().unwrap_or_else(|poisoned| {
            tracing::error!("Token lock was poisoned, recovering");
            poisoned.into_inner()
        });
        *current = SecretString::from(token.into());
    }

    /// Whether a non-empty token is configured
    pub fn has_token(&self) -> bool {
        !self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .expose_secret()
            .is_empty()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `Authorization` header value for the current token
    fn bearer(&self) -> Result<HeaderValue, Error> {
        let token = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let token = token.expose_secret();
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::InvalidRequest(format!("Invalid authorization header: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Build the `Humanitec-User-Agent` value
///
/// Produces `app <app>; sdk <sdk>`, leaving out whichever part is empty.
pub fn humanitec_user_agent(app: Option<&str>, sdk: &str) -> String {
    let mut parts = Vec::with_capacity(2);

    if let Some(app) = app.filter(|a| !a.is_empty()) {
        parts.push(format!("app {app}"));
    }
    if !sdk.is_empty() {
        parts.push(format!("sdk {sdk}"));
    }

    parts.join("; ")
}

/// Add authentication headers to a request
///
/// Runs before every request the client sends. Only the request at hand
/// fails when no token is configured; the client stays usable.
///
/// # Errors
/// Returns [`Error::MissingToken`] if the token is empty, or
/// [`Error::InvalidRequest`] if the token or user agent is not a valid
/// header value.
pub fn add_auth_headers(
    auth_config: &AuthConfig,
    request: &mut reqwest::Request,
) -> Result<(), Error> {
    let bearer = auth_config.bearer()?;
    let user_agent = HeaderValue::from_str(auth_config.user_agent())
        .map_err(|e| Error::InvalidRequest(format!("Invalid user agent header: {e}")))?;

    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(USER_AGENT_HEADER, user_agent);

    Ok(())
}
