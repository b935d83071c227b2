// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration

use std::fmt;
use std::sync::Arc;

use crate::transport::{
    HttpSend, RequestDetails, RequestLogger, ResponseDetails, ResponseLogger,
    tracing_request_logger, tracing_response_logger,
};

/// Configuration consumed by [`crate::Client::new`]
#[derive(Clone, Default)]
pub struct Config {
    /// Token used for API requests
    pub token: String,
    /// Base URL for API requests; [`crate::DEFAULT_API_HOST`] when unset or empty
    pub url: Option<String>,
    /// Observer invoked with every outgoing request
    pub request_logger: Option<RequestLogger>,
    /// Observer invoked with every response
    pub response_logger: Option<ResponseLogger>,
    /// Custom transport; a default `reqwest::Client` when unset
    pub http_client: Option<Arc<dyn HttpSend>>,
    /// Allow building the client without a token
    pub skip_initial_token_check: bool,
    /// Internal usage tracking, reported as the `app` user-agent segment
    pub internal_app: Option<String>,
}

impl Config {
    /// Create a new Config with the given token and defaults for everything else
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Set the base URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_request_logger(
        mut self,
        logger: impl Fn(&RequestDetails) + Send + Sync + 'static,
    ) -> Self {
        self.request_logger = Some(Arc::new(logger));
        self
    }

    pub fn with_response_logger(
        mut self,
        logger: impl Fn(&ResponseDetails) + Send + Sync + 'static,
    ) -> Self {
        self.response_logger = Some(Arc::new(logger));
        self
    }

    /// Log request and response bodies as `tracing` debug events
    pub fn with_tracing_loggers(mut self) -> Self {
        self.request_logger = Some(tracing_request_logger());
        self.response_logger = Some(tracing_response_logger());
        self
    }

    /// Send requests through a custom transport, e.g. a preconfigured
    /// `reqwest::Client`
    pub fn with_http_client(mut self, client: impl HttpSend + 'static) -> Self {
        self.http_client = Some(Arc::new(client));
        self
    }

    pub fn with_skip_initial_token_check(mut self, skip: bool) -> Self {
        self.skip_initial_token_check = skip;
        self
    }

    pub fn with_internal_app(mut self, app: impl Into<String>) -> Self {
        self.internal_app = Some(app.into());
        self
    }

    /// Base URL after applying the default
    pub fn effective_url(&self) -> &str {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => crate::DEFAULT_API_HOST,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"[REDACTED]")
            .field("url", &self.url)
            .field("request_logger", &self.request_logger.is_some())
            .field("response_logger", &self.response_logger.is_some())
            .field("http_client", &self.http_client.is_some())
            .field("skip_initial_token_check", &self.skip_initial_token_check)
            .field("internal_app", &self.internal_app)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_defaults_when_unset_or_empty() {
        assert_eq!(Config::new("t").effective_url(), crate::DEFAULT_API_HOST);
        assert_eq!(
            Config::new("t").with_url("").effective_url(),
            crate::DEFAULT_API_HOST
        );
        assert_eq!(
            Config::new("t").with_url("https://my-test/").effective_url(),
            "https://my-test/"
        );
    }

    #[test]
    fn builder_sets_optional_fields() {
        let config = Config::new("t")
            .with_internal_app("test/latest")
            .with_skip_initial_token_check(true)
            .with_tracing_loggers();

        assert_eq!(config.internal_app.as_deref(), Some("test/latest"));
        assert!(config.skip_initial_token_check);
        assert!(config.request_logger.is_some());
        assert!(config.response_logger.is_some());
        assert!(config.http_client.is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", Config::new("TOP_SECRET"));
        assert!(!rendered.contains("TOP_SECRET"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
