// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The client factory and the request pipeline shared by all operations

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{AuthConfig, add_auth_headers, humanitec_user_agent};
use crate::builder;
use crate::config::Config;
use crate::error::Error;
use crate::transport::{HttpSend, LoggingTransport, default_http_client};

/// Hook that mutates every outgoing request before it is sent
pub type RequestEditor = Arc<dyn Fn(&mut reqwest::Request) -> Result<(), Error> + Send + Sync>;

/// Authenticated Humanitec API client
///
/// Every request goes through the registered request editors (the first
/// one adds the `Authorization` and `Humanitec-User-Agent` headers) and then
/// through the logging transport. Cloning is cheap; clones share the
/// transport and the token.
#[derive(Clone)]
pub struct Client {
    baseurl: String,
    transport: Arc<dyn HttpSend>,
    request_editors: Vec<RequestEditor>,
    auth_config: AuthConfig,
}

impl Client {
    /// Create a new client from `config`
    ///
    /// # Errors
    /// Returns [`Error::MissingToken`] if the token is empty and
    /// `skip_initial_token_check` is not set, or an error if the default
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, Error> {
        if config.token.is_empty() && !config.skip_initial_token_check {
            return Err(Error::MissingToken);
        }

        let baseurl = config.effective_url().to_string();

        let inner: Arc<dyn HttpSend> = match config.http_client {
            Some(client) => client,
            None => Arc::new(default_http_client()?),
        };
        let transport = Arc::new(LoggingTransport::new(
            inner,
            config.request_logger,
            config.response_logger,
        ));

        let user_agent = humanitec_user_agent(config.internal_app.as_deref(), crate::SDK_HEADER);
        let auth_config = AuthConfig::new(config.token, user_agent);

        let editor_auth = auth_config.clone();
        let request_editors: Vec<RequestEditor> =
            vec![Arc::new(move |request: &mut reqwest::Request| {
                add_auth_headers(&editor_auth, request)
            })];

        tracing::debug!(baseurl = %baseurl, "created humanitec client");

        Ok(Self {
            baseurl,
            transport,
            request_editors,
            auth_config,
        })
    }

    /// Register an additional request editor, run after authentication
    pub fn with_request_editor(
        mut self,
        editor: impl Fn(&mut reqwest::Request) -> Result<(), Error> + Send + Sync + 'static,
    ) -> Self {
        self.request_editors.push(Arc::new(editor));
        self
    }

    /// Base URL requests are sent to
    pub fn baseurl(&self) -> &str {
        &self.baseurl
    }

    /// Get the authentication configuration
    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }

    /// Replace the API token for this client and all of its clones
    pub fn set_token(&self, token: impl Into<String>) {
        self.auth_config.set_token(token);
    }

    pub fn get_current_user(&self) -> builder::GetCurrentUser<'_> {
        builder::GetCurrentUser::new(self)
    }

    pub fn update_current_user(&self) -> builder::UpdateCurrentUser<'_> {
        builder::UpdateCurrentUser::new(self)
    }

    pub fn list_organizations(&self) -> builder::ListOrganizations<'_> {
        builder::ListOrganizations::new(self)
    }

    pub fn list_applications(&self) -> builder::ListApplications<'_> {
        builder::ListApplications::new(self)
    }

    pub fn get_application(&self) -> builder::GetApplication<'_> {
        builder::GetApplication::new(self)
    }

    pub fn create_application(&self) -> builder::CreateApplication<'_> {
        builder::CreateApplication::new(self)
    }

    pub fn delete_application(&self) -> builder::DeleteApplication<'_> {
        builder::DeleteApplication::new(self)
    }

    pub fn list_environments(&self) -> builder::ListEnvironments<'_> {
        builder::ListEnvironments::new(self)
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!(
            "{}{}",
            self.baseurl.trim_end_matches('/'),
            path
        ))?)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<reqwest::Request, Error> {
        let mut request = reqwest::Request::new(method, self.url(path)?);
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(request)
    }

    pub(crate) fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Request, Error> {
        let mut request = self.request(method, path)?;
        let bytes = serde_json::to_vec(body)
            .map_err(|e| Error::InvalidRequest(format!("Failed to serialize body: {e}")))?;
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(bytes.into());
        Ok(request)
    }

    /// Run the request editors, then hand the request to the transport
    pub(crate) async fn exec(
        &self,
        mut request: reqwest::Request,
    ) -> Result<reqwest::Response, Error> {
        for editor in &self.request_editors {
            if let Err(e) = editor(&mut request) {
                tracing::warn!(
                    method = %request.method(),
                    url = %request.url(),
                    error = %e,
                    "request rejected before sending"
                );
                return Err(e);
            }
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status().as_u16(), "received response");

        Ok(response)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("baseurl", &self.baseurl)
            .field("request_editors", &self.request_editors.len())
            .field("auth_config", &self.auth_config)
            .finish_non_exhaustive()
    }
}

/// Typed response body together with the status and headers it came with
#[derive(Debug)]
pub struct ResponseValue<T> {
    inner: T,
    status: StatusCode,
    headers: HeaderMap,
}

impl<T> ResponseValue<T> {
    pub fn new(inner: T, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            inner,
            status,
            headers,
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<T: DeserializeOwned> ResponseValue<T> {
    /// Decode a JSON success response, or turn a failure status into
    /// [`Error::ErrorResponse`]
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(error_response(status, &body));
        }

        match serde_json::from_slice(&body) {
            Ok(inner) => Ok(Self::new(inner, status, headers)),
            Err(source) => Err(Error::InvalidResponsePayload { body, source }),
        }
    }
}

impl ResponseValue<()> {
    /// Accept a success response without a body
    pub(crate) async fn empty(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(error_response(status, &body));
        }

        Ok(Self::new((), status, headers))
    }
}

impl<T> Deref for ResponseValue<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

fn error_response(status: StatusCode, body: &[u8]) -> Error {
    Error::ErrorResponse {
        status,
        body: serde_json::from_slice(body).ok(),
    }
}
