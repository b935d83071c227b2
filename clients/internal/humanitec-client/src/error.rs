// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for humanitec-client

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

use crate::types::HumanitecErrorResponse;

/// Errors that can occur while building the client or performing a request
#[derive(Error, Debug)]
pub enum Error {
    /// No API token was configured, either at construction time or when a
    /// request was about to be sent
    #[error("token is required")]
    MissingToken,

    /// Reading or re-buffering a request/response body failed
    ///
    /// When the body itself failed mid-read, the `reqwest::Error` it produced
    /// is the inner error, reachable through `get_ref()` or `into_inner()`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying HTTP client failed to send the request or read the
    /// response
    #[error("Communication error: {0}")]
    Communication(#[from] reqwest::Error),

    /// The request could not be constructed (bad header value, missing
    /// parameter, unserializable body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The base URL and path did not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API answered with a non-success status code
    #[error("Error response: status {status}")]
    ErrorResponse {
        status: StatusCode,
        body: Option<HumanitecErrorResponse>,
    },

    /// A success response whose body did not match the expected type
    #[error("Invalid response payload: {source}")]
    InvalidResponsePayload {
        body: Bytes,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Status code of the response, if this error came from one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ErrorResponse { status, .. } => Some(*status),
            Error::Communication(e) => e.status(),
            _ => None,
        }
    }
}
