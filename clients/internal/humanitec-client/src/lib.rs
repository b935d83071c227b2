// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Humanitec Platform API Client Library
//!
//! This client provides typed access to the Humanitec platform API. Every
//! request is authenticated with a bearer token and carries a
//! `Humanitec-User-Agent` header identifying the SDK (and optionally the
//! calling application).
//!
//! ## Usage
//!
//! ```ignore
//! use humanitec_client::{Client, Config};
//!
//! let client = Client::new(Config::new(std::env::var("HUMANITEC_TOKEN")?))?;
//!
//! let me = client.get_current_user().send().await?.into_inner();
//! let apps = client.list_applications().org_id("my-org").send().await?;
//! ```
//!
//! ### Logging requests and responses
//!
//! Observers receive exact copies of the bodies that went over the wire.
//! The caller still gets a fully readable response.
//!
//! ```ignore
//! use humanitec_client::{Client, Config};
//!
//! let client = Client::new(
//!     Config::new(token)
//!         .with_request_logger(|r| eprintln!("{} {}", r.method, r.url))
//!         .with_response_logger(|r| eprintln!("-> {}", r.status)),
//! )?;
//! ```
//!
//! ### Deferred authentication
//!
//! ```ignore
//! let client = Client::new(Config::default().with_skip_initial_token_check(true))?;
//! // Requests fail with Error::MissingToken until a token is set.
//! client.set_token(token);
//! ```

pub mod auth;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::{AuthConfig, humanitec_user_agent};
pub use client::{Client, RequestEditor, ResponseValue};
pub use config::Config;
pub use error::Error;
pub use transport::{
    HttpSend, LoggingTransport, RequestDetails, RequestLogger, ResponseDetails, ResponseLogger,
};

/// Base URL used when the configuration does not name one
pub const DEFAULT_API_HOST: &str = "https://api.humanitec.io/";

/// SDK name reported in the user agent
pub const SDK: &str = env!("CARGO_PKG_NAME");

/// SDK version reported in the user agent
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `<sdk>/<version>` segment of the user agent
pub const SDK_HEADER: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
