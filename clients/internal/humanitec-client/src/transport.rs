// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP transport and the request/response logging decorator
//!
//! [`HttpSend`] is the seam between [`crate::Client`] and the network. It is
//! implemented for `reqwest::Client`, and callers may supply their own
//! implementation through [`crate::Config::with_http_client`].
//!
//! [`LoggingTransport`] wraps any `HttpSend` and hands byte-for-byte copies of
//! request and response bodies to the configured observers. The bodies seen by
//! the server and by the caller are left intact: buffered bodies are copied,
//! streaming bodies are drained once and replaced with an identical buffered
//! body.

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Method, StatusCode, Url};
use tracing::Span;

use crate::error::Error;

/// Something that can execute a fully built HTTP request
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, Error>;
}

#[async_trait]
impl HttpSend for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, Error> {
        Ok(self.execute(request).await?)
    }
}

/// Build the `reqwest::Client` used when no custom transport is configured
///
/// reqwest is compiled without a bundled rustls provider, so the `ring`
/// provider is installed as the process default first.
pub fn default_http_client() -> Result<reqwest::Client, Error> {
    // Err only means another provider was installed first.
    let _ = rustls::crypto::ring::default_provider().install_default();
    Ok(reqwest::Client::builder().build()?)
}

/// What a request observer gets to see
#[derive(Clone, Debug)]
pub struct RequestDetails {
    /// Span that was current when the request was sent
    pub span: Span,
    pub method: Method,
    pub url: Url,
    /// Exact request body, `None` if the request had no body
    pub body: Option<Bytes>,
}

/// What a response observer gets to see
#[derive(Clone, Debug)]
pub struct ResponseDetails {
    /// Span that was current when the request was sent
    pub span: Span,
    pub status: StatusCode,
    /// Exact response body. An empty response yields `Some` of an empty
    /// buffer.
    pub body: Option<Bytes>,
}

pub type RequestLogger = Arc<dyn Fn(&RequestDetails) + Send + Sync>;
pub type ResponseLogger = Arc<dyn Fn(&ResponseDetails) + Send + Sync>;

/// Transport decorator that reports request and response bodies to observers
pub struct LoggingTransport {
    inner: Arc<dyn HttpSend>,
    request_logger: Option<RequestLogger>,
    response_logger: Option<ResponseLogger>,
}

impl LoggingTransport {
    pub fn new(
        inner: Arc<dyn HttpSend>,
        request_logger: Option<RequestLogger>,
        response_logger: Option<ResponseLogger>,
    ) -> Self {
        Self {
            inner,
            request_logger,
            response_logger,
        }
    }
}

#[async_trait]
impl HttpSend for LoggingTransport {
    async fn send(&self, mut request: reqwest::Request) -> Result<reqwest::Response, Error> {
        let span = Span::current();

        if let Some(logger) = &self.request_logger {
            let body = copy_request_body(&mut request).await?;
            logger(&RequestDetails {
                span: span.clone(),
                method: request.method().clone(),
                url: request.url().clone(),
                body,
            });
        }

        let response = self.inner.send(request).await?;

        let Some(logger) = &self.response_logger else {
            return Ok(response);
        };

        let status = response.status();
        let (response, body) = copy_response_body(response).await?;
        logger(&ResponseDetails {
            span,
            status,
            body: Some(body),
        });

        Ok(response)
    }
}

/// Copy the request body, leaving an identical body on the request
async fn copy_request_body(request: &mut reqwest::Request) -> Result<Option<Bytes>, Error> {
    let Some(body) = request.body_mut().take() else {
        return Ok(None);
    };

    let copy = match body.as_bytes().map(Bytes::copy_from_slice) {
        Some(copy) => {
            *request.body_mut() = Some(body);
            copy
        }
        None => {
            let drained = drain(body).await?;
            *request.body_mut() = Some(reqwest::Body::from(drained.clone()));
            drained
        }
    };

    Ok(Some(copy))
}

/// Read the whole response body and return a response that replays it
///
/// Status, version, headers and extensions (including the request URL) are
/// carried over unchanged.
async fn copy_response_body(
    response: reqwest::Response,
) -> Result<(reqwest::Response, Bytes), Error> {
    let (parts, body) = http::Response::<reqwest::Body>::from(response).into_parts();
    let bytes = drain(body).await?;
    let restored = http::Response::from_parts(parts, reqwest::Body::from(bytes.clone()));
    Ok((reqwest::Response::from(restored), bytes))
}

/// Collect a body into memory. A read failure becomes `Error::Io` wrapping
/// the `reqwest::Error` unchanged.
async fn drain(body: reqwest::Body) -> Result<Bytes, Error> {
    let collected = body.collect().await.map_err(std::io::Error::other)?;
    Ok(collected.to_bytes())
}

fn body_text(body: Option<&Bytes>) -> Cow<'_, str> {
    match body {
        Some(bytes) => String::from_utf8_lossy(bytes),
        None => Cow::Borrowed(""),
    }
}

/// Request observer that emits a `debug` event with method, URL and body
pub fn tracing_request_logger() -> RequestLogger {
    Arc::new(|details: &RequestDetails| {
        let _entered = details.span.enter();
        tracing::debug!(
            method = %details.method,
            url = %details.url,
            body = %body_text(details.body.as_ref()),
            "humanitec request"
        );
    })
}

/// Response observer that emits a `debug` event with status and body
pub fn tracing_response_logger() -> ResponseLogger {
    Arc::new(|details: &ResponseDetails| {
        let _entered = details.span.enter();
        tracing::debug!(
            status = details.status.as_u16(),
            body = %body_text(details.body.as_ref()),
            "humanitec response"
        );
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use http_body_util::{Full, StreamBody};
    use hyper::body::Frame;

    /// Records the body it received and answers with a fixed reply
    struct StubTransport {
        seen: Mutex<Vec<Option<Bytes>>>,
        status: u16,
        reply: &'static str,
    }

    impl StubTransport {
        fn new(status: u16, reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                status,
                reply,
            })
        }
    }

    #[async_trait]
    impl HttpSend for StubTransport {
        async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, Error> {
            let body = request
                .body()
                .and_then(|b| b.as_bytes())
                .map(Bytes::copy_from_slice);
            self.seen.lock().unwrap().push(body);

            let response = http::Response::builder()
                .status(self.status)
                .header("content-type", "application/json")
                .body(self.reply)
                .unwrap();
            Ok(reqwest::Response::from(response))
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl HttpSend for FailingTransport {
        async fn send(&self, _request: reqwest::Request) -> Result<reqwest::Response, Error> {
            Err(Error::Io(std::io::Error::other("connection reset")))
        }
    }

    fn post(body: &'static str) -> reqwest::Request {
        let mut request = reqwest::Request::new(
            Method::POST,
            Url::parse("http://api.example.test/current-user").unwrap(),
        );
        *request.body_mut() = Some(reqwest::Body::from(body));
        request
    }

    fn recording_loggers() -> (
        RequestLogger,
        ResponseLogger,
        Arc<Mutex<Vec<RequestDetails>>>,
        Arc<Mutex<Vec<ResponseDetails>>>,
    ) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responses = Arc::new(Mutex::new(Vec::new()));
        let req_sink = requests.clone();
        let res_sink = responses.clone();
        let request_logger: RequestLogger =
            Arc::new(move |d: &RequestDetails| req_sink.lock().unwrap().push(d.clone()));
        let response_logger: ResponseLogger =
            Arc::new(move |d: &ResponseDetails| res_sink.lock().unwrap().push(d.clone()));
        (request_logger, response_logger, requests, responses)
    }

    #[tokio::test]
    async fn observers_see_identical_bodies_and_bodies_stay_readable() {
        let stub = StubTransport::new(200, r#"{"id":"u-1"}"#);
        let (req_logger, res_logger, requests, responses) = recording_loggers();
        let transport = LoggingTransport::new(stub.clone(), Some(req_logger), Some(res_logger));

        let response = transport.send(post(r#"{"name":"changed"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(response.text().await.unwrap(), r#"{"id":"u-1"}"#);

        let seen = stub.seen.lock().unwrap();
        assert_eq!(
            seen[0].as_deref(),
            Some(br#"{"name":"changed"}"#.as_slice())
        );

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.path(), "/current-user");
        assert_eq!(requests[0].body, seen[0]);

        let responses = responses.lock().unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].status, StatusCode::OK);
        assert_eq!(
            responses[0].body.as_deref(),
            Some(br#"{"id":"u-1"}"#.as_slice())
        );
    }

    #[tokio::test]
    async fn request_without_body_reports_none() {
        let stub = StubTransport::new(204, "");
        let (req_logger, res_logger, requests, responses) = recording_loggers();
        let transport = LoggingTransport::new(stub.clone(), Some(req_logger), Some(res_logger));

        let request = reqwest::Request::new(
            Method::DELETE,
            Url::parse("http://api.example.test/orgs/o/apps/a").unwrap(),
        );
        let response = transport.send(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(requests.lock().unwrap()[0].body.is_none());
        assert!(stub.seen.lock().unwrap()[0].is_none());
        assert_eq!(
            responses.lock().unwrap()[0].body.as_deref(),
            Some(b"".as_slice())
        );
    }

    #[tokio::test]
    async fn without_observers_the_request_passes_through() {
        let stub = StubTransport::new(200, "{}");
        let transport = LoggingTransport::new(stub.clone(), None, None);

        let response = transport.send(post(r#"{"a":1}"#)).await.unwrap();

        assert_eq!(response.text().await.unwrap(), "{}");
        assert_eq!(
            stub.seen.lock().unwrap()[0].as_deref(),
            Some(br#"{"a":1}"#.as_slice())
        );
    }

    #[tokio::test]
    async fn send_errors_propagate_and_skip_response_observer() {
        let (req_logger, res_logger, requests, responses) = recording_loggers();
        let transport = LoggingTransport::new(
            Arc::new(FailingTransport),
            Some(req_logger),
            Some(res_logger),
        );

        let err = transport.send(post("{}")).await.unwrap_err();

        match err {
            Error::Io(e) => assert_eq!(e.to_string(), "connection reset"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(requests.lock().unwrap().len(), 1);
        assert!(responses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn copied_response_keeps_status_and_headers() {
        let original = http::Response::builder()
            .status(404)
            .header("x-request-id", "abc")
            .body("missing")
            .unwrap();

        let (response, bytes) = copy_response_body(reqwest::Response::from(original))
            .await
            .unwrap();

        assert_eq!(bytes, Bytes::from_static(b"missing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get("x-request-id").unwrap(), "abc");
        assert_eq!(response.bytes().await.unwrap(), bytes);
    }

    /// Body that yields one chunk, then fails
    fn failing_body() -> reqwest::Body {
        let frames: Vec<Result<Frame<Bytes>, std::io::Error>> = vec![
            Ok(Frame::data(Bytes::from_static(b"partial"))),
            Err(std::io::Error::other("connection reset mid-body")),
        ];
        reqwest::Body::wrap(StreamBody::new(futures_util::stream::iter(frames)))
    }

    /// Answers 200 with a body that fails while being read
    struct BrokenBodyTransport;

    #[async_trait]
    impl HttpSend for BrokenBodyTransport {
        async fn send(&self, _request: reqwest::Request) -> Result<reqwest::Response, Error> {
            let response = http::Response::builder()
                .status(200)
                .body(failing_body())
                .unwrap();
            Ok(reqwest::Response::from(response))
        }
    }

    fn assert_wraps_body_error(err: Error) {
        match err {
            Error::Io(e) => {
                let inner = e.get_ref().expect("inner error");
                assert!(inner.downcast_ref::<reqwest::Error>().is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn streaming_request_body_is_drained_and_replaced() {
        let stub = StubTransport::new(200, "{}");
        let (req_logger, res_logger, requests, _responses) = recording_loggers();
        let transport = LoggingTransport::new(stub.clone(), Some(req_logger), Some(res_logger));

        let mut request = post("");
        *request.body_mut() = Some(reqwest::Body::wrap(Full::new(Bytes::from_static(
            b"streamed",
        ))));
        assert!(request.body().and_then(|b| b.as_bytes()).is_none());

        transport.send(request).await.unwrap();

        assert_eq!(
            requests.lock().unwrap()[0].body.as_deref(),
            Some(b"streamed".as_slice())
        );
        assert_eq!(
            stub.seen.lock().unwrap()[0].as_deref(),
            Some(b"streamed".as_slice())
        );
    }

    #[tokio::test]
    async fn failing_request_body_is_an_io_error_and_nothing_is_sent() {
        let stub = StubTransport::new(200, "{}");
        let (req_logger, res_logger, requests, responses) = recording_loggers();
        let transport = LoggingTransport::new(stub.clone(), Some(req_logger), Some(res_logger));

        let mut request = post("");
        *request.body_mut() = Some(failing_body());

        let err = transport.send(request).await.unwrap_err();

        assert_wraps_body_error(err);
        assert!(stub.seen.lock().unwrap().is_empty());
        assert!(requests.lock().unwrap().is_empty());
        assert!(responses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failing_response_body_is_an_io_error_and_skips_observer() {
        let (req_logger, res_logger, requests, responses) = recording_loggers();
        let transport = LoggingTransport::new(
            Arc::new(BrokenBodyTransport),
            Some(req_logger),
            Some(res_logger),
        );

        let err = transport.send(post("{}")).await.unwrap_err();

        assert_wraps_body_error(err);
        assert_eq!(requests.lock().unwrap().len(), 1);
        assert!(responses.lock().unwrap().is_empty());
    }

    #[test]
    fn body_text_is_lossy_and_empty_for_none() {
        assert_eq!(body_text(None), "");
        let bytes = Bytes::from_static(b"ok\xff");
        assert_eq!(body_text(Some(&bytes)), "ok\u{fffd}");
    }
}
