// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Services for communicating with APIs using HTTP.

use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::{error, fmt};

/// A general service for making HTTP calls.
///
/// It might be a bit odd to refer to this trait as a "service", since
/// it appears to be more of a _client_ implementation, but think of
/// this as a proxy for a remote _service_ (even though a _client_ is used
/// to communicate with that remote service). A service might not always
/// be remote, such as when the implementation is a deterministic service
/// used for testing.
pub trait HTTPService {
    /// Default HTTP client that can be used to make HTTP requests.
    fn client() -> Client {
        ClientBuilder::new()
            .user_agent(Self::user_agent())
            .build()
            // According to the docs, build() only fails if a TLS backend
            // cannot be initialized, or if DNS resolution cannot be
            // initialized, and both of these are unrecoverable for us.
            .expect("could not create a new HTTP client")
    }

    /// An appropriate user agent to use when making HTTP requests.
    fn user_agent() -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// A fully-read HTTP response.
///
/// The body is read eagerly so the response can be inspected more than
/// once: a read call parses it as JSON, while a write call only reports
/// it back to the user when the call fails.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    status: StatusCode,
    body: String,
}

impl Response {
    /// Creates a new response from a status code and raw body.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self { status, body }
    }

    /// Creates a successful (HTTP 200) response with the given body.
    ///
    /// # Examples
    ///
    /// ```
    /// use raccclo::http::Response;
    /// let resp = Response::ok("{}");
    /// assert!(resp.is_ok());
    /// assert_eq!(resp.body(), "{}");
    /// ```
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// The HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// True if the server answered with HTTP 200.
    ///
    /// The Reddit API answers every successful call we make with a 200,
    /// so anything else, even another 2xx code, is treated as a failure.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Converts a non-200 response into an [`HTTPError::Http`].
    pub fn error_for_status(self) -> HTTPResult<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(HTTPError::Http(self.status, self.body))
        }
    }

    /// Parses the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> HTTPResult<T> {
        serde_json::from_str(&self.body).map_err(HTTPError::Deserialization)
    }

    /// Reads a reqwest response into a [`Response`].
    pub async fn read(resp: reqwest::Response) -> HTTPResult<Self> {
        let status = resp.status();
        let body = resp.text().await.map_err(HTTPError::Body)?;
        Ok(Self::new(status, body))
    }
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug)]
pub enum HTTPError {
    /// An error retrieving the body of a response.
    Body(reqwest::Error),

    /// An error that occurred while making an HTTP request.
    Request(reqwest::Error),

    /// An error that occurred while trying to serialize a request parameter.
    Serialization(serde_json::Error),

    /// A response body that could not be parsed into the expected shape.
    Deserialization(serde_json::Error),

    /// An unsuccessful HTTP status code, along with the response body.
    Http(StatusCode, String),
}

impl From<reqwest::Error> for HTTPError {
    fn from(error: reqwest::Error) -> Self {
        HTTPError::Request(error)
    }
}

impl fmt::Display for HTTPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HTTPError::Body(err) => write!(f, "Error retrieving body of HTTP response: {err}"),
            HTTPError::Request(err) => write!(f, "Error while making HTTP request: {err}"),
            HTTPError::Serialization(err) => write!(f, "Error serializing request: {err}"),
            HTTPError::Deserialization(err) => write!(f, "Unexpected response body: {err}"),
            HTTPError::Http(status, body) if body.is_empty() => {
                write!(f, "Request returned HTTP {status}")
            }
            HTTPError::Http(status, body) => write!(f, "Request returned HTTP {status}: {body}"),
        }
    }
}

impl error::Error for HTTPError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            HTTPError::Body(err) => Some(err),
            HTTPError::Request(err) => Some(err),
            HTTPError::Serialization(err) => Some(err),
            HTTPError::Deserialization(err) => Some(err),
            HTTPError::Http(..) => None,
        }
    }
}
