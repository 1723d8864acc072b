//! HTTP client for the library service.
//!
//! Every call is a single request/response exchange authenticated with
//! HTTP Basic Auth. Each operation has exactly one success status; anything
//! else is returned as an [`ApiError`] carrying the status and the server's
//! message.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response, StatusCode};

use super::types::{BookId, ErrorBody, Library, NewBook, Patch, UpdateReply};

/// Errors that can occur while talking to the library service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup). Nothing was sent.
    Config(String),
    /// Connection-level failure (DNS, refused, reset).
    Network(String),
    /// No response within the configured request timeout.
    Timeout,
    /// The server answered with a status other than the one expected.
    Api { status: u16, message: String },
    /// The server answered with the expected status but an unreadable body.
    Parse(String),
    /// The update was accepted but one of its patch operations failed.
    Rejected(String),
}

impl ApiError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::Config(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Builds an `Api` error, preferring the `{"error": ...}` message if the body has one.
    fn from_response(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        };
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Api { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "unexpected response: {msg}"),
            ApiError::Rejected(msg) => write!(f, "update rejected: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The four operations the page needs from the server.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// `GET /book`, expects 200 with the library grouped by status.
    async fn list(&self) -> Result<Library, ApiError>;

    /// `POST /book`, expects 201.
    async fn create(&self, book: &NewBook) -> Result<(), ApiError>;

    /// `PATCH /book/{id}`, expects 200.
    async fn update(&self, id: &BookId, patches: &[Patch]) -> Result<(), ApiError>;

    /// `DELETE /book/{id}`, expects 204.
    async fn delete(&self, id: &BookId) -> Result<(), ApiError>;
}

/// Basic Auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// reqwest-backed [`BookApi`].
pub struct HttpBookApi {
    base_url: String,
    credentials: Option<Credentials>,
    client: reqwest::Client,
}

impl HttpBookApi {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(
            "Library client for {} (user: {})",
            base_url,
            credentials
                .as_ref()
                .map(|c| c.username.as_str())
                .unwrap_or("<anonymous>")
        );

        Ok(Self {
            base_url,
            credentials,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /reset`: wipes the server database and reloads the demo data.
    /// Only the admin account is allowed to do this (403 otherwise).
    pub async fn reset(&self) -> Result<(), ApiError> {
        info!("Requesting database reset");
        self.send(self.request(Method::GET, "/reset"), StatusCode::OK)
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.credentials {
            Some(creds) => builder.basic_auth(&creds.username, creds.password.as_deref()),
            None => builder,
        }
    }

    /// Sends the request and checks the status against the single expected one.
    async fn send(
        &self,
        builder: RequestBuilder,
        expected: StatusCode,
    ) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        debug!("Response status: {} (expected {})", status, expected);

        if status != expected {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("Library API error: {} - {}", status, body);
            return Err(ApiError::from_response(status, &body));
        }
        Ok(response)
    }
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list(&self) -> Result<Library, ApiError> {
        info!("GET /book");
        let response = self
            .send(self.request(Method::GET, "/book"), StatusCode::OK)
            .await?;
        let library: Library = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        debug!("Listed {} books", library.len());
        Ok(library)
    }

    async fn create(&self, book: &NewBook) -> Result<(), ApiError> {
        info!("POST /book (status={})", book.status);
        debug!("Create body: {:?}", book);
        self.send(
            self.request(Method::POST, "/book").json(book),
            StatusCode::CREATED,
        )
        .await?;
        Ok(())
    }

    async fn update(&self, id: &BookId, patches: &[Patch]) -> Result<(), ApiError> {
        info!("PATCH /book/{} ({} ops)", id, patches.len());
        debug!("Patch body: {:?}", patches);
        let response = self
            .send(
                self.request(Method::PATCH, &format!("/book/{id}")).json(patches),
                StatusCode::OK,
            )
            .await?;

        // The server applies each op separately and reports per-op results;
        // a failed op shows up as an `error` entry under a 200.
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let reply: UpdateReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(e) => {
                debug!("Ignoring unparsable update reply ({}): {}", e, body);
                UpdateReply::default()
            }
        };
        if let Some(message) = reply
            .updated
            .iter()
            .find_map(|result| result.get("error").and_then(|e| e.as_str()))
        {
            warn!("Update of book {} partially rejected: {}", id, message);
            return Err(ApiError::Rejected(message.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<(), ApiError> {
        info!("DELETE /book/{}", id);
        self.send(
            self.request(Method::DELETE, &format!("/book/{id}")),
            StatusCode::NO_CONTENT,
        )
        .await?;
        Ok(())
    }
}
