//! HTTP clients for the Mattermost REST API and incoming webhooks.
//!
//! [`MattermostClient`] covers the session flow: `POST /api/v4/users/login`
//! (the session token arrives in the `Token` response header) followed by
//! `POST /api/v4/posts` with bearer auth. [`WebhookClient`] posts a single
//! `{text, channel?}` payload to a pre-authorized webhook URL.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

/// HTTP connect timeout for the reqwest client.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response header carrying the session token after a successful login.
const TOKEN_HEADER: &str = "Token";

/// Longest error-body excerpt embedded in a [`ClientError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Errors from talking to Mattermost.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport failure (connection, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an unexpected HTTP status.
    #[error("server returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Trimmed response body excerpt.
        body: String,
    },

    /// Login returned 200 but no usable `Token` header.
    #[error("login succeeded but no session token header was returned")]
    MissingToken,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Login request body for `/api/v4/users/login`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    /// Login name (username or email).
    login_id: &'a str,
    /// Account password.
    password: &'a str,
}

/// Post request body for `/api/v4/posts`.
#[derive(Debug, Serialize)]
struct PostRequest<'a> {
    /// Target channel identifier.
    channel_id: &'a str,
    /// Message text.
    message: &'a str,
}

/// Payload for an incoming webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    /// Message text.
    text: &'a str,
    /// Channel override; omitted when the webhook default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
}

/// Build a webhook payload, treating an empty channel override as absent.
fn webhook_payload<'a>(message: &'a str, channel: Option<&'a str>) -> WebhookPayload<'a> {
    WebhookPayload {
        text: message,
        channel: channel.filter(|name| !name.is_empty()),
    }
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// Client for the session-authenticated Mattermost REST API.
#[derive(Debug, Clone)]
pub struct MattermostClient {
    client: reqwest::Client,
    base_url: String,
}

impl MattermostClient {
    /// Create a client for the given server base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_http_client(),
            base_url,
        }
    }

    /// Log in and return the session token.
    ///
    /// Success is exactly HTTP 200 with a non-empty `Token` response header;
    /// trailing line terminators are stripped from the header value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on connection failure,
    /// [`ClientError::Status`] on any status other than 200, and
    /// [`ClientError::MissingToken`] when the header is absent or empty.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<String, ClientError> {
        let url = format!("{}/api/v4/users/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { login_id, password })
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(status_error(response).await);
        }

        let token = response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim_end_matches(['\r', '\n']).to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ClientError::MissingToken)?;

        debug!("session token received");
        Ok(token)
    }

    /// Post a message to a channel as the logged-in user.
    ///
    /// The API acknowledges a created post with HTTP 201; any other status
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on connection failure and
    /// [`ClientError::Status`] on any status other than 201.
    pub async fn send_message(
        &self,
        token: &str,
        channel_id: &str,
        message: &str,
    ) -> Result<(), ClientError> {
        let url = format!("{}/api/v4/posts", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(&PostRequest {
                channel_id,
                message,
            })
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::CREATED {
            return Err(status_error(response).await);
        }

        debug!(channel_id, "message posted");
        Ok(())
    }
}

/// Client for a pre-authorized incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// Create a client for the given webhook URL.
    pub fn new(url: String) -> Self {
        Self {
            client: build_http_client(),
            url,
        }
    }

    /// Post a message through the webhook.
    ///
    /// A non-empty `channel` override redirects the message away from the
    /// webhook's default channel. Webhooks acknowledge with any status
    /// below 400.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on connection failure and
    /// [`ClientError::Status`] on any status of 400 or above.
    pub async fn send(&self, message: &str, channel: Option<&str>) -> Result<(), ClientError> {
        let response = self
            .client
            .post(&self.url)
            .json(&webhook_payload(message, channel))
            .send()
            .await?;

        if response.status().as_u16() >= 400 {
            return Err(status_error(response).await);
        }

        debug!("webhook accepted message");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Build an HTTP client with bounded connect and request timeouts.
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to build HTTP client with timeouts, using default");
            reqwest::Client::default()
        })
}

/// Turn a non-success response into a [`ClientError::Status`].
async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::Status {
        status,
        body: trim_error_body(&body),
    }
}

/// Collapse whitespace in an error body and cap its length.
fn trim_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = collapsed
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }
    collapsed
}
