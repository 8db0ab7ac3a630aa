//! Outbound HTTP client for the persistence/attachment service.
//!
//! DESIGN
//! ======
//! Everything durable leaves the gateway through the `Forwarder` trait:
//! chat messages (fire-and-forget from the relay) and uploaded attachment
//! references (awaited by the upload route). `HttpForwarder` is the real
//! client; tests substitute their own impl. Response parsing is split into
//! a pure function so it can be tested without a socket.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// =============================================================================
// SEAM
// =============================================================================

/// External persistence collaborator.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Durably store one chat message. Best effort; the relay never awaits
    /// this from the dispatch path.
    async fn store_message(&self, user_id: &str, mentor_id: &str, text: &str) -> Result<(), ForwardError>;

    /// Hand an uploaded file reference to the attachment service. Returns the
    /// public URL the service assigned.
    async fn upload_attachment(&self, user_id: &str, attachment: &str) -> Result<String, ForwardError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("request to {endpoint} failed: {detail}")]
    Request { endpoint: &'static str, detail: String },
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("unexpected {endpoint} response body: {detail}")]
    Body { endpoint: &'static str, detail: String },
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// Real client talking to `{base_url}/api/storeMessage` and
/// `{base_url}/api/uploadAttachment`.
pub struct HttpForwarder {
    http: reqwest::Client,
    base_url: String,
}

impl HttpForwarder {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ForwardError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ForwardError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    async fn post_json(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ForwardError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ForwardError::Request { endpoint, detail: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status { endpoint, status: status.as_u16() });
        }
        Ok(response)
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn store_message(&self, user_id: &str, mentor_id: &str, text: &str) -> Result<(), ForwardError> {
        let body = json!({ "userId": user_id, "mentorId": mentor_id, "text": text });
        self.post_json("storeMessage", "/api/storeMessage", &body).await?;
        Ok(())
    }

    async fn upload_attachment(&self, user_id: &str, attachment: &str) -> Result<String, ForwardError> {
        let body = json!({ "userId": user_id, "attachment": attachment });
        let response = self.post_json("uploadAttachment", "/api/uploadAttachment", &body).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ForwardError::Body { endpoint: "uploadAttachment", detail: e.to_string() })?;
        parse_upload_response(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// Extract the assigned URL from the attachment service reply.
fn parse_upload_response(json: &str) -> Result<String, ForwardError> {
    let parsed: UploadResponse = serde_json::from_str(json)
        .map_err(|e| ForwardError::Body { endpoint: "uploadAttachment", detail: e.to_string() })?;
    Ok(parsed.url)
}

#[cfg(test)]
#[path = "forward_test.rs"]
mod tests;
