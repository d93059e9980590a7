use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use scanner_logging::{scan_debug, scan_warn};
use serde::Serialize;

use crate::reply::{decode_reply, ReplyError};
use crate::{FailureKind, ProductReply, SubmitError};

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    barcode: &'a str,
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// POST `code` to `endpoint` and decode the server's answer.
    async fn submit(&self, endpoint: &str, code: &str) -> Result<ProductReply, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    client: reqwest::Client,
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, SubmitError> {
        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, endpoint: &str, code: &str) -> Result<ProductReply, SubmitError> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let payload = serde_json::to_vec(&ScanRequest { barcode: code })
            .map_err(|err| SubmitError::new(FailureKind::RequestEncoding, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The body decides the outcome; servers answer not-found with 404 and a JSON reason.
        let status = response.status();
        if !status.is_success() {
            scan_debug!("Submission of {} answered with status {}", code, status);
        }

        let body = self.read_body(response).await?;
        decode_reply(&body).map_err(|err| {
            scan_warn!("Undecodable reply for {}: {}", code, err);
            match err {
                ReplyError::Empty => SubmitError::new(FailureKind::EmptyBody, "empty response body"),
                ReplyError::Malformed(message) => {
                    SubmitError::new(FailureKind::MalformedBody, message)
                }
            }
        })
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> SubmitError {
    SubmitError::new(FailureKind::TooLarge { max_bytes, actual }, "response too large")
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    };
    SubmitError::new(kind, describe_error_chain(&err))
}

/// reqwest's top-level message hides the cause (refused, DNS, ...).
fn describe_error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
