use bytes::Bytes;
use http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::HttpError;

/// Failure to reconstruct an [`HttpError`] from an incoming response
#[derive(Debug, Error)]
pub enum FromResponseError {
    /// The response status denotes success, so there is no error to build
    #[error("cannot construct an error value from a successful response (status {status})")]
    SuccessStatus {
        /// Observed status code
        status: u16,
    },
}

impl HttpError {
    /// Reconstruct a structured error from a received response
    ///
    /// The body is buffered once and decoded from the buffer, since most
    /// transports only allow a single read. A JSON object body becomes the
    /// details verbatim, with its `error` key (when a string) supplying the
    /// message; any other body falls back to its plain text, and an empty or
    /// unreadable body to the status's canonical reason phrase. Headers are
    /// never reconstructed.
    ///
    /// # Errors
    ///
    /// Fails only when the response status is in the success range
    /// [200, 300).
    pub async fn from_response(response: reqwest::Response) -> Result<Self, FromResponseError> {
        let status = response.status();
        if status.is_success() {
            return Err(FromResponseError::SuccessStatus {
                status: status.as_u16(),
            });
        }

        let body = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                // Best effort: fall through to the reason phrase
                tracing::warn!(
                    error = %e,
                    status = status.as_u16(),
                    "failed to read error response body"
                );
                Bytes::new()
            }
        };

        let (message, details) = infer_message_and_details(&body, status);

        let mut error = Self::new(status.as_u16(), message);
        if let Some(details) = details {
            error = error.with_details(details);
        }

        Ok(error)
    }
}

/// Derive a message and details from a buffered response body
///
/// Fallback chain: JSON object, then plain text, then the reason phrase.
fn infer_message_and_details(
    body: &[u8],
    status: StatusCode,
) -> (String, Option<Map<String, Value>>) {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => {
            let message = object
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(|| reason_phrase(status), ToOwned::to_owned);
            // The whole object, error key included, stays in the details
            (message, Some(object))
        }
        // Valid JSON that is not an object carries no usable shape
        Ok(_) => (reason_phrase(status), None),
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            if text.is_empty() {
                (reason_phrase(status), None)
            } else {
                (text.into_owned(), None)
            }
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown Error").to_owned()
}
