use std::fmt;

use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Discriminator identifying the concrete error variant
///
/// Set explicitly at construction so consumers can identify a variant
/// without inspecting types at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorName {
    /// General-purpose structured error
    StructuredHttpError,
    /// Missing-required-field convenience variant
    MissingFieldError,
}

impl ErrorName {
    /// Discriminator string for this variant
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StructuredHttpError => "StructuredHttpError",
            Self::MissingFieldError => "MissingFieldError",
        }
    }
}

/// Structured HTTP error value
///
/// Carries a status code, a human-readable message, optional structured
/// details that are merged into the response body, and optional response
/// headers. Immutable once constructed; the `with_*` builders consume and
/// return the value.
#[derive(Debug, Clone)]
pub struct HttpError {
    status: u16,
    message: String,
    details: Option<Map<String, Value>>,
    headers: HeaderMap,
    name: ErrorName,
}

impl HttpError {
    /// Create an error with the given status code and message
    ///
    /// The status is carried verbatim; no range validation is applied.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            headers: HeaderMap::new(),
            name: ErrorName::StructuredHttpError,
        }
    }

    /// Create a 400 error for a required field that was absent
    ///
    /// The message is `Missing required field: <field>` and the details
    /// carry the field name under the `field` key.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        let mut details = Map::new();
        details.insert("field".to_owned(), Value::String(field.to_owned()));

        Self {
            status: 400,
            message: format!("Missing required field: {field}"),
            details: Some(details),
            headers: HeaderMap::new(),
            name: ErrorName::MissingFieldError,
        }
    }

    /// Attach structured details, merged verbatim into the serialized body
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a single response header
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach response headers, overlaid on the defaults at serialization
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Status code, exactly as supplied at construction
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured details, when present
    pub const fn details(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()
    }

    /// Response headers to overlay on the serialized response
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Variant discriminator
    pub const fn name(&self) -> ErrorName {
        self.name
    }

    /// JSON body for the serialized response
    ///
    /// The `error` key leads and always carries the message. A colliding
    /// `error` entry inside the details is skipped rather than allowed to
    /// overwrite the message.
    fn body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("error".to_owned(), Value::String(self.message.clone()));

        if let Some(details) = &self.details {
            for (key, value) in details {
                if key != "error" {
                    body.insert(key.clone(), value.clone());
                }
            }
        }

        body
    }

    /// Render as a wire-level response
    ///
    /// The status is forwarded as-is; codes the `http` crate cannot put on
    /// the wire map to 500 with a warning. Caller headers overlay the
    /// default `content-type: application/json`, so the content type itself
    /// can be overridden.
    #[must_use]
    pub fn to_response(&self) -> http::Response<Bytes> {
        let status = StatusCode::from_u16(self.status).unwrap_or_else(|_| {
            tracing::warn!(
                status = self.status,
                "status code not representable on the wire, sending 500"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let bytes = serde_json::to_vec(&Value::Object(self.body()))
            .expect("serializing a JSON object cannot fail");

        let mut response = http::Response::new(Bytes::from(bytes));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            headers.insert(name, value.clone());
        }

        response
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (parts, body) = self.to_response().into_parts();
        Response::from_parts(parts, axum::body::Body::from(body))
    }
}
