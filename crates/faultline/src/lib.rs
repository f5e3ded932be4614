#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

//! Structured HTTP error values with wire-level conversion
//!
//! [`HttpError`] carries a status code, a human-readable message, optional
//! JSON details, and optional response headers. It serializes into a JSON
//! response (axum [`IntoResponse`](axum::response::IntoResponse)) and
//! reconstructs itself from an arbitrary [`reqwest::Response`], inferring
//! message and details from whatever body shape arrives.

mod decode;
mod error;

pub use decode::FromResponseError;
pub use error::{ErrorName, HttpError};
