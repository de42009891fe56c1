//! Error types for the Jowi API client.
//!
//! # Design
//! Three failure sources stay distinguishable all the way up to the caller:
//! the provider payload did not have the expected shape (`MappingError`),
//! a mapped or outgoing value broke a domain invariant (`ValidationError`),
//! or the transport itself failed (`TransportError`). `ApiError` wraps all
//! three and is what every public operation returns.

use thiserror::Error;

/// Top-level error returned by mappers, builders and `JowiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The provider payload could not be mapped onto the domain model.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The provider answered with an error body instead of the payload.
    #[error("{entity}: provider rejected the request: {message}")]
    Rejected {
        entity: &'static str,
        message: String,
    },

    /// A required field was absent.
    #[error("{entity}: missing field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// The payload (or a nested part of it) did not match the wire schema.
    #[error("{entity}: malformed payload: {source}")]
    Shape {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An integer-coded enum carried a value outside its defined range.
    #[error("{field}: {value} is not a valid {kind} code")]
    UnknownCode {
        field: &'static str,
        kind: &'static str,
        value: i64,
    },

    /// A calendar date was not in ISO `YYYY-MM-DD` form.
    #[error("{field}: invalid date {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// A domain invariant was violated while constructing a value.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} is not a valid URL: {value:?}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// The transport failed to deliver a request or to produce a JSON body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or protocol failure.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The response body was not JSON.
    #[error("response from {url} is not JSON (HTTP {status}): {source}")]
    Body {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}
