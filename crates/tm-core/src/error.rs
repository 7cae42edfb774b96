//! Core error type.
//!
//! Downstream crates keep their own error enums and wrap `CoreError` where
//! a core constructor can fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid IATA code {0:?}: expected exactly 3 ASCII characters")]
    InvalidIata(String),

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// Shorthand result type for `tm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
