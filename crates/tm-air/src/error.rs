//! Airport-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use tm_core::{AirportId, IataCode};

use crate::Dataset;

/// Errors produced by `tm-air`.
///
/// An unreachable airport pair is not an error; see
/// [`FlightPath::unreachable`](crate::FlightPath::unreachable).
#[derive(Debug, Error)]
pub enum AirError {
    #[error("airport {0} not found in network")]
    AirportNotFound(AirportId),

    #[error("unknown airport code {0}")]
    UnknownAirport(IataCode),

    #[error("cannot open {dataset} dataset {}: {source}", .path.display())]
    Open {
        dataset: Dataset,
        path:    PathBuf,
        #[source]
        source:  std::io::Error,
    },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{dataset} dataset yielded nothing usable: {reason}")]
    EmptyDataset {
        dataset: Dataset,
        reason:  &'static str,
    },
}

pub type AirResult<T> = Result<T, AirError>;
