use thiserror::Error;

use tm_air::AirError;
use tm_core::CoreError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("a plan needs an origin and at least one destination")]
    NoDestinations,

    #[error("{label} is invalid: {reason}", label = waypoint_label(.index))]
    InvalidWaypoint { index: usize, reason: String },

    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] CoreError),

    #[error("planner configuration error: {0}")]
    Config(String),

    /// The airport set is empty: the network was not initialised correctly.
    /// Distinct from an unreachable airport pair, which is not an error.
    #[error("no airport available: the airport network is empty")]
    NoAirport,

    #[error("airport network error: {0}")]
    Air(#[from] AirError),
}

pub type PlanResult<T> = Result<T, PlanError>;

/// Index 0 is the origin; destinations are numbered from 1.
fn waypoint_label(index: &usize) -> String {
    if *index == 0 {
        "origin".to_owned()
    } else {
        format!("destination {index}")
    }
}
