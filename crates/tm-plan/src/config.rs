//! Planner thresholds.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides:
//!
//! ```json
//! { "auto_min_direct_km": 300.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{PlanError, PlanResult};

/// Tunable thresholds for the drive-or-fly decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// `flying` preference: minimum direct distance before a flight is used.
    pub flying_min_direct_km: f64,

    /// `auto` preference: minimum direct distance before a flight is considered.
    pub auto_min_direct_km: f64,

    /// `auto` preference: door-to-door flight distance must be below
    /// `direct_km * auto_max_flight_ratio`.
    pub auto_max_flight_ratio: f64,

    /// A scheduled route is adopted only if its length is at most
    /// `airport_km * scheduled_max_detour_ratio`.
    pub scheduled_max_detour_ratio: f64,

    /// A scheduled route is adopted only if it has at most this many airports
    /// (3 = one connection).
    pub scheduled_max_airports: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            flying_min_direct_km:       50.0,
            auto_min_direct_km:         200.0,
            auto_max_flight_ratio:      1.2,
            scheduled_max_detour_ratio: 1.3,
            scheduled_max_airports:     3,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> PlanResult<()> {
        let distances = [
            ("flying_min_direct_km", self.flying_min_direct_km),
            ("auto_min_direct_km", self.auto_min_direct_km),
        ];
        for (key, v) in distances {
            if !v.is_finite() || v < 0.0 {
                return Err(PlanError::Config(format!("{key} must be a finite, non-negative distance, got {v}")));
            }
        }

        let ratios = [
            ("auto_max_flight_ratio", self.auto_max_flight_ratio),
            ("scheduled_max_detour_ratio", self.scheduled_max_detour_ratio),
        ];
        for (key, v) in ratios {
            if !v.is_finite() || v <= 0.0 {
                return Err(PlanError::Config(format!("{key} must be a finite, positive ratio, got {v}")));
            }
        }

        if self.scheduled_max_airports < 2 {
            return Err(PlanError::Config(format!(
                "scheduled_max_airports must be at least 2, got {}",
                self.scheduled_max_airports
            )));
        }
        Ok(())
    }
}
