//! Request and response wire types.
//!
//! # Request
//!
//! ```json
//! {
//!   "origin":       {"name": "New York", "lat": 40.7128, "lng": -74.0060},
//!   "destinations": [{"name": "Los Angeles", "lat": 34.0522, "lng": -118.2437}],
//!   "preference":   "auto"
//! }
//! ```
//!
//! `preference` defaults to `"auto"`.  Waypoint fields are optional on the
//! wire so that a missing coordinate is reported against the waypoint that
//! lacks it rather than as an opaque deserialisation error.
//!
//! # Response
//!
//! ```json
//! {
//!   "optimized_route": [{"name": "JFK Intl", "lat": 40.64, "lng": -73.78, "type": "airport"}, …],
//!   "total_distance_km": 3983.03
//! }
//! ```

use serde::{Deserialize, Serialize};

use tm_air::Airport;
use tm_core::{GeoPoint, IataCode, ModePreference};

use crate::{PlanError, PlanResult};

// ── Request ───────────────────────────────────────────────────────────────────

/// A waypoint as received, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat:  Option<f64>,
    #[serde(default)]
    pub lng:  Option<f64>,
}

impl WaypointInput {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self { name: Some(name.into()), lat: Some(lat), lng: Some(lng) }
    }

    /// Validate into a [`Waypoint`].  `index` is only used for the error
    /// (0 = origin).
    pub fn validate(&self, index: usize) -> PlanResult<Waypoint> {
        let invalid = |reason: &str| PlanError::InvalidWaypoint { index, reason: reason.to_owned() };

        let name = self.name.as_deref().ok_or_else(|| invalid("missing name"))?;
        let lat  = self.lat.ok_or_else(|| invalid("missing latitude"))?;
        let lng  = self.lng.ok_or_else(|| invalid("missing longitude"))?;

        let pos = GeoPoint::try_new(lat, lng).map_err(|e| invalid(&e.to_string()))?;
        Ok(Waypoint { name: name.to_owned(), pos })
    }
}

/// A planning request.  Destinations are visited in the given order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub origin: WaypointInput,
    #[serde(default)]
    pub destinations: Vec<WaypointInput>,
    #[serde(default)]
    pub preference: ModePreference,
}

impl PlanRequest {
    /// Validate every waypoint and return them as one ordered list,
    /// origin first.
    pub fn waypoints(&self) -> PlanResult<Vec<Waypoint>> {
        if self.destinations.is_empty() {
            return Err(PlanError::NoDestinations);
        }
        std::iter::once(&self.origin)
            .chain(&self.destinations)
            .enumerate()
            .map(|(i, w)| w.validate(i))
            .collect()
    }
}

/// A validated ground location.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub pos:  GeoPoint,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, pos: GeoPoint) -> Self {
        Self { name: name.into(), pos }
    }
}

// ── Response ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Airport,
}

/// One entry of the output itinerary.  Ground stops carry no `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub name: String,
    pub lat:  f64,
    pub lng:  f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StopKind>,
    /// Set on the departure airport of a `flying`-preference segment.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_flight_start: bool,
}

impl RouteStop {
    pub fn ground(waypoint: &Waypoint) -> Self {
        Self {
            name: waypoint.name.clone(),
            lat:  waypoint.pos.lat,
            lng:  waypoint.pos.lng,
            kind: None,
            is_flight_start: false,
        }
    }

    pub fn airport(airport: &Airport) -> Self {
        Self {
            name: airport.name.clone(),
            lat:  airport.pos.lat,
            lng:  airport.pos.lng,
            kind: Some(StopKind::Airport),
            is_flight_start: false,
        }
    }

    pub fn is_airport(&self) -> bool {
        self.kind == Some(StopKind::Airport)
    }
}

/// The planned itinerary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub optimized_route:   Vec<RouteStop>,
    /// Rounded to 2 decimal places.
    pub total_distance_km: f64,
}

/// Response of the nearest-airport lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestAirport {
    pub name: String,
    pub lat:  f64,
    pub lng:  f64,
    pub iata: IataCode,
}

impl From<&Airport> for NearestAirport {
    fn from(a: &Airport) -> Self {
        Self { name: a.name.clone(), lat: a.pos.lat, lng: a.pos.lng, iata: a.code }
    }
}
