//! Stitch segment plans into one itinerary.

use crate::{RouteStop, SegmentPlan, TripPlan};

/// Concatenate segment stops in order, collapse consecutive stops with the
/// same name, and sum segment distances (rounded for output).
///
/// Destinations are never reordered.
pub fn assemble<I>(segments: I) -> TripPlan
where
    I: IntoIterator<Item = SegmentPlan>,
{
    let mut stops = Vec::new();
    let mut total_km = 0.0;
    for segment in segments {
        stops.extend(segment.stops);
        total_km += segment.distance_km;
    }
    TripPlan {
        optimized_route:   dedup_consecutive(stops),
        total_distance_km: round_km(total_km),
    }
}

/// Drop every stop whose name equals the one kept just before it.
///
/// Only direct neighbours are compared; A, B, A keeps all three.
pub fn dedup_consecutive(mut stops: Vec<RouteStop>) -> Vec<RouteStop> {
    stops.dedup_by(|next, kept| next.name == kept.name);
    stops
}

/// Round to 2 decimal places.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
