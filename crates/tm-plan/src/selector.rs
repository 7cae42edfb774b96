//! Per-segment drive-or-fly decision.
//!
//! For one `(start, end)` pair the selector measures every candidate
//! (direct drive, nearest airports, ground legs, direct flight, scheduled
//! route) in a [`SegmentAssessment`], then applies the preference policy:
//!
//! | Preference | Flies when                                                           |
//! |------------|----------------------------------------------------------------------|
//! | `driving`  | never                                                                |
//! | `flying`   | `direct > flying_min_direct_km`, airports differ                     |
//! | `auto`     | `direct > auto_min_direct_km`, `flight < direct × auto_max_flight_ratio`, airports differ |
//!
//! A `flying` segment is emitted as just the two airports with the direct
//! airport-to-airport distance.  An `auto` flight is emitted door to door:
//! start, departure airport, scheduled stops, arrival airport, end.

use tracing::debug;

use tm_air::{AirportNetwork, FlightPath, Router};
use tm_core::{AirportId, ModePreference};

use crate::{PlanError, PlanResult, PlannerConfig, RouteStop, Waypoint};

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentMode {
    Drive,
    /// Straight airport-to-airport flight.
    DirectFlight,
    /// Flight following the scheduled route graph (possibly with one stop).
    ScheduledFlight,
}

/// Every distance the decision looks at, in kilometres.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentAssessment {
    pub direct_km:       f64,
    pub departure:       AirportId,
    pub arrival:         AirportId,
    /// Departure → arrival great-circle distance (direct-flight proxy).
    pub airport_km:      f64,
    pub to_airport_km:   f64,
    pub from_airport_km: f64,
    /// Shortest scheduled route; unreachable if none exists.
    pub scheduled:       FlightPath,
    /// Whether `scheduled` passed the detour and connection limits.
    pub use_scheduled:   bool,
    /// Ground legs plus either the scheduled or the direct flight distance.
    pub flight_total_km: f64,
}

impl SegmentAssessment {
    pub fn same_airport(&self) -> bool {
        self.departure == self.arrival
    }
}

/// Output of [`plan_segment`]: the stops to append and the distance to add.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentPlan {
    pub mode:        SegmentMode,
    pub stops:       Vec<RouteStop>,
    pub distance_km: f64,
    pub assessment:  SegmentAssessment,
}

// ── Assessment ────────────────────────────────────────────────────────────────

/// Measure a segment.  Fails with [`PlanError::NoAirport`] if the network
/// has no airports; an unreachable scheduled route is not a failure.
pub fn assess_segment<R: Router>(
    network: &AirportNetwork,
    router: &R,
    config: &PlannerConfig,
    start: &Waypoint,
    end: &Waypoint,
) -> PlanResult<SegmentAssessment> {
    let direct_km = start.pos.distance_km(end.pos);

    let (departure, to_airport_km)   = network.nearest_airport(start.pos).ok_or(PlanError::NoAirport)?;
    let (arrival,   from_airport_km) = network.nearest_airport(end.pos).ok_or(PlanError::NoAirport)?;

    let dep_pos = network.try_airport(departure)?.pos;
    let arr_pos = network.try_airport(arrival)?.pos;
    let airport_km = dep_pos.distance_km(arr_pos);

    let scheduled = router.shortest_path(network, departure, arrival)?;
    let use_scheduled = scheduled.is_reachable()
        && scheduled.distance_km <= airport_km * config.scheduled_max_detour_ratio
        && scheduled.airports.len() <= config.scheduled_max_airports;

    let flight_km = if use_scheduled { scheduled.distance_km } else { airport_km };
    let flight_total_km = to_airport_km + flight_km + from_airport_km;

    Ok(SegmentAssessment {
        direct_km,
        departure,
        arrival,
        airport_km,
        to_airport_km,
        from_airport_km,
        scheduled,
        use_scheduled,
        flight_total_km,
    })
}

/// The preference policy.  Identical airports at both ends always drive.
pub fn wants_flight(config: &PlannerConfig, preference: ModePreference, a: &SegmentAssessment) -> bool {
    if a.same_airport() {
        return false;
    }
    match preference {
        ModePreference::Driving => false,
        ModePreference::Flying  => a.direct_km > config.flying_min_direct_km,
        ModePreference::Auto    => {
            a.direct_km > config.auto_min_direct_km
                && a.flight_total_km < a.direct_km * config.auto_max_flight_ratio
        }
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

/// Assess a segment and turn the decision into stops and a distance.
pub fn plan_segment<R: Router>(
    network: &AirportNetwork,
    router: &R,
    config: &PlannerConfig,
    preference: ModePreference,
    start: &Waypoint,
    end: &Waypoint,
) -> PlanResult<SegmentPlan> {
    let assessment = assess_segment(network, router, config, start, end)?;

    if !wants_flight(config, preference, &assessment) {
        debug!(
            from = %start.name, to = %end.name, %preference,
            km = assessment.direct_km,
            "driving segment",
        );
        return Ok(SegmentPlan {
            mode:        SegmentMode::Drive,
            stops:       vec![RouteStop::ground(start), RouteStop::ground(end)],
            distance_km: assessment.direct_km,
            assessment,
        });
    }

    let departure = network.try_airport(assessment.departure)?;
    let arrival   = network.try_airport(assessment.arrival)?;

    if preference == ModePreference::Flying {
        debug!(
            from = %departure.code, to = %arrival.code,
            km = assessment.airport_km,
            "direct flight segment",
        );
        let mut dep = RouteStop::airport(departure);
        dep.is_flight_start = true;
        return Ok(SegmentPlan {
            mode:        SegmentMode::DirectFlight,
            stops:       vec![dep, RouteStop::airport(arrival)],
            distance_km: assessment.airport_km,
            assessment,
        });
    }

    let mut stops = Vec::with_capacity(4 + assessment.scheduled.stops().len());
    stops.push(RouteStop::ground(start));
    stops.push(RouteStop::airport(departure));

    let mode = if assessment.use_scheduled {
        for &id in assessment.scheduled.stops() {
            stops.push(RouteStop::airport(network.try_airport(id)?));
        }
        debug!(
            from = %departure.code, to = %arrival.code,
            legs = assessment.scheduled.legs(),
            km = assessment.scheduled.distance_km,
            "scheduled flight segment",
        );
        SegmentMode::ScheduledFlight
    } else {
        if assessment.scheduled.is_reachable() {
            debug!(
                from = %departure.code, to = %arrival.code,
                scheduled_km = assessment.scheduled.distance_km,
                legs = assessment.scheduled.legs(),
                direct_km = assessment.airport_km,
                "scheduled route too long, using direct flight",
            );
        } else {
            debug!(
                from = %departure.code, to = %arrival.code,
                direct_km = assessment.airport_km,
                "no scheduled route, using direct flight",
            );
        }
        SegmentMode::DirectFlight
    };

    stops.push(RouteStop::airport(arrival));
    stops.push(RouteStop::ground(end));

    Ok(SegmentPlan {
        mode,
        stops,
        distance_km: assessment.flight_total_km,
        assessment,
    })
}
