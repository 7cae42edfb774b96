//! The planning entry point.
//!
//! [`TripPlanner`] owns an `Arc<AirportNetwork>` built once at startup, a
//! [`Router`], and a [`PlannerConfig`].  Planning takes `&self` and touches no
//! shared mutable state, so one planner may serve any number of threads.

use std::sync::Arc;

use tm_air::{AirportNetwork, DijkstraRouter, Router};
use tm_core::{GeoPoint, ModePreference};

use crate::{
    NearestAirport, PlanError, PlanRequest, PlanResult, PlannerConfig, TripPlan, Waypoint,
    assemble, plan_segment,
};

pub struct TripPlanner<R: Router = DijkstraRouter> {
    network: Arc<AirportNetwork>,
    router:  R,
    config:  PlannerConfig,
}

impl TripPlanner<DijkstraRouter> {
    /// A planner with the default Dijkstra router and default thresholds.
    pub fn new(network: Arc<AirportNetwork>) -> Self {
        Self::with_router(network, DijkstraRouter)
    }
}

impl<R: Router> TripPlanner<R> {
    pub fn with_router(network: Arc<AirportNetwork>, router: R) -> Self {
        Self { network, router, config: PlannerConfig::default() }
    }

    /// Replace the thresholds.  Fails if `config` does not validate.
    pub fn with_config(mut self, config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn network(&self) -> &AirportNetwork {
        &self.network
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Validate a wire request and plan it.
    pub fn plan(&self, request: &PlanRequest) -> PlanResult<TripPlan> {
        let waypoints = request.waypoints()?;
        self.plan_waypoints(&waypoints, request.preference)
    }

    /// Plan an already validated, ordered waypoint list (origin first).
    pub fn plan_waypoints(&self, waypoints: &[Waypoint], preference: ModePreference) -> PlanResult<TripPlan> {
        if waypoints.len() < 2 {
            return Err(PlanError::NoDestinations);
        }
        let segments = waypoints
            .windows(2)
            .map(|pair| {
                plan_segment(&self.network, &self.router, &self.config, preference, &pair[0], &pair[1])
            })
            .collect::<PlanResult<Vec<_>>>()?;
        Ok(assemble(segments))
    }

    /// Plan independent requests.  Results keep the input order.
    pub fn plan_many(&self, requests: &[PlanRequest]) -> Vec<PlanResult<TripPlan>> {
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|r| self.plan(r)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests.par_iter().map(|r| self.plan(r)).collect()
        }
    }

    /// Closest airport to `(lat, lng)`.
    pub fn nearest_airport(&self, lat: f64, lng: f64) -> PlanResult<NearestAirport> {
        let pos = GeoPoint::try_new(lat, lng)?;
        let (id, _) = self.network.nearest_airport(pos).ok_or(PlanError::NoAirport)?;
        Ok(self.network.try_airport(id)?.into())
    }
}
