//! Routing trait and default Dijkstra implementation.
//!
//! Callers go through the [`Router`] trait so the planner can be handed a
//! different search (A*, a precomputed table) without changes.
//!
//! # Unreachability
//!
//! Many airport pairs have no scheduled connection.  That is a normal
//! outcome, returned as [`FlightPath::unreachable`] rather than an error.
//! `Err` is reserved for ids the network does not contain.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tm_core::AirportId;

use crate::network::AirportNetwork;
use crate::{AirError, AirResult};

// ── FlightPath ────────────────────────────────────────────────────────────────

/// The result of a routing query: the airports visited in order (both
/// endpoints included) and the summed route-edge distance.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    pub airports:    Vec<AirportId>,
    pub distance_km: f64,
}

impl FlightPath {
    /// No path exists: infinite distance, no airports.
    pub fn unreachable() -> Self {
        Self { airports: Vec::new(), distance_km: f64::INFINITY }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance_km.is_finite()
    }

    /// Intermediate airports, excluding departure and arrival.
    pub fn stops(&self) -> &[AirportId] {
        match self.airports.len() {
            0..=2 => &[],
            n => &self.airports[1..n - 1],
        }
    }

    /// Number of flight legs (`airports - 1`), zero when unreachable.
    pub fn legs(&self) -> usize {
        self.airports.len().saturating_sub(1)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine over an [`AirportNetwork`].
///
/// Implementations must be `Send + Sync`; one router instance serves all
/// concurrent planning requests.
pub trait Router: Send + Sync {
    /// Shortest scheduled path from `from` to `to`.
    ///
    /// `from == to` yields a zero-length path containing just that airport.
    fn shortest_path(
        &self,
        network: &AirportNetwork,
        from: AirportId,
        to: AirportId,
    ) -> AirResult<FlightPath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with a binary heap keyed by accumulated kilometres.
///
/// An airport is settled the first time it is popped and never expanded
/// again, so cycles (every hub pair has routes both ways) terminate.  Among
/// equal-cost paths the one found first wins; the choice is not canonical.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(
        &self,
        network: &AirportNetwork,
        from: AirportId,
        to: AirportId,
    ) -> AirResult<FlightPath> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap key.  Distances are finite sums of non-negative haversine values,
/// so `total_cmp` gives the natural order.
#[derive(Clone, Copy, PartialEq)]
struct Km(f64);

impl Eq for Km {}

impl PartialOrd for Km {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Km {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(network: &AirportNetwork, from: AirportId, to: AirportId) -> AirResult<FlightPath> {
    let n = network.airport_count();
    for id in [from, to] {
        if id.index() >= n {
            return Err(AirError::AirportNotFound(id));
        }
    }

    let mut dist    = vec![f64::INFINITY; n];
    let mut prev    = vec![AirportId::INVALID; n];
    let mut settled = vec![false; n];

    dist[from.index()] = 0.0;

    // Reverse turns the max-heap into a min-heap; AirportId breaks ties.
    let mut heap: BinaryHeap<Reverse<(Km, AirportId)>> = BinaryHeap::new();
    heap.push(Reverse((Km(0.0), from)));

    while let Some(Reverse((Km(cost), node))) = heap.pop() {
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        if node == to {
            return Ok(reconstruct(&prev, to, cost));
        }

        for (next, km) in network.routes_from(node) {
            if settled[next.index()] {
                continue;
            }
            let new_cost = cost + km;
            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev[next.index()] = node;
                heap.push(Reverse((Km(new_cost), next)));
            }
        }
    }

    Ok(FlightPath::unreachable())
}

fn reconstruct(prev: &[AirportId], to: AirportId, distance_km: f64) -> FlightPath {
    let mut airports = vec![to];
    let mut cur = to;
    while prev[cur.index()] != AirportId::INVALID {
        cur = prev[cur.index()];
        airports.push(cur);
    }
    airports.reverse();
    FlightPath { airports, distance_km }
}
