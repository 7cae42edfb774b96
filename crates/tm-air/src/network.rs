//! Scheduled-flight network representation and builder.
//!
//! # Data layout
//!
//! Airports are stored in a `Vec` indexed by [`AirportId`].  Routes use
//! **Compressed Sparse Row (CSR)** format: the outgoing routes of airport
//! `a` occupy
//!
//! ```text
//! edge_to[ node_out_start[a] .. node_out_start[a+1] ]
//! ```
//!
//! Edge weights are the haversine distance between the two airports, not a
//! flown distance or a flight time.
//!
//! # Filtering
//!
//! [`AirportNetworkBuilder::build`] drops every airport that is not an
//! endpoint of at least one route, then renumbers the survivors densely.
//! An airport with no scheduled service cannot take part in flight planning.

use tm_core::{AirportId, GeoPoint, IataCode};

use crate::{AirError, AirResult};

#[cfg(feature = "fx-hash")]
type CodeIndex = rustc_hash::FxHashMap<IataCode, AirportId>;
#[cfg(not(feature = "fx-hash"))]
type CodeIndex = std::collections::HashMap<IataCode, AirportId>;

// ── Airport ───────────────────────────────────────────────────────────────────

/// An airport with scheduled commercial service.
#[derive(Clone, Debug, PartialEq)]
pub struct Airport {
    pub code: IataCode,
    pub name: String,
    pub pos:  GeoPoint,
}

// ── AirportNetwork ────────────────────────────────────────────────────────────

/// Directed route graph in CSR format.
///
/// Immutable once built.  Share it across planning threads behind an `Arc`;
/// nothing here needs a lock.  Do not construct directly; use
/// [`AirportNetworkBuilder`] or [`crate::load_openflights`].
#[derive(Debug)]
pub struct AirportNetwork {
    /// Airport records, indexed by `AirportId`.
    pub airports: Vec<Airport>,

    /// CSR row pointer.  Length = `airport_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source airport of each route, sorted ascending.
    pub edge_from: Vec<AirportId>,

    /// Destination airport of each route.
    pub edge_to: Vec<AirportId>,

    /// Haversine length of each route in kilometres.
    pub edge_km: Vec<f64>,

    code_index: CodeIndex,
}

impl AirportNetwork {
    /// A network with no airports.  Every nearest-airport query returns `None`.
    pub fn empty() -> Self {
        AirportNetworkBuilder::new().build()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn route_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn airport(&self, id: AirportId) -> Option<&Airport> {
        self.airports.get(id.index())
    }

    /// Like [`airport`](Self::airport) but reports a missing id as an error.
    pub fn try_airport(&self, id: AirportId) -> AirResult<&Airport> {
        self.airport(id).ok_or(AirError::AirportNotFound(id))
    }

    /// Resolve an IATA code to the network's dense id.
    pub fn lookup(&self, code: IataCode) -> Option<AirportId> {
        self.code_index.get(&code).copied()
    }

    /// Iterator over `(destination, distance_km)` for every route leaving `id`.
    #[inline]
    pub fn routes_from(&self, id: AirportId) -> impl Iterator<Item = (AirportId, f64)> + '_ {
        let start = self.node_out_start[id.index()] as usize;
        let end   = self.node_out_start[id.index() + 1] as usize;
        (start..end).map(|e| (self.edge_to[e], self.edge_km[e]))
    }

    #[inline]
    pub fn out_degree(&self, id: AirportId) -> usize {
        let start = self.node_out_start[id.index()] as usize;
        let end   = self.node_out_start[id.index() + 1] as usize;
        end - start
    }

    /// Linear scan for the airport geodesically closest to `pos`.
    ///
    /// Returns the airport id and its distance in km, or `None` only when the
    /// network has no airports.  Ties keep the lowest id.
    pub fn nearest_airport(&self, pos: GeoPoint) -> Option<(AirportId, f64)> {
        let mut best: Option<(AirportId, f64)> = None;
        for (i, airport) in self.airports.iter().enumerate() {
            let d = pos.distance_km(airport.pos);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((AirportId(i as u32), d));
            }
        }
        best
    }
}

// ── AirportNetworkBuilder ─────────────────────────────────────────────────────

/// Construct an [`AirportNetwork`] incrementally, then call [`build`](Self::build).
///
/// All airports must be added before the routes that reference them.
///
/// # Example
///
/// ```
/// use tm_core::GeoPoint;
/// use tm_air::AirportNetworkBuilder;
///
/// let mut b = AirportNetworkBuilder::new();
/// b.add_airport("JFK".parse().unwrap(), "John F Kennedy Intl", GeoPoint::new(40.6398, -73.7789));
/// b.add_airport("LAX".parse().unwrap(), "Los Angeles Intl", GeoPoint::new(33.9425, -118.4081));
/// b.add_airport("XXX".parse().unwrap(), "No service", GeoPoint::new(0.0, 0.0));
/// b.add_route("JFK".parse().unwrap(), "LAX".parse().unwrap()).unwrap();
/// let net = b.build();
/// assert_eq!(net.airport_count(), 2); // XXX has no routes
/// assert_eq!(net.route_count(), 1);
/// ```
pub struct AirportNetworkBuilder {
    airports:   Vec<Airport>,
    code_index: CodeIndex,
    raw_routes: Vec<(AirportId, AirportId)>,
}

impl AirportNetworkBuilder {
    pub fn new() -> Self {
        Self {
            airports:   Vec::new(),
            code_index: CodeIndex::default(),
            raw_routes: Vec::new(),
        }
    }

    /// Add an airport and return its provisional id.
    ///
    /// A code that was already added is overwritten in place (last row wins)
    /// and keeps its original id.
    pub fn add_airport(&mut self, code: IataCode, name: impl Into<String>, pos: GeoPoint) -> AirportId {
        let airport = Airport { code, name: name.into(), pos };
        if let Some(&id) = self.code_index.get(&code) {
            self.airports[id.index()] = airport;
            return id;
        }
        let id = AirportId(self.airports.len() as u32);
        self.airports.push(airport);
        self.code_index.insert(code, id);
        id
    }

    /// Add a **directed** route between two previously added airports.
    ///
    /// Fails with [`AirError::UnknownAirport`] if either code is unknown; the
    /// builder is left unchanged in that case.
    pub fn add_route(&mut self, from: IataCode, to: IataCode) -> AirResult<()> {
        let src = self.code_index.get(&from).copied().ok_or(AirError::UnknownAirport(from))?;
        let dst = self.code_index.get(&to).copied().ok_or(AirError::UnknownAirport(to))?;
        self.raw_routes.push((src, dst));
        Ok(())
    }

    pub fn contains(&self, code: IataCode) -> bool {
        self.code_index.contains_key(&code)
    }

    pub fn airport_count(&self) -> usize { self.airports.len() }
    pub fn route_count(&self) -> usize { self.raw_routes.len() }

    /// Consume the builder and produce an [`AirportNetwork`].
    ///
    /// Drops airports without routes, renumbers the rest in insertion order,
    /// computes haversine weights and builds the CSR arrays.
    pub fn build(self) -> AirportNetwork {
        let provisional = self.airports.len();

        let mut used = vec![false; provisional];
        for &(src, dst) in &self.raw_routes {
            used[src.index()] = true;
            used[dst.index()] = true;
        }

        // Old id → new dense id.
        let mut remap = vec![AirportId::INVALID; provisional];
        let mut airports = Vec::with_capacity(used.iter().filter(|&&u| u).count());
        for (old, airport) in self.airports.into_iter().enumerate() {
            if used[old] {
                remap[old] = AirportId(airports.len() as u32);
                airports.push(airport);
            }
        }

        let mut raw: Vec<(AirportId, AirportId)> = self
            .raw_routes
            .iter()
            .map(|&(src, dst)| (remap[src.index()], remap[dst.index()]))
            .collect();
        raw.sort_by_key(|&(src, _)| src.0);

        let node_count = airports.len();
        let edge_from: Vec<AirportId> = raw.iter().map(|&(src, _)| src).collect();
        let edge_to:   Vec<AirportId> = raw.iter().map(|&(_, dst)| dst).collect();
        let edge_km:   Vec<f64>       = raw
            .iter()
            .map(|&(src, dst)| airports[src.index()].pos.distance_km(airports[dst.index()].pos))
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(src, _) in &raw {
            node_out_start[src.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let code_index = airports
            .iter()
            .enumerate()
            .map(|(i, a)| (a.code, AirportId(i as u32)))
            .collect();

        AirportNetwork {
            airports,
            node_out_start,
            edge_from,
            edge_to,
            edge_km,
            code_index,
        }
    }
}

impl Default for AirportNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
