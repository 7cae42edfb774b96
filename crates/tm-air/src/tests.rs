//! Unit tests for tm-air.
//!
//! Networks are hand-built; loader tests use in-memory OpenFlights snippets.

#[cfg(test)]
mod helpers {
    use tm_core::{GeoPoint, IataCode};
    use crate::{AirportNetwork, AirportNetworkBuilder};

    pub fn code(s: &str) -> IataCode {
        s.parse().unwrap()
    }

    /// Four airports roughly on a line, 5 directed routes:
    ///
    /// ```text
    ///   AAA → BBB → DDD
    ///   AAA → CCC → DDD
    ///   AAA → DDD          (direct)
    /// ```
    ///
    /// Positions put CCC slightly off the AAA–DDD line, BBB far off it, so
    /// AAA→DDD direct is shortest and AAA→CCC→DDD beats AAA→BBB→DDD.
    pub fn diamond() -> AirportNetwork {
        let mut b = AirportNetworkBuilder::new();
        b.add_airport(code("AAA"), "Alpha", GeoPoint::new(0.0, 0.0));
        b.add_airport(code("BBB"), "Bravo", GeoPoint::new(5.0, 5.0));
        b.add_airport(code("CCC"), "Charlie", GeoPoint::new(0.5, 5.0));
        b.add_airport(code("DDD"), "Delta", GeoPoint::new(0.0, 10.0));
        b.add_route(code("AAA"), code("BBB")).unwrap();
        b.add_route(code("BBB"), code("DDD")).unwrap();
        b.add_route(code("AAA"), code("CCC")).unwrap();
        b.add_route(code("CCC"), code("DDD")).unwrap();
        b.add_route(code("AAA"), code("DDD")).unwrap();
        b.build()
    }

    /// Same geometry without the direct AAA→DDD route.
    pub fn diamond_without_direct() -> AirportNetwork {
        let mut b = AirportNetworkBuilder::new();
        b.add_airport(code("AAA"), "Alpha", GeoPoint::new(0.0, 0.0));
        b.add_airport(code("BBB"), "Bravo", GeoPoint::new(5.0, 5.0));
        b.add_airport(code("CCC"), "Charlie", GeoPoint::new(0.5, 5.0));
        b.add_airport(code("DDD"), "Delta", GeoPoint::new(0.0, 10.0));
        b.add_route(code("AAA"), code("BBB")).unwrap();
        b.add_route(code("BBB"), code("DDD")).unwrap();
        b.add_route(code("AAA"), code("CCC")).unwrap();
        b.add_route(code("CCC"), code("DDD")).unwrap();
        b.add_route(code("DDD"), code("AAA")).unwrap();
        b.build()
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tm_core::GeoPoint;
    use crate::{AirError, AirportNetworkBuilder};
    use super::helpers::{code, diamond};

    #[test]
    fn empty_build() {
        let net = AirportNetworkBuilder::new().build();
        assert_eq!(net.airport_count(), 0);
        assert_eq!(net.route_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn drops_airports_without_routes() {
        let mut b = AirportNetworkBuilder::new();
        b.add_airport(code("AAA"), "Alpha", GeoPoint::new(0.0, 0.0));
        b.add_airport(code("ZZZ"), "Idle", GeoPoint::new(1.0, 1.0));
        b.add_airport(code("BBB"), "Bravo", GeoPoint::new(0.0, 1.0));
        b.add_route(code("AAA"), code("BBB")).unwrap();
        let net = b.build();

        assert_eq!(net.airport_count(), 2);
        assert!(net.lookup(code("ZZZ")).is_none());
        // Survivors are renumbered densely and the index follows.
        let bbb = net.lookup(code("BBB")).unwrap();
        assert_eq!(bbb.0, 1);
        assert_eq!(net.airport(bbb).unwrap().name, "Bravo");
    }

    #[test]
    fn every_kept_airport_has_a_route() {
        let net = diamond();
        for (i, _) in net.airports.iter().enumerate() {
            let id = tm_core::AirportId(i as u32);
            let touched = net.edge_from.contains(&id) || net.edge_to.contains(&id);
            assert!(touched, "{id} has no routes");
        }
    }

    #[test]
    fn destination_only_airport_is_kept() {
        let mut b = AirportNetworkBuilder::new();
        b.add_airport(code("AAA"), "Alpha", GeoPoint::new(0.0, 0.0));
        b.add_airport(code("BBB"), "Bravo", GeoPoint::new(0.0, 1.0));
        b.add_route(code("AAA"), code("BBB")).unwrap();
        let net = b.build();
        let bbb = net.lookup(code("BBB")).unwrap();
        assert_eq!(net.out_degree(bbb), 0);
        assert_eq!(net.airport_count(), 2);
    }

    #[test]
    fn unknown_route_endpoint_rejected() {
        let mut b = AirportNetworkBuilder::new();
        b.add_airport(code("AAA"), "Alpha", GeoPoint::new(0.0, 0.0));
        let err = b.add_route(code("AAA"), code("QQQ")).unwrap_err();
        assert!(matches!(err, AirError::UnknownAirport(c) if c == code("QQQ")));
        assert_eq!(b.route_count(), 0);
    }

    #[test]
    fn duplicate_code_last_wins() {
        let mut b = AirportNetworkBuilder::new();
        let first  = b.add_airport(code("AAA"), "Old", GeoPoint::new(0.0, 0.0));
        let second = b.add_airport(code("AAA"), "New", GeoPoint::new(1.0, 1.0));
        assert_eq!(first, second);
        b.add_airport(code("BBB"), "Bravo", GeoPoint::new(0.0, 1.0));
        b.add_route(code("AAA"), code("BBB")).unwrap();
        let net = b.build();
        let a = net.airport(net.lookup(code("AAA")).unwrap()).unwrap();
        assert_eq!(a.name, "New");
        assert_eq!(a.pos, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn edge_weight_is_haversine() {
        let net = diamond();
        let a = net.lookup(code("AAA")).unwrap();
        let d = net.lookup(code("DDD")).unwrap();
        let (_, km) = net.routes_from(a).find(|&(to, _)| to == d).unwrap();
        let expected = net.airports[a.index()].pos.distance_km(net.airports[d.index()].pos);
        assert_eq!(km, expected);
    }

    #[test]
    fn csr_degrees() {
        let net = diamond();
        assert_eq!(net.out_degree(net.lookup(code("AAA")).unwrap()), 3);
        assert_eq!(net.out_degree(net.lookup(code("BBB")).unwrap()), 1);
        assert_eq!(net.out_degree(net.lookup(code("DDD")).unwrap()), 0);
        assert_eq!(net.route_count(), 5);
    }
}

// ── Nearest airport ───────────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use tm_core::GeoPoint;
    use crate::AirportNetwork;
    use super::helpers::{code, diamond};

    #[test]
    fn exact_position() {
        let net = diamond();
        let (id, d) = net.nearest_airport(GeoPoint::new(0.0, 10.0)).unwrap();
        assert_eq!(id, net.lookup(code("DDD")).unwrap());
        assert_eq!(d, 0.0);
    }

    #[test]
    fn closest_wins() {
        let net = diamond();
        let (id, _) = net.nearest_airport(GeoPoint::new(4.0, 4.5)).unwrap();
        assert_eq!(id, net.lookup(code("BBB")).unwrap());
        let (id, _) = net.nearest_airport(GeoPoint::new(0.2, 1.0)).unwrap();
        assert_eq!(id, net.lookup(code("AAA")).unwrap());
    }

    #[test]
    fn empty_network_returns_none() {
        assert!(AirportNetwork::empty().nearest_airport(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use tm_core::{AirportId, GeoPoint};
    use crate::{AirError, AirportNetwork, AirportNetworkBuilder, DijkstraRouter, FlightPath, Router};
    use super::helpers::{code, diamond, diamond_without_direct};

    /// Sum route weights along `path`, asserting each hop is a real route.
    fn walk(net: &AirportNetwork, path: &FlightPath) -> f64 {
        path.airports
            .windows(2)
            .map(|hop| {
                net.routes_from(hop[0])
                    .filter(|&(to, _)| to == hop[1])
                    .map(|(_, km)| km)
                    .fold(f64::INFINITY, f64::min)
            })
            .inspect(|km| assert!(km.is_finite(), "path uses a missing route"))
            .sum()
    }

    #[test]
    fn same_airport_is_trivial() {
        let net = diamond();
        let a = net.lookup(code("AAA")).unwrap();
        let path = DijkstraRouter.shortest_path(&net, a, a).unwrap();
        assert_eq!(path.airports, vec![a]);
        assert_eq!(path.distance_km, 0.0);
        assert!(path.stops().is_empty());
    }

    #[test]
    fn direct_route_is_shortest() {
        let net = diamond();
        let a = net.lookup(code("AAA")).unwrap();
        let d = net.lookup(code("DDD")).unwrap();
        let path = DijkstraRouter.shortest_path(&net, a, d).unwrap();
        assert_eq!(path.airports, vec![a, d]);
        assert_eq!(path.legs(), 1);
        assert!((path.distance_km - walk(&net, &path)).abs() < 1e-9);
    }

    #[test]
    fn best_one_stop_path() {
        let net = diamond_without_direct();
        let a = net.lookup(code("AAA")).unwrap();
        let c = net.lookup(code("CCC")).unwrap();
        let d = net.lookup(code("DDD")).unwrap();
        let path = DijkstraRouter.shortest_path(&net, a, d).unwrap();

        assert_eq!(path.airports, vec![a, c, d]);
        assert_eq!(path.stops(), &[c]);
        let expected = net.airports[a.index()].pos.distance_km(net.airports[c.index()].pos)
            + net.airports[c.index()].pos.distance_km(net.airports[d.index()].pos);
        assert!((path.distance_km - expected).abs() < 1e-9);
        assert!((path.distance_km - walk(&net, &path)).abs() < 1e-9);
    }

    #[test]
    fn cycles_terminate() {
        // DDD→AAA closes a cycle; routing back from DDD must still work.
        let net = diamond_without_direct();
        let b = net.lookup(code("BBB")).unwrap();
        let c = net.lookup(code("CCC")).unwrap();
        let path = DijkstraRouter.shortest_path(&net, b, c).unwrap();
        assert!(path.is_reachable());
        assert_eq!(path.airports.first(), Some(&b));
        assert_eq!(path.airports.last(), Some(&c));
        assert_eq!(path.legs(), 3); // BBB→DDD→AAA→CCC
        assert!((path.distance_km - walk(&net, &path)).abs() < 1e-9);
    }

    #[test]
    fn one_way_blocks_return() {
        let net = diamond();
        let a = net.lookup(code("AAA")).unwrap();
        let d = net.lookup(code("DDD")).unwrap();
        let back = DijkstraRouter.shortest_path(&net, d, a).unwrap();
        assert!(!back.is_reachable());
    }

    #[test]
    fn unreachable_disconnected() {
        let mut b = AirportNetworkBuilder::new();
        b.add_airport(code("AAA"), "Alpha", GeoPoint::new(0.0, 0.0));
        b.add_airport(code("BBB"), "Bravo", GeoPoint::new(0.0, 1.0));
        b.add_airport(code("XXX"), "Xray", GeoPoint::new(10.0, 0.0));
        b.add_airport(code("YYY"), "Yankee", GeoPoint::new(10.0, 1.0));
        b.add_route(code("AAA"), code("BBB")).unwrap();
        b.add_route(code("XXX"), code("YYY")).unwrap();
        let net = b.build();

        let a = net.lookup(code("AAA")).unwrap();
        let y = net.lookup(code("YYY")).unwrap();
        let path = DijkstraRouter.shortest_path(&net, a, y).unwrap();
        assert_eq!(path, FlightPath::unreachable());
        assert!(path.distance_km.is_infinite());
        assert!(path.airports.is_empty());
        assert_eq!(path.legs(), 0);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let net = diamond();
        let a = net.lookup(code("AAA")).unwrap();
        let err = DijkstraRouter.shortest_path(&net, a, AirportId(99)).unwrap_err();
        assert!(matches!(err, AirError::AirportNotFound(AirportId(99))));
    }
}

// ── OpenFlights loader ────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;

    use crate::{AirError, Dataset, SkipReason, load_openflights, load_openflights_readers};
    use super::helpers::code;

    const AIRPORTS: &str = "\
3797,\"John F Kennedy International Airport\",\"New York\",\"United States\",\"JFK\",\"KJFK\",40.63980103,-73.77890015,13,-5,\"A\",\"America/New_York\",\"airport\",\"OurAirports\"\n\
3484,\"Los Angeles International Airport\",\"Los Angeles\",\"United States\",\"LAX\",\"KLAX\",33.94250107,-118.4079971,125,-8,\"A\",\"America/Los_Angeles\",\"airport\",\"OurAirports\"\n\
3830,\"Chicago O'Hare International Airport\",\"Chicago\",\"United States\",\"ORD\",\"KORD\",41.9786,-87.9048,672,-6,\"A\",\"America/Chicago\",\"airport\",\"OurAirports\"\n\
9999,\"Grass Strip\",\"Nowhere\",\"United States\",\\N,\"XNOW\",40.0,-100.0,0,-6,\"A\",\"America/Chicago\",\"airport\",\"OurAirports\"\n\
9998,\"Broken Coords\",\"Nowhere\",\"United States\",\"BRK\",\"XBRK\",north,-100.0,0,-6,\"A\",\"America/Chicago\",\"airport\",\"OurAirports\"\n\
9997,\"Idle Field\",\"Nowhere\",\"United States\",\"IDL\",\"XIDL\",35.0,-100.0,0,-6,\"A\",\"America/Chicago\",\"airport\",\"OurAirports\"\n\
";

    const ROUTES: &str = "\
AA,24,JFK,3797,LAX,3484,,0,762\n\
AA,24,LAX,3484,JFK,3797,,0,762\n\
UA,5209,ORD,3830,LAX,3484,,0,320\n\
UA,5209,JFK,3797,ZZZ,\\N,,0,320\n\
short,row\n\
";

    #[test]
    fn loads_and_filters() {
        let (net, report) = load_openflights_readers(AIRPORTS.as_bytes(), ROUTES.as_bytes()).unwrap();

        assert_eq!(report.airports_parsed, 4); // JFK, LAX, ORD, IDL
        assert_eq!(report.airports_kept, 3);   // IDL has no routes
        assert_eq!(report.routes_kept, 3);
        assert_eq!(net.airport_count(), 3);
        assert!(net.lookup(code("IDL")).is_none());

        let jfk = net.airport(net.lookup(code("JFK")).unwrap()).unwrap();
        assert_eq!(jfk.name, "John F Kennedy International Airport");
        assert!((jfk.pos.lat - 40.63980103).abs() < 1e-9);
    }

    #[test]
    fn skipped_rows_are_reported() {
        let (_, report) = load_openflights_readers(AIRPORTS.as_bytes(), ROUTES.as_bytes()).unwrap();

        let airports: Vec<_> = report.skipped_in(Dataset::Airports).collect();
        assert_eq!(airports.len(), 2);
        assert!(matches!(&airports[0].reason, SkipReason::InvalidIata(s) if s == "\\N"));
        assert_eq!(airports[0].line, Some(4));
        assert!(matches!(airports[1].reason, SkipReason::InvalidCoordinate(_)));

        let routes: Vec<_> = report.skipped_in(Dataset::Routes).collect();
        assert_eq!(routes.len(), 2);
        assert!(matches!(&routes[0].reason, SkipReason::UnknownAirport(s) if s == "ZZZ"));
        assert!(matches!(routes[1].reason, SkipReason::MissingField { .. }));
    }

    #[test]
    fn no_airports_is_fatal() {
        let err = load_openflights_readers("".as_bytes(), ROUTES.as_bytes()).unwrap_err();
        assert!(matches!(err, AirError::EmptyDataset { dataset: Dataset::Airports, .. }));
    }

    #[test]
    fn no_usable_routes_is_fatal() {
        let routes = "XX,1,AAA,1,BBB,2,,0,738\n";
        let err = load_openflights_readers(AIRPORTS.as_bytes(), routes.as_bytes()).unwrap_err();
        assert!(matches!(err, AirError::EmptyDataset { dataset: Dataset::Routes, .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let routes = dir.path().join("routes.dat");
        std::fs::write(&routes, ROUTES).unwrap();

        let err = load_openflights(&dir.path().join("airports.dat"), &routes).unwrap_err();
        assert!(matches!(err, AirError::Open { dataset: Dataset::Airports, .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let airports = dir.path().join("airports.dat");
        let routes = dir.path().join("routes.dat");
        std::fs::File::create(&airports).unwrap().write_all(AIRPORTS.as_bytes()).unwrap();
        std::fs::write(&routes, ROUTES).unwrap();

        let (net, _) = load_openflights(&airports, &routes).unwrap();
        assert_eq!(net.airport_count(), 3);
    }
}
