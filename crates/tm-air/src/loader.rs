//! OpenFlights dataset loader.
//!
//! # CSV format
//!
//! Both files are header-less, comma-separated, with double-quoted text
//! fields and `\N` for nulls.  Only a few columns are read:
//!
//! | File           | Column | Meaning             |
//! |----------------|--------|---------------------|
//! | `airports.dat` | 1      | name                |
//! |                | 4      | IATA code           |
//! |                | 6      | latitude (degrees)  |
//! |                | 7      | longitude (degrees) |
//! | `routes.dat`   | 2      | source IATA         |
//! |                | 4      | destination IATA    |
//!
//! ```csv
//! 3797,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,13,-5,"A","America/New_York","airport","OurAirports"
//! AA,24,JFK,3797,LAX,3484,,0,762 763
//! ```
//!
//! # Failure policy
//!
//! A bad row is skipped and recorded in the [`LoadReport`]; it never aborts
//! the load.  A file that cannot be opened or read, or that yields no usable
//! airports or no usable routes, is fatal.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;
use tracing::{debug, info, warn};

use tm_core::{GeoPoint, IataCode};

use crate::network::{AirportNetwork, AirportNetworkBuilder};
use crate::{AirError, AirResult};

const AIRPORT_NAME: usize = 1;
const AIRPORT_IATA: usize = 4;
const AIRPORT_LAT:  usize = 6;
const AIRPORT_LNG:  usize = 7;

const ROUTE_SRC:        usize = 2;
const ROUTE_DST:        usize = 4;
const ROUTE_MIN_FIELDS: usize = 5;

// ── Report types ──────────────────────────────────────────────────────────────

/// Which input file a row or error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dataset {
    Airports,
    Routes,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dataset::Airports => "airports",
            Dataset::Routes   => "routes",
        })
    }
}

/// Why a single row was left out of the network.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SkipReason {
    #[error("missing field {index}")]
    MissingField { index: usize },

    #[error("invalid IATA code {0:?}")]
    InvalidIata(String),

    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),

    #[error("route references unknown airport {0:?}")]
    UnknownAirport(String),

    #[error("malformed row: {0}")]
    Malformed(String),
}

/// One skipped row.  `line` is 1-based where the CSV reader knows it.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRow {
    pub dataset: Dataset,
    pub line:    Option<u64>,
    pub reason:  SkipReason,
}

/// Summary of a load: totals plus every skipped row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// Airports that parsed cleanly (before route filtering).
    pub airports_parsed: usize,
    /// Airports kept after dropping those with no routes.
    pub airports_kept:   usize,
    /// Routes kept.
    pub routes_kept:     usize,
    pub skipped:         Vec<SkippedRow>,
}

impl LoadReport {
    pub fn skipped_in(&self, dataset: Dataset) -> impl Iterator<Item = &SkippedRow> {
        self.skipped.iter().filter(move |s| s.dataset == dataset)
    }

    fn skip(&mut self, dataset: Dataset, line: Option<u64>, reason: SkipReason) {
        debug!(%dataset, ?line, %reason, "skipping row");
        self.skipped.push(SkippedRow { dataset, line, reason });
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the airport network from OpenFlights files on disk.
pub fn load_openflights(airports: &Path, routes: &Path) -> AirResult<(AirportNetwork, LoadReport)> {
    let open = |dataset: Dataset, path: &Path| {
        File::open(path).map_err(|source| AirError::Open {
            dataset,
            path: path.to_path_buf(),
            source,
        })
    };
    let airports_file = open(Dataset::Airports, airports)?;
    let routes_file   = open(Dataset::Routes, routes)?;
    load_openflights_readers(airports_file, routes_file)
}

/// Like [`load_openflights`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `&[u8]` or `std::io::Cursor`).
pub fn load_openflights_readers<A: Read, R: Read>(
    airports: A,
    routes: R,
) -> AirResult<(AirportNetwork, LoadReport)> {
    let mut report  = LoadReport::default();
    let mut builder = AirportNetworkBuilder::new();

    // ── Airports ──────────────────────────────────────────────────────────
    for (rec, line) in read_rows(airports, Dataset::Airports, &mut report)? {
        match parse_airport(&rec) {
            Ok((code, name, pos)) => {
                builder.add_airport(code, name, pos);
                report.airports_parsed += 1;
            }
            Err(reason) => report.skip(Dataset::Airports, line, reason),
        }
    }

    if builder.airport_count() == 0 {
        return Err(AirError::EmptyDataset {
            dataset: Dataset::Airports,
            reason:  "no row had a valid IATA code and coordinates",
        });
    }

    // ── Routes ────────────────────────────────────────────────────────────
    for (rec, line) in read_rows(routes, Dataset::Routes, &mut report)? {
        if rec.len() < ROUTE_MIN_FIELDS {
            report.skip(Dataset::Routes, line, SkipReason::MissingField { index: rec.len() });
            continue;
        }
        if let Err(reason) = add_route(&mut builder, &rec) {
            report.skip(Dataset::Routes, line, reason);
        }
    }

    if builder.route_count() == 0 {
        return Err(AirError::EmptyDataset {
            dataset: Dataset::Routes,
            reason:  "no route connected two known airports",
        });
    }

    let network = builder.build();
    report.airports_kept = network.airport_count();
    report.routes_kept   = network.route_count();

    info!(
        airports = report.airports_kept,
        dropped_without_routes = report.airports_parsed - report.airports_kept,
        routes = report.routes_kept,
        "loaded airport network",
    );
    if !report.skipped.is_empty() {
        warn!(
            airports = report.skipped_in(Dataset::Airports).count(),
            routes   = report.skipped_in(Dataset::Routes).count(),
            "skipped malformed or unusable rows",
        );
    }

    Ok((network, report))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read every record of a header-less CSV stream.
///
/// Per-record parse failures (bad quoting, invalid UTF-8) are recorded and
/// skipped; an underlying I/O failure aborts with [`AirError::Csv`].
fn read_rows<R: Read>(
    reader: R,
    dataset: Dataset,
    report: &mut LoadReport,
) -> AirResult<Vec<(StringRecord, Option<u64>)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        match result {
            Ok(rec) => {
                let line = rec.position().map(|p| p.line());
                rows.push((rec, line));
            }
            Err(e) if e.is_io_error() => return Err(AirError::Csv(e)),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                report.skip(dataset, line, SkipReason::Malformed(e.to_string()));
            }
        }
    }
    Ok(rows)
}

fn field(rec: &StringRecord, index: usize) -> Result<&str, SkipReason> {
    rec.get(index).ok_or(SkipReason::MissingField { index })
}

fn parse_airport(rec: &StringRecord) -> Result<(IataCode, String, GeoPoint), SkipReason> {
    let raw_iata = field(rec, AIRPORT_IATA)?;
    let code: IataCode = raw_iata
        .parse()
        .map_err(|_| SkipReason::InvalidIata(raw_iata.trim().to_owned()))?;

    let name = field(rec, AIRPORT_NAME)?.to_owned();
    let lat  = parse_degrees(field(rec, AIRPORT_LAT)?)?;
    let lng  = parse_degrees(field(rec, AIRPORT_LNG)?)?;

    let pos = GeoPoint::try_new(lat, lng)
        .map_err(|e| SkipReason::InvalidCoordinate(e.to_string()))?;
    Ok((code, name, pos))
}

fn parse_degrees(s: &str) -> Result<f64, SkipReason> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SkipReason::InvalidCoordinate(s.to_owned())),
    }
}

fn add_route(builder: &mut AirportNetworkBuilder, rec: &StringRecord) -> Result<(), SkipReason> {
    let src = known_code(builder, field(rec, ROUTE_SRC)?)?;
    let dst = known_code(builder, field(rec, ROUTE_DST)?)?;
    builder
        .add_route(src, dst)
        .map_err(|e| SkipReason::UnknownAirport(e.to_string()))
}

fn known_code(builder: &AirportNetworkBuilder, raw: &str) -> Result<IataCode, SkipReason> {
    let unknown = || SkipReason::UnknownAirport(raw.trim().to_owned());
    let code: IataCode = raw.parse().map_err(|_| unknown())?;
    if builder.contains(code) { Ok(code) } else { Err(unknown()) }
}
