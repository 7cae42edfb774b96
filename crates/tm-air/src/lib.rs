//! `tm-air` — scheduled-flight graph, airport lookup, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `Airport`, `AirportNetwork` (CSR), `AirportNetworkBuilder`   |
//! | [`router`]  | `Router` trait, `FlightPath`, `DijkstraRouter`               |
//! | [`loader`]  | OpenFlights `airports.dat` / `routes.dat` loading, `LoadReport` |
//! | [`error`]   | `AirError`, `AirResult<T>`                                   |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Use `rustc-hash` for the IATA-code → `AirportId` index.  |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{AirError, AirResult};
pub use loader::{Dataset, LoadReport, SkipReason, SkippedRow, load_openflights, load_openflights_readers};
pub use network::{Airport, AirportNetwork, AirportNetworkBuilder};
pub use router::{DijkstraRouter, FlightPath, Router};
