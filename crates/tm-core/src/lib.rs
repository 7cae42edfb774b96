//! `tm-core` — foundational types for the `tripmate` route planner.
//!
//! This crate is a dependency of every other `tm-*` crate.  It has no `tm-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | [`geo`]    | `GeoPoint`, haversine distance in kilometres     |
//! | [`ids`]    | `AirportId` (dense index), `IataCode`            |
//! | [`mode`]   | `ModePreference` (`auto` / `driving` / `flying`) |
//! | [`error`]  | `CoreError`, `CoreResult`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use ids::{AirportId, IataCode};
pub use mode::ModePreference;
