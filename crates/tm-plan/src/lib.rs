//! `tm-plan` — decide per segment whether to drive or fly, and stitch the
//! segments into one itinerary.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`config`]    | `PlannerConfig` (all tunable thresholds)                  |
//! | [`waypoint`]  | Wire types: `PlanRequest`, `RouteStop`, `TripPlan`, …     |
//! | [`selector`]  | `assess_segment`, `plan_segment`, `SegmentPlan`           |
//! | [`assembler`] | Concatenation, consecutive de-duplication, rounding       |
//! | [`planner`]   | `TripPlanner` — the shared, read-only entry point         |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | `TripPlanner::plan_many` fans requests out on Rayon. |

pub mod assembler;
pub mod config;
pub mod error;
pub mod planner;
pub mod selector;
pub mod waypoint;


pub use assembler::{assemble, dedup_consecutive, round_km};
pub use config::PlannerConfig;
pub use error::{PlanError, PlanResult};
pub use planner::TripPlanner;
pub use selector::{SegmentAssessment, SegmentMode, SegmentPlan, assess_segment, plan_segment, wants_flight};
pub use waypoint::{NearestAirport, PlanRequest, RouteStop, StopKind, TripPlan, Waypoint, WaypointInput};
