//! Data access adapters for nearby-place search.
//!
//! Responsibilities:
//! - Implement the core [`nearby_core::PlaceSource`] port over HTTP.
//! - Encapsulate the Overpass query language and response format.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `nearby-core`): no distance
//!   filtering, sorting or label fallbacks here.
//! - Keep blocking I/O off async executors; see
//!   [`overpass::OverpassPlaceSource`] for runtime behaviour.
//!
//! Invariants:
//! - One request per query; no retries.
//! - No global mutable state.

pub mod overpass;

pub use overpass::{OverpassPlaceSource, OverpassPlaceSourceConfig, SourceBuildError};
