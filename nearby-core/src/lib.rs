//! Core domain logic for nearby-place search.
//!
//! Responsibilities:
//! - Great-circle distances and coordinate validation.
//! - The category vocabulary and its map-data tags.
//! - Normalising raw features into sorted, radius-filtered place records.
//! - Zoom-dependent marker clustering and initial map framing.
//! - The retrieval state machine that discards superseded responses.
//!
//! Boundaries:
//! - Network access lives behind [`PlaceSource`] and [`AddressResolver`];
//!   adapters belong in `nearby-data`.
//!
//! Coordinates use [`geo::Coord`] with `x` as longitude and `y` as latitude.

mod category;
mod cluster;
mod controller;
mod error;
mod geo_math;
mod location;
mod place;
mod query;
mod source;
mod viewport;

pub use category::{Category, CategoryDisplay, DEFAULT_ICON, QueryTag, UnknownCategory, tag_for};
pub use cluster::{
    ClusterGroup, DEFAULT_MERGE_RADIUS_DEGREES, DETAIL_ZOOM, cluster, merge_radius_degrees,
};
pub use controller::{
    Resolution, RetrievalController, RetrievalState, RetrievalStatus, RetrievalTicket,
    SearchInputs,
};
pub use error::QueryError;
pub use geo_math::{
    CoordinateError, EARTH_RADIUS_MILES, METRES_PER_MILE, distance_miles, lat_lon,
    miles_to_metres,
};
pub use location::{AddressResolver, ResolverError, locate};
pub use place::{ElementKind, PlaceRecord, RawFeature};
pub use query::{PlaceQueryService, RADIUS_EPSILON_MILES, collect_places};
pub use source::{NearbyQuery, PlaceSource};
pub use viewport::{Viewport, bounds, initial_viewport, zoom_for_radius};
