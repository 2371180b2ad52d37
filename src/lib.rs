//! Facade crate for the nearby-place search engine.
//!
//! This crate re-exports the core domain types and exposes the Overpass place
//! source behind the default `overpass` feature.

#![forbid(unsafe_code)]

pub use nearby_core::{
    AddressResolver, Category, CategoryDisplay, ClusterGroup, CoordinateError, DETAIL_ZOOM,
    NearbyQuery, PlaceQueryService, PlaceRecord, PlaceSource, QueryError, QueryTag, RawFeature,
    Resolution, RetrievalController, RetrievalState, RetrievalStatus, RetrievalTicket,
    SearchInputs, Viewport, cluster, distance_miles, initial_viewport, lat_lon, locate,
    merge_radius_degrees, zoom_for_radius,
};

#[cfg(feature = "overpass")]
pub use nearby_data::{OverpassPlaceSource, OverpassPlaceSourceConfig, SourceBuildError};
