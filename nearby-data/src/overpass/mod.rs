//! Overpass API place source.
//!
//! This module provides [`OverpassPlaceSource`], an implementation of
//! [`nearby_core::PlaceSource`] that queries an Overpass interpreter for nodes,
//! ways and relations carrying a category tag around a point.
//!
//! # Architecture
//!
//! A [`nearby_core::NearbyQuery`] is rendered as Overpass QL, POSTed
//! form-encoded as the `data` field, and the JSON answer is decoded into
//! transport DTOs before being mapped into [`nearby_core::RawFeature`] values
//! in service order. Filtering and sorting stay in the core pipeline.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use nearby_data::overpass::{OverpassPlaceSource, OverpassPlaceSourceConfig};
//!
//! let config = OverpassPlaceSourceConfig::new("https://overpass.example.org/api/interpreter")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let source = OverpassPlaceSource::with_config(config)?;
//! # Ok::<(), nearby_data::overpass::SourceBuildError>(())
//! ```

mod dto;
mod provider;
mod query;

#[doc(hidden)]
pub mod test_support;

pub use dto::{OverpassCenter, OverpassElement, OverpassResponse};
pub use provider::{
    DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, OverpassPlaceSource, OverpassPlaceSourceConfig,
    SourceBuildError,
};
pub use query::{DEFAULT_SERVER_TIMEOUT_SECS, build_overpass_ql};
