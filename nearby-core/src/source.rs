//! Port for the external geospatial query service.
//!
//! The [`PlaceSource`] trait abstracts the retrieval of raw features tagged
//! with a [`QueryTag`] around a centre point. It is synchronous to keep the
//! core embeddable in synchronous contexts; network-backed implementations
//! may block the caller while a request is in flight.

use geo::Coord;

use crate::{QueryError, QueryTag, RawFeature};

/// Outbound request for features around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    /// Tag selecting the wanted features.
    pub tag: QueryTag,
    /// Search centre (`x = longitude`, `y = latitude`).
    pub centre: Coord<f64>,
    /// Search radius in metres.
    pub radius_metres: f64,
}

/// Fetch raw features matching a [`NearbyQuery`].
///
/// Implementations return features in the order the service produced them and
/// must not filter or sort them. Individual features may lack coordinates; the
/// caller skips those. Transport failures map to
/// [`QueryError::NetworkFailure`], and non-success statuses or unreadable
/// payloads map to [`QueryError::BadResponse`].
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use nearby_core::{NearbyQuery, PlaceSource, QueryError, RawFeature};
///
/// struct SinglePoint;
///
/// impl PlaceSource for SinglePoint {
///     fn fetch_features(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
///         Ok(vec![RawFeature {
///             point: Some(query.centre),
///             ..RawFeature::default()
///         }])
///     }
/// }
///
/// let query = NearbyQuery {
///     tag: nearby_core::Category::Park.query_tag(),
///     centre: Coord { x: 0.0, y: 0.0 },
///     radius_metres: 100.0,
/// };
/// assert_eq!(SinglePoint.fetch_features(&query)?.len(), 1);
/// # Ok::<(), QueryError>(())
/// ```
pub trait PlaceSource {
    /// Return the raw features for `query`.
    fn fetch_features(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError>;
}

impl<S: PlaceSource + ?Sized> PlaceSource for &S {
    fn fetch_features(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
        (**self).fetch_features(query)
    }
}

impl<S: PlaceSource + ?Sized> PlaceSource for Box<S> {
    fn fetch_features(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
        (**self).fetch_features(query)
    }
}
