//! Test utilities for place sources.
//!
//! [`StubPlaceSource`] is a deterministic test double for [`PlaceSource`] that
//! returns a pre-configured response without making HTTP requests.

use std::sync::Mutex;

use nearby_core::{NearbyQuery, PlaceSource, QueryError, RawFeature};

/// Stub `PlaceSource` for testing.
///
/// Records every query it receives so tests can assert on call counts and the
/// outbound parameters.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use nearby_core::{PlaceQueryService, RawFeature};
/// use nearby_data::overpass::test_support::StubPlaceSource;
///
/// let source = StubPlaceSource::with_features(vec![RawFeature {
///     point: Some(Coord { x: -87.63, y: 41.88 }),
///     name: Some("Harold Washington Library".into()),
///     ..RawFeature::default()
/// }]);
/// let service = PlaceQueryService::new(&source);
///
/// let places = service
///     .fetch_nearby(Coord { x: -87.6298, y: 41.8781 }, "library", 2.0)
///     .expect("stub succeeds");
/// assert_eq!(places.len(), 1);
/// assert_eq!(source.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubPlaceSource {
    response: Result<Vec<RawFeature>, QueryError>,
    queries: Mutex<Vec<NearbyQuery>>,
}

impl StubPlaceSource {
    /// Create a source that returns `features` for every query.
    #[must_use]
    pub fn with_features(features: Vec<RawFeature>) -> Self {
        Self {
            response: Ok(features),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Create a source that fails every query with `error`.
    #[must_use]
    pub fn with_error(error: QueryError) -> Self {
        Self {
            response: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Number of queries received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.queries.lock().map_or(0, |queries| queries.len())
    }

    /// Most recent query received, if any.
    #[must_use]
    pub fn last_query(&self) -> Option<NearbyQuery> {
        self.queries
            .lock()
            .ok()
            .and_then(|queries| queries.last().copied())
    }
}

impl PlaceSource for StubPlaceSource {
    fn fetch_features(&self, query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(*query);
        }
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use nearby_core::Category;
    use rstest::rstest;

    fn query() -> NearbyQuery {
        NearbyQuery {
            tag: Category::Hospital.query_tag(),
            centre: Coord { x: 0.0, y: 0.0 },
            radius_metres: 500.0,
        }
    }

    #[rstest]
    fn with_features_returns_configured_features() {
        let features = vec![RawFeature::default(), RawFeature::default()];
        let source = StubPlaceSource::with_features(features.clone());

        let result = source.fetch_features(&query()).expect("should succeed");

        assert_eq!(result, features);
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let source = StubPlaceSource::with_error(QueryError::NetworkFailure {
            url: "http://example.com".to_string(),
            message: "connection refused".to_string(),
        });

        let err = source.fetch_features(&query()).expect_err("should fail");

        assert!(matches!(err, QueryError::NetworkFailure { .. }));
    }

    #[rstest]
    fn records_queries() {
        let source = StubPlaceSource::with_features(Vec::new());
        assert_eq!(source.calls(), 0);
        assert_eq!(source.last_query(), None);

        source.fetch_features(&query()).expect("should succeed");
        source.fetch_features(&query()).expect("should succeed");

        assert_eq!(source.calls(), 2);
        assert_eq!(source.last_query(), Some(query()));
    }
}
