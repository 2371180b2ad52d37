//! Nearby-place retrieval pipeline.
//!
//! [`PlaceQueryService`] turns a category label, a centre and a radius into
//! a [`NearbyQuery`], hands it to a [`PlaceSource`], and normalises the raw
//! features into [`PlaceRecord`] values:
//!
//! 1. features without a usable coordinate are skipped;
//! 2. distances are computed with [`distance_miles`];
//! 3. records further than `radius + epsilon` are dropped;
//! 4. the rest are stably sorted by distance, so ties keep response order.

use geo::Coord;
use log::{debug, warn};

use crate::{
    Category, NearbyQuery, PlaceRecord, PlaceSource, QueryError, RawFeature, distance_miles,
    miles_to_metres,
};

/// Default slack, in miles, applied to the radius-inclusion filter.
///
/// Absorbs rounding between the metre radius sent to the service and the
/// haversine distance computed locally.
pub const RADIUS_EPSILON_MILES: f64 = 0.01;

/// Retrieves and normalises nearby places from a [`PlaceSource`].
///
/// The service performs no retries; callers decide whether to resubmit.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::{NearbyQuery, PlaceQueryService, PlaceSource, QueryError, RawFeature};
///
/// struct OnePark;
///
/// impl PlaceSource for OnePark {
///     fn fetch_features(&self, _query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
///         Ok(vec![RawFeature {
///             point: Some(Coord { x: -87.65, y: 41.90 }),
///             ..RawFeature::default()
///         }])
///     }
/// }
///
/// let service = PlaceQueryService::new(OnePark);
/// let places = service.fetch_nearby(Coord { x: -87.6298, y: 41.8781 }, "park", 10.0)?;
/// assert_eq!(places.len(), 1);
/// assert_eq!(places[0].label, "park (Unnamed)");
/// # Ok::<(), QueryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlaceQueryService<S> {
    source: S,
    radius_epsilon_miles: f64,
}

impl<S: PlaceSource> PlaceQueryService<S> {
    /// Create a service backed by `source` with the default epsilon.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            radius_epsilon_miles: RADIUS_EPSILON_MILES,
        }
    }

    /// Override the slack applied to the radius-inclusion filter.
    ///
    /// Negative or non-finite values are ignored and the current epsilon is
    /// kept.
    #[must_use]
    pub fn with_radius_epsilon(mut self, epsilon_miles: f64) -> Self {
        if !epsilon_miles.is_finite() || epsilon_miles < 0.0 {
            warn!(
                "Ignored radius epsilon {epsilon_miles}; keeping {}",
                self.radius_epsilon_miles
            );
            return self;
        }
        self.radius_epsilon_miles = epsilon_miles;
        self
    }

    /// Borrow the underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch places of the labelled category within `radius_miles` of
    /// `centre`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidCategory`] for unsupported labels and
    /// [`QueryError::InvalidRadius`] for non-positive radii, both without
    /// contacting the source. Source failures are passed through unchanged.
    pub fn fetch_nearby(
        &self,
        centre: Coord<f64>,
        category: &str,
        radius_miles: f64,
    ) -> Result<Vec<PlaceRecord>, QueryError> {
        let resolved = category
            .parse::<Category>()
            .map_err(|err| QueryError::InvalidCategory { label: err.label })?;
        self.fetch_category(centre, resolved, radius_miles)
    }

    /// Fetch places of an already-resolved category.
    ///
    /// # Errors
    ///
    /// See [`PlaceQueryService::fetch_nearby`].
    pub fn fetch_category(
        &self,
        centre: Coord<f64>,
        category: Category,
        radius_miles: f64,
    ) -> Result<Vec<PlaceRecord>, QueryError> {
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(QueryError::InvalidRadius { radius_miles });
        }
        let query = NearbyQuery {
            tag: category.query_tag(),
            centre,
            radius_metres: miles_to_metres(radius_miles),
        };
        debug!(
            "Querying {}={} within {:.0} m of ({}, {})",
            query.tag.key, query.tag.value, query.radius_metres, centre.y, centre.x
        );
        let raw = self.source.fetch_features(&query)?;
        let raw_count = raw.len();
        let places = collect_places(
            centre,
            category,
            radius_miles + self.radius_epsilon_miles,
            raw,
        );
        debug!(
            "Source returned {} features; kept {} {} places",
            raw_count,
            places.len(),
            category
        );
        Ok(places)
    }
}

/// Normalise raw features into place records within `max_distance_miles`.
///
/// The output is deterministic for identical inputs and sorted by distance
/// with ties in response order.
#[must_use]
pub fn collect_places(
    centre: Coord<f64>,
    category: Category,
    max_distance_miles: f64,
    raw: Vec<RawFeature>,
) -> Vec<PlaceRecord> {
    let mut places: Vec<PlaceRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| normalise(centre, category, index, feature))
        .filter(|place| place.distance_miles <= max_distance_miles)
        .collect();
    places.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    places
}

fn normalise(
    centre: Coord<f64>,
    category: Category,
    index: usize,
    feature: RawFeature,
) -> Option<PlaceRecord> {
    let Some(position) = feature.representative_coord() else {
        warn!(
            "Skipped feature without coordinates: index={}, kind={:?}, id={:?}",
            index, feature.kind, feature.id
        );
        return None;
    };
    let id = feature.place_id(index);
    let label = feature
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| PlaceRecord::unnamed_label(category));
    Some(PlaceRecord {
        id,
        position,
        label,
        category,
        distance_miles: distance_miles(centre, position),
    })
}
