//! Behavioural tests for [`PlaceQueryService`] using rstest-bdd.

use std::cell::{Cell, RefCell};

use geo::Coord;
use nearby_core::{
    ElementKind, NearbyQuery, PlaceQueryService, PlaceRecord, PlaceSource, QueryError, RawFeature,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const CHICAGO: Coord<f64> = Coord {
    x: -87.6298,
    y: 41.8781,
};

/// World state for place query scenarios.
#[derive(Debug, Default)]
struct QueryWorld {
    features: RefCell<Vec<RawFeature>>,
    calls: Cell<usize>,
    result: RefCell<Option<Result<Vec<PlaceRecord>, QueryError>>>,
}

impl PlaceSource for QueryWorld {
    fn fetch_features(&self, _query: &NearbyQuery) -> Result<Vec<RawFeature>, QueryError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.features.borrow().clone())
    }
}

impl QueryWorld {
    fn places(&self) -> Vec<PlaceRecord> {
        self.result
            .borrow()
            .clone()
            .expect("search should have run")
            .expect("search should succeed")
    }
}

#[fixture]
fn world() -> QueryWorld {
    QueryWorld::default()
}

#[given("a source returning two parks around Chicago")]
fn given_two_parks(world: &QueryWorld) {
    world.features.replace(vec![
        RawFeature {
            kind: Some(ElementKind::Way),
            id: Some(22),
            centre: Some(Coord {
                x: -87.65,
                y: 41.90,
            }),
            ..RawFeature::default()
        },
        RawFeature {
            kind: Some(ElementKind::Node),
            id: Some(11),
            point: Some(Coord {
                x: -87.6189,
                y: 41.8758,
            }),
            name: Some("Grant Park".into()),
            ..RawFeature::default()
        },
    ]);
}

#[given("a source returning a park without coordinates")]
fn given_park_without_coordinates(world: &QueryWorld) {
    world.features.replace(vec![RawFeature {
        kind: Some(ElementKind::Relation),
        id: Some(5),
        name: Some("Nowhere Park".into()),
        ..RawFeature::default()
    }]);
}

#[when("I search for {category} within {radius} miles of Chicago")]
fn when_search(world: &QueryWorld, category: String, radius: f64) {
    let service = PlaceQueryService::new(world);
    let result = service.fetch_nearby(CHICAGO, &category, radius);
    world.result.replace(Some(result));
}

#[then("{count} places are returned")]
fn then_count(world: &QueryWorld, count: usize) {
    assert_eq!(world.places().len(), count);
}

#[then("the first place is {label}")]
fn then_first_label(world: &QueryWorld, label: String) {
    let places = world.places();
    let first = places.first().expect("at least one place");
    assert_eq!(first.label, label.trim_matches('"'));
}

#[then("the second place is about 1.8 miles away")]
fn then_second_distance(world: &QueryWorld) {
    let places = world.places();
    let second = places.get(1).expect("at least two places");
    assert!(
        (second.distance_miles - 1.84).abs() < 0.05,
        "unexpected distance {}",
        second.distance_miles
    );
    assert_eq!(second.label, "park (Unnamed)");
}

#[then("an invalid category error is returned")]
fn then_invalid_category(world: &QueryWorld) {
    let borrowed = world.result.borrow();
    assert!(
        matches!(
            borrowed.as_ref(),
            Some(Err(QueryError::InvalidCategory { label })) if label == "museum"
        ),
        "expected InvalidCategory, got {borrowed:?}"
    );
}

#[then("the source was not called")]
fn then_not_called(world: &QueryWorld) {
    assert_eq!(world.calls.get(), 0);
}

#[scenario(path = "tests/features/place_query.feature", index = 0)]
fn parks_sorted_by_distance(world: QueryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/place_query.feature", index = 1)]
fn unsupported_category(world: QueryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/place_query.feature", index = 2)]
fn features_without_coordinates(world: QueryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/place_query.feature", index = 3)]
fn places_beyond_radius(world: QueryWorld) {
    let _ = world;
}
