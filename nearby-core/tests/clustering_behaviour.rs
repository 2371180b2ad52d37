//! Behavioural tests for marker clustering using rstest-bdd.

use std::cell::{Cell, RefCell};

use geo::Coord;
use nearby_core::{Category, PlaceRecord, cluster};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for clustering scenarios.
#[derive(Debug, Default)]
struct ClusterWorld {
    places: RefCell<Vec<PlaceRecord>>,
    groups: Cell<usize>,
}

fn restaurant(id: u64, lat: f64, lon: f64) -> PlaceRecord {
    PlaceRecord {
        id,
        position: Coord { x: lon, y: lat },
        label: format!("restaurant {id}"),
        category: Category::Restaurant,
        distance_miles: 0.0,
    }
}

#[fixture]
fn world() -> ClusterWorld {
    ClusterWorld::default()
}

#[given("two places at the same position")]
fn given_coincident(world: &ClusterWorld) {
    world
        .places
        .replace(vec![restaurant(1, 41.9, -87.6), restaurant(2, 41.9, -87.6)]);
}

#[given("two places five degrees apart")]
fn given_distant(world: &ClusterWorld) {
    world
        .places
        .replace(vec![restaurant(1, 40.0, -87.0), restaurant(2, 45.0, -82.0)]);
}

#[when("I cluster them at zoom {zoom}")]
fn when_cluster(world: &ClusterWorld, zoom: u8) {
    let places = world.places.borrow();
    world.groups.set(cluster(&places, zoom).len());
}

#[then("{count} group is produced")]
fn then_one_group(world: &ClusterWorld, count: usize) {
    assert_eq!(world.groups.get(), count);
}

#[then("{count} groups are produced")]
fn then_groups(world: &ClusterWorld, count: usize) {
    assert_eq!(world.groups.get(), count);
}

#[scenario(path = "tests/features/clustering.feature", index = 0)]
fn coincident_places_merge(world: ClusterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/clustering.feature", index = 1)]
fn detail_zoom_separates(world: ClusterWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/clustering.feature", index = 2)]
fn distant_places_apart(world: ClusterWorld) {
    let _ = world;
}
