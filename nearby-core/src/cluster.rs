//! Zoom-dependent proximity clustering of place markers.
//!
//! At zoom levels below [`DETAIL_ZOOM`] nearby places are merged into groups
//! so the map stays readable. Grouping is greedy and order-dependent:
//!
//! - places are visited in input order;
//! - a place joins the first group whose centre lies within the merge radius
//!   on both the latitude and longitude axes independently;
//! - otherwise it starts a new group centred on its own position.
//!
//! A group's centre stays at its first member's position, so identical input
//! always produces identical groups.

use geo::Coord;

use crate::PlaceRecord;

/// Zoom level from which every place is shown as its own marker.
pub const DETAIL_ZOOM: u8 = 13;

/// Merge radius, in degrees, for zoom levels missing from the table.
pub const DEFAULT_MERGE_RADIUS_DEGREES: f64 = 0.02;

const MERGE_RADIUS_TABLE: [(u8, f64); 9] = [
    (7, 0.1),
    (8, 0.075),
    (9, 0.05),
    (10, 0.035),
    (11, 0.025),
    (12, 0.015),
    (13, 0.005),
    (14, 0.003),
    (15, 0.0015),
];

/// Places merged for display around a fixed centre.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterGroup<'a> {
    /// Position of the first place assigned to the group.
    pub centre: Coord<f64>,
    /// Members in the order they joined; never empty.
    pub members: Vec<&'a PlaceRecord>,
}

impl ClusterGroup<'_> {
    /// Number of places in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; groups are created with their first member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Return `true` when the group holds a single place.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// Return the merge radius in degrees for `zoom`.
///
/// # Examples
/// ```
/// use nearby_core::merge_radius_degrees;
///
/// assert_eq!(merge_radius_degrees(10), 0.035);
/// assert_eq!(merge_radius_degrees(3), 0.02);
/// ```
#[must_use]
pub fn merge_radius_degrees(zoom: u8) -> f64 {
    MERGE_RADIUS_TABLE
        .iter()
        .find(|(level, _)| *level == zoom)
        .map_or(DEFAULT_MERGE_RADIUS_DEGREES, |(_, radius)| *radius)
}

/// Partition `places` into display groups for `zoom`.
///
/// At or above [`DETAIL_ZOOM`] every place becomes a singleton group. Groups
/// appear in the order they were created.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::{Category, PlaceRecord, cluster};
///
/// let place = |id, x, y| PlaceRecord {
///     id,
///     position: Coord { x, y },
///     label: format!("cafe {id}"),
///     category: Category::Cafe,
///     distance_miles: 0.0,
/// };
/// let places = [place(1, 0.0, 0.0), place(2, 0.01, 0.01), place(3, 5.0, 5.0)];
///
/// let groups = cluster(&places, 10);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].len(), 2);
/// assert_eq!(cluster(&places, 13).len(), 3);
/// ```
#[must_use]
pub fn cluster(places: &[PlaceRecord], zoom: u8) -> Vec<ClusterGroup<'_>> {
    if zoom >= DETAIL_ZOOM {
        return places
            .iter()
            .map(|place| ClusterGroup {
                centre: place.position,
                members: vec![place],
            })
            .collect();
    }

    let radius = merge_radius_degrees(zoom);
    let mut groups: Vec<ClusterGroup<'_>> = Vec::new();
    for place in places {
        let position = place.position;
        match groups
            .iter_mut()
            .find(|group| within_radius(group.centre, position, radius))
        {
            Some(group) => group.members.push(place),
            None => groups.push(ClusterGroup {
                centre: position,
                members: vec![place],
            }),
        }
    }
    groups
}

fn within_radius(centre: Coord<f64>, position: Coord<f64>, radius: f64) -> bool {
    (centre.y - position.y).abs() <= radius && (centre.x - position.x).abs() <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use rstest::rstest;

    fn place(id: u64, lat: f64, lon: f64) -> PlaceRecord {
        PlaceRecord {
            id,
            position: Coord { x: lon, y: lat },
            label: format!("park {id}"),
            category: Category::Park,
            distance_miles: 0.0,
        }
    }

    fn ids(group: &ClusterGroup<'_>) -> Vec<u64> {
        group.members.iter().map(|p| p.id).collect()
    }

    #[rstest]
    #[case(7, 0.1)]
    #[case(8, 0.075)]
    #[case(9, 0.05)]
    #[case(10, 0.035)]
    #[case(11, 0.025)]
    #[case(12, 0.015)]
    #[case(13, 0.005)]
    #[case(14, 0.003)]
    #[case(15, 0.0015)]
    #[case(0, 0.02)]
    #[case(6, 0.02)]
    #[case(18, 0.02)]
    fn merge_radius_follows_table(#[case] zoom: u8, #[case] expected: f64) {
        assert!((merge_radius_degrees(zoom) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    #[case(13)]
    fn empty_input_has_no_groups(#[case] zoom: u8) {
        assert!(cluster(&[], zoom).is_empty());
    }

    #[rstest]
    #[case(7)]
    #[case(15)]
    fn single_place_is_a_singleton(#[case] zoom: u8) {
        let places = [place(1, 41.9, -87.6)];
        let groups = cluster(&places, zoom);
        assert_eq!(groups.len(), 1);
        assert!(groups.iter().all(ClusterGroup::is_singleton));
    }

    #[rstest]
    fn detail_zoom_never_merges() {
        let places = [place(1, 41.9, -87.6), place(2, 41.9, -87.6), place(3, 41.9001, -87.6)];
        let groups = cluster(&places, DETAIL_ZOOM);
        assert_eq!(groups.len(), places.len());
        assert!(groups.iter().all(ClusterGroup::is_singleton));
    }

    #[rstest]
    fn same_position_merges_at_zoom_ten() {
        let places = [place(1, 41.9, -87.6), place(2, 41.9, -87.6)];
        let groups = cluster(&places, 10);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.first().map(ids), Some(vec![1, 2]));
    }

    #[rstest]
    #[case(7)]
    #[case(10)]
    #[case(12)]
    #[case(13)]
    fn distant_places_stay_apart(#[case] zoom: u8) {
        let places = [place(1, 40.0, -87.0), place(2, 45.0, -82.0)];
        let groups = cluster(&places, zoom);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(ClusterGroup::is_singleton));
    }

    #[rstest]
    fn thresholds_apply_per_axis() {
        // Diagonal offset is ~0.042 degrees, beyond a 0.035 circle but inside
        // the square window at zoom 10.
        let places = [place(1, 0.0, 0.0), place(2, 0.03, 0.03)];
        assert_eq!(cluster(&places, 10).len(), 1);

        let off_axis = [place(1, 0.0, 0.0), place(2, 0.0, 0.04)];
        assert_eq!(cluster(&off_axis, 10).len(), 2);
    }

    #[rstest]
    fn centre_stays_on_first_member() {
        // Place 3 is within range of place 2 but not of the fixed centre.
        let places = [place(1, 0.0, 0.0), place(2, 0.03, 0.0), place(3, 0.06, 0.0)];
        let groups = cluster(&places, 10);

        assert_eq!(groups.len(), 2);
        let first = groups.first().expect("first group");
        assert_eq!(first.centre, Coord { x: 0.0, y: 0.0 });
        assert_eq!(ids(first), vec![1, 2]);
        let second = groups.get(1).expect("second group");
        assert_eq!(second.centre, Coord { x: 0.0, y: 0.06 });
        assert_eq!(ids(second), vec![3]);
    }

    #[rstest]
    fn joins_first_matching_group_in_creation_order() {
        let places = [place(1, 0.0, 0.0), place(2, 0.0, 0.05), place(3, 0.0, 0.025)];
        let groups = cluster(&places, 10);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.first().map(ids), Some(vec![1, 3]));
        assert_eq!(groups.get(1).map(ids), Some(vec![2]));
    }
}
