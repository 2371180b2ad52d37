//! Overpass API JSON response types.
//!
//! Only the fields the place pipeline reads are decoded. Element coordinates
//! sit in `lat`/`lon` for nodes and in `center` for ways and relations when
//! the query ends with `out center;`.
//!
//! See: <https://wiki.openstreetmap.org/wiki/Overpass_API/Output_Formats#JSON>

use std::collections::BTreeMap;

use geo::Coord;
use nearby_core::{ElementKind, RawFeature};
use serde::Deserialize;

/// Top-level Overpass response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements in service order.
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    /// Runtime notice, e.g. a server-side timeout that truncated the result.
    pub remark: Option<String>,
}

/// A single node, way or relation.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    /// Element type: `"node"`, `"way"` or `"relation"`.
    #[serde(rename = "type")]
    pub element_type: String,
    /// OpenStreetMap identifier within the element type.
    pub id: Option<i64>,
    /// Node latitude.
    pub lat: Option<f64>,
    /// Node longitude.
    pub lon: Option<f64>,
    /// Centroid for ways and relations.
    pub center: Option<OverpassCenter>,
    /// Element tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Centroid emitted by `out center`.
#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    /// Centroid latitude.
    pub lat: f64,
    /// Centroid longitude.
    pub lon: f64,
}

impl OverpassResponse {
    /// Map every element into a [`RawFeature`], preserving order.
    #[must_use]
    pub fn into_features(self) -> Vec<RawFeature> {
        self.elements
            .into_iter()
            .map(OverpassElement::into_feature)
            .collect()
    }
}

impl OverpassElement {
    fn into_feature(mut self) -> RawFeature {
        let kind = match self.element_type.as_str() {
            "node" => Some(ElementKind::Node),
            "way" => Some(ElementKind::Way),
            "relation" => Some(ElementKind::Relation),
            _ => None,
        };
        let point = match (self.lat, self.lon) {
            (Some(y), Some(x)) => Some(Coord { x, y }),
            _ => None,
        };
        RawFeature {
            kind,
            id: self.id,
            point,
            centre: self.center.map(|c| Coord { x: c.lon, y: c.lat }),
            name: self.tags.remove("name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode(json: &str) -> OverpassResponse {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[rstest]
    fn node_uses_lat_lon_and_name() {
        let response = decode(
            r#"{"elements": [
                {"type": "node", "id": 42, "lat": 41.88, "lon": -87.62,
                 "tags": {"leisure": "park", "name": "Grant Park"}}
            ]}"#,
        );

        let features = response.into_features();

        assert_eq!(
            features,
            vec![RawFeature {
                kind: Some(ElementKind::Node),
                id: Some(42),
                point: Some(Coord { x: -87.62, y: 41.88 }),
                centre: None,
                name: Some("Grant Park".into()),
            }]
        );
    }

    #[rstest]
    fn way_uses_center() {
        let response = decode(
            r#"{"elements": [
                {"type": "way", "id": 7, "center": {"lat": 41.9, "lon": -87.65}}
            ]}"#,
        );

        let features = response.into_features();
        let feature = features.first().expect("one feature");

        assert_eq!(feature.kind, Some(ElementKind::Way));
        assert_eq!(feature.point, None);
        assert_eq!(feature.centre, Some(Coord { x: -87.65, y: 41.9 }));
        assert_eq!(feature.name, None);
    }

    #[rstest]
    fn element_without_coordinates_is_kept_for_the_pipeline() {
        let response = decode(r#"{"elements": [{"type": "relation", "id": 3}]}"#);

        let features = response.into_features();

        assert_eq!(features.len(), 1);
        assert_eq!(features.first().and_then(RawFeature::representative_coord), None);
    }

    #[rstest]
    fn unknown_type_and_missing_id_are_tolerated() {
        let response = decode(r#"{"elements": [{"type": "area", "lat": 1.0, "lon": 2.0}]}"#);

        let features = response.into_features();
        let feature = features.first().expect("one feature");

        assert_eq!(feature.kind, None);
        assert_eq!(feature.id, None);
    }

    #[rstest]
    fn missing_elements_is_empty_with_remark() {
        let response = decode(r#"{"remark": "runtime error: Query timed out"}"#);

        assert_eq!(response.remark.as_deref(), Some("runtime error: Query timed out"));
        assert!(response.into_features().is_empty());
    }
}
