//! Normalised place records and the raw features they are built from.

use geo::Coord;
use log::warn;

use crate::Category;

/// Top two bits encode element type: 00=node, 01=way, 10=relation, 11=positional
/// fallback. Remaining 62 bits carry the raw ID or response index.
const WAY_ID_PREFIX: u64 = 1 << 62;
const REL_ID_PREFIX: u64 = 1 << 63;
const POSITIONAL_ID_PREFIX: u64 = WAY_ID_PREFIX | REL_ID_PREFIX;
const TYPE_ID_MASK: u64 = (1 << 62) - 1;

/// A nearby place returned to callers.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::{Category, PlaceRecord};
///
/// let place = PlaceRecord {
///     id: 7,
///     position: Coord { x: -87.65, y: 41.90 },
///     label: PlaceRecord::unnamed_label(Category::Park),
///     category: Category::Park,
///     distance_miles: 1.8,
/// };
/// assert_eq!(place.label, "park (Unnamed)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceRecord {
    /// Identifier, unique within one result set.
    pub id: u64,
    /// Representative position of the place.
    pub position: Coord<f64>,
    /// Human-readable name.
    pub label: String,
    /// Category the place was searched under.
    pub category: Category,
    /// Great-circle distance from the search centre.
    pub distance_miles: f64,
}

impl PlaceRecord {
    /// Label used when a feature carries no name.
    #[must_use]
    pub fn unnamed_label(category: Category) -> String {
        format!("{category} (Unnamed)")
    }
}

/// OpenStreetMap element type of a raw feature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A single point.
    Node,
    /// A line or closed area.
    Way,
    /// A multipolygon or other grouped element.
    Relation,
}

/// A feature as returned by a [`crate::PlaceSource`], before normalisation.
///
/// Points carry `point`; ways and relations carry a `centre` standing in for
/// their vertex list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFeature {
    /// Element type, when the source reports one.
    pub kind: Option<ElementKind>,
    /// Source identifier, when present.
    pub id: Option<i64>,
    /// Point coordinate for nodes.
    pub point: Option<Coord<f64>>,
    /// Centroid for ways and relations.
    pub centre: Option<Coord<f64>>,
    /// Value of the `name` tag.
    pub name: Option<String>,
}

impl RawFeature {
    /// Return the single coordinate representing this feature.
    ///
    /// Prefers the point coordinate and falls back to the centre. Non-finite
    /// coordinates count as absent.
    #[must_use]
    pub fn representative_coord(&self) -> Option<Coord<f64>> {
        self.point
            .or(self.centre)
            .filter(|coord| coord.x.is_finite() && coord.y.is_finite())
    }

    /// Return a place identifier for this feature.
    ///
    /// Present ids are tagged with the element kind so nodes, ways and
    /// relations sharing a raw id stay distinct. Missing or unrepresentable ids
    /// fall back to `index`, the feature's position in the raw response, under
    /// a prefix of its own so it never matches a source id.
    #[must_use]
    pub fn place_id(&self, index: usize) -> u64 {
        let position = u64::try_from(index).map_or(TYPE_ID_MASK, |i| i.min(TYPE_ID_MASK));
        let fallback = POSITIONAL_ID_PREFIX | position;
        self.id
            .and_then(|raw_id| encode_element_id(self.kind.unwrap_or(ElementKind::Node), raw_id))
            .unwrap_or(fallback)
    }
}

fn encode_element_id(kind: ElementKind, raw_id: i64) -> Option<u64> {
    match u64::try_from(raw_id) {
        Ok(base) => {
            if base > TYPE_ID_MASK {
                warn!(
                    "Falling back to positional id: kind={:?}, raw_id={} (exceeds supported maximum {})",
                    kind, raw_id, TYPE_ID_MASK
                );
                return None;
            }
            let prefix = match kind {
                ElementKind::Node => 0,
                ElementKind::Way => WAY_ID_PREFIX,
                ElementKind::Relation => REL_ID_PREFIX,
            };
            Some(prefix | base)
        }
        Err(_) => {
            warn!(
                "Falling back to positional id: kind={:?}, raw_id={} (negative identifiers are unsupported)",
                kind, raw_id
            );
            None
        }
    }
}
