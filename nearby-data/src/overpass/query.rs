//! Overpass QL rendering for [`NearbyQuery`].

use nearby_core::NearbyQuery;

/// Server-side query timeout, in seconds, sent as `[timeout:N]`.
pub const DEFAULT_SERVER_TIMEOUT_SECS: u32 = 25;

/// Render `query` as Overpass QL.
///
/// Nodes, ways and relations carrying the tag are matched within the radius;
/// `out center` asks the service to attach a centroid to non-node elements.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::{Category, NearbyQuery};
/// use nearby_data::overpass::build_overpass_ql;
///
/// let query = NearbyQuery {
///     tag: Category::Library.query_tag(),
///     centre: Coord { x: -87.6298, y: 41.8781 },
///     radius_metres: 1609.34,
/// };
/// let ql = build_overpass_ql(&query, 25);
/// assert!(ql.starts_with("[out:json][timeout:25];"));
/// assert!(ql.contains(r#"node["amenity"="library"](around:1609.34,41.8781,-87.6298);"#));
/// assert!(ql.ends_with("out center;"));
/// ```
#[must_use]
pub fn build_overpass_ql(query: &NearbyQuery, server_timeout_secs: u32) -> String {
    let filter = format!(
        "[\"{}\"=\"{}\"](around:{},{},{})",
        query.tag.key, query.tag.value, query.radius_metres, query.centre.y, query.centre.x
    );
    format!(
        "[out:json][timeout:{server_timeout_secs}];\n(\n  node{filter};\n  way{filter};\n  relation{filter};\n);\nout center;"
    )
}
