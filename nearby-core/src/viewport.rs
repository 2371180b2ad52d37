//! Initial map framing for a search.

use geo::{Coord, Rect};

use crate::PlaceRecord;

/// How a map should frame a search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Fit the map to the bounds of the returned places.
    Fit(Rect<f64>),
    /// Centre on the search location at a zoom suited to the radius.
    Centre {
        /// Search location.
        centre: Coord<f64>,
        /// Map zoom level.
        zoom: u8,
    },
}

/// Pick a zoom level that shows roughly `radius_miles` around the centre.
///
/// # Examples
/// ```
/// use nearby_core::zoom_for_radius;
///
/// assert_eq!(zoom_for_radius(1.0), 13);
/// assert_eq!(zoom_for_radius(10.0), 9);
/// assert_eq!(zoom_for_radius(50.0), 7);
/// ```
#[must_use]
pub fn zoom_for_radius(radius_miles: f64) -> u8 {
    const STEPS: [(f64, u8); 6] = [
        (1.0, 13),
        (2.0, 12),
        (4.0, 11),
        (8.0, 10),
        (16.0, 9),
        (32.0, 8),
    ];
    STEPS
        .iter()
        .find(|(limit, _)| radius_miles <= *limit)
        .map_or(7, |(_, zoom)| *zoom)
}

/// Return the smallest rectangle containing every place position.
#[must_use]
pub fn bounds(places: &[PlaceRecord]) -> Option<Rect<f64>> {
    let mut positions = places.iter().map(|place| place.position);
    let first = positions.next()?;
    let (min, max) = positions.fold((first, first), |(min, max), p| {
        (
            Coord {
                x: min.x.min(p.x),
                y: min.y.min(p.y),
            },
            Coord {
                x: max.x.max(p.x),
                y: max.y.max(p.y),
            },
        )
    });
    Some(Rect::new(min, max))
}

/// Frame a search: fit the places when there are any, otherwise centre on
/// the search location.
#[must_use]
pub fn initial_viewport(centre: Coord<f64>, places: &[PlaceRecord], radius_miles: f64) -> Viewport {
    bounds(places).map_or_else(
        || Viewport::Centre {
            centre,
            zoom: zoom_for_radius(radius_miles),
        },
        Viewport::Fit,
    )
}
