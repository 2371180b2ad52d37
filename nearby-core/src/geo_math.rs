//! Great-circle distance helpers.
//!
//! Coordinates are WGS84 [`Coord`] values with `x = longitude` and
//! `y = latitude`. All helpers are pure and never fail once a coordinate has
//! been validated.

use geo::Coord;
use thiserror::Error;

/// Mean radius of the Earth in miles used by [`distance_miles`].
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Metres per statute mile for outbound query radii.
pub const METRES_PER_MILE: f64 = 1609.34;

/// Errors returned by [`lat_lon`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Build a validated coordinate from latitude and longitude in degrees.
///
/// # Examples
/// ```
/// use nearby_core::lat_lon;
///
/// let chicago = lat_lon(41.8781, -87.6298)?;
/// assert_eq!(chicago.y, 41.8781);
/// assert_eq!(chicago.x, -87.6298);
/// assert!(lat_lon(91.0, 0.0).is_err());
/// # Ok::<(), nearby_core::CoordinateError>(())
/// ```
pub fn lat_lon(latitude: f64, longitude: f64) -> Result<Coord<f64>, CoordinateError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoordinateError::Latitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoordinateError::Longitude(longitude));
    }
    Ok(Coord {
        x: longitude,
        y: latitude,
    })
}

/// Haversine distance between two coordinates in miles.
///
/// The result is symmetric and zero for identical inputs.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearby_core::distance_miles;
///
/// let a = Coord { x: -87.6298, y: 41.8781 };
/// let b = Coord { x: -87.65, y: 41.90 };
/// let d = distance_miles(a, b);
/// assert!((d - 1.8).abs() < 0.1);
/// assert_eq!(distance_miles(a, a), 0.0);
/// ```
#[must_use]
pub fn distance_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let raw = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push the haversine fractionally above one for antipodal points.
    let h = raw.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Convert a radius in miles to metres.
#[must_use]
pub fn miles_to_metres(miles: f64) -> f64 {
    miles * METRES_PER_MILE
}
