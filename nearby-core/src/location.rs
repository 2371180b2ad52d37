//! Port for the external address resolution service.
//!
//! Geocoding itself lives outside this crate. The core only needs a source of
//! coordinates: an empty answer or a failure means "do not move".

use geo::Coord;
use log::warn;

use crate::{QueryError, lat_lon};

/// Error type returned by [`AddressResolver`] implementations.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// Resolve free-text addresses to a single best-match coordinate.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use nearby_core::{AddressResolver, ResolverError, locate};
///
/// struct Fixed;
///
/// impl AddressResolver for Fixed {
///     fn resolve_address(&self, _address: &str) -> Result<Option<Coord<f64>>, ResolverError> {
///         Ok(Some(Coord { x: -87.6298, y: 41.8781 }))
///     }
/// }
///
/// let centre = locate(&Fixed, "Chicago")?;
/// assert_eq!(centre.y, 41.8781);
/// # Ok::<(), nearby_core::QueryError>(())
/// ```
pub trait AddressResolver {
    /// Return the best match for `address`, or `None` when nothing matched.
    fn resolve_address(&self, address: &str) -> Result<Option<Coord<f64>>, ResolverError>;
}

/// Resolve `address`, folding empty answers, failures and out-of-range
/// coordinates into [`QueryError::NoLocation`].
///
/// # Errors
///
/// Returns [`QueryError::NoLocation`] when no usable coordinate was produced.
pub fn locate<R: AddressResolver + ?Sized>(
    resolver: &R,
    address: &str,
) -> Result<Coord<f64>, QueryError> {
    let no_location = || QueryError::NoLocation {
        address: address.to_owned(),
    };
    if address.trim().is_empty() {
        return Err(no_location());
    }
    match resolver.resolve_address(address) {
        Ok(Some(coord)) => lat_lon(coord.y, coord.x).map_err(|err| {
            warn!("Ignoring resolved location for '{address}': {err}");
            no_location()
        }),
        Ok(None) => Err(no_location()),
        Err(err) => {
            warn!("Address resolution failed for '{address}': {err}");
            Err(no_location())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    enum Answer {
        Found(Coord<f64>),
        Nothing,
        Failure,
    }

    impl AddressResolver for Answer {
        fn resolve_address(&self, _address: &str) -> Result<Option<Coord<f64>>, ResolverError> {
            match self {
                Self::Found(coord) => Ok(Some(*coord)),
                Self::Nothing => Ok(None),
                Self::Failure => Err("service unavailable".into()),
            }
        }
    }

    #[rstest]
    fn found_coordinates_are_returned() {
        let coord = Coord { x: 2.35, y: 48.85 };
        assert_eq!(locate(&Answer::Found(coord), "Paris"), Ok(coord));
    }

    #[rstest]
    #[case(Answer::Nothing, "Atlantis")]
    #[case(Answer::Failure, "Paris")]
    #[case(Answer::Found(Coord { x: 0.0, y: 120.0 }), "Nowhere")]
    #[case(Answer::Found(Coord { x: 0.0, y: 0.0 }), "  ")]
    fn unusable_answers_are_no_location(#[case] resolver: Answer, #[case] address: &str) {
        let err = locate(&resolver, address).expect_err("no usable location");
        assert_eq!(
            err,
            QueryError::NoLocation {
                address: address.to_owned()
            }
        );
    }
}
