//! Test helpers for search CLI scenarios.

use super::*;
use crate::search::{PlaceSourceBuilder, SearchConfig};
use nearby_core::{ElementKind, PlaceSource, RawFeature};
use nearby_data::overpass::test_support::StubPlaceSource;
use std::cell::RefCell;
use std::rc::Rc;

/// Builder handing out a shared [`StubPlaceSource`] and recording the
/// configuration it was asked to build for.
#[derive(Debug, Clone)]
pub(super) struct StubSourceBuilder {
    source: Rc<StubPlaceSource>,
    seen: Rc<RefCell<Option<SearchConfig>>>,
}

impl StubSourceBuilder {
    pub(super) fn new(source: StubPlaceSource) -> Self {
        Self {
            source: Rc::new(source),
            seen: Rc::new(RefCell::new(None)),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.source.calls()
    }

    pub(super) fn seen_config(&self) -> Option<SearchConfig> {
        self.seen.borrow().clone()
    }
}

struct SharedSource(Rc<StubPlaceSource>);

impl PlaceSource for SharedSource {
    fn fetch_features(
        &self,
        query: &nearby_core::NearbyQuery,
    ) -> Result<Vec<RawFeature>, nearby_core::QueryError> {
        self.0.fetch_features(query)
    }
}

impl PlaceSourceBuilder for StubSourceBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn PlaceSource>, CliError> {
        self.seen.replace(Some(config.clone()));
        Ok(Box::new(SharedSource(Rc::clone(&self.source))))
    }
}

/// Three cafes around downtown Chicago, listed furthest first.
pub(super) fn downtown_cafes() -> Vec<RawFeature> {
    vec![
        RawFeature {
            kind: Some(ElementKind::Way),
            id: Some(300),
            centre: Some(geo::Coord {
                x: -87.6500,
                y: 41.9300,
            }),
            ..RawFeature::default()
        },
        RawFeature {
            kind: Some(ElementKind::Node),
            id: Some(100),
            point: Some(geo::Coord {
                x: -87.6300,
                y: 41.8790,
            }),
            name: Some("Corner Cafe".into()),
            ..RawFeature::default()
        },
        RawFeature {
            kind: Some(ElementKind::Node),
            id: Some(200),
            point: Some(geo::Coord {
                x: -87.6305,
                y: 41.8795,
            }),
            name: Some("Loop Espresso".into()),
            ..RawFeature::default()
        },
    ]
}

/// Decode command output as JSON.
pub(super) fn output_json(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("output should be JSON")
}
