//! Retrieval state machine driven by changing search inputs.
//!
//! [`RetrievalController`] tracks the latest `(location, category, radius)`
//! tuple and the [`RetrievalState`] presentation layers read. Each valid input
//! change issues a [`RetrievalTicket`] stamped with a generation number; a
//! response is applied only when its ticket still carries the current
//! generation. Superseded responses are discarded on arrival rather than
//! cancelled in flight.
//!
//! The controller takes `&mut self` for every transition, so checking a
//! ticket and applying its result cannot interleave with another transition.
//! Share it across threads behind a `Mutex` if responses arrive elsewhere.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use nearby_core::{Resolution, RetrievalController, RetrievalStatus, SearchInputs};
//!
//! let chicago = Coord { x: -87.6298, y: 41.8781 };
//! let mut controller = RetrievalController::new();
//!
//! let parks = controller
//!     .request(SearchInputs::new(Some(chicago), "park", 10.0))
//!     .expect("inputs are complete");
//! let cafes = controller
//!     .request(SearchInputs::new(Some(chicago), "cafe", 10.0))
//!     .expect("inputs are complete");
//!
//! assert_eq!(controller.resolve(parks, Ok(Vec::new())), Resolution::Discarded);
//! assert_eq!(controller.status(), RetrievalStatus::Loading);
//! assert_eq!(controller.resolve(cafes, Ok(Vec::new())), Resolution::Applied);
//! assert_eq!(controller.status(), RetrievalStatus::Ready);
//! ```

use geo::Coord;
use log::{debug, info, warn};

use crate::{AddressResolver, PlaceQueryService, PlaceRecord, PlaceSource, QueryError, locate};

/// The inputs a retrieval is keyed on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchInputs {
    /// Search centre, if one has been chosen.
    pub location: Option<Coord<f64>>,
    /// Category label as entered by the caller.
    pub category: String,
    /// Search radius in miles.
    pub radius_miles: f64,
}

impl SearchInputs {
    /// Bundle a location, category label and radius.
    pub fn new(location: Option<Coord<f64>>, category: impl Into<String>, radius_miles: f64) -> Self {
        Self {
            location,
            category: category.into(),
            radius_miles,
        }
    }

    /// Return the centre when the inputs are complete enough to query.
    ///
    /// Inputs are incomplete without a location, with a blank category, or
    /// with a radius that is not a positive number.
    #[must_use]
    pub fn query_centre(&self) -> Option<Coord<f64>> {
        let radius_ok = self.radius_miles.is_finite() && self.radius_miles > 0.0;
        if self.category.trim().is_empty() || !radius_ok {
            return None;
        }
        self.location
    }
}

/// Lifecycle of the current retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalStatus {
    /// No complete inputs yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The place list reflects the latest inputs.
    Ready,
    /// The latest request failed.
    Failed,
}

/// Snapshot read by presentation layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetrievalState {
    /// Places for the latest inputs, nearest first.
    pub places: Vec<PlaceRecord>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Error from the latest request, if it failed.
    pub error: Option<QueryError>,
}

/// Handle for one issued request.
///
/// Pass it back to [`RetrievalController::resolve`] with the request's result.
#[derive(Debug)]
pub struct RetrievalTicket {
    generation: u64,
    centre: Coord<f64>,
    inputs: SearchInputs,
}

impl RetrievalTicket {
    /// Inputs the request was issued for.
    #[must_use]
    pub const fn inputs(&self) -> &SearchInputs {
        &self.inputs
    }

    /// Run the request against `service`.
    ///
    /// # Errors
    ///
    /// Propagates [`PlaceQueryService::fetch_nearby`] failures.
    pub fn execute<S: PlaceSource>(
        &self,
        service: &PlaceQueryService<S>,
    ) -> Result<Vec<PlaceRecord>, QueryError> {
        service.fetch_nearby(self.centre, &self.inputs.category, self.inputs.radius_miles)
    }
}

/// Outcome of handing a response to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response was current and is now the visible state.
    Applied,
    /// The response belonged to superseded inputs and was dropped.
    Discarded,
}

/// Tracks search inputs and applies only the responses that still match them.
#[derive(Debug, Default)]
pub struct RetrievalController {
    state: RetrievalState,
    status: RetrievalStatus,
    generation: u64,
    current: Option<SearchInputs>,
}

impl RetrievalController {
    /// Create an idle controller with no places.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current presentation state.
    #[must_use]
    pub const fn state(&self) -> &RetrievalState {
        &self.state
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RetrievalStatus {
        self.status
    }

    /// Most recently requested inputs, complete or not.
    #[must_use]
    pub const fn inputs(&self) -> Option<&SearchInputs> {
        self.current.as_ref()
    }

    /// Switch to `inputs`, superseding any request in flight.
    ///
    /// Complete inputs enter [`RetrievalStatus::Loading`], clear the previous
    /// error and return a ticket to execute. Incomplete inputs return to
    /// [`RetrievalStatus::Idle`] with no places and issue nothing.
    pub fn request(&mut self, inputs: SearchInputs) -> Option<RetrievalTicket> {
        self.generation = self.generation.wrapping_add(1);
        let centre = inputs.query_centre();
        self.current = Some(inputs.clone());

        let Some(centre) = centre else {
            debug!("Incomplete search inputs; returning to idle");
            self.status = RetrievalStatus::Idle;
            self.state = RetrievalState::default();
            return None;
        };

        self.status = RetrievalStatus::Loading;
        self.state.loading = true;
        self.state.error = None;
        Some(RetrievalTicket {
            generation: self.generation,
            centre,
            inputs,
        })
    }

    /// Re-issue the latest inputs, e.g. after a failure.
    pub fn retry(&mut self) -> Option<RetrievalTicket> {
        let inputs = self.current.clone()?;
        self.request(inputs)
    }

    /// Move the search to the coordinate `resolver` finds for `address`,
    /// keeping the current category and radius.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoLocation`] and leaves the controller untouched
    /// when the address does not resolve.
    pub fn relocate<R: AddressResolver + ?Sized>(
        &mut self,
        resolver: &R,
        address: &str,
    ) -> Result<Option<RetrievalTicket>, QueryError> {
        let centre = locate(resolver, address)?;
        let mut inputs = self.current.clone().unwrap_or_default();
        inputs.location = Some(centre);
        Ok(self.request(inputs))
    }

    /// Apply `result` if `ticket` is still the latest request.
    ///
    /// A failure clears the place list before recording the error, so
    /// previously loaded places are not kept alongside it.
    pub fn resolve(
        &mut self,
        ticket: RetrievalTicket,
        result: Result<Vec<PlaceRecord>, QueryError>,
    ) -> Resolution {
        if ticket.generation != self.generation {
            warn!(
                "Discarded stale response for {} within {} mi",
                ticket.inputs.category, ticket.inputs.radius_miles
            );
            return Resolution::Discarded;
        }

        self.state.loading = false;
        match result {
            Ok(places) => {
                info!(
                    "Loaded {} {} places within {} mi",
                    places.len(),
                    ticket.inputs.category,
                    ticket.inputs.radius_miles
                );
                self.state.places = places;
                self.state.error = None;
                self.status = RetrievalStatus::Ready;
            }
            Err(err) => {
                warn!("Retrieval failed: {err}");
                self.state.places.clear();
                self.state.error = Some(err);
                self.status = RetrievalStatus::Failed;
            }
        }
        Resolution::Applied
    }

    /// Request, execute and resolve `inputs` in one step.
    pub fn run<S: PlaceSource>(
        &mut self,
        service: &PlaceQueryService<S>,
        inputs: SearchInputs,
    ) -> &RetrievalState {
        if let Some(ticket) = self.request(inputs) {
            let result = ticket.execute(service);
            self.resolve(ticket, result);
        }
        &self.state
    }
}
