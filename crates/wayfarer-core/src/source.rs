//! Collaborator boundaries.
//!
//! The itinerary generator (an LLM-backed service in the host application)
//! and the history/community stores live outside this workspace. These traits
//! pin down the shapes the engine relies on; implementations belong to hosts.

use crate::itinerary::{Itinerary, TripRequest};

/// Failures crossing a collaborator boundary (network, disk, quota). Opaque
/// to the engine, which never inspects them beyond reporting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Produces itineraries from trip parameters.
///
/// Implementations must return every activity with populated coordinates;
/// the engine assumes that invariant and performs no geocoding.
pub trait ItinerarySource {
    fn generate(&self, request: &TripRequest) -> std::result::Result<Itinerary, BoxError>;
}

/// Stores itinerary documents by their opaque id.
pub trait ItineraryStore {
    fn save(&mut self, itinerary: &Itinerary) -> std::result::Result<(), BoxError>;
    fn load(&self, id: &str) -> std::result::Result<Option<Itinerary>, BoxError>;
    fn delete(&mut self, id: &str) -> std::result::Result<(), BoxError>;
    fn list_ids(&self) -> std::result::Result<Vec<String>, BoxError>;
}
