#![forbid(unsafe_code)]

//! Itinerary semantic model (headless).
//!
//! Design goals:
//! - deterministic, testable outputs (fixed-clock hooks, value-type model)
//! - copy-on-write edits: a displayed itinerary is never patched in place
//! - runtime-agnostic APIs (no specific executor required)

pub mod config;
pub mod error;
pub mod geo;
pub mod itinerary;
mod runtime;
pub mod selection;
pub mod source;
pub mod theme;
pub mod time;

pub use config::{MapConfig, ViewportPolicy};
pub use error::{Error, Result};
pub use geo::{GeoBounds, GeoPoint};
pub use itinerary::{
    Activity, ActivityKey, DayPlan, Itinerary, TripRequest, ValidationIssue, validate_itinerary,
};
pub use selection::{DayFilter, Selection};
pub use theme::DayPalette;

/// Entry point owning site-wide configuration and the deterministic-clock
/// override. Cheap to clone; hosts typically keep one per UI session.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    site_config: MapConfig,
    fixed_now_utc: Option<chrono::DateTime<chrono::Utc>>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges host overrides onto the current site config.
    pub fn with_site_config(mut self, site_config: MapConfig) -> Self {
        self.site_config.deep_merge(site_config.as_value());
        self
    }

    /// Overrides the clock used to stamp `created_at` on new itineraries.
    ///
    /// This exists primarily to make fixture snapshots deterministic. By
    /// default the system clock is used.
    pub fn with_fixed_now_utc(mut self, now: Option<chrono::DateTime<chrono::Utc>>) -> Self {
        self.fixed_now_utc = now;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.site_config
    }

    pub fn policy(&self) -> ViewportPolicy {
        ViewportPolicy::from_config(&self.site_config)
    }

    /// Palette for an itinerary's visual theme under this planner's config.
    pub fn palette(&self, itinerary: &Itinerary) -> DayPalette {
        DayPalette::for_theme(itinerary.visual_theme.as_deref())
    }

    /// Builds a new itinerary under the active clock override.
    pub fn new_itinerary(
        &self,
        trip_title: impl Into<String>,
        summary: impl Into<String>,
        days: Vec<DayPlan>,
    ) -> Itinerary {
        let itinerary = runtime::with_fixed_now_utc(self.fixed_now_utc, || {
            Itinerary::new(trip_title, summary, days)
        });
        tracing::debug!(id = %itinerary.id, days = itinerary.days.len(), "new itinerary");
        itinerary
    }

    /// Synchronous variant of [`Planner::parse_itinerary`].
    pub fn parse_itinerary_sync(&self, json: &str) -> Result<Itinerary> {
        let itinerary: Itinerary = serde_json::from_str(json)?;
        Ok(itinerary)
    }

    /// Deserializes an itinerary document.
    ///
    /// The work is CPU-bound; the async form exists so async hosts can await
    /// it without caring which executor drives it.
    pub async fn parse_itinerary(&self, json: &str) -> Result<Itinerary> {
        self.parse_itinerary_sync(json)
    }

    pub fn validate(&self, itinerary: &Itinerary) -> Vec<ValidationIssue> {
        validate_itinerary(itinerary)
    }
}
