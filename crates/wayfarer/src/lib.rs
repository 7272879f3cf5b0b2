#![forbid(unsafe_code)]

//! `wayfarer` is a headless travel-itinerary map engine.
//!
//! The semantic model (itineraries, selection, config, palettes) lives in
//! `wayfarer-core` and is re-exported here. The geospatial viewport engine —
//! bounds fitting, per-day routes with directional arrows, marker states, and
//! the camera-synchronization state machine — is available under
//! [`view`] with the `view` feature (on by default).
//!
//! # Features
//!
//! - `view`: enable the viewport/route engine (`wayfarer::view`)

pub use wayfarer_core::*;

#[cfg(feature = "view")]
pub mod view {
    pub use wayfarer_view::controller::ViewportController;
    pub use wayfarer_view::mercator::{PixelSize, pixel_size};
    pub use wayfarer_view::model::{
        CameraCommand, CameraSpec, CameraTarget, DayRoute, MarkerLayout, MarkerVariant,
        RouteArrow, SceneLayout,
    };
    pub use wayfarer_view::surface::{MapSurface, TileSource, TileSourceRegistry};
    pub use wayfarer_view::timer::{ManualScheduler, NoopScheduler, SettleScheduler, TimerToken};
    pub use wayfarer_view::{desired_camera, layout_scene};

    use wayfarer_core::{DayPalette, GeoPoint, Itinerary, Selection};

    #[derive(Debug, thiserror::Error)]
    pub enum SessionError {
        #[error(transparent)]
        Model(#[from] wayfarer_core::Error),
        #[error(transparent)]
        View(#[from] wayfarer_view::Error),
    }

    pub type Result<T> = std::result::Result<T, SessionError>;

    /// Convenience wrapper that bundles a [`Planner`](crate::Planner), its
    /// viewport policy, and a tile registry for headless use.
    ///
    /// This is intended for hosts where passing planner/policy/palette per
    /// call is noisy. It stays runtime-agnostic: all work is CPU-bound and
    /// performs no I/O.
    #[derive(Debug, Clone)]
    pub struct MapSession {
        pub planner: crate::Planner,
        pub tiles: TileSourceRegistry,
    }

    impl Default for MapSession {
        fn default() -> Self {
            Self {
                planner: crate::Planner::new(),
                tiles: TileSourceRegistry::default_openstreetmap(),
            }
        }
    }

    impl MapSession {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_site_config(mut self, site_config: crate::MapConfig) -> Self {
            self.planner = self.planner.with_site_config(site_config);
            self
        }

        pub fn with_tiles(mut self, tiles: TileSourceRegistry) -> Self {
            self.tiles = tiles;
            self
        }

        /// Builds a controller wired to this session's policy. The scheduler
        /// is host-provided; use [`NoopScheduler`] when no timer facility
        /// exists.
        pub fn controller<S: SettleScheduler>(&self, scheduler: S) -> ViewportController<S> {
            ViewportController::new(self.planner.policy(), scheduler)
        }

        fn palette(&self, itinerary: &Itinerary) -> DayPalette {
            DayPalette::for_theme(itinerary.visual_theme.as_deref())
        }

        /// Synchronous variant of [`MapSession::scene`].
        pub fn scene_sync(&self, itinerary: &Itinerary, selection: &Selection) -> SceneLayout {
            layout_scene(itinerary, selection, &self.palette(itinerary))
        }

        /// Composes the draw model for the given selection.
        pub async fn scene(&self, itinerary: &Itinerary, selection: &Selection) -> SceneLayout {
            self.scene_sync(itinerary, selection)
        }

        /// Synchronous variant of [`MapSession::camera`].
        pub fn camera_sync(
            &self,
            itinerary: &Itinerary,
            selection: &Selection,
        ) -> Option<CameraSpec> {
            desired_camera(itinerary, selection, &self.planner.policy())
        }

        /// The camera spec implied by the given selection, or `None` when
        /// nothing is visible.
        pub async fn camera(
            &self,
            itinerary: &Itinerary,
            selection: &Selection,
        ) -> Option<CameraSpec> {
            self.camera_sync(itinerary, selection)
        }

        /// Resolves the implied camera to a concrete `(center, zoom)` for a
        /// viewport of the given pixel size.
        pub fn resolved_camera_sync(
            &self,
            itinerary: &Itinerary,
            selection: &Selection,
            viewport_px: PixelSize,
        ) -> Option<(GeoPoint, f64)> {
            let spec = self.camera_sync(itinerary, selection)?;
            Some(wayfarer_view::mercator::resolve(
                &spec,
                viewport_px,
                &self.planner.policy(),
            ))
        }
    }
}

#[cfg(all(test, feature = "view"))]
mod tests {
    use super::view::{MapSession, pixel_size};
    use super::{Activity, DayFilter, DayPlan, GeoPoint, Selection};
    use futures::executor::block_on;

    fn trip() -> crate::Itinerary {
        let day1 = DayPlan {
            day: 1,
            theme: "Classics".to_string(),
            activities: vec![
                Activity {
                    time: "09:00".to_string(),
                    activity_name: "Louvre".to_string(),
                    description: String::new(),
                    location_name: "Louvre".to_string(),
                    coordinates: GeoPoint::raw(48.8606, 2.3376),
                },
                Activity {
                    time: "14:00".to_string(),
                    activity_name: "Eiffel Tower".to_string(),
                    description: String::new(),
                    location_name: "Eiffel Tower".to_string(),
                    coordinates: GeoPoint::raw(48.8584, 2.2945),
                },
            ],
        };
        crate::Itinerary::new("Paris", "One day", vec![day1])
    }

    #[test]
    fn session_scene_and_camera_agree_with_the_view_crate() {
        let session = MapSession::new();
        let itin = trip();
        let selection = Selection::default();

        let scene = block_on(session.scene(&itin, &selection));
        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.routes.len(), 1);

        let spec = block_on(session.camera(&itin, &selection)).unwrap();
        assert_eq!(
            Some(spec),
            super::view::desired_camera(&itin, &selection, &session.planner.policy())
        );
    }

    #[test]
    fn session_resolves_cameras_for_concrete_viewports() {
        let session = MapSession::new();
        let itin = trip();
        let selection = Selection {
            day_filter: DayFilter::Day(1),
            focus: None,
        };
        let (center, zoom) = session
            .resolved_camera_sync(&itin, &selection, pixel_size(800.0, 600.0))
            .unwrap();
        assert!(zoom <= session.planner.policy().overview_max_zoom);
        assert!(center.latitude > 48.0 && center.latitude < 49.0);
    }

    #[test]
    fn session_ships_the_stock_tile_registry() {
        let session = MapSession::new();
        assert!(session.tiles.get("osm").is_some());
    }
}
