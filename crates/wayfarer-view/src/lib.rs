#![forbid(unsafe_code)]

//! Viewport synchronization and route rendering for wayfarer itineraries.
//!
//! The pure pieces — bounds fitting, route building, marker resolution and
//! scene composition — are plain functions over the semantic model. The
//! stateful piece is [`ViewportController`], which owns the desired camera
//! and keeps an external [`MapSurface`] synchronized as the itinerary, day
//! filter, focus, and viewport size change.

pub mod bounds;
pub mod controller;
pub mod marker;
pub mod mercator;
pub mod model;
pub mod route;
pub mod scene;
pub mod surface;
pub mod timer;

pub use controller::ViewportController;
pub use model::{
    CameraCommand, CameraSpec, CameraTarget, DayRoute, MarkerLayout, MarkerState, MarkerVariant,
    RouteArrow, SceneLayout,
};
pub use scene::{desired_camera, layout_scene};
pub use surface::{MapSurface, TileSource, TileSourceRegistry};
pub use timer::{ManualScheduler, NoopScheduler, SettleScheduler, TimerToken};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rendering surface is not mounted")]
    SurfaceNotMounted,
    #[error("invalid tile template for {key}: {message}")]
    InvalidTileTemplate { key: String, message: String },
    #[error(transparent)]
    Model(#[from] wayfarer_core::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
