use serde::{Deserialize, Serialize};
use wayfarer_core::{GeoBounds, GeoPoint};

/// What the camera should show, independent of the surface's actual state.
///
/// `Fit` leaves the final center/zoom resolution to the consumer (surfaces
/// accept bounds-with-padding commands directly; `mercator::resolve` turns a
/// `Fit` into a concrete center/zoom when the viewport size is known).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum CameraSpec {
    Center {
        center: GeoPoint,
        zoom: f64,
    },
    Fit {
        bounds: GeoBounds,
        padding_px: f64,
        max_zoom: f64,
    },
}

/// A camera instruction for the surface. `generation` changes force surfaces
/// to re-apply even when the spec is value-equal to the previous one (used
/// after remounts and explicit view resets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraCommand {
    pub spec: CameraSpec,
    pub generation: u64,
}

/// The set of points the camera is asked to frame. Non-empty by construction:
/// fitting an empty set is a caller-contract violation, so it is made
/// unrepresentable here instead of being a runtime error.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTarget(TargetRepr);

#[derive(Debug, Clone, PartialEq)]
enum TargetRepr {
    Single(GeoPoint),
    Points(Vec<GeoPoint>),
}

impl CameraTarget {
    pub fn single(point: GeoPoint) -> Self {
        Self(TargetRepr::Single(point))
    }

    /// `None` for an empty slice.
    pub fn points(points: Vec<GeoPoint>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(TargetRepr::Points(points)))
        }
    }

    pub fn as_points(&self) -> &[GeoPoint] {
        match &self.0 {
            TargetRepr::Single(p) => std::slice::from_ref(p),
            TargetRepr::Points(pts) => pts,
        }
    }

    pub(crate) fn is_single(&self) -> bool {
        matches!(&self.0, TargetRepr::Single(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerVariant {
    Normal,
    Focused,
}

/// Visual state of one marker, resolved against the current focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerState {
    pub variant: MarkerVariant,
    pub z_priority: i32,
}

/// One marker draw instruction, keyed by day and activity index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLayout {
    pub day: u32,
    pub activity_index: usize,
    pub activity_name: String,
    pub time: String,
    pub position: GeoPoint,
    pub variant: MarkerVariant,
    pub z_priority: i32,
    pub color: String,
}

/// Directional arrow over a route segment: placed at the segment midpoint,
/// rotated to point from the earlier activity toward the later one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteArrow {
    pub position: GeoPoint,
    pub bearing_degrees: f64,
}

/// One day's route: the ordered polyline plus its arrows. Routes of different
/// days are never connected, even when several days are visible at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRoute {
    pub day: u32,
    pub color: String,
    pub polyline: Vec<GeoPoint>,
    pub arrows: Vec<RouteArrow>,
}

/// Everything the surface needs to draw for the current (itinerary, filter,
/// focus) triple.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    pub markers: Vec<MarkerLayout>,
    pub routes: Vec<DayRoute>,
}
