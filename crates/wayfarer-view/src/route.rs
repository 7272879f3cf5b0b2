//! Ordered route construction for a single day.

use crate::model::{DayRoute, RouteArrow};
use wayfarer_core::{DayPlan, GeoPoint};

/// Compass-style bearing from `from` toward `to`, in degrees within
/// [0, 360): 0° points north, 90° east. Computed in latitude/longitude space,
/// which is the same approximation the midpoint uses.
pub fn bearing_degrees(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let d_lat = to.latitude - from.latitude;
    let d_lng = to.longitude - from.longitude;
    let deg = d_lng.atan2(d_lat).to_degrees();
    (deg % 360.0 + 360.0) % 360.0
}

/// Builds one day's route: the polyline is the day's routable coordinates in
/// activity order, and each consecutive pair gets an arrow at its midpoint
/// pointing along the direction of travel.
///
/// Fewer than 2 routable points yields an empty polyline and no arrows — a
/// route needs at least 2 points. Malformed coordinates were already excluded
/// by [`DayPlan::routable_points`]; the `{0,0}` sentinel is kept, so a
/// sentinel-only day still produces its (degenerate) segment.
pub fn build_day_route(plan: &DayPlan, color: impl Into<String>) -> DayRoute {
    let points = plan.routable_points();
    if points.len() < 2 {
        return DayRoute {
            day: plan.day,
            color: color.into(),
            polyline: Vec::new(),
            arrows: Vec::new(),
        };
    }

    let arrows = points
        .windows(2)
        .map(|pair| RouteArrow {
            position: pair[0].midpoint(&pair[1]),
            bearing_degrees: bearing_degrees(&pair[0], &pair[1]),
        })
        .collect();

    DayRoute {
        day: plan.day,
        color: color.into(),
        polyline: points,
        arrows,
    }
}
