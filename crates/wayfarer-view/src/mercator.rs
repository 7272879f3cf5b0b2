//! Web-mercator camera resolution.
//!
//! Surfaces that only accept `(center, zoom)` commands need `Fit` specs
//! resolved against a concrete viewport size. The projection is the standard
//! slippy-map spherical mercator (256 px world at zoom 0).

use crate::model::CameraSpec;
use wayfarer_core::{GeoPoint, ViewportPolicy};

pub type Unit = euclid::UnknownUnit;

pub type PixelPoint = euclid::Point2D<f64, Unit>;
pub type PixelSize = euclid::Size2D<f64, Unit>;

pub fn pixel_size(width: f64, height: f64) -> PixelSize {
    euclid::size2(width, height)
}

const TILE_SIZE: f64 = 256.0;
/// Mercator singularity cutoff; latitudes beyond this are clamped.
const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Projects a coordinate into world pixel space at the given zoom.
pub fn project(point: &GeoPoint, zoom: f64) -> PixelPoint {
    let scale = TILE_SIZE * 2.0_f64.powf(zoom);
    let lat = point.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin_lat = lat.to_radians().sin();

    let x = (point.longitude + 180.0) / 360.0;
    let y = 0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * std::f64::consts::PI);
    euclid::point2(x * scale, y * scale)
}

/// Resolves a camera spec into a concrete `(center, zoom)` for a viewport.
///
/// `Fit` resolution scans integer zoom levels upward and keeps the largest
/// one whose projected bounds still fit inside the padded viewport, then
/// clamps into `[policy.min_zoom, max_zoom]`. The scan is deterministic and
/// depends only on the spec, the viewport size, and the policy.
pub fn resolve(spec: &CameraSpec, viewport_px: PixelSize, policy: &ViewportPolicy) -> (GeoPoint, f64) {
    match spec {
        CameraSpec::Center { center, zoom } => (*center, *zoom),
        CameraSpec::Fit {
            bounds,
            padding_px,
            max_zoom,
        } => {
            let usable = pixel_size(
                (viewport_px.width - 2.0 * padding_px).max(1.0),
                (viewport_px.height - 2.0 * padding_px).max(1.0),
            );

            let nw = GeoPoint::raw(bounds.max_latitude, bounds.min_longitude);
            let se = GeoPoint::raw(bounds.min_latitude, bounds.max_longitude);

            let mut best = policy.min_zoom.floor();
            let ceiling = max_zoom.floor() as i64;
            for z in (policy.min_zoom.floor() as i64)..=ceiling {
                let zoom = z as f64;
                let a = project(&nw, zoom);
                let b = project(&se, zoom);
                let w = (b.x - a.x).abs();
                let h = (b.y - a.y).abs();
                if w <= usable.width && h <= usable.height {
                    best = zoom;
                } else {
                    break;
                }
            }

            (bounds.center(), best.min(*max_zoom).max(policy.min_zoom))
        }
    }
}
