//! Camera fitting over point sets.

use crate::model::{CameraSpec, CameraTarget};
use wayfarer_core::{GeoBounds, ViewportPolicy};

/// Computes the camera spec framing `target`.
///
/// A single point (or a set that collapses to one) becomes a centered camera
/// at the detail zoom: focusing one place should feel like "zoom in here",
/// not "fit a zero-size box". Multi-point sets become a padded bounds fit
/// capped at the overview zoom. Deterministic: the result depends only on the
/// point set (as a set) and the policy, never on prior camera state.
pub fn fit(target: &CameraTarget, policy: &ViewportPolicy) -> CameraSpec {
    let points = target.as_points();

    if target.is_single() || points.len() == 1 {
        return CameraSpec::Center {
            center: points[0],
            zoom: policy.detail_zoom,
        };
    }

    // Non-empty by CameraTarget construction.
    let Some(bounds) = GeoBounds::from_points(points.iter().copied()) else {
        return CameraSpec::Center {
            center: policy.world_center,
            zoom: policy.world_zoom,
        };
    };

    if bounds.is_degenerate() {
        // All points identical: degrade to the single-point branch.
        return CameraSpec::Center {
            center: bounds.center(),
            zoom: policy.detail_zoom,
        };
    }

    CameraSpec::Fit {
        bounds,
        padding_px: policy.fit_padding_px,
        max_zoom: policy.overview_max_zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::GeoPoint;

    fn policy() -> ViewportPolicy {
        ViewportPolicy::default()
    }

    #[test]
    fn single_point_centers_at_detail_zoom() {
        let p = GeoPoint::raw(35.6586, 139.7454);
        let spec = fit(&CameraTarget::single(p), &policy());
        assert_eq!(
            spec,
            CameraSpec::Center {
                center: p,
                zoom: policy().detail_zoom
            }
        );
    }

    #[test]
    fn one_element_point_set_uses_the_single_branch() {
        let p = GeoPoint::raw(41.9, 12.49);
        let spec = fit(&CameraTarget::points(vec![p]).unwrap(), &policy());
        assert!(matches!(spec, CameraSpec::Center { center, zoom }
            if center == p && zoom == policy().detail_zoom));
    }

    #[test]
    fn multi_point_fit_contains_every_point_with_cap() {
        let pts = vec![
            GeoPoint::raw(48.8606, 2.3376),
            GeoPoint::raw(48.8584, 2.2945),
            GeoPoint::raw(48.8867, 2.3431),
        ];
        let spec = fit(&CameraTarget::points(pts.clone()).unwrap(), &policy());
        let CameraSpec::Fit {
            bounds,
            padding_px,
            max_zoom,
        } = spec
        else {
            panic!("expected a bounds fit");
        };
        assert_eq!(padding_px, policy().fit_padding_px);
        assert_eq!(max_zoom, policy().overview_max_zoom);
        for p in &pts {
            assert!(bounds.contains(p));
        }
    }

    #[test]
    fn fit_is_order_independent() {
        let pts = vec![
            GeoPoint::raw(52.5163, 13.3777),
            GeoPoint::raw(52.52, 13.4094),
            GeoPoint::raw(52.5096, 13.3761),
        ];
        let mut rev = pts.clone();
        rev.reverse();
        assert_eq!(
            fit(&CameraTarget::points(pts).unwrap(), &policy()),
            fit(&CameraTarget::points(rev).unwrap(), &policy())
        );
    }

    #[test]
    fn identical_points_degrade_to_single_point_behavior() {
        let p = GeoPoint::raw(0.0, 0.0);
        let spec = fit(&CameraTarget::points(vec![p, p]).unwrap(), &policy());
        assert_eq!(
            spec,
            CameraSpec::Center {
                center: p,
                zoom: policy().detail_zoom
            }
        );
    }
}
