use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair. Immutable value type.
///
/// `{0, 0}` is used by manual editing flows as the "unset" sentinel. It is a
/// legal coordinate (it fits the range invariants) and must survive bounds
/// and route computation; use [`GeoPoint::is_unset`] where the distinction
/// matters for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Validated constructor: latitude in [-90, 90], longitude in [-180, 180],
    /// both finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let p = Self {
            latitude,
            longitude,
        };
        if p.is_valid() {
            Ok(p)
        } else {
            Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Unchecked constructor for values already known to be in range.
    pub fn raw(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// The `{0, 0}` editing sentinel.
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Arithmetic midpoint in latitude/longitude space. An approximation
    /// acceptable at city/country scale; not geodesically exact.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }
}

/// Axis-aligned geographic bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl GeoBounds {
    /// Minimal bounds over the given points. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut it = points.into_iter();
        let p0 = it.next()?;
        let mut b = Self {
            min_latitude: p0.latitude,
            min_longitude: p0.longitude,
            max_latitude: p0.latitude,
            max_longitude: p0.longitude,
        };
        for p in it {
            b.min_latitude = b.min_latitude.min(p.latitude);
            b.min_longitude = b.min_longitude.min(p.longitude);
            b.max_latitude = b.max_latitude.max(p.latitude);
            b.max_longitude = b.max_longitude.max(p.longitude);
        }
        Some(b)
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            latitude: (self.min_latitude + self.max_latitude) / 2.0,
            longitude: (self.min_longitude + self.max_longitude) / 2.0,
        }
    }

    /// Degenerate bounds cover a single point (all points identical).
    pub fn is_degenerate(&self) -> bool {
        self.min_latitude == self.max_latitude && self.min_longitude == self.max_longitude
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&p.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&p.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_range_validation() {
        assert!(GeoPoint::new(48.8584, 2.2945).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn unset_sentinel_is_valid_but_flagged() {
        let p = GeoPoint::new(0.0, 0.0).unwrap();
        assert!(p.is_valid());
        assert!(p.is_unset());
        assert!(!GeoPoint::raw(0.0, 0.1).is_unset());
    }

    #[test]
    fn midpoint_is_arithmetic() {
        let a = GeoPoint::raw(48.0, 2.0);
        let b = GeoPoint::raw(50.0, 4.0);
        let m = a.midpoint(&b);
        assert_eq!(m.latitude, 49.0);
        assert_eq!(m.longitude, 3.0);
    }

    #[test]
    fn bounds_from_points_is_order_independent() {
        let pts = [
            GeoPoint::raw(48.85, 2.29),
            GeoPoint::raw(48.86, 2.35),
            GeoPoint::raw(48.84, 2.32),
        ];
        let b1 = GeoBounds::from_points(pts).unwrap();
        let mut rev = pts;
        rev.reverse();
        let b2 = GeoBounds::from_points(rev).unwrap();
        assert_eq!(b1, b2);
        for p in &pts {
            assert!(b1.contains(p));
        }
    }

    #[test]
    fn bounds_of_identical_points_are_degenerate() {
        let p = GeoPoint::raw(35.6764, 139.65);
        let b = GeoBounds::from_points([p, p, p]).unwrap();
        assert!(b.is_degenerate());
        assert_eq!(b.center(), p);
    }

    #[test]
    fn bounds_of_empty_input_is_none() {
        assert!(GeoBounds::from_points(std::iter::empty()).is_none());
    }
}
