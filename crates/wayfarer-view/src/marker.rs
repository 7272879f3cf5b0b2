//! Marker visual-state resolution.

use crate::model::{MarkerState, MarkerVariant};
use wayfarer_core::{Activity, ActivityKey};

/// Z-order of a normal marker.
pub const NORMAL_Z: i32 = 0;
/// Z-order of the focused marker; above any overlapping normal marker.
pub const FOCUSED_Z: i32 = 1000;

/// Resolves one marker's variant and stacking priority against the current
/// focus. Side-effect free; day coloring is a separate palette function and
/// deliberately not this resolver's concern.
pub fn resolve(activity: &Activity, focus: Option<&ActivityKey>) -> MarkerState {
    let focused = focus.is_some_and(|key| activity.matches(key));
    if focused {
        MarkerState {
            variant: MarkerVariant::Focused,
            z_priority: FOCUSED_Z,
        }
    } else {
        MarkerState {
            variant: MarkerVariant::Normal,
            z_priority: NORMAL_Z,
        }
    }
}
