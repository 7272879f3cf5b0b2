//! Scene composition: markers, routes, and the camera target implied by the
//! current selection.

use crate::model::{CameraSpec, CameraTarget, MarkerLayout, MarkerVariant, SceneLayout};
use crate::{bounds, marker, route};
use wayfarer_core::{DayPalette, Itinerary, Selection, ViewportPolicy};

/// The camera spec implied by an (itinerary, filter, focus) triple, or `None`
/// when nothing is visible (no days, or an empty filter result with no
/// resolvable focus).
///
/// This is the single recompute function every viewport transition goes
/// through: same triple in, same spec out, no dependence on prior camera
/// state. An active focus overrides the filter-derived target; a focus key
/// that no longer matches any activity (stale after an edit) falls back to
/// the filtered view. Focus resolves against the whole itinerary, so focusing
/// an activity of a filtered-out day still zooms to it.
pub fn desired_camera(
    itinerary: &Itinerary,
    selection: &Selection,
    policy: &ViewportPolicy,
) -> Option<CameraSpec> {
    if itinerary.days.is_empty() {
        return None;
    }

    if let Some(key) = &selection.focus {
        if let Some((_, _, activity)) = itinerary.find_activity(key) {
            if activity.coordinates.is_valid() {
                return Some(bounds::fit(
                    &CameraTarget::single(activity.coordinates),
                    policy,
                ));
            }
        }
    }

    let target = CameraTarget::points(itinerary.visible_points(selection.day_filter))?;
    Some(bounds::fit(&target, policy))
}

/// Composes the full draw model for the current (itinerary, filter, focus)
/// triple. Pure and deterministic: the same inputs always yield the same
/// scene, so re-drawing after any event is idempotent.
///
/// Markers with malformed coordinates are skipped; days whose routable point
/// count is below 2 contribute markers but no route. Each visible day gets
/// its own disjoint route — days are never chained together.
pub fn layout_scene(
    itinerary: &Itinerary,
    selection: &Selection,
    palette: &DayPalette,
) -> SceneLayout {
    let focus = selection.focus.as_ref();
    let mut markers = Vec::new();
    let mut routes = Vec::new();

    for plan in itinerary.visible_days(selection.day_filter) {
        let day_color = palette.color_for_day(plan.day);

        for (activity_index, activity) in plan.activities.iter().enumerate() {
            if !activity.coordinates.is_valid() {
                continue;
            }
            let state = marker::resolve(activity, focus);
            let color = match state.variant {
                MarkerVariant::Focused => palette.focused_accent(plan.day),
                MarkerVariant::Normal => day_color.to_string(),
            };
            markers.push(MarkerLayout {
                day: plan.day,
                activity_index,
                activity_name: activity.activity_name.clone(),
                time: activity.time.clone(),
                position: activity.coordinates,
                variant: state.variant,
                z_priority: state.z_priority,
                color,
            });
        }

        let day_route = route::build_day_route(plan, day_color);
        if !day_route.polyline.is_empty() {
            routes.push(day_route);
        }
    }

    SceneLayout { markers, routes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{Activity, DayFilter, DayPlan, GeoPoint};

    fn activity(name: &str, time: &str, lat: f64, lng: f64) -> Activity {
        Activity {
            time: time.to_string(),
            activity_name: name.to_string(),
            description: String::new(),
            location_name: name.to_string(),
            coordinates: GeoPoint::raw(lat, lng),
        }
    }

    fn trip() -> Itinerary {
        let day1 = DayPlan {
            day: 1,
            theme: "Classics".to_string(),
            activities: vec![
                activity("Louvre", "09:00", 48.8606, 2.3376),
                activity("Eiffel Tower", "14:00", 48.8584, 2.2945),
                activity("Seine Cruise", "18:00", 48.8566, 2.3522),
            ],
        };
        let day2 = DayPlan {
            day: 2,
            theme: "Montmartre".to_string(),
            activities: vec![activity("Sacre-Coeur", "10:00", 48.8867, 2.3431)],
        };
        Itinerary::new("Paris", "Two days", vec![day1, day2])
    }

    #[test]
    fn all_filter_emits_markers_for_every_day() {
        let scene = layout_scene(&trip(), &Selection::default(), &DayPalette::default());
        assert_eq!(scene.markers.len(), 4);
        // Day 1 has a 3-point route; day 2 has no route.
        assert_eq!(scene.routes.len(), 1);
        assert_eq!(scene.routes[0].day, 1);
        assert_eq!(scene.routes[0].arrows.len(), 2);
    }

    #[test]
    fn day_filter_restricts_markers_and_routes() {
        let selection = Selection {
            day_filter: DayFilter::Day(2),
            focus: None,
        };
        let scene = layout_scene(&trip(), &selection, &DayPalette::default());
        assert_eq!(scene.markers.len(), 1);
        assert_eq!(scene.markers[0].day, 2);
        assert!(scene.routes.is_empty());
    }

    #[test]
    fn routes_of_different_days_stay_disjoint() {
        let mut itin = trip();
        itin.days[1]
            .activities
            .push(activity("Moulin Rouge", "20:00", 48.8841, 2.3322));
        let scene = layout_scene(&itin, &Selection::default(), &DayPalette::default());
        assert_eq!(scene.routes.len(), 2);
        // No route polyline mixes points from two days.
        let day1_last = scene.routes[0].polyline.last().unwrap();
        let day2_first = scene.routes[1].polyline.first().unwrap();
        assert_ne!(day1_last, day2_first);
        assert_eq!(scene.routes[0].arrows.len(), scene.routes[0].polyline.len() - 1);
        assert_eq!(scene.routes[1].arrows.len(), scene.routes[1].polyline.len() - 1);
    }

    #[test]
    fn focused_marker_gets_accent_color_and_priority() {
        let itin = trip();
        let key = itin.days[0].activities[1].key();
        let selection = Selection {
            day_filter: DayFilter::All,
            focus: Some(key),
        };
        let palette = DayPalette::default();
        let scene = layout_scene(&itin, &selection, &palette);

        let focused: Vec<_> = scene
            .markers
            .iter()
            .filter(|m| m.variant == MarkerVariant::Focused)
            .collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].activity_name, "Eiffel Tower");
        assert_eq!(focused[0].color, palette.focused_accent(1));
        assert!(focused[0].z_priority > scene.markers[0].z_priority);
    }

    #[test]
    fn malformed_coordinates_produce_no_marker() {
        let mut itin = trip();
        itin.days[0]
            .activities
            .push(activity("Ghost", "21:00", f64::NAN, 2.0));
        let scene = layout_scene(&itin, &Selection::default(), &DayPalette::default());
        assert!(scene.markers.iter().all(|m| m.activity_name != "Ghost"));
    }
}
