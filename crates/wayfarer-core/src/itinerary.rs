use crate::geo::GeoPoint;
use crate::selection::DayFilter;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// One geolocated stop in a day's travel sequence.
///
/// Activities carry no stored identifier. Two activities are "the same" for
/// focus matching when `activity_name` and `time` are both equal; see
/// [`ActivityKey`]. Copy-on-write edits produce new instances for logically
/// identical activities, so reference identity is never meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Free-form display label ("09:00", "Morning", ...). Not parsed.
    pub time: String,
    pub activity_name: String,
    pub description: String,
    pub location_name: String,
    pub coordinates: GeoPoint,
}

impl Activity {
    pub fn key(&self) -> ActivityKey {
        ActivityKey {
            activity_name: self.activity_name.clone(),
            time: self.time.clone(),
        }
    }

    pub fn matches(&self, key: &ActivityKey) -> bool {
        self.activity_name == key.activity_name && self.time == key.time
    }
}

/// Synthetic value-equality key for focus matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityKey {
    pub activity_name: String,
    pub time: String,
}

/// One day of the itinerary. Activity order is travel order and defines route
/// direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day number, unique within an itinerary and renumbered to be
    /// contiguous after structural edits.
    pub day: u32,
    pub theme: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl DayPlan {
    pub fn new(day: u32, theme: impl Into<String>) -> Self {
        Self {
            day,
            theme: theme.into(),
            activities: Vec::new(),
        }
    }

    /// Coordinates usable for bounds and routes: in-range and finite.
    /// The `{0,0}` sentinel is kept (legal but degenerate); malformed
    /// coordinates are silently excluded rather than aborting computation.
    pub fn routable_points(&self) -> Vec<GeoPoint> {
        self.activities
            .iter()
            .map(|a| a.coordinates)
            .filter(GeoPoint::is_valid)
            .collect()
    }
}

/// The itinerary document. Mutated only through the `with_*` edit operations,
/// each of which returns a new value; a previously displayed itinerary is
/// never aliased and patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub trip_title: String,
    pub summary: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_community: Option<bool>,
}

impl Itinerary {
    /// Builds a new itinerary with a fresh id and a `created_at` stamp taken
    /// from the active clock (see `time::with_fixed_now_utc`).
    pub fn new(trip_title: impl Into<String>, summary: impl Into<String>, days: Vec<DayPlan>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: crate::runtime::now_utc(),
            trip_title: trip_title.into(),
            summary: summary.into(),
            days,
            visual_theme: None,
            share_id: None,
            in_community: None,
        }
    }

    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Days matching the filter, in document order.
    pub fn visible_days(&self, filter: DayFilter) -> impl Iterator<Item = &DayPlan> {
        self.days.iter().filter(move |d| filter.matches(d.day))
    }

    /// All routable points of the days matching the filter.
    pub fn visible_points(&self, filter: DayFilter) -> Vec<GeoPoint> {
        self.visible_days(filter)
            .flat_map(|d| d.routable_points())
            .collect()
    }

    /// Resolves a focus key against the whole itinerary (not the filtered
    /// subset): first match in day order, then activity order.
    pub fn find_activity(&self, key: &ActivityKey) -> Option<(&DayPlan, usize, &Activity)> {
        for day in &self.days {
            for (index, activity) in day.activities.iter().enumerate() {
                if activity.matches(key) {
                    return Some((day, index, activity));
                }
            }
        }
        None
    }

    /// Key-to-coordinate lookup for repeated focus resolution.
    pub fn activity_lookup(&self) -> FxHashMap<ActivityKey, GeoPoint> {
        let mut map = FxHashMap::default();
        for day in &self.days {
            for activity in &day.activities {
                // First occurrence wins, matching find_activity.
                map.entry(activity.key()).or_insert(activity.coordinates);
            }
        }
        map
    }

    /// Inserts an empty day at `position` (0-based) and renumbers.
    pub fn with_day_inserted(&self, position: usize, theme: impl Into<String>) -> Result<Self> {
        if position > self.days.len() {
            return Err(Error::DayPositionOutOfRange {
                position,
                len: self.days.len(),
            });
        }
        let mut next = self.clone();
        next.days.insert(position, DayPlan::new(0, theme));
        renumber_days(&mut next.days);
        Ok(next)
    }

    /// Removes the day numbered `day` and renumbers the remainder.
    pub fn with_day_removed(&self, day: u32) -> Result<Self> {
        let Some(position) = self.days.iter().position(|d| d.day == day) else {
            return Err(Error::DayNotFound { day });
        };
        let mut next = self.clone();
        next.days.remove(position);
        renumber_days(&mut next.days);
        Ok(next)
    }

    pub fn with_activity_added(&self, day: u32, activity: Activity) -> Result<Self> {
        let mut next = self.clone();
        let plan = next
            .days
            .iter_mut()
            .find(|d| d.day == day)
            .ok_or(Error::DayNotFound { day })?;
        plan.activities.push(activity);
        Ok(next)
    }

    pub fn with_activity_removed(&self, day: u32, index: usize) -> Result<Self> {
        let mut next = self.clone();
        let plan = next
            .days
            .iter_mut()
            .find(|d| d.day == day)
            .ok_or(Error::DayNotFound { day })?;
        if index >= plan.activities.len() {
            return Err(Error::ActivityIndexOutOfRange {
                day,
                index,
                len: plan.activities.len(),
            });
        }
        plan.activities.remove(index);
        Ok(next)
    }

    pub fn with_activity_updated(&self, day: u32, index: usize, activity: Activity) -> Result<Self> {
        let mut next = self.clone();
        let plan = next
            .days
            .iter_mut()
            .find(|d| d.day == day)
            .ok_or(Error::DayNotFound { day })?;
        let len = plan.activities.len();
        let slot = plan
            .activities
            .get_mut(index)
            .ok_or(Error::ActivityIndexOutOfRange { day, index, len })?;
        *slot = activity;
        Ok(next)
    }
}

/// Renumbers days contiguous and sequential (1..=n) preserving order. Day
/// numbers may be non-contiguous mid-edit; after every structural edit this
/// restores the invariant.
fn renumber_days(days: &mut [DayPlan]) {
    for (i, day) in days.iter_mut().enumerate() {
        day.day = (i + 1) as u32;
    }
}

/// Parameters for the generation collaborator (out of scope here; interface
/// boundary only). The collaborator must return every activity with populated
/// coordinates — this crate does no geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    pub duration_days: u32,
    pub traveler_profile: String,
    pub budget_tier: String,
    #[serde(default)]
    pub preferences: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// A single problem found by [`validate_itinerary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationIssue {
    MalformedCoordinate {
        day: u32,
        index: usize,
        latitude: f64,
        longitude: f64,
    },
    DuplicateDayNumber {
        day: u32,
    },
    ZeroDayNumber,
    NonContiguousDays,
}

/// Structural validation used by tooling. Malformed coordinates are reported,
/// not fatal: rendering excludes them (see the view crate) and the document
/// stays usable.
pub fn validate_itinerary(itinerary: &Itinerary) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen = FxHashSet::default();
    for plan in &itinerary.days {
        if plan.day == 0 {
            issues.push(ValidationIssue::ZeroDayNumber);
        }
        if !seen.insert(plan.day) {
            issues.push(ValidationIssue::DuplicateDayNumber { day: plan.day });
        }
        for (index, activity) in plan.activities.iter().enumerate() {
            let c = activity.coordinates;
            if !c.is_valid() {
                issues.push(ValidationIssue::MalformedCoordinate {
                    day: plan.day,
                    index,
                    latitude: c.latitude,
                    longitude: c.longitude,
                });
            }
        }
    }

    let contiguous = itinerary
        .days
        .iter()
        .enumerate()
        .all(|(i, d)| d.day == (i + 1) as u32);
    if !contiguous && !itinerary.days.is_empty() {
        issues.push(ValidationIssue::NonContiguousDays);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn activity(name: &str, time: &str, lat: f64, lng: f64) -> Activity {
        Activity {
            time: time.to_string(),
            activity_name: name.to_string(),
            description: String::new(),
            location_name: name.to_string(),
            coordinates: GeoPoint::raw(lat, lng),
        }
    }

    fn paris_trip() -> Itinerary {
        let mut day1 = DayPlan::new(1, "Classics");
        day1.activities.push(activity("Louvre", "09:00", 48.8606, 2.3376));
        day1.activities.push(activity("Eiffel Tower", "14:00", 48.8584, 2.2945));
        let mut day2 = DayPlan::new(2, "Montmartre");
        day2.activities.push(activity("Sacre-Coeur", "10:00", 48.8867, 2.3431));
        Itinerary::new("Paris", "Two days in Paris", vec![day1, day2])
    }

    #[test]
    fn created_at_honors_fixed_now() {
        let fixed = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let itin = crate::time::with_fixed_now_utc(Some(fixed), paris_trip);
        assert_eq!(itin.created_at, fixed);
    }

    #[test]
    fn focus_key_matches_on_name_and_time() {
        let itin = paris_trip();
        let key = ActivityKey {
            activity_name: "Eiffel Tower".to_string(),
            time: "14:00".to_string(),
        };
        let (day, index, found) = itin.find_activity(&key).unwrap();
        assert_eq!(day.day, 1);
        assert_eq!(index, 1);
        assert!(found.matches(&key));

        let wrong_time = ActivityKey {
            activity_name: "Eiffel Tower".to_string(),
            time: "15:00".to_string(),
        };
        assert!(itin.find_activity(&wrong_time).is_none());
    }

    #[test]
    fn activity_lookup_prefers_first_occurrence() {
        let mut itin = paris_trip();
        // Same key on day 2 with different coordinates.
        itin.days[1]
            .activities
            .push(activity("Louvre", "09:00", 1.0, 1.0));
        let lookup = itin.activity_lookup();
        let key = ActivityKey {
            activity_name: "Louvre".to_string(),
            time: "09:00".to_string(),
        };
        assert_eq!(lookup[&key], GeoPoint::raw(48.8606, 2.3376));
    }

    #[test]
    fn edits_are_copy_on_write() {
        let itin = paris_trip();
        let edited = itin
            .with_activity_added(2, activity("Moulin Rouge", "20:00", 48.8841, 2.3322))
            .unwrap();
        assert_eq!(itin.days[1].activities.len(), 1);
        assert_eq!(edited.days[1].activities.len(), 2);
        assert_eq!(itin.id, edited.id);
    }

    #[test]
    fn day_removal_renumbers_contiguously() {
        let itin = paris_trip();
        let edited = itin.with_day_removed(1).unwrap();
        assert_eq!(edited.days.len(), 1);
        assert_eq!(edited.days[0].day, 1);
        assert_eq!(edited.days[0].theme, "Montmartre");
        assert!(validate_itinerary(&edited).is_empty());
    }

    #[test]
    fn day_insertion_renumbers_contiguously() {
        let itin = paris_trip();
        let edited = itin.with_day_inserted(1, "Day trip").unwrap();
        assert_eq!(
            edited.days.iter().map(|d| d.day).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(edited.days[1].theme, "Day trip");
        assert!(itin.with_day_inserted(9, "nope").is_err());
    }

    #[test]
    fn edit_errors_name_the_missing_target() {
        let itin = paris_trip();
        assert!(matches!(
            itin.with_activity_removed(7, 0),
            Err(Error::DayNotFound { day: 7 })
        ));
        assert!(matches!(
            itin.with_activity_removed(2, 5),
            Err(Error::ActivityIndexOutOfRange { day: 2, index: 5, len: 1 })
        ));
    }

    #[test]
    fn routable_points_exclude_malformed_keep_sentinel() {
        let mut plan = DayPlan::new(1, "mixed");
        plan.activities.push(activity("ok", "09:00", 48.0, 2.0));
        plan.activities.push(activity("unset", "10:00", 0.0, 0.0));
        plan.activities.push(activity("bad", "11:00", f64::NAN, 2.0));
        plan.activities.push(activity("oob", "12:00", 120.0, 2.0));
        let pts = plan.routable_points();
        assert_eq!(pts.len(), 2);
        assert!(pts[1].is_unset());
    }

    #[test]
    fn validation_reports_structure_problems() {
        let mut itin = paris_trip();
        itin.days[1].day = 5;
        itin.days[0]
            .activities
            .push(activity("bad", "13:00", f64::NAN, 0.0));
        let issues = validate_itinerary(&itin);
        assert!(issues.contains(&ValidationIssue::NonContiguousDays));
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::MalformedCoordinate { day: 1, index: 2, .. }
        )));
    }

    #[test]
    fn itinerary_json_round_trip_uses_camel_case() {
        let itin = paris_trip();
        let value = serde_json::to_value(&itin).unwrap();
        assert!(value.get("tripTitle").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("visualTheme").is_none());
        let days = value.get("days").unwrap().as_array().unwrap();
        let a0 = &days[0]["activities"][0];
        assert_eq!(a0["activityName"], "Louvre");
        assert_eq!(a0["coordinates"]["latitude"], 48.8606);

        let back: Itinerary = serde_json::from_value(value).unwrap();
        assert_eq!(back, itin);
    }
}
