use crate::itinerary::ActivityKey;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Which days are visible: all of them, or one specific day number.
///
/// Serialized as the string `"all"` or a bare day number, matching the shape
/// selection UIs exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(u32),
}

impl DayFilter {
    pub fn matches(&self, day: u32) -> bool {
        match self {
            Self::All => true,
            Self::Day(d) => *d == day,
        }
    }
}

impl Serialize for DayFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Day(d) => serializer.serialize_u32(*d),
        }
    }
}

impl<'de> Deserialize<'de> for DayFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) if s == "all" => Ok(Self::All),
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Self::Day)
                .ok_or_else(|| de::Error::custom("day filter number out of range")),
            other => Err(de::Error::custom(format!(
                "expected \"all\" or a day number, got {other}"
            ))),
        }
    }
}

/// Ephemeral UI-session selection state. Never persisted; reset whenever the
/// active itinerary reference changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default)]
    pub day_filter: DayFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<ActivityKey>,
}

impl Selection {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_focused(&self, key: &ActivityKey) -> bool {
        self.focus.as_ref() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matching() {
        assert!(DayFilter::All.matches(1));
        assert!(DayFilter::All.matches(99));
        assert!(DayFilter::Day(2).matches(2));
        assert!(!DayFilter::Day(2).matches(3));
    }

    #[test]
    fn filter_serde_shape() {
        assert_eq!(serde_json::to_string(&DayFilter::All).unwrap(), "\"all\"");
        assert_eq!(serde_json::to_string(&DayFilter::Day(3)).unwrap(), "3");
        assert_eq!(
            serde_json::from_str::<DayFilter>("\"all\"").unwrap(),
            DayFilter::All
        );
        assert_eq!(
            serde_json::from_str::<DayFilter>("7").unwrap(),
            DayFilter::Day(7)
        );
        assert!(serde_json::from_str::<DayFilter>("\"some\"").is_err());
        assert!(serde_json::from_str::<DayFilter>("-1").is_err());
    }

    #[test]
    fn selection_reset_clears_filter_and_focus() {
        let mut sel = Selection {
            day_filter: DayFilter::Day(2),
            focus: Some(ActivityKey {
                activity_name: "Louvre".to_string(),
                time: "09:00".to_string(),
            }),
        };
        sel.reset();
        assert_eq!(sel, Selection::default());
        assert_eq!(sel.day_filter, DayFilter::All);
        assert!(sel.focus.is_none());
    }
}
