use serde_json::{Map, Value};

/// JSON-backed configuration object for the map engine.
///
/// Hosts hand us overrides as loosely-typed JSON (UI settings panels, saved
/// preferences); this wrapper keeps them as a `Value` tree and merges them
/// over defaults, so unknown keys survive round-trips.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig(Value);

impl Default for MapConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl MapConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Be defensive: callers can construct `MapConfig` from any JSON value via
        // `from_value`. Configs are objects; if we see a non-object here, coerce it
        // to an object so this API never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Typed camera policy extracted from a [`MapConfig`].
///
/// Padding and zoom caps are presentation tuning values, not algorithmic
/// requirements; they default to the values below and can be overridden under
/// the `viewport.*` config keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPolicy {
    /// Zoom applied when the camera targets a single point.
    pub detail_zoom: f64,
    /// Upper zoom cap when fitting a multi-point bounding rectangle, so two
    /// nearby points do not zoom in absurdly far.
    pub overview_max_zoom: f64,
    /// Margin kept around fitted bounds, in pixels.
    pub fit_padding_px: f64,
    /// Lower zoom bound for resolved cameras.
    pub min_zoom: f64,
    /// Camera used when nothing is visible: a fixed world overview.
    pub world_center: crate::geo::GeoPoint,
    pub world_zoom: f64,
    /// Delay before the confirmatory revalidation pass after a size change,
    /// in milliseconds.
    pub settle_delay_ms: u64,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            detail_zoom: 16.0,
            overview_max_zoom: 14.0,
            fit_padding_px: 50.0,
            min_zoom: 2.0,
            world_center: crate::geo::GeoPoint::raw(20.0, 0.0),
            world_zoom: 2.0,
            settle_delay_ms: 350,
        }
    }
}

impl ViewportPolicy {
    pub fn from_config(config: &MapConfig) -> Self {
        let d = Self::default();
        Self {
            detail_zoom: config
                .get_f64("viewport.detailZoom")
                .unwrap_or(d.detail_zoom)
                .max(0.0),
            overview_max_zoom: config
                .get_f64("viewport.overviewMaxZoom")
                .unwrap_or(d.overview_max_zoom)
                .max(0.0),
            fit_padding_px: config
                .get_f64("viewport.fitPaddingPx")
                .unwrap_or(d.fit_padding_px)
                .max(0.0),
            min_zoom: config
                .get_f64("viewport.minZoom")
                .unwrap_or(d.min_zoom)
                .max(0.0),
            world_center: crate::geo::GeoPoint::raw(
                config
                    .get_f64("viewport.worldCenterLat")
                    .unwrap_or(d.world_center.latitude)
                    .clamp(-90.0, 90.0),
                config
                    .get_f64("viewport.worldCenterLng")
                    .unwrap_or(d.world_center.longitude)
                    .clamp(-180.0, 180.0),
            ),
            world_zoom: config
                .get_f64("viewport.worldZoom")
                .unwrap_or(d.world_zoom)
                .max(0.0),
            settle_delay_ms: config
                .get_f64("viewport.settleDelayMs")
                .map(|v| v.max(0.0) as u64)
                .unwrap_or(d.settle_delay_ms),
        }
    }
}
