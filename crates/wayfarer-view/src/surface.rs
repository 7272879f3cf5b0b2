//! The rendering-surface boundary and tile-source configuration.

use crate::model::{CameraCommand, SceneLayout};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The tile-rendering widget, seen from the controller.
///
/// Commands are idempotent re-statements of desired state, so a failed call
/// is absorbed and simply retried on the next mount notification rather than
/// surfaced to the user.
pub trait MapSurface {
    /// Applies a camera. Surfaces must honor `generation` changes by
    /// re-applying even when the spec equals the previous one.
    fn apply_camera(&mut self, command: &CameraCommand) -> Result<()>;

    /// Replaces the drawn markers/routes/arrows wholesale.
    fn draw_scene(&mut self, scene: &SceneLayout) -> Result<()>;

    /// Tells the surface to revalidate its internal pixel buffers against its
    /// container, e.g. after a resize or after being hidden and reshown.
    fn invalidate_size(&mut self);
}

/// One named tile service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    pub name: String,
    /// Slippy-map URL template with `{z}`, `{x}`, `{y}` (and optionally
    /// `{s}`) placeholders.
    pub url_template: String,
    pub attribution: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl TileSource {
    /// The template with placeholders substituted by sample values; used for
    /// validation since the raw template is not itself a parseable URL.
    fn sample_url(&self) -> String {
        self.url_template
            .replace("{s}", "a")
            .replace("{z}", "1")
            .replace("{x}", "0")
            .replace("{y}", "0")
    }

    pub fn validate(&self, key: &str) -> Result<()> {
        let sample = self.sample_url();
        match url::Url::parse(&sample) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
            Ok(parsed) => Err(Error::InvalidTileTemplate {
                key: key.to_string(),
                message: format!("unsupported scheme {}", parsed.scheme()),
            }),
            Err(err) => Err(Error::InvalidTileTemplate {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Named tile sources, in insertion order. Tile selection is explicit
/// configuration handed to the surface; the viewport logic carries no tile
/// state and never reads this registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSourceRegistry {
    sources: IndexMap<String, TileSource>,
}

impl TileSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the template before admitting it.
    pub fn insert(&mut self, key: impl Into<String>, source: TileSource) -> Result<()> {
        let key = key.into();
        source.validate(&key)?;
        self.sources.insert(key, source);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&TileSource> {
        self.sources.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The stock registry: OpenStreetMap variants the picker offers out of
    /// the box.
    pub fn default_openstreetmap() -> Self {
        let mut reg = Self::new();

        let entries = [
            (
                "osm",
                TileSource {
                    name: "OpenStreetMap".to_string(),
                    url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                    attribution: "© OpenStreetMap contributors".to_string(),
                    min_zoom: 0.0,
                    max_zoom: 19.0,
                },
            ),
            (
                "osm-hot",
                TileSource {
                    name: "Humanitarian".to_string(),
                    url_template: "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png"
                        .to_string(),
                    attribution: "© OpenStreetMap contributors, HOT".to_string(),
                    min_zoom: 0.0,
                    max_zoom: 19.0,
                },
            ),
            (
                "carto-light",
                TileSource {
                    name: "Carto Light".to_string(),
                    url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png"
                        .to_string(),
                    attribution: "© OpenStreetMap contributors, © CARTO".to_string(),
                    min_zoom: 0.0,
                    max_zoom: 20.0,
                },
            ),
        ];

        for (key, source) in entries {
            // Stock templates are known-valid.
            let _ = reg.insert(key, source);
        }
        reg
    }
}
