// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed component configuration.
//!
//! Every recognized option is a field here; anything else in the JSON is
//! rejected. The renderer closure and the callback hooks are not data and
//! are passed to [`crate::MarkableMap::mount`] directly.

use atlas_geo::LngLat;
use atlas_map_port::{MapOptions, MapStyle};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::marker::Marker;

/// Camera center used when none is configured.
pub const DEFAULT_CENTER: LngLat = LngLat::new(0.0, 20.0);
/// Zoom used when none is configured.
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Zoom ceiling used when none is configured.
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Options recognized by the marker component.
///
/// JSON keys are camelCase: `markers`, `autoFit`, `center`, `zoom`,
/// `mapStyle`, `allowWrap`, `dragRotate`, `maxZoom`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkableMapConfig<P> {
    /// Markers, in draw order.
    #[serde(default = "Vec::new")]
    pub markers: Vec<Marker<P>>,
    /// Refit the camera whenever markers are added, removed or moved.
    #[serde(default)]
    pub auto_fit: bool,
    /// Initial camera center.
    #[serde(default = "default_center")]
    pub center: LngLat,
    /// Initial zoom.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Base style: a URL string or an inline style object.
    #[serde(default, deserialize_with = "deserialize_style")]
    pub map_style: MapStyle,
    /// Render world copies past the antimeridian.
    #[serde(default = "default_true")]
    pub allow_wrap: bool,
    /// Allow drag-to-rotate.
    #[serde(default)]
    pub drag_rotate: bool,
    /// Zoom ceiling.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

const fn default_center() -> LngLat {
    DEFAULT_CENTER
}

const fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

const fn default_max_zoom() -> f64 {
    DEFAULT_MAX_ZOOM
}

const fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StyleSetting {
    Url(String),
    Inline(serde_json::Map<String, serde_json::Value>),
}

fn deserialize_style<'de, D: Deserializer<'de>>(de: D) -> Result<MapStyle, D::Error> {
    Ok(match StyleSetting::deserialize(de)? {
        StyleSetting::Url(url) => MapStyle::Url(url),
        StyleSetting::Inline(obj) => MapStyle::Inline(serde_json::Value::Object(obj).to_string()),
    })
}

impl<P> Default for MarkableMapConfig<P> {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            auto_fit: false,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            map_style: MapStyle::default(),
            allow_wrap: true,
            drag_rotate: false,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl<P> MarkableMapConfig<P> {
    /// Default configuration showing `markers`.
    pub fn with_markers(markers: Vec<Marker<P>>) -> Self {
        Self {
            markers,
            ..Self::default()
        }
    }

    /// Enables or disables auto-fit.
    pub fn auto_fit(mut self, on: bool) -> Self {
        self.auto_fit = on;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_coordinate("center", self.center)?;
        validate_markers(&self.markers)?;
        if !self.max_zoom.is_finite() || self.max_zoom < 0.0 {
            return Err(ConfigError::Invalid {
                field: "maxZoom",
                reason: format!("{} is not a non-negative zoom", self.max_zoom),
            });
        }
        if !self.zoom.is_finite() || self.zoom < 0.0 || self.zoom > self.max_zoom {
            return Err(ConfigError::Invalid {
                field: "zoom",
                reason: format!("{} is outside [0, {}]", self.zoom, self.max_zoom),
            });
        }
        Ok(())
    }

    /// Options the map surface is created with.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            center: self.center,
            zoom: self.zoom,
            style: self.map_style.clone(),
            render_world_copies: self.allow_wrap,
            drag_rotate: self.drag_rotate,
            max_zoom: self.max_zoom,
        }
    }
}

impl<P: DeserializeOwned> MarkableMapConfig<P> {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Checks every marker coordinate and that numeric ids survive the engine's
/// float properties.
pub fn validate_markers<P>(markers: &[Marker<P>]) -> Result<(), ConfigError> {
    for marker in markers {
        check_coordinate("markers", marker.lng_lat)?;
        if !marker.id.is_exact() {
            return Err(ConfigError::Invalid {
                field: "markers",
                reason: format!("id {} exceeds the exact integer range", marker.id),
            });
        }
    }
    Ok(())
}

fn check_coordinate(field: &'static str, at: LngLat) -> Result<(), ConfigError> {
    if !at.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("non-finite coordinate [{}, {}]", at.lng, at.lat),
        });
    }
    if !(-90.0..=90.0).contains(&at.lat) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("latitude {} is outside [-90, 90]", at.lat),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = MarkableMapConfig::<()>::from_json("{}").unwrap();
        assert_eq!(config, MarkableMapConfig::default());
        assert!(config.allow_wrap);
        assert!(!config.auto_fit);
    }

    #[test]
    fn unknown_options_are_rejected() {
        let err = MarkableMapConfig::<()>::from_json(r#"{"autofit": true}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("autofit"));
    }

    #[test]
    fn markers_and_camera_parse_from_camel_case() {
        let config = MarkableMapConfig::<String>::from_json(
            r#"{
                "markers": [{"id": 1, "lngLat": [2.5, 48.8], "label": "Paris", "props": "detail"}],
                "autoFit": true,
                "center": [2.0, 48.0],
                "zoom": 4,
                "maxZoom": 12,
                "dragRotate": true,
                "allowWrap": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.markers[0].lng_lat, LngLat::new(2.5, 48.8));
        assert_eq!(config.markers[0].props, "detail");
        assert!(config.auto_fit);
        let options = config.map_options();
        assert!(!options.render_world_copies);
        assert!(options.drag_rotate);
        assert_eq!(options.center, LngLat::new(2.0, 48.0));
    }

    #[test]
    fn style_accepts_url_or_inline_object() {
        let url = MarkableMapConfig::<()>::from_json(r#"{"mapStyle": "https://tiles.example/style.json"}"#).unwrap();
        assert_eq!(url.map_style, MapStyle::Url("https://tiles.example/style.json".into()));

        let inline = MarkableMapConfig::<()>::from_json(r#"{"mapStyle": {"version": 8}}"#).unwrap();
        assert_eq!(inline.map_style, MapStyle::Inline(r#"{"version":8}"#.into()));

        assert!(MarkableMapConfig::<()>::from_json(r#"{"mapStyle": 3}"#).is_err());
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        let err = MarkableMapConfig::<()>::from_json(r#"{"center": [0, 95]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "center", .. }));

        let err = MarkableMapConfig::<()>::from_json(r#"{"zoom": 20, "maxZoom": 16}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom", .. }));

        let err = MarkableMapConfig::<()>::from_json(
            r#"{"markers": [{"id": "a", "lngLat": [0, -91], "props": null}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "markers", .. }));
    }

    #[test]
    fn marker_lists_are_checked_on_their_own() {
        assert!(validate_markers(&[Marker::new(1, [179.0, 89.0], "ok", ())]).is_ok());

        let err = validate_markers(&[Marker::new(1, [f64::NAN, 95.0], "bad", ())]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "markers", .. }));

        let err = MarkableMapConfig::<()>::from_json(
            r#"{"markers": [{"id": 9007199254740993, "lngLat": [0, 0], "props": null}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "markers", .. }));
    }
}
