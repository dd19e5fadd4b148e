// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Surface creation options.

use atlas_geo::LngLat;

/// Reference to the host element the surface renders into.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerRef(pub String);

/// Style the engine loads its base map from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapStyle {
    /// Style document fetched from a URL.
    Url(String),
    /// Inline style document as JSON text.
    Inline(String),
}

impl MapStyle {
    /// The style bundled with Atlas components.
    pub const DEFAULT_URL: &'static str = "atlas://styles/basic";
}

impl Default for MapStyle {
    fn default() -> Self {
        Self::Url(Self::DEFAULT_URL.to_owned())
    }
}

/// Options the surface is created with.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    /// Initial camera center.
    pub center: LngLat,
    /// Initial zoom.
    pub zoom: f64,
    /// Base map style.
    pub style: MapStyle,
    /// Render copies of the world when panning past ±180°.
    pub render_world_copies: bool,
    /// Allow rotating the map by dragging.
    pub drag_rotate: bool,
    /// Zoom ceiling.
    pub max_zoom: f64,
}
