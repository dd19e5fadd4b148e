// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Marker synchronization: owns the clustered source and its two layers and
//! republishes the whole feature collection whenever markers or the
//! selection change.

use atlas_map_port::{
    ClusterOptions, FeatureCollection, Filter, FitBoundsOptions, LayerSpec, MapEngine, MapError,
    MarkerId, Padding, PointFeature, SourceSpec, SymbolLayout, SymbolPaint,
};
use tracing::{debug, trace};

use crate::marker::Marker;

/// Id of the clustered point source.
pub const MARKER_SOURCE: &str = "markers";
/// Layer drawing individual, inactive markers.
pub const MARKER_LAYER: &str = "markers";
/// Layer drawing clusters.
pub const CLUSTER_LAYER: &str = "marker-cluster";
/// Clustering radius in pixels.
pub const CLUSTER_RADIUS: u32 = 60;
/// Highest zoom at which points are still clustered.
pub const CLUSTER_MAX_ZOOM: u32 = 13;

/// Camera policy for every fit request.
pub const FIT_OPTIONS: FitBoundsOptions = FitBoundsOptions {
    padding: Padding {
        top: 20.0,
        bottom: 20.0,
        left: 50.0,
        right: 50.0,
    },
    offset: [0.0, 20.0],
    max_zoom: Some(16.0),
};

const FONT_STACK: [&str; 2] = ["Open Sans Semibold", "Arial Unicode MS Bold"];
const TEXT_SIZE: f64 = 14.0;
const TEXT_COLOR: &str = "#FFFFFF";

/// Projects markers into point features, flagging the one whose id is `active`.
pub fn build_features<P>(markers: &[Marker<P>], active: Option<&MarkerId>) -> FeatureCollection {
    FeatureCollection {
        features: markers
            .iter()
            .map(|m| PointFeature {
                id: m.id.clone(),
                coordinates: m.lng_lat,
                active: active == Some(&m.id),
                label: m.label.clone(),
                label_len: m.label.chars().count(),
            })
            .collect(),
    }
}

/// Layer for individual markers: hides the active marker and anything clustered.
pub fn marker_layer() -> LayerSpec {
    LayerSpec {
        id: MARKER_LAYER.into(),
        source: MARKER_SOURCE.into(),
        filter: Filter::All(vec![Filter::ne("active", true), Filter::not_has("point_count")]),
        layout: SymbolLayout {
            icon_image: "pin-{labellen}".into(),
            text_field: "{label}".into(),
            text_font: FONT_STACK.map(String::from).to_vec(),
            text_size: TEXT_SIZE,
            icon_offset: Some([0.0, -15.0]),
            text_offset: Some([0.0, -1.9]),
            text_anchor: Some("top".into()),
            allow_overlap: true,
        },
        paint: SymbolPaint {
            text_color: TEXT_COLOR.into(),
        },
    }
}

/// Layer for clusters, labelled with their point count.
pub fn cluster_layer() -> LayerSpec {
    LayerSpec {
        id: CLUSTER_LAYER.into(),
        source: MARKER_SOURCE.into(),
        filter: Filter::has("point_count"),
        layout: SymbolLayout {
            icon_image: "pin-cluster".into(),
            text_field: "{point_count}".into(),
            text_font: FONT_STACK.map(String::from).to_vec(),
            text_size: TEXT_SIZE,
            ..SymbolLayout::default()
        },
        paint: SymbolPaint {
            text_color: TEXT_COLOR.into(),
        },
    }
}

/// Owner of the marker source and layers.
#[derive(Debug, Default)]
pub struct MarkerSync {
    ready: bool,
    passes: u64,
}

impl MarkerSync {
    /// Creates a synchronizer with no source yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the source exists.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of source replacements pushed so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Registers the clustered source and both layers. Runs once.
    pub fn setup<E: MapEngine>(&mut self, engine: &mut E) -> Result<(), MapError> {
        if self.ready {
            return Ok(());
        }
        engine.add_source(
            MARKER_SOURCE,
            &SourceSpec::clustered(ClusterOptions {
                radius: CLUSTER_RADIUS,
                max_zoom: CLUSTER_MAX_ZOOM,
            }),
        )?;
        engine.add_layer(&marker_layer())?;
        engine.add_layer(&cluster_layer())?;
        self.ready = true;
        debug!(source = MARKER_SOURCE, "marker source and layers registered");
        Ok(())
    }

    /// Replaces the source contents with the current markers and selection.
    ///
    /// Returns `Ok(false)` without touching the engine when the source does
    /// not exist yet; setup pushes the first pass itself.
    pub fn synchronize<E: MapEngine, P>(
        &mut self,
        engine: &mut E,
        markers: &[Marker<P>],
        active: Option<&MarkerId>,
    ) -> Result<bool, MapError> {
        if !self.ready {
            trace!("source not ready, sync deferred");
            return Ok(false);
        }
        let features = build_features(markers, active);
        engine.set_source_data(MARKER_SOURCE, &features)?;
        self.passes += 1;
        trace!(features = features.len(), active = ?active, pass = self.passes, "markers synchronized");
        Ok(true)
    }
}
