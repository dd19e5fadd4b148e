// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Click and hover resolution.
//!
//! [`resolve_click`] turns a canvas click into a [`Resolution`] by
//! hit-testing the marker layer first and the cluster layer second;
//! [`reduce`] is the pure selection transition that follows.

use atlas_geo::LngLat;
use atlas_map_codec::{decode_member_ids, CLUSTER_MEMBER_IDS};
use atlas_map_port::{ClickEvent, Cursor, EventOrigin, MapEngine, MarkerId, ScreenPoint};
use tracing::warn;

use crate::sync::{CLUSTER_LAYER, MARKER_LAYER};

/// Latitude offset, in degrees at zoom 0, between a selected marker and the
/// camera center it is eased to.
pub const CENTERING_OFFSET: f64 = 80.0;

/// Which single marker, if any, is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Id of the active marker.
    pub active: Option<MarkerId>,
}

impl SelectionState {
    /// Selection with `id` active.
    pub fn selected(id: MarkerId) -> Self {
        Self { active: Some(id) }
    }

    /// Returns `true` when `id` is the active marker.
    pub fn is_active(&self, id: &MarkerId) -> bool {
        self.active.as_ref() == Some(id)
    }
}

/// What a click landed on.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// A rendered individual marker.
    Marker {
        /// Marker id from the feature.
        id: MarkerId,
        /// Rendered position.
        at: LngLat,
    },
    /// A cluster, with the ids of its members.
    Cluster {
        /// Member ids; empty when they could not be decoded.
        members: Vec<MarkerId>,
    },
    /// Nothing clickable.
    Empty,
}

/// Camera work requested by a selection transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Ease the camera center to this coordinate.
    EaseTo(LngLat),
    /// Fit the camera to these markers.
    FitMarkers(Vec<MarkerId>),
}

/// Returns `true` for clicks on the engine canvas itself.
pub fn is_canvas_click(click: &ClickEvent) -> bool {
    click.origin == EventOrigin::Canvas
}

/// Hit-tests `point`: individual markers first, then clusters.
pub fn resolve_click<E: MapEngine>(engine: &E, point: ScreenPoint) -> Resolution {
    let marker = engine
        .query_rendered_features(point, &[MARKER_LAYER])
        .into_iter()
        .next();
    if let Some(feature) = marker {
        match feature.marker_id() {
            Some(id) => {
                return Resolution::Marker {
                    id,
                    at: feature.coordinates,
                }
            }
            None => warn!(layer = MARKER_LAYER, "rendered marker without a usable id"),
        }
    }

    let Some(cluster) = engine
        .query_rendered_features(point, &[CLUSTER_LAYER])
        .into_iter()
        .next()
    else {
        return Resolution::Empty;
    };
    let members = match cluster.property(CLUSTER_MEMBER_IDS).map(decode_member_ids) {
        Some(Ok(ids)) => ids,
        Some(Err(err)) => {
            warn!(%err, "cluster member ids could not be decoded");
            Vec::new()
        }
        None => {
            warn!(property = CLUSTER_MEMBER_IDS, "cluster without member ids");
            Vec::new()
        }
    };
    Resolution::Cluster { members }
}

/// Camera center that shows the marker at `at` slightly below center.
///
/// The offset halves with every zoom level, so it stays constant on screen.
pub fn centered_on(at: LngLat, zoom: f64) -> LngLat {
    at.offset_lat(CENTERING_OFFSET / 2f64.powf(zoom)).wrap()
}

/// Selection transition for a resolved canvas click at camera `zoom`.
pub fn reduce(state: &SelectionState, resolution: Resolution, zoom: f64) -> (SelectionState, Vec<Effect>) {
    let mut next = state.clone();
    let mut fx = Vec::new();
    match resolution {
        Resolution::Marker { id, at } => {
            fx.push(Effect::EaseTo(centered_on(at, zoom)));
            next.active = Some(id);
        }
        Resolution::Cluster { members } => {
            next.active = None;
            fx.push(Effect::FitMarkers(members));
        }
        Resolution::Empty => next.active = None,
    }
    (next, fx)
}

/// Cursor to show with the pointer at `point`.
pub fn hover_cursor<E: MapEngine>(engine: &E, point: ScreenPoint) -> Cursor {
    if engine
        .query_rendered_features(point, &[MARKER_LAYER, CLUSTER_LAYER])
        .is_empty()
    {
        Cursor::Default
    } else {
        Cursor::Pointer
    }
}
