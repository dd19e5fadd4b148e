// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Marker layer state machine for interactive maps.
//!
//! [`MarkableMap`] overlays a caller-supplied list of labelled markers on a
//! map engine reached through the `atlas-map-port` traits. It
//!
//! - keeps a clustered point source in step with the marker list and the
//!   current selection ([`MarkerSync`]),
//! - resolves canvas clicks into marker selection, cluster zoom or
//!   deselection ([`interaction`]),
//! - owns the single detail overlay on the active marker
//!   ([`ActiveMarkerRenderer`]),
//! - and fits the camera to the markers when they change, if asked to.
//!
//! # Event flow
//!
//! The engine never calls into the component. The host forwards every
//! engine event to [`MarkableMap::handle_event`]; [`MapSurface`] drops kinds
//! that have no live subscription. Marker and camera updates arrive through
//! [`MarkableMap::set_markers`] and [`MarkableMap::set_view`].
//!
//! # Teardown
//!
//! [`MarkableMap::unmount`] (also run on drop) removes the overlay first,
//! then releases every subscription and destroys the surface.

mod config;
mod error;
pub mod interaction;
mod map;
mod marker;
mod overlay;
mod surface;
mod sync;

pub use config::{validate_markers, MarkableMapConfig, DEFAULT_CENTER, DEFAULT_MAX_ZOOM, DEFAULT_ZOOM};
pub use error::{ConfigError, MarkableError};
pub use interaction::{Effect, Resolution, SelectionState};
pub use map::{MapHooks, MarkableMap};
pub use marker::{duplicate_ids, find_marker, marker_bounds, needs_refit, Marker};
pub use overlay::{ActiveMarkerRenderer, RenderFn};
pub use surface::{CameraMove, MapSurface, SurfaceEvent, MOUNT_SUBSCRIPTIONS};
pub use sync::{
    build_features, cluster_layer, marker_layer, MarkerSync, CLUSTER_LAYER, CLUSTER_MAX_ZOOM,
    CLUSTER_RADIUS, FIT_OPTIONS, MARKER_LAYER, MARKER_SOURCE,
};
