// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine and factory traits defining the map surface contract.

use atlas_geo::{LngLat, LngLatBounds};

use crate::{
    ContainerRef, Cursor, EaseToOptions, EventKind, FeatureCollection, FitBoundsOptions,
    LayerSpec, MapError, MapOptions, MarkerOverlay, MoveTag, RenderedFeature, ScreenPoint,
    SourceSpec, SubscriptionId,
};

/// Creates live engines. Injected into components instead of a global constructor.
pub trait MapEngineFactory {
    /// Engine type produced.
    type Engine: MapEngine;

    /// Creates a surface rendering into `container`.
    ///
    /// Fails with [`MapError::ContainerUnavailable`] when the container cannot
    /// host a surface.
    fn create(&self, container: &ContainerRef, options: &MapOptions)
        -> Result<Self::Engine, MapError>;
}

/// A live map surface.
///
/// Events are delivered by the host loop; subscriptions only declare which
/// event families a listener wants. Every `subscribe` must be paired with an
/// `unsubscribe` before [`MapEngine::remove`].
pub trait MapEngine {
    /// Overlay type created by [`MapEngine::add_overlay`].
    type Overlay: MarkerOverlay;

    /// Current camera center.
    fn center(&self) -> LngLat;

    /// Current zoom.
    fn zoom(&self) -> f64;

    /// Currently visible bounds.
    fn bounds(&self) -> LngLatBounds;

    /// Jumps the camera to `center`.
    fn set_center(&mut self, center: LngLat, tag: MoveTag);

    /// Jumps the camera to `zoom`.
    fn set_zoom(&mut self, zoom: f64, tag: MoveTag);

    /// Starts an animated camera transition. Not awaited.
    fn ease_to(&mut self, options: &EaseToOptions, tag: MoveTag);

    /// Starts an animated transition that fits `bounds` in the viewport. Not awaited.
    fn fit_bounds(&mut self, bounds: LngLatBounds, options: &FitBoundsOptions, tag: MoveTag);

    /// Registers interest in an event family.
    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId;

    /// Drops a registration. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Registers a point source.
    fn add_source(&mut self, id: &str, spec: &SourceSpec) -> Result<(), MapError>;

    /// Replaces a source's features in a single step.
    fn set_source_data(&mut self, id: &str, data: &FeatureCollection) -> Result<(), MapError>;

    /// Registers a layer drawing from an existing source.
    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), MapError>;

    /// Hit-tests rendered features at a canvas point, restricted to `layers`.
    fn query_rendered_features(&self, point: ScreenPoint, layers: &[&str]) -> Vec<RenderedFeature>;

    /// Sets the canvas cursor.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Creates an overlay anchored at `at` and attaches it to the map.
    fn add_overlay(&mut self, at: LngLat) -> Self::Overlay;

    /// Destroys the surface. Safe before the surface finished loading.
    fn remove(&mut self);
}
