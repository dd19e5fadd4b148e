// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mock engine for headless testing of components built on atlas-map-port.
//!
//! MockEngine records every engine and overlay call in one ordered log and
//! keeps just enough state (camera, sources, layers, subscriptions, overlays)
//! to answer queries without rendering anything. Hit-test results are stubbed
//! per canvas point and filtered through the registered layer filters.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use atlas_geo::{LngLat, LngLatBounds};
use atlas_map_port::{
    ContainerRef, Cursor, EaseToOptions, EventKind, FeatureCollection, FitBoundsOptions,
    LayerSpec, MapEngine, MapEngineFactory, MapError, MapOptions, MarkerOverlay, MoveTag,
    RenderedFeature, ScreenPoint, SourceSpec, SubscriptionId,
};

/// One recorded call against the engine or one of its overlays.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    /// Surface created by the factory.
    Create {
        /// Container the surface was created in.
        container: ContainerRef,
        /// Creation options.
        options: MapOptions,
    },
    /// `set_center`.
    SetCenter {
        /// Target center.
        center: LngLat,
        /// Intent tag.
        tag: MoveTag,
    },
    /// `set_zoom`.
    SetZoom {
        /// Target zoom.
        zoom: f64,
        /// Intent tag.
        tag: MoveTag,
    },
    /// `ease_to`.
    EaseTo {
        /// Transition options.
        options: EaseToOptions,
        /// Intent tag.
        tag: MoveTag,
    },
    /// `fit_bounds`.
    FitBounds {
        /// Box to fit.
        bounds: LngLatBounds,
        /// Fit options.
        options: FitBoundsOptions,
        /// Intent tag.
        tag: MoveTag,
    },
    /// `subscribe`.
    Subscribe {
        /// Event family.
        kind: EventKind,
        /// Issued id.
        id: SubscriptionId,
    },
    /// `unsubscribe`.
    Unsubscribe {
        /// Released id.
        id: SubscriptionId,
    },
    /// `add_source`.
    AddSource {
        /// Source id.
        id: String,
    },
    /// `set_source_data`.
    SetSourceData {
        /// Source id.
        id: String,
        /// Number of features pushed.
        features: usize,
    },
    /// `add_layer`.
    AddLayer {
        /// Layer id.
        id: String,
    },
    /// `set_cursor`.
    SetCursor(Cursor),
    /// `add_overlay`.
    AddOverlay {
        /// Overlay handle number.
        overlay: u64,
        /// Anchor coordinate.
        at: LngLat,
    },
    /// Overlay `set_lng_lat`.
    OverlaySetLngLat {
        /// Overlay handle number.
        overlay: u64,
        /// New anchor coordinate.
        at: LngLat,
    },
    /// Overlay `mount`.
    OverlayMount {
        /// Overlay handle number.
        overlay: u64,
        /// Mounted content.
        content: String,
    },
    /// Overlay `update`.
    OverlayUpdate {
        /// Overlay handle number.
        overlay: u64,
        /// Replacement content.
        content: String,
    },
    /// Overlay `unmount`.
    OverlayUnmount {
        /// Overlay handle number.
        overlay: u64,
    },
    /// Overlay `remove`.
    OverlayRemove {
        /// Overlay handle number.
        overlay: u64,
    },
    /// Surface `remove`.
    Remove,
}

impl EngineCall {
    /// Short camelCase label, stable across runs; used for counting calls by kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::SetCenter { .. } => "setCenter",
            Self::SetZoom { .. } => "setZoom",
            Self::EaseTo { .. } => "easeTo",
            Self::FitBounds { .. } => "fitBounds",
            Self::Subscribe { .. } => "subscribe",
            Self::Unsubscribe { .. } => "unsubscribe",
            Self::AddSource { .. } => "addSource",
            Self::SetSourceData { .. } => "setData",
            Self::AddLayer { .. } => "addLayer",
            Self::SetCursor(_) => "setCursor",
            Self::AddOverlay { .. } => "addOverlay",
            Self::OverlaySetLngLat { .. } => "overlay.setLngLat",
            Self::OverlayMount { .. } => "overlay.mount",
            Self::OverlayUpdate { .. } => "overlay.update",
            Self::OverlayUnmount { .. } => "overlay.unmount",
            Self::OverlayRemove { .. } => "overlay.remove",
            Self::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone)]
struct OverlaySlot {
    at: LngLat,
    content: Option<String>,
}

#[derive(Debug)]
struct MockState {
    calls: Vec<EngineCall>,
    center: LngLat,
    zoom: f64,
    cursor: Cursor,
    next_subscription: u64,
    subscriptions: BTreeMap<SubscriptionId, EventKind>,
    sources: BTreeMap<String, SourceSpec>,
    layers: BTreeMap<String, LayerSpec>,
    stubs: Vec<(ScreenPoint, RenderedFeature)>,
    next_overlay: u64,
    overlays: BTreeMap<u64, OverlaySlot>,
    fail_on_create: bool,
    fail_on_set_data: bool,
    removed: bool,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            center: LngLat::new(0.0, 0.0),
            zoom: 0.0,
            cursor: Cursor::Default,
            next_subscription: 1,
            subscriptions: BTreeMap::new(),
            sources: BTreeMap::new(),
            layers: BTreeMap::new(),
            stubs: Vec::new(),
            next_overlay: 1,
            overlays: BTreeMap::new(),
            fail_on_create: false,
            fail_on_set_data: false,
            removed: false,
        }
    }
}

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Inspection and stubbing handle shared with every engine a factory creates.
///
/// Clones share state, so a test keeps one handle while the component owns the engine.
#[derive(Clone, Debug, Default)]
pub struct MockHandle {
    state: Shared,
}

impl MockHandle {
    /// Snapshot of the call log, in call order.
    pub fn calls(&self) -> Vec<EngineCall> {
        lock(&self.state).calls.clone()
    }

    /// Calls carrying `label` (see [`EngineCall::label`]).
    pub fn calls_labeled(&self, label: &str) -> Vec<EngineCall> {
        lock(&self.state)
            .calls
            .iter()
            .filter(|c| c.label() == label)
            .cloned()
            .collect()
    }

    /// Number of calls carrying `label`.
    pub fn count(&self, label: &str) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|c| c.label() == label)
            .count()
    }

    /// Forgets recorded calls; engine state is kept.
    pub fn clear_calls(&self) {
        lock(&self.state).calls.clear();
    }

    /// Subscriptions registered and not yet released.
    pub fn active_subscriptions(&self) -> Vec<EventKind> {
        lock(&self.state).subscriptions.values().copied().collect()
    }

    /// Current contents of a source.
    pub fn source_data(&self, id: &str) -> Option<FeatureCollection> {
        lock(&self.state).sources.get(id).map(|s| s.data.clone())
    }

    /// A registered source with its current contents.
    pub fn source(&self, id: &str) -> Option<SourceSpec> {
        lock(&self.state).sources.get(id).cloned()
    }

    /// Registered layer ids, sorted.
    pub fn layer_ids(&self) -> Vec<String> {
        lock(&self.state).layers.keys().cloned().collect()
    }

    /// Registered layer by id.
    pub fn layer(&self, id: &str) -> Option<LayerSpec> {
        lock(&self.state).layers.get(id).cloned()
    }

    /// Number of overlays attached and not yet removed.
    pub fn live_overlays(&self) -> usize {
        lock(&self.state).overlays.len()
    }

    /// Anchor and mounted content of every live overlay.
    pub fn overlays(&self) -> Vec<(LngLat, Option<String>)> {
        lock(&self.state)
            .overlays
            .values()
            .map(|o| (o.at, o.content.clone()))
            .collect()
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        lock(&self.state).cursor
    }

    /// Current camera center and zoom.
    pub fn camera(&self) -> (LngLat, f64) {
        let s = lock(&self.state);
        (s.center, s.zoom)
    }

    /// Moves the camera as a user gesture would, without recording a call.
    pub fn set_camera(&self, center: LngLat, zoom: f64) {
        let mut s = lock(&self.state);
        s.center = center;
        s.zoom = zoom;
    }

    /// Makes `feature` hit-testable at `point` (on `feature.layer`).
    pub fn stub_hit(&self, point: ScreenPoint, feature: RenderedFeature) {
        lock(&self.state).stubs.push((point, feature));
    }

    /// Removes every stubbed hit.
    pub fn clear_hits(&self) {
        lock(&self.state).stubs.clear();
    }

    /// Makes the next `create` fail with an engine error.
    pub fn set_fail_on_create(&self, fail: bool) {
        lock(&self.state).fail_on_create = fail;
    }

    /// Makes every `set_source_data` fail with an engine error until reset.
    pub fn set_fail_on_set_data(&self, fail: bool) {
        lock(&self.state).fail_on_set_data = fail;
    }

    /// Whether the surface was removed.
    pub fn is_removed(&self) -> bool {
        lock(&self.state).removed
    }
}

/// Factory producing [`MockEngine`]s that share one [`MockHandle`].
#[derive(Clone, Debug, Default)]
pub struct MockEngineFactory {
    handle: MockHandle,
}

impl MockEngineFactory {
    /// Create a new factory with fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for inspecting engines created by this factory.
    pub fn handle(&self) -> MockHandle {
        self.handle.clone()
    }
}

impl MapEngineFactory for MockEngineFactory {
    type Engine = MockEngine;

    fn create(&self, container: &ContainerRef, options: &MapOptions) -> Result<MockEngine, MapError> {
        let mut s = lock(&self.handle.state);
        if container.0.is_empty() {
            return Err(MapError::ContainerUnavailable);
        }
        if s.fail_on_create {
            return Err(MapError::Engine("simulated create failure".into()));
        }
        s.center = options.center;
        s.zoom = options.zoom;
        s.removed = false;
        s.calls.push(EngineCall::Create {
            container: container.clone(),
            options: options.clone(),
        });
        Ok(MockEngine {
            state: Arc::clone(&self.handle.state),
        })
    }
}

/// Recording implementation of [`MapEngine`].
#[derive(Debug)]
pub struct MockEngine {
    state: Shared,
}

impl MapEngine for MockEngine {
    type Overlay = MockOverlay;

    fn center(&self) -> LngLat {
        lock(&self.state).center
    }

    fn zoom(&self) -> f64 {
        lock(&self.state).zoom
    }

    fn bounds(&self) -> LngLatBounds {
        let s = lock(&self.state);
        let half_lng = 180.0 / 2f64.powf(s.zoom);
        let half_lat = 90.0 / 2f64.powf(s.zoom);
        LngLatBounds::from_corners(
            LngLat::new(s.center.lng - half_lng, s.center.lat - half_lat),
            LngLat::new(s.center.lng + half_lng, s.center.lat + half_lat),
        )
    }

    fn set_center(&mut self, center: LngLat, tag: MoveTag) {
        let mut s = lock(&self.state);
        s.center = center;
        s.calls.push(EngineCall::SetCenter { center, tag });
    }

    fn set_zoom(&mut self, zoom: f64, tag: MoveTag) {
        let mut s = lock(&self.state);
        s.zoom = zoom;
        s.calls.push(EngineCall::SetZoom { zoom, tag });
    }

    fn ease_to(&mut self, options: &EaseToOptions, tag: MoveTag) {
        let mut s = lock(&self.state);
        if let Some(center) = options.center {
            s.center = center;
        }
        if let Some(zoom) = options.zoom {
            s.zoom = zoom;
        }
        s.calls.push(EngineCall::EaseTo {
            options: *options,
            tag,
        });
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: &FitBoundsOptions, tag: MoveTag) {
        let mut s = lock(&self.state);
        s.center = bounds.center();
        s.calls.push(EngineCall::FitBounds {
            bounds,
            options: *options,
            tag,
        });
    }

    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        let mut s = lock(&self.state);
        let id = SubscriptionId(s.next_subscription);
        s.next_subscription += 1;
        s.subscriptions.insert(id, kind);
        s.calls.push(EngineCall::Subscribe { kind, id });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let mut s = lock(&self.state);
        s.subscriptions.remove(&id);
        s.calls.push(EngineCall::Unsubscribe { id });
    }

    fn add_source(&mut self, id: &str, spec: &SourceSpec) -> Result<(), MapError> {
        let mut s = lock(&self.state);
        if s.sources.contains_key(id) {
            return Err(MapError::SourceExists(id.to_owned()));
        }
        s.sources.insert(id.to_owned(), spec.clone());
        s.calls.push(EngineCall::AddSource { id: id.to_owned() });
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: &FeatureCollection) -> Result<(), MapError> {
        let mut s = lock(&self.state);
        if s.fail_on_set_data {
            return Err(MapError::Engine("simulated setData failure".into()));
        }
        let Some(slot) = s.sources.get_mut(id) else {
            return Err(MapError::UnknownSource(id.to_owned()));
        };
        slot.data = data.clone();
        s.calls.push(EngineCall::SetSourceData {
            id: id.to_owned(),
            features: data.len(),
        });
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerSpec) -> Result<(), MapError> {
        let mut s = lock(&self.state);
        if s.layers.contains_key(&layer.id) {
            return Err(MapError::LayerExists(layer.id.clone()));
        }
        if !s.sources.contains_key(&layer.source) {
            return Err(MapError::UnknownSource(layer.source.clone()));
        }
        s.layers.insert(layer.id.clone(), layer.clone());
        s.calls.push(EngineCall::AddLayer {
            id: layer.id.clone(),
        });
        Ok(())
    }

    fn query_rendered_features(&self, point: ScreenPoint, layers: &[&str]) -> Vec<RenderedFeature> {
        let s = lock(&self.state);
        s.stubs
            .iter()
            .filter(|(at, _)| *at == point)
            .map(|(_, feature)| feature)
            .filter(|feature| layers.contains(&feature.layer.as_str()))
            .filter(|feature| {
                s.layers
                    .get(&feature.layer)
                    .is_some_and(|layer| layer.filter.matches(&feature.properties))
            })
            .cloned()
            .collect()
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let mut s = lock(&self.state);
        s.cursor = cursor;
        s.calls.push(EngineCall::SetCursor(cursor));
    }

    fn add_overlay(&mut self, at: LngLat) -> MockOverlay {
        let mut s = lock(&self.state);
        let id = s.next_overlay;
        s.next_overlay += 1;
        s.overlays.insert(id, OverlaySlot { at, content: None });
        s.calls.push(EngineCall::AddOverlay { overlay: id, at });
        MockOverlay {
            id,
            at,
            state: Arc::clone(&self.state),
        }
    }

    fn remove(&mut self) {
        let mut s = lock(&self.state);
        s.removed = true;
        s.sources.clear();
        s.layers.clear();
        s.calls.push(EngineCall::Remove);
    }
}

/// Overlay created by [`MockEngine::add_overlay`]; content is plain text.
#[derive(Debug)]
pub struct MockOverlay {
    id: u64,
    at: LngLat,
    state: Shared,
}

impl MarkerOverlay for MockOverlay {
    type Content = String;

    fn lng_lat(&self) -> LngLat {
        self.at
    }

    fn set_lng_lat(&mut self, at: LngLat) {
        self.at = at;
        let mut s = lock(&self.state);
        if let Some(slot) = s.overlays.get_mut(&self.id) {
            slot.at = at;
        }
        s.calls.push(EngineCall::OverlaySetLngLat { overlay: self.id, at });
    }

    fn mount(&mut self, content: String) {
        let mut s = lock(&self.state);
        if let Some(slot) = s.overlays.get_mut(&self.id) {
            slot.content = Some(content.clone());
        }
        s.calls.push(EngineCall::OverlayMount {
            overlay: self.id,
            content,
        });
    }

    fn update(&mut self, content: String) {
        let mut s = lock(&self.state);
        if let Some(slot) = s.overlays.get_mut(&self.id) {
            slot.content = Some(content.clone());
        }
        s.calls.push(EngineCall::OverlayUpdate {
            overlay: self.id,
            content,
        });
    }

    fn unmount(&mut self) {
        let mut s = lock(&self.state);
        if let Some(slot) = s.overlays.get_mut(&self.id) {
            slot.content = None;
        }
        s.calls.push(EngineCall::OverlayUnmount { overlay: self.id });
    }

    fn remove(self) {
        let mut s = lock(&self.state);
        s.overlays.remove(&self.id);
        s.calls.push(EngineCall::OverlayRemove { overlay: self.id });
    }
}
