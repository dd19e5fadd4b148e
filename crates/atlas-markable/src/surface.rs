// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map surface adapter: the only place that talks to the engine's camera,
//! event subscriptions and lifecycle.
//!
//! Every camera command issued from here is tagged [`MoveTag::PROGRAMMATIC`],
//! so move listeners can tell component-driven moves from user gestures.

use std::collections::BTreeMap;

use atlas_geo::{LngLat, LngLatBounds};
use atlas_map_port::{
    ClickEvent, ContainerRef, EaseToOptions, EventKind, FitBoundsOptions, MapEngine,
    MapEngineFactory, MapError, MapEvent, MapOptions, MoveTag, PointerEvent, SubscriptionId,
    ViewSnapshot,
};
use tracing::debug;

/// Event kinds subscribed for the whole lifetime of a mounted surface.
pub const MOUNT_SUBSCRIPTIONS: [EventKind; 4] = [
    EventKind::Click,
    EventKind::MoveStart,
    EventKind::MoveEnd,
    EventKind::Load,
];

/// A camera move as reported to move listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraMove {
    /// `false` only for moves the component issued itself.
    pub user_action: bool,
    /// Camera state when the event was routed.
    pub view: ViewSnapshot,
}

/// An engine event after routing through the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// Click on the map (canvas or overlay).
    Click(ClickEvent),
    /// Pointer moved over the canvas.
    PointerMove(PointerEvent),
    /// Camera started moving.
    MoveStart(CameraMove),
    /// Camera stopped moving.
    MoveEnd(CameraMove),
    /// First and only load of the surface.
    Load,
}

/// Facade over a live engine instance.
#[derive(Debug)]
pub struct MapSurface<E: MapEngine> {
    engine: E,
    subscriptions: BTreeMap<EventKind, SubscriptionId>,
    loaded: bool,
    removed: bool,
}

impl<E: MapEngine> MapSurface<E> {
    /// Creates the engine surface in `container` and subscribes the mount-time events.
    ///
    /// A missing container is fatal: the factory is never consulted.
    pub fn mount<F>(factory: &F, container: Option<&ContainerRef>, options: &MapOptions) -> Result<Self, MapError>
    where
        F: MapEngineFactory<Engine = E>,
    {
        let container = container.ok_or(MapError::ContainerUnavailable)?;
        let engine = factory.create(container, options)?;
        let mut surface = Self {
            engine,
            subscriptions: BTreeMap::new(),
            loaded: false,
            removed: false,
        };
        for kind in MOUNT_SUBSCRIPTIONS {
            surface.subscribe(kind);
        }
        debug!(container = %container.0, "map surface mounted");
        Ok(surface)
    }

    /// The live engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The live engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Subscribes `kind` unless already subscribed.
    pub fn subscribe(&mut self, kind: EventKind) {
        if self.removed || self.subscriptions.contains_key(&kind) {
            return;
        }
        let id = self.engine.subscribe(kind);
        self.subscriptions.insert(kind, id);
    }

    /// Releases the subscription for `kind`, if any.
    pub fn unsubscribe(&mut self, kind: EventKind) {
        if let Some(id) = self.subscriptions.remove(&kind) {
            self.engine.unsubscribe(id);
        }
    }

    /// Whether events of `kind` are currently routed.
    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.subscriptions.contains_key(&kind)
    }

    /// Whether the load event has been routed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether [`Self::unmount`] ran.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Camera state right now.
    pub fn view(&self) -> ViewSnapshot {
        ViewSnapshot {
            bounds: self.engine.bounds(),
            center: self.engine.center(),
            zoom: self.engine.zoom(),
        }
    }

    /// Filters an engine event through the active subscriptions.
    ///
    /// Returns `None` for unsubscribed kinds. Load is delivered once, after
    /// which its subscription is released.
    pub fn route(&mut self, event: MapEvent) -> Option<SurfaceEvent> {
        if !self.is_subscribed(event.kind()) {
            return None;
        }
        Some(match event {
            MapEvent::Click(click) => SurfaceEvent::Click(click),
            MapEvent::PointerMove(pointer) => SurfaceEvent::PointerMove(pointer),
            MapEvent::MoveStart(raw) => SurfaceEvent::MoveStart(CameraMove {
                user_action: raw.is_user_action(),
                view: self.view(),
            }),
            MapEvent::MoveEnd(raw) => SurfaceEvent::MoveEnd(CameraMove {
                user_action: raw.is_user_action(),
                view: self.view(),
            }),
            MapEvent::Load => {
                self.loaded = true;
                self.unsubscribe(EventKind::Load);
                SurfaceEvent::Load
            }
        })
    }

    /// Moves the camera center.
    pub fn set_center(&mut self, center: LngLat) {
        self.engine.set_center(center, MoveTag::PROGRAMMATIC);
    }

    /// Sets the zoom.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.engine.set_zoom(zoom, MoveTag::PROGRAMMATIC);
    }

    /// Applies a caller-supplied camera, touching only what differs from the engine's camera.
    #[allow(clippy::float_cmp)]
    pub fn sync_camera(&mut self, center: LngLat, zoom: f64) {
        if self.engine.center() != center {
            self.set_center(center);
        }
        if self.engine.zoom() != zoom {
            self.set_zoom(zoom);
        }
    }

    /// Animates the camera to `center`.
    pub fn ease_to(&mut self, center: LngLat) {
        let options = EaseToOptions {
            center: Some(center),
            zoom: None,
        };
        self.engine.ease_to(&options, MoveTag::PROGRAMMATIC);
    }

    /// Animates the camera to show `bounds`.
    pub fn fit_bounds(&mut self, bounds: LngLatBounds, options: &FitBoundsOptions) {
        self.engine.fit_bounds(bounds, options, MoveTag::PROGRAMMATIC);
    }

    /// Releases every subscription and destroys the surface. Idempotent.
    pub fn unmount(&mut self) {
        if self.removed {
            return;
        }
        let ids: Vec<_> = std::mem::take(&mut self.subscriptions).into_values().collect();
        for id in ids {
            self.engine.unsubscribe(id);
        }
        self.engine.remove();
        self.removed = true;
        debug!("map surface removed");
    }
}

impl<E: MapEngine> Drop for MapSurface<E> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_map_codec::{EngineCall, MockEngine, MockEngineFactory};
    use atlas_map_port::{MapStyle, RawMove};

    fn options() -> MapOptions {
        MapOptions {
            center: LngLat::new(0.0, 0.0),
            zoom: 2.0,
            style: MapStyle::default(),
            render_world_copies: true,
            drag_rotate: false,
            max_zoom: 18.0,
        }
    }

    fn mounted() -> (MapSurface<MockEngine>, atlas_map_codec::MockHandle) {
        let factory = MockEngineFactory::new();
        let surface = MapSurface::mount(&factory, Some(&ContainerRef("map".into())), &options()).unwrap();
        (surface, factory.handle())
    }

    #[test]
    fn missing_container_fails_before_engine_creation() {
        let factory = MockEngineFactory::new();
        let err = MapSurface::mount(&factory, None, &options()).unwrap_err();
        assert_eq!(err, MapError::ContainerUnavailable);
        assert!(factory.handle().calls().is_empty());
    }

    #[test]
    fn move_events_carry_intent() {
        let (mut surface, _handle) = mounted();
        let routed = surface.route(MapEvent::MoveEnd(RawMove { user: Some(false) }));
        assert!(matches!(
            routed,
            Some(SurfaceEvent::MoveEnd(CameraMove { user_action: false, .. }))
        ));
        let routed = surface.route(MapEvent::MoveStart(RawMove::default()));
        assert!(matches!(
            routed,
            Some(SurfaceEvent::MoveStart(CameraMove { user_action: true, .. }))
        ));
    }

    #[test]
    fn load_is_delivered_once() {
        let (mut surface, handle) = mounted();
        assert_eq!(surface.route(MapEvent::Load), Some(SurfaceEvent::Load));
        assert_eq!(surface.route(MapEvent::Load), None);
        assert!(surface.is_loaded());
        assert!(!handle.active_subscriptions().contains(&EventKind::Load));
    }

    #[test]
    fn sync_camera_only_touches_what_changed() {
        let (mut surface, handle) = mounted();
        surface.sync_camera(LngLat::new(0.0, 0.0), 2.0);
        assert!(handle.calls_labeled("setCenter").is_empty());
        assert!(handle.calls_labeled("setZoom").is_empty());

        surface.sync_camera(LngLat::new(1.0, 0.0), 2.0);
        assert_eq!(
            handle.calls_labeled("setCenter"),
            vec![EngineCall::SetCenter {
                center: LngLat::new(1.0, 0.0),
                tag: MoveTag::PROGRAMMATIC
            }]
        );
        assert_eq!(handle.count("setZoom"), 0);
    }

    #[test]
    fn unmount_releases_everything_once() {
        let (mut surface, handle) = mounted();
        surface.unmount();
        surface.unmount();
        drop(surface);
        assert!(handle.active_subscriptions().is_empty());
        assert_eq!(handle.count("remove"), 1);
        assert_eq!(handle.count("unsubscribe"), MOUNT_SUBSCRIPTIONS.len());
    }
}
