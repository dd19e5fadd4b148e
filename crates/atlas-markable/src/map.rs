// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The composed marker map component.

use std::fmt;

use atlas_geo::LngLat;
use atlas_map_port::{
    ClickEvent, ContainerRef, Cursor, EventKind, MapEngine, MapEngineFactory, MapEvent, MarkerId,
    MarkerOverlay, PointerEvent,
};
use tracing::{debug, instrument, warn};

use crate::config::{validate_markers, MarkableMapConfig};
use crate::error::MarkableError;
use crate::interaction::{self, Effect, Resolution, SelectionState};
use crate::marker::{duplicate_ids, find_marker, marker_bounds, needs_refit, Marker};
use crate::overlay::ActiveMarkerRenderer;
use crate::surface::{CameraMove, MapSurface, SurfaceEvent};
use crate::sync::{MarkerSync, FIT_OPTIONS};

/// Optional caller callbacks.
///
/// `on_click` sees every routed click after the component has resolved it;
/// `on_map_load` runs once, after the marker source and layers exist.
pub struct MapHooks<E> {
    on_click: Option<Box<dyn FnMut(&ClickEvent)>>,
    on_map_load: Option<Box<dyn FnMut(&mut E)>>,
    on_move_start: Option<Box<dyn FnMut(&CameraMove)>>,
    on_move_end: Option<Box<dyn FnMut(&CameraMove)>>,
}

impl<E> Default for MapHooks<E> {
    fn default() -> Self {
        Self {
            on_click: None,
            on_map_load: None,
            on_move_start: None,
            on_move_end: None,
        }
    }
}

impl<E> fmt::Debug for MapHooks<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHooks")
            .field("on_click", &self.on_click.is_some())
            .field("on_map_load", &self.on_map_load.is_some())
            .field("on_move_start", &self.on_move_start.is_some())
            .field("on_move_end", &self.on_move_end.is_some())
            .finish()
    }
}

impl<E> MapHooks<E> {
    /// Sets the click callback.
    pub fn on_click(mut self, f: impl FnMut(&ClickEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Sets the load callback; it receives the live engine.
    pub fn on_map_load(mut self, f: impl FnMut(&mut E) + 'static) -> Self {
        self.on_map_load = Some(Box::new(f));
        self
    }

    /// Sets the move-start callback.
    pub fn on_move_start(mut self, f: impl FnMut(&CameraMove) + 'static) -> Self {
        self.on_move_start = Some(Box::new(f));
        self
    }

    /// Sets the move-end callback.
    pub fn on_move_end(mut self, f: impl FnMut(&CameraMove) + 'static) -> Self {
        self.on_move_end = Some(Box::new(f));
        self
    }
}

/// A map showing a clustered marker layer with one selectable active marker.
///
/// The host forwards engine events through [`Self::handle_event`] and pushes
/// marker updates through [`Self::set_markers`]. Dropping the component
/// unmounts it.
pub struct MarkableMap<E: MapEngine, P> {
    surface: MapSurface<E>,
    sync: MarkerSync,
    renderer: ActiveMarkerRenderer<E::Overlay, P>,
    markers: Vec<Marker<P>>,
    selection: SelectionState,
    auto_fit: bool,
    cursor: Cursor,
    hooks: MapHooks<E>,
}

impl<E: MapEngine, P> fmt::Debug for MarkableMap<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkableMap")
            .field("markers", &self.markers.len())
            .field("selection", &self.selection)
            .field("auto_fit", &self.auto_fit)
            .field("loaded", &self.surface.is_loaded())
            .field("removed", &self.surface.is_removed())
            .finish_non_exhaustive()
    }
}

impl<E: MapEngine, P> MarkableMap<E, P> {
    /// Validates `config`, creates the map surface in `container` and, with
    /// auto-fit on, fits the camera to the initial markers.
    ///
    /// `render` turns the active marker's payload into overlay content.
    pub fn mount<F>(
        factory: &F,
        container: Option<&ContainerRef>,
        config: MarkableMapConfig<P>,
        render: impl Fn(&P) -> <E::Overlay as MarkerOverlay>::Content + 'static,
        hooks: MapHooks<E>,
    ) -> Result<Self, MarkableError>
    where
        F: MapEngineFactory<Engine = E>,
    {
        config.validate()?;
        let surface =
            MapSurface::mount(factory, container, &config.map_options()).map_err(MarkableError::Mount)?;
        warn_duplicates(&config.markers);
        let mut map = Self {
            surface,
            sync: MarkerSync::new(),
            renderer: ActiveMarkerRenderer::new(render),
            markers: config.markers,
            selection: SelectionState::default(),
            auto_fit: config.auto_fit,
            cursor: Cursor::Default,
            hooks,
        };
        if map.auto_fit {
            map.fit_all();
        }
        Ok(map)
    }

    /// Current markers.
    pub fn markers(&self) -> &[Marker<P>] {
        &self.markers
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Id of the active marker.
    pub fn active_marker_id(&self) -> Option<&MarkerId> {
        self.selection.active.as_ref()
    }

    /// Whether the detail overlay exists.
    pub fn is_overlay_mounted(&self) -> bool {
        self.renderer.is_mounted()
    }

    /// Whether auto-fit is on.
    pub fn auto_fit(&self) -> bool {
        self.auto_fit
    }

    /// The map surface.
    pub fn surface(&self) -> &MapSurface<E> {
        &self.surface
    }

    /// The live engine.
    pub fn engine(&self) -> &E {
        self.surface.engine()
    }

    /// Replaces the markers.
    ///
    /// Clears the selection when the active marker is gone, republishes the
    /// source, follows the active marker with the overlay, and refits when
    /// auto-fit is on and markers were added, removed or moved. A list that
    /// fails [`validate_markers`] is rejected and leaves the component as it was.
    ///
    /// When republishing fails the overlay still follows the new selection
    /// before the error is returned.
    pub fn set_markers(&mut self, markers: Vec<Marker<P>>) -> Result<(), MarkableError> {
        if self.surface.is_removed() {
            return Ok(());
        }
        validate_markers(&markers)?;
        warn_duplicates(&markers);
        let prev = std::mem::replace(&mut self.markers, markers);
        if let Some(active) = &self.selection.active {
            if find_marker(&self.markers, active).is_none() {
                debug!(marker = %active, "active marker removed, clearing selection");
                self.selection.active = None;
            }
        }
        let active = self.selection.active.as_ref();
        let synced = self.sync.synchronize(self.surface.engine_mut(), &self.markers, active);
        self.render_overlay();
        synced?;
        if self.auto_fit && needs_refit(&prev, &self.markers) {
            self.fit_all();
        }
        Ok(())
    }

    /// Turns auto-fit on or off. Takes effect on the next marker update.
    pub fn set_auto_fit(&mut self, on: bool) {
        self.auto_fit = on;
    }

    /// Applies a caller-supplied camera center and zoom.
    pub fn set_view(&mut self, center: LngLat, zoom: f64) {
        if !self.surface.is_removed() {
            self.surface.sync_camera(center, zoom);
        }
    }

    /// Dispatches one engine event.
    #[instrument(level = "debug", skip(self))]
    pub fn handle_event(&mut self, event: MapEvent) -> Result<(), MarkableError> {
        if self.surface.is_removed() {
            return Ok(());
        }
        match self.surface.route(event) {
            None => Ok(()),
            Some(SurfaceEvent::Load) => self.on_load(),
            Some(SurfaceEvent::Click(click)) => self.on_click(&click),
            Some(SurfaceEvent::PointerMove(pointer)) => {
                self.on_pointer_move(pointer);
                Ok(())
            }
            Some(SurfaceEvent::MoveStart(camera)) => {
                if let Some(hook) = self.hooks.on_move_start.as_mut() {
                    hook(&camera);
                }
                Ok(())
            }
            Some(SurfaceEvent::MoveEnd(camera)) => {
                if let Some(hook) = self.hooks.on_move_end.as_mut() {
                    hook(&camera);
                }
                Ok(())
            }
        }
    }

    /// Removes the overlay, releases every subscription and destroys the
    /// surface. Idempotent.
    pub fn unmount(&mut self) {
        self.renderer.hide();
        self.surface.unmount();
    }

    fn on_load(&mut self) -> Result<(), MarkableError> {
        self.sync.setup(self.surface.engine_mut())?;
        self.surface.subscribe(EventKind::PointerMove);
        self.sync
            .synchronize(self.surface.engine_mut(), &self.markers, self.selection.active.as_ref())?;
        if let Some(hook) = self.hooks.on_map_load.as_mut() {
            hook(self.surface.engine_mut());
        }
        Ok(())
    }

    fn on_click(&mut self, click: &ClickEvent) -> Result<(), MarkableError> {
        let resolved = self.resolve_selection(click);
        if let Some(hook) = self.hooks.on_click.as_mut() {
            hook(click);
        }
        resolved
    }

    fn resolve_selection(&mut self, click: &ClickEvent) -> Result<(), MarkableError> {
        if interaction::is_canvas_click(click) {
            let resolution = match interaction::resolve_click(self.surface.engine(), click.point) {
                Resolution::Marker { id, .. } if find_marker(&self.markers, &id).is_none() => {
                    warn!(marker = %id, "clicked marker is not in the current list");
                    Resolution::Empty
                }
                other => other,
            };
            let zoom = self.surface.engine().zoom();
            let (next, effects) = interaction::reduce(&self.selection, resolution, zoom);
            for effect in effects {
                match effect {
                    Effect::EaseTo(center) => self.surface.ease_to(center),
                    Effect::FitMarkers(ids) => self.fit_ids(&ids),
                }
            }
            self.apply_selection(next)?;
        }
        Ok(())
    }

    fn on_pointer_move(&mut self, pointer: PointerEvent) {
        let cursor = interaction::hover_cursor(self.surface.engine(), pointer.point);
        if cursor != self.cursor {
            self.cursor = cursor;
            self.surface.engine_mut().set_cursor(cursor);
        }
    }

    fn apply_selection(&mut self, next: SelectionState) -> Result<(), MarkableError> {
        if next == self.selection {
            return Ok(());
        }
        debug!(from = ?self.selection.active, to = ?next.active, "selection changed");
        self.selection = next;
        let active = self.selection.active.as_ref();
        let synced = self.sync.synchronize(self.surface.engine_mut(), &self.markers, active);
        self.render_overlay();
        synced?;
        Ok(())
    }

    fn render_overlay(&mut self) {
        let active = self
            .selection
            .active
            .as_ref()
            .and_then(|id| find_marker(&self.markers, id));
        match active {
            Some(marker) => self.renderer.show(self.surface.engine_mut(), marker),
            None => self.renderer.hide(),
        }
    }

    fn fit_all(&mut self) {
        match marker_bounds(&self.markers) {
            Some(bounds) => {
                debug!(?bounds, markers = self.markers.len(), "fitting markers");
                self.surface.fit_bounds(bounds, &FIT_OPTIONS);
            }
            None => debug!("no markers to fit"),
        }
    }

    fn fit_ids(&mut self, ids: &[MarkerId]) {
        match marker_bounds(self.markers.iter().filter(|m| ids.contains(&m.id))) {
            Some(bounds) => {
                debug!(?bounds, requested = ids.len(), "fitting cluster");
                self.surface.fit_bounds(bounds, &FIT_OPTIONS);
            }
            None => debug!(requested = ids.len(), "cluster members not found, fit skipped"),
        }
    }
}

impl<E: MapEngine, P> Drop for MarkableMap<E, P> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn warn_duplicates<P>(markers: &[Marker<P>]) {
    for id in duplicate_ids(markers) {
        warn!(marker = %id, "duplicate marker id");
    }
}
