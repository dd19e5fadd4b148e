// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The single detail overlay attached to the active marker.

use std::fmt;

use atlas_map_port::{MapEngine, MarkerId, MarkerOverlay};
use tracing::debug;

use crate::marker::Marker;

/// Caller-supplied function producing overlay content from a marker payload.
pub type RenderFn<P, C> = Box<dyn Fn(&P) -> C>;

struct Slot<O> {
    overlay: O,
    marker: MarkerId,
}

/// Owns at most one overlay and the content mounted into it.
///
/// The overlay is created on the first activation, moved (never recreated)
/// while the selection changes between markers, and removed when the
/// selection returns to none.
pub struct ActiveMarkerRenderer<O: MarkerOverlay, P> {
    render: RenderFn<P, O::Content>,
    slot: Option<Slot<O>>,
}

impl<O: MarkerOverlay, P> fmt::Debug for ActiveMarkerRenderer<O, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveMarkerRenderer")
            .field("marker", &self.active_marker())
            .finish_non_exhaustive()
    }
}

impl<O: MarkerOverlay, P> ActiveMarkerRenderer<O, P> {
    /// Creates a renderer with no overlay.
    pub fn new(render: impl Fn(&P) -> O::Content + 'static) -> Self {
        Self {
            render: Box::new(render),
            slot: None,
        }
    }

    /// Id of the marker the overlay currently shows.
    pub fn active_marker(&self) -> Option<&MarkerId> {
        self.slot.as_ref().map(|s| &s.marker)
    }

    /// Whether an overlay exists.
    pub fn is_mounted(&self) -> bool {
        self.slot.is_some()
    }

    /// Shows `marker` in the overlay.
    ///
    /// The overlay is mounted once per activation. Re-showing the same marker
    /// follows its position and swaps in content rendered from the current
    /// payload.
    pub fn show<E>(&mut self, engine: &mut E, marker: &Marker<P>)
    where
        E: MapEngine<Overlay = O>,
    {
        match &mut self.slot {
            None => {
                let mut overlay = engine.add_overlay(marker.lng_lat);
                overlay.mount((self.render)(&marker.props));
                debug!(marker = %marker.id, "active overlay mounted");
                self.slot = Some(Slot {
                    overlay,
                    marker: marker.id.clone(),
                });
            }
            Some(slot) => {
                if slot.overlay.lng_lat() != marker.lng_lat {
                    slot.overlay.set_lng_lat(marker.lng_lat);
                }
                if slot.marker == marker.id {
                    slot.overlay.update((self.render)(&marker.props));
                } else {
                    slot.overlay.unmount();
                    slot.overlay.mount((self.render)(&marker.props));
                    debug!(from = %slot.marker, to = %marker.id, "active overlay moved");
                    slot.marker = marker.id.clone();
                }
            }
        }
    }

    /// Unmounts the content and removes the overlay, if any.
    pub fn hide(&mut self) {
        if let Some(mut slot) = self.slot.take() {
            slot.overlay.unmount();
            slot.overlay.remove();
            debug!(marker = %slot.marker, "active overlay removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_geo::LngLat;
    use atlas_map_codec::{MockEngine, MockEngineFactory, MockHandle};
    use atlas_map_port::{ContainerRef, MapEngineFactory, MapOptions, MapStyle};

    fn engine() -> (MockEngine, MockHandle) {
        let factory = MockEngineFactory::new();
        let options = MapOptions {
            center: LngLat::new(0.0, 0.0),
            zoom: 1.0,
            style: MapStyle::default(),
            render_world_copies: true,
            drag_rotate: false,
            max_zoom: 18.0,
        };
        let engine = factory.create(&ContainerRef("map".into()), &options).unwrap();
        (engine, factory.handle())
    }

    fn renderer() -> ActiveMarkerRenderer<atlas_map_codec::MockOverlay, &'static str> {
        ActiveMarkerRenderer::new(|p: &&'static str| (*p).to_owned())
    }

    #[test]
    fn first_show_creates_and_mounts() {
        let (mut engine, handle) = engine();
        let mut r = renderer();
        r.show(&mut engine, &Marker::new(1, [3.0, 4.0], "a", "one"));
        assert_eq!(handle.overlays(), vec![(LngLat::new(3.0, 4.0), Some("one".to_owned()))]);
        assert_eq!(handle.count("overlay.mount"), 1);
    }

    #[test]
    fn reshowing_same_marker_does_not_remount() {
        let (mut engine, handle) = engine();
        let mut r = renderer();
        let m = Marker::new(1, [3.0, 4.0], "a", "one");
        r.show(&mut engine, &m);
        r.show(&mut engine, &m);
        r.show(&mut engine, &Marker::new(1, [5.0, 4.0], "a", "one"));
        assert_eq!(handle.count("addOverlay"), 1);
        assert_eq!(handle.count("overlay.mount"), 1);
        assert_eq!(handle.count("overlay.setLngLat"), 1);
    }

    #[test]
    fn reshowing_same_marker_refreshes_content_in_place() {
        let (mut engine, handle) = engine();
        let mut r = renderer();
        r.show(&mut engine, &Marker::new(1, [3.0, 4.0], "a", "one"));
        r.show(&mut engine, &Marker::new(1, [3.0, 4.0], "a", "uno"));
        assert_eq!(handle.overlays(), vec![(LngLat::new(3.0, 4.0), Some("uno".to_owned()))]);
        assert_eq!(handle.count("overlay.mount"), 1);
        assert_eq!(handle.count("overlay.unmount"), 0);
        assert_eq!(handle.count("overlay.update"), 1);
    }

    #[test]
    fn switching_markers_moves_the_overlay() {
        let (mut engine, handle) = engine();
        let mut r = renderer();
        r.show(&mut engine, &Marker::new(1, [3.0, 4.0], "a", "one"));
        r.show(&mut engine, &Marker::new(2, [6.0, 7.0], "b", "two"));
        assert_eq!(handle.count("addOverlay"), 1);
        assert_eq!(handle.live_overlays(), 1);
        assert_eq!(handle.overlays(), vec![(LngLat::new(6.0, 7.0), Some("two".to_owned()))]);
        assert_eq!(r.active_marker(), Some(&MarkerId::from(2)));
    }

    #[test]
    fn hide_is_idempotent() {
        let (mut engine, handle) = engine();
        let mut r = renderer();
        r.show(&mut engine, &Marker::new(1, [3.0, 4.0], "a", "one"));
        r.hide();
        r.hide();
        assert!(!r.is_mounted());
        assert_eq!(handle.live_overlays(), 0);
        assert_eq!(handle.count("overlay.unmount"), 1);
        assert_eq!(handle.count("overlay.remove"), 1);
    }
}
