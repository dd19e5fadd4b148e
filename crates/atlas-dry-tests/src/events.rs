// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine events.

use atlas_geo::LngLat;
use atlas_map_port::{ClickEvent, EventOrigin, MapEvent, PointerEvent, ScreenPoint};

/// A click on the canvas at `(x, y)`.
pub fn canvas_click(x: f64, y: f64) -> MapEvent {
    MapEvent::Click(ClickEvent {
        point: ScreenPoint::new(x, y),
        lng_lat: LngLat::new(0.0, 0.0),
        origin: EventOrigin::Canvas,
    })
}

/// A click at `(x, y)` that bubbled up from overlay content.
pub fn overlay_click(x: f64, y: f64) -> MapEvent {
    MapEvent::Click(ClickEvent {
        point: ScreenPoint::new(x, y),
        lng_lat: LngLat::new(0.0, 0.0),
        origin: EventOrigin::Overlay,
    })
}

/// Pointer movement to `(x, y)`.
pub fn pointer_at(x: f64, y: f64) -> MapEvent {
    MapEvent::PointerMove(PointerEvent {
        point: ScreenPoint::new(x, y),
    })
}
