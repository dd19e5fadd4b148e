// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw events delivered by a map engine.

use atlas_geo::LngLat;

/// Pixel position relative to the map canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPoint {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
}

impl ScreenPoint {
    /// Constructs a point from pixel offsets.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Event families a listener can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Pointer click.
    Click,
    /// Pointer movement over the canvas.
    PointerMove,
    /// Camera starts moving.
    MoveStart,
    /// Camera finished moving.
    MoveEnd,
    /// Style and surface finished loading. Fires once.
    Load,
}

/// Handle returned by a subscription; pass it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptionId(pub u64);

/// Where a DOM-level click originated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventOrigin {
    /// The engine's own rendering canvas.
    #[default]
    Canvas,
    /// Overlay content attached to the map (e.g. the active marker detail).
    Overlay,
}

/// A click on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickEvent {
    /// Click position on the canvas.
    pub point: ScreenPoint,
    /// Geographic position under the click.
    pub lng_lat: LngLat,
    /// Element the click bubbled from.
    pub origin: EventOrigin,
}

/// Pointer movement over the map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Pointer position on the canvas.
    pub point: ScreenPoint,
}

/// Camera move notification as the engine reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawMove {
    /// The `user` flag of the [`crate::MoveTag`] that caused the move, if any.
    pub user: Option<bool>,
}

impl RawMove {
    /// A move without a tag is a gesture; only an explicit `user: false` is programmatic.
    pub fn is_user_action(&self) -> bool {
        self.user != Some(false)
    }
}

/// An event dispatched by the engine to subscribed listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapEvent {
    /// See [`ClickEvent`].
    Click(ClickEvent),
    /// See [`PointerEvent`].
    PointerMove(PointerEvent),
    /// Camera starts moving.
    MoveStart(RawMove),
    /// Camera finished moving.
    MoveEnd(RawMove),
    /// Surface finished loading.
    Load,
}

impl MapEvent {
    /// The subscription family this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::MoveStart(_) => EventKind::MoveStart,
            Self::MoveEnd(_) => EventKind::MoveEnd,
            Self::Load => EventKind::Load,
        }
    }
}
