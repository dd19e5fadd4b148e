// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera command options and snapshots.

use atlas_geo::{LngLat, LngLatBounds};

/// Intent tag attached to every camera command.
///
/// Engines echo the tag back on the move events the command causes, which is
/// how listeners distinguish programmatic moves from user gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveTag {
    /// `true` when the move was caused by the user.
    pub user: bool,
}

impl MoveTag {
    /// Tag for moves issued by code, not by a gesture.
    pub const PROGRAMMATIC: Self = Self { user: false };
    /// Tag for moves issued by a user gesture.
    pub const USER: Self = Self { user: true };
}

/// Options for an animated camera transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaseToOptions {
    /// Target center, if the center should change.
    pub center: Option<LngLat>,
    /// Target zoom, if the zoom should change.
    pub zoom: Option<f64>,
}

/// Screen-space padding in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Top padding.
    pub top: f64,
    /// Bottom padding.
    pub bottom: f64,
    /// Left padding.
    pub left: f64,
    /// Right padding.
    pub right: f64,
}

/// Options for fitting the camera to a bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitBoundsOptions {
    /// Padding kept free around the box.
    pub padding: Padding,
    /// Pixel offset `[x, y]` of the box center from the viewport center.
    pub offset: [f64; 2],
    /// Zoom ceiling for the fit.
    pub max_zoom: Option<f64>,
}

/// Camera state reported with move events.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewSnapshot {
    /// Visible bounds.
    pub bounds: LngLatBounds,
    /// Camera center.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
}

/// Pointer cursor style over the map canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cursor {
    /// Engine default cursor.
    #[default]
    Default,
    /// Hand cursor signalling something clickable.
    Pointer,
}
