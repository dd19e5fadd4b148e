// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Geo-anchored overlay with an opaque render slot.

use atlas_geo::LngLat;

/// An overlay element anchored to a coordinate on the map.
///
/// The overlay owns a render slot. Callers mount content produced by their own
/// UI toolkit into it; the port makes no assumption about what that content is
/// beyond its type.
pub trait MarkerOverlay {
    /// Renderable content the slot accepts.
    type Content;

    /// Current anchor coordinate.
    fn lng_lat(&self) -> LngLat;

    /// Moves the overlay to a new anchor coordinate.
    fn set_lng_lat(&mut self, at: LngLat);

    /// Mounts content into the render slot. Callers unmount previous content first.
    fn mount(&mut self, content: Self::Content);

    /// Replaces the mounted content in place, keeping the slot mounted.
    fn update(&mut self, content: Self::Content);

    /// Unmounts whatever the render slot holds. A no-op for an empty slot.
    fn unmount(&mut self);

    /// Detaches the overlay from the map and releases it.
    fn remove(self)
    where
        Self: Sized;
}
