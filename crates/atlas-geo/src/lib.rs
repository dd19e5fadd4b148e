// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Geographic primitives for Atlas map components.
//!
//! This crate provides:
//! - [`LngLat`]: a `(longitude, latitude)` pair in degrees.
//! - [`LngLatBounds`]: the minimal axis-aligned box covering a set of coordinates.
//!
//! Longitude is a flat numeric axis here, not a cyclic one. A box computed
//! over markers on both sides of ±180° spans the whole globe instead of the
//! short way around; callers that need antimeridian-aware fitting must split
//! their marker sets first.
//!
//! # Crate Features
//!
//! - `serde`: Serialize coordinates as GeoJSON-style `[lng, lat]` arrays and
//!   bounds as `[[sw], [ne]]`.

mod bounds;
mod lnglat;

pub use bounds::LngLatBounds;
pub use lnglat::{wrap_longitude, LngLat};
