// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Atlas crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`markers`] - Marker and marker-set builders
//! - [`features`] - Rendered marker and cluster features for stubbed hit-tests
//! - [`events`] - Click and pointer events
//! - [`fixture`] - A mounted `MarkableMap` over `MockEngine` with hook recording

pub mod events;
pub mod features;
pub mod fixture;
pub mod markers;

pub use events::{canvas_click, overlay_click, pointer_at};
pub use features::{rendered_cluster, rendered_marker};
pub use fixture::{HookCall, HookLog, MapFixture};
pub use markers::{marker, markers, payload_for};
