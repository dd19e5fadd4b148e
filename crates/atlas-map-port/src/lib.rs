// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map engine port contract for Atlas marker components.
//!
//! This crate defines the boundary between the marker logic and whatever
//! actually draws the map. It contains NO serialization logic; that lives in
//! `atlas-map-codec`.
//!
//! # Design Principles
//!
//! - **Engines are dumb**: They draw sources, answer hit-tests and move the
//!   camera. Selection and fitting policy live above the port.
//! - **Injected, never global**: Engines are created through a
//!   [`MapEngineFactory`] handed to the component, so tests substitute a spy.
//! - **Tagged camera moves**: Every programmatic move carries a [`MoveTag`]
//!   so move listeners can tell intent apart.
//! - **Explicit subscriptions**: Listeners are registered and unregistered in
//!   pairs through [`SubscriptionId`]s.
//!
//! # Crate Features
//!
//! - `serde`: Derive `Serialize`/`Deserialize` for value types (ids, styles,
//!   camera options, events).

use thiserror::Error;

/// Error type for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The container the surface should mount into does not exist.
    #[error("map container is unavailable")]
    ContainerUnavailable,
    /// A source with this id was already registered.
    #[error("source already exists: {0}")]
    SourceExists(String),
    /// No source with this id is registered.
    #[error("unknown source: {0}")]
    UnknownSource(String),
    /// A layer with this id was already registered.
    #[error("layer already exists: {0}")]
    LayerExists(String),
    /// A backend-specific failure.
    #[error("engine error: {0}")]
    Engine(String),
}

mod camera;
mod engine;
mod events;
mod feature;
mod overlay;
mod source;
mod style;

pub use camera::{Cursor, EaseToOptions, FitBoundsOptions, MoveTag, Padding, ViewSnapshot};
pub use engine::{MapEngine, MapEngineFactory};
pub use events::{
    ClickEvent, EventKind, EventOrigin, MapEvent, PointerEvent, RawMove, ScreenPoint,
    SubscriptionId,
};
pub use feature::{FeatureCollection, MarkerId, PointFeature, Properties, PropertyValue, RenderedFeature};
pub use overlay::MarkerOverlay;
pub use source::{ClusterOptions, Filter, LayerSpec, SourceSpec, SymbolLayout, SymbolPaint};
pub use style::{ContainerRef, MapOptions, MapStyle};
