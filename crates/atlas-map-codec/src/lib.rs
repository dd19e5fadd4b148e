// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GeoJSON codec and test harness for atlas-map-port.
//!
//! This crate provides:
//! - GeoJSON encoding of feature collections and sources, and style-expression
//!   encoding of layers and filters, for engine adapters that speak JSON.
//! - Decoding of rendered features and cluster member-id lists.
//! - [`MockEngine`] for headless testing of components built on the port.
//!
//! # Design
//!
//! Serialization is deliberately separated from the port contract.
//! This keeps atlas-map-port free of JSON.

use thiserror::Error;

mod decode;
mod encode;
mod mock_engine;

pub use decode::{decode_member_ids, decode_property, decode_rendered_feature, CLUSTER_MEMBER_IDS};
pub use encode::{encode_feature_collection, encode_filter, encode_layer, encode_property, encode_source};
pub use mock_engine::{EngineCall, MockEngine, MockEngineFactory, MockHandle, MockOverlay};

/// Error type for decoding engine JSON.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input was not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON did not have the expected shape.
    #[error("unexpected shape: {0}")]
    Shape(String),
}
