// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for the marker component.

use atlas_map_port::MapError;
use thiserror::Error;

/// Configuration could not be parsed or holds out-of-range values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON was malformed, had the wrong shape, or named an unrecognized option.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A recognized option holds a value outside its domain.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Option name as spelled in JSON.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors surfaced by [`crate::MarkableMap`].
#[derive(Debug, Error)]
pub enum MarkableError {
    /// The configuration was rejected before anything was created.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The map surface could not be created. Fatal; never retried.
    #[error("mount failed: {0}")]
    Mount(#[source] MapError),
    /// The engine refused a source or layer operation.
    #[error("engine error: {0}")]
    Engine(#[from] MapError),
}
