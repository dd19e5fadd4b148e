// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Data sources, symbol layers and layer filter predicates.

use crate::feature::{FeatureCollection, Properties, PropertyValue};

/// Clustering parameters for a point source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterOptions {
    /// Radius in pixels within which points merge into a cluster.
    pub radius: u32,
    /// Highest zoom at which points are still clustered.
    pub max_zoom: u32,
}

/// A point data source registered with the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceSpec {
    /// Initial contents.
    pub data: FeatureCollection,
    /// Clustering, if enabled.
    pub cluster: Option<ClusterOptions>,
}

impl SourceSpec {
    /// An empty source that clusters its points.
    pub fn clustered(options: ClusterOptions) -> Self {
        Self {
            data: FeatureCollection::default(),
            cluster: Some(options),
        }
    }
}

/// Predicate selecting which features of a source a layer draws.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Every inner predicate holds.
    All(Vec<Filter>),
    /// Property equals the value.
    Eq(String, PropertyValue),
    /// Property is missing or differs from the value.
    NotEq(String, PropertyValue),
    /// Property is present.
    Has(String),
    /// Property is absent.
    NotHas(String),
}

impl Filter {
    /// `key == value`.
    pub fn eq(key: &str, value: impl Into<PropertyValue>) -> Self {
        Self::Eq(key.to_owned(), value.into())
    }

    /// `key != value`.
    pub fn ne(key: &str, value: impl Into<PropertyValue>) -> Self {
        Self::NotEq(key.to_owned(), value.into())
    }

    /// `has key`.
    pub fn has(key: &str) -> Self {
        Self::Has(key.to_owned())
    }

    /// `!has key`.
    pub fn not_has(key: &str) -> Self {
        Self::NotHas(key.to_owned())
    }

    /// Evaluates the predicate against a feature's properties.
    pub fn matches(&self, props: &Properties) -> bool {
        match self {
            Self::All(inner) => inner.iter().all(|f| f.matches(props)),
            Self::Eq(key, value) => props.get(key) == Some(value),
            Self::NotEq(key, value) => props.get(key) != Some(value),
            Self::Has(key) => props.contains_key(key),
            Self::NotHas(key) => !props.contains_key(key),
        }
    }
}

/// Layout of a symbol layer (icon plus text).
///
/// `{name}` placeholders in `icon_image` and `text_field` are substituted
/// from feature properties by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolLayout {
    /// Icon name template.
    pub icon_image: String,
    /// Text template.
    pub text_field: String,
    /// Font stack, first available wins.
    pub text_font: Vec<String>,
    /// Text size in pixels.
    pub text_size: f64,
    /// Icon offset in pixels.
    pub icon_offset: Option<[f64; 2]>,
    /// Text offset in ems.
    pub text_offset: Option<[f64; 2]>,
    /// Text anchor keyword (e.g. `top`).
    pub text_anchor: Option<String>,
    /// Draw icons and text even when they collide with other symbols.
    pub allow_overlap: bool,
}

/// Paint properties of a symbol layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolPaint {
    /// CSS color of the text.
    pub text_color: String,
}

/// A symbol layer drawing features of one source.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Layer id; also the name used to scope hit-tests.
    pub id: String,
    /// Source the layer draws from.
    pub source: String,
    /// Which features are drawn.
    pub filter: Filter,
    /// Icon and text layout.
    pub layout: SymbolLayout,
    /// Paint properties.
    pub paint: SymbolPaint,
}
