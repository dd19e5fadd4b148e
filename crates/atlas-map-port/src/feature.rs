// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Point features pushed into clustered sources and features read back from hit-tests.

use atlas_geo::LngLat;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque marker identifier, unique within one marker list.
///
/// Engines round-trip ids through feature properties, so only numbers and
/// strings are supported. Property numbers are `f64`: integer ids must lie
/// within [`MarkerId::MAX_EXACT`] in magnitude to come back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum MarkerId {
    /// Integer id.
    Num(i64),
    /// String id.
    Text(String),
}

impl MarkerId {
    /// Largest integer magnitude an `f64` property holds exactly (2^53 - 1).
    pub const MAX_EXACT: i64 = (1 << 53) - 1;

    /// Whether the id survives a trip through a feature property.
    pub fn is_exact(&self) -> bool {
        match self {
            Self::Num(n) => n.unsigned_abs() <= Self::MAX_EXACT.unsigned_abs(),
            Self::Text(_) => true,
        }
    }

    /// Recovers an id from a feature property value.
    ///
    /// Numbers must be integral and exact; engines hand back ids as floats.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Number(n)
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= Self::MAX_EXACT as f64 =>
            {
                Some(Self::Num(*n as i64))
            }
            PropertyValue::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Encodes the id as a feature property value.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_property(&self) -> PropertyValue {
        match self {
            Self::Num(n) => PropertyValue::Number(*n as f64),
            Self::Text(s) => PropertyValue::String(s.clone()),
        }
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MarkerId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for MarkerId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for MarkerId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Scalar feature property, as engines store them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum PropertyValue {
    /// JSON null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    String(String),
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

/// Feature property bag, ordered by key.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A marker projected into the clustering engine's point format.
///
/// Regenerated in full on every synchronization pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PointFeature {
    /// Id of the marker this feature represents.
    pub id: MarkerId,
    /// Point geometry.
    pub coordinates: LngLat,
    /// `true` for the active marker; such features are hidden from the marker layer.
    pub active: bool,
    /// Label text drawn on the pin.
    pub label: String,
    /// Label length in characters; selects a pin icon wide enough for the text.
    pub label_len: usize,
}

impl PointFeature {
    /// Flattens the feature's properties the way engines expose them on hit-tests.
    #[allow(clippy::cast_precision_loss)]
    pub fn properties(&self) -> Properties {
        let mut props = Properties::new();
        props.insert("id".into(), self.id.to_property());
        props.insert("active".into(), PropertyValue::Bool(self.active));
        props.insert("label".into(), PropertyValue::String(self.label.clone()));
        props.insert(
            "labellen".into(),
            PropertyValue::Number(self.label_len as f64),
        );
        props
    }
}

/// An ordered collection of point features; replaced atomically in a source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    /// Features in marker order.
    pub features: Vec<PointFeature>,
}

impl FeatureCollection {
    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` when there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates the features flagged active.
    pub fn active(&self) -> impl Iterator<Item = &PointFeature> {
        self.features.iter().filter(|f| f.active)
    }
}

/// A feature returned by a rendered-features query.
///
/// For clustered sources this is either an individual point or a cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFeature {
    /// Layer the feature was rendered in.
    pub layer: String,
    /// Point geometry.
    pub coordinates: LngLat,
    /// Feature properties.
    pub properties: Properties,
}

impl RenderedFeature {
    /// Looks up a property by key.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// The marker id carried in the `id` property, if any.
    pub fn marker_id(&self) -> Option<MarkerId> {
        self.property("id").and_then(MarkerId::from_property)
    }

    /// Returns `true` for cluster features (they carry `point_count`).
    pub fn is_cluster(&self) -> bool {
        self.properties.contains_key("point_count")
    }
}
