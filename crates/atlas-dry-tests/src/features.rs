// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendered features as an engine would return them from a hit-test.

use atlas_geo::LngLat;
use atlas_map_codec::CLUSTER_MEMBER_IDS;
use atlas_map_port::{MarkerId, PointFeature, PropertyValue, RenderedFeature};
use atlas_markable::{CLUSTER_LAYER, MARKER_LAYER};

/// An inactive individual marker on the marker layer.
pub fn rendered_marker(id: impl Into<MarkerId>, at: impl Into<LngLat>) -> RenderedFeature {
    let at = at.into();
    let point = PointFeature {
        id: id.into(),
        coordinates: at,
        active: false,
        label: String::new(),
        label_len: 0,
    };
    RenderedFeature {
        layer: MARKER_LAYER.into(),
        coordinates: at,
        properties: point.properties(),
    }
}

/// A cluster on the cluster layer aggregating `members`.
#[allow(clippy::cast_precision_loss)]
pub fn rendered_cluster(at: impl Into<LngLat>, members: &[MarkerId]) -> RenderedFeature {
    let ids: Vec<serde_json::Value> = members
        .iter()
        .map(|id| match id {
            MarkerId::Num(n) => serde_json::Value::from(*n),
            MarkerId::Text(s) => serde_json::Value::from(s.as_str()),
        })
        .collect();
    let mut properties = atlas_map_port::Properties::new();
    properties.insert("cluster".into(), PropertyValue::Bool(true));
    properties.insert(
        "point_count".into(),
        PropertyValue::Number(members.len() as f64),
    );
    properties.insert(
        CLUSTER_MEMBER_IDS.into(),
        PropertyValue::String(serde_json::Value::Array(ids).to_string()),
    );
    RenderedFeature {
        layer: CLUSTER_LAYER.into(),
        coordinates: at.into(),
        properties,
    }
}
