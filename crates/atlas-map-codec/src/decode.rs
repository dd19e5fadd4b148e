// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decoding of engine JSON into port types.

use atlas_geo::LngLat;
use atlas_map_port::{MarkerId, Properties, PropertyValue, RenderedFeature};
use serde_json::Value;

use crate::CodecError;

/// Cluster property holding the ids of the markers aggregated into the cluster.
///
/// Engines flatten non-scalar properties to JSON text on hit-tests, so the
/// value arrives as a string such as `"[1,2,5]"`.
pub const CLUSTER_MEMBER_IDS: &str = "markerids";

/// Decodes a property value.
///
/// Arrays and objects are flattened to their JSON text, the way engines report
/// them from rendered-feature queries.
pub fn decode_property(value: &Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::Null,
        Value::Bool(b) => PropertyValue::Bool(*b),
        Value::Number(n) => n
            .as_f64()
            .map_or(PropertyValue::Null, PropertyValue::Number),
        Value::String(s) => PropertyValue::String(s.clone()),
        Value::Array(_) | Value::Object(_) => PropertyValue::String(value.to_string()),
    }
}

/// Decodes a GeoJSON point feature returned by a hit-test on `layer`.
pub fn decode_rendered_feature(layer: &str, value: &Value) -> Result<RenderedFeature, CodecError> {
    let coords = value
        .pointer("/geometry/coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| CodecError::Shape("feature without point coordinates".into()))?;
    let (lng, lat) = match coords.as_slice() {
        [lng, lat, ..] => (lng.as_f64(), lat.as_f64()),
        _ => (None, None),
    };
    let (Some(lng), Some(lat)) = (lng, lat) else {
        return Err(CodecError::Shape("coordinates must be [lng, lat]".into()));
    };

    let properties: Properties = match value.get("properties") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.clone(), decode_property(v)))
            .collect(),
        Some(Value::Null) | None => Properties::new(),
        Some(_) => return Err(CodecError::Shape("properties must be an object".into())),
    };

    Ok(RenderedFeature {
        layer: layer.to_owned(),
        coordinates: LngLat::new(lng, lat),
        properties,
    })
}

/// Decodes a cluster's member-id list from its [`CLUSTER_MEMBER_IDS`] property.
pub fn decode_member_ids(value: &PropertyValue) -> Result<Vec<MarkerId>, CodecError> {
    let PropertyValue::String(text) = value else {
        return Err(CodecError::Shape("member ids must be JSON text".into()));
    };
    let parsed: Value = serde_json::from_str(text)?;
    let Value::Array(items) = parsed else {
        return Err(CodecError::Shape("member ids must be a JSON array".into()));
    };
    items
        .iter()
        .map(|item| {
            MarkerId::from_property(&decode_property(item))
                .ok_or_else(|| CodecError::Shape(format!("not a marker id: {item}")))
        })
        .collect()
}
