// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encoding of port types into GeoJSON and style-expression JSON.

use atlas_map_port::{FeatureCollection, Filter, LayerSpec, PropertyValue, SourceSpec};
use serde_json::{json, Map, Value};

/// Encodes a scalar property value.
pub fn encode_property(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Null => Value::Null,
        PropertyValue::Bool(b) => Value::Bool(*b),
        PropertyValue::Number(n) => json!(n),
        PropertyValue::String(s) => Value::String(s.clone()),
    }
}

/// Encodes a feature collection as a GeoJSON `FeatureCollection`.
pub fn encode_feature_collection(data: &FeatureCollection) -> Value {
    let features: Vec<Value> = data
        .features
        .iter()
        .map(|f| {
            let properties: Map<String, Value> = f
                .properties()
                .iter()
                .map(|(k, v)| (k.clone(), encode_property(v)))
                .collect();
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": f.coordinates.to_array(),
                },
                "properties": properties,
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// Encodes a source description as a `geojson` source.
pub fn encode_source(spec: &SourceSpec) -> Value {
    let mut out = json!({
        "type": "geojson",
        "data": encode_feature_collection(&spec.data),
    });
    if let (Some(cluster), Value::Object(obj)) = (spec.cluster, &mut out) {
        obj.insert("cluster".into(), Value::Bool(true));
        obj.insert("clusterRadius".into(), json!(cluster.radius));
        obj.insert("clusterMaxZoom".into(), json!(cluster.max_zoom));
    }
    out
}

/// Encodes a filter as a legacy filter expression.
pub fn encode_filter(filter: &Filter) -> Value {
    match filter {
        Filter::All(inner) => {
            let mut items = vec![Value::String("all".into())];
            items.extend(inner.iter().map(encode_filter));
            Value::Array(items)
        }
        Filter::Eq(key, value) => json!(["==", key, encode_property(value)]),
        Filter::NotEq(key, value) => json!(["!=", key, encode_property(value)]),
        Filter::Has(key) => json!(["has", key]),
        Filter::NotHas(key) => json!(["!has", key]),
    }
}

/// Encodes a symbol layer.
pub fn encode_layer(layer: &LayerSpec) -> Value {
    let l = &layer.layout;
    let mut layout = Map::new();
    if l.allow_overlap {
        layout.insert("icon-allow-overlap".into(), Value::Bool(true));
        layout.insert("text-allow-overlap".into(), Value::Bool(true));
    }
    layout.insert("icon-image".into(), Value::String(l.icon_image.clone()));
    layout.insert("text-field".into(), Value::String(l.text_field.clone()));
    layout.insert("text-font".into(), json!(l.text_font));
    if let Some(offset) = l.icon_offset {
        layout.insert("icon-offset".into(), json!(offset));
    }
    if let Some(offset) = l.text_offset {
        layout.insert("text-offset".into(), json!(offset));
    }
    if let Some(anchor) = &l.text_anchor {
        layout.insert("text-anchor".into(), Value::String(anchor.clone()));
    }
    layout.insert("text-size".into(), json!(l.text_size));

    json!({
        "id": layer.id,
        "type": "symbol",
        "source": layer.source,
        "filter": encode_filter(&layer.filter),
        "layout": layout,
        "paint": { "text-color": layer.paint.text_color },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_geo::LngLat;
    use atlas_map_port::{ClusterOptions, MarkerId, PointFeature};

    #[test]
    fn feature_collection_matches_geojson_shape() {
        let data = FeatureCollection {
            features: vec![PointFeature {
                id: MarkerId::from(1),
                coordinates: LngLat::new(1.0, 0.0),
                active: false,
                label: "Pier".into(),
                label_len: 4,
            }],
        };
        let v = encode_feature_collection(&data);
        assert_eq!(v["type"], "FeatureCollection");
        let f = &v["features"][0];
        assert_eq!(f["geometry"]["coordinates"], json!([1.0, 0.0]));
        assert_eq!(f["properties"]["id"], json!(1.0));
        assert_eq!(f["properties"]["active"], json!(false));
        assert_eq!(f["properties"]["labellen"], json!(4.0));
    }

    #[test]
    fn clustered_source_carries_cluster_parameters() {
        let v = encode_source(&SourceSpec::clustered(ClusterOptions {
            radius: 60,
            max_zoom: 13,
        }));
        assert_eq!(v["cluster"], json!(true));
        assert_eq!(v["clusterRadius"], json!(60));
        assert_eq!(v["clusterMaxZoom"], json!(13));
        assert_eq!(v["data"]["features"], json!([]));
    }

    #[test]
    fn filters_encode_as_nested_arrays() {
        let f = Filter::All(vec![Filter::ne("active", true), Filter::not_has("point_count")]);
        assert_eq!(
            encode_filter(&f),
            json!(["all", ["!=", "active", true], ["!has", "point_count"]])
        );
        assert_eq!(encode_filter(&Filter::has("point_count")), json!(["has", "point_count"]));
    }
}
