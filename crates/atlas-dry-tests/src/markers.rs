// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Marker builders.

use atlas_map_port::MarkerId;
use atlas_markable::Marker;

/// Payload the fixtures attach to marker `id`.
pub fn payload_for(id: &MarkerId) -> String {
    format!("detail:{id}")
}

/// A marker labelled `m{id}` carrying [`payload_for`] as its payload.
pub fn marker(id: i64, lng: f64, lat: f64) -> Marker<String> {
    let id = MarkerId::from(id);
    let props = payload_for(&id);
    Marker::new(id.clone(), [lng, lat], format!("m{id}"), props)
}

/// Markers from `(id, lng, lat)` triples, in order.
pub fn markers(spec: &[(i64, f64, f64)]) -> Vec<Marker<String>> {
    spec.iter().map(|&(id, lng, lat)| marker(id, lng, lat)).collect()
}
