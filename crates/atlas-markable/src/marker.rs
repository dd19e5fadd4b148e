// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Caller-supplied markers and set-level helpers.

use std::collections::BTreeSet;

use atlas_geo::{LngLat, LngLatBounds};
use atlas_map_port::MarkerId;
use serde::{Deserialize, Serialize};

/// A point of interest supplied by the caller.
///
/// `props` is opaque to the component; it is only handed to the active
/// marker renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker<P> {
    /// Identifier, unique within one marker list.
    pub id: MarkerId,
    /// Position.
    pub lng_lat: LngLat,
    /// Label drawn on the pin.
    #[serde(default)]
    pub label: String,
    /// Render payload.
    pub props: P,
}

impl<P> Marker<P> {
    /// Creates a marker.
    pub fn new(id: impl Into<MarkerId>, lng_lat: impl Into<LngLat>, label: impl Into<String>, props: P) -> Self {
        Self {
            id: id.into(),
            lng_lat: lng_lat.into(),
            label: label.into(),
            props,
        }
    }
}

/// Finds the first marker with `id`.
pub fn find_marker<'a, P>(markers: &'a [Marker<P>], id: &MarkerId) -> Option<&'a Marker<P>> {
    markers.iter().find(|m| &m.id == id)
}

/// Ids that occur more than once, in first-repeat order.
pub fn duplicate_ids<P>(markers: &[Marker<P>]) -> Vec<MarkerId> {
    let mut seen = BTreeSet::new();
    let mut dups = Vec::new();
    for m in markers {
        if !seen.insert(&m.id) && !dups.contains(&m.id) {
            dups.push(m.id.clone());
        }
    }
    dups
}

/// Whether replacing `prev` with `next` should refit the viewport.
///
/// True when the count changed, or when any marker of `next` is new or sits
/// at a different coordinate than its namesake in `prev`. Labels and payloads
/// are not compared.
pub fn needs_refit<P, Q>(prev: &[Marker<P>], next: &[Marker<Q>]) -> bool {
    if prev.len() != next.len() {
        return true;
    }
    next.iter().any(|marker| {
        prev.iter()
            .find(|p| p.id == marker.id)
            .is_none_or(|p| p.lng_lat != marker.lng_lat)
    })
}

/// Minimal box around the given markers, `None` when there are none.
pub fn marker_bounds<'a, P: 'a>(markers: impl IntoIterator<Item = &'a Marker<P>>) -> Option<LngLatBounds> {
    LngLatBounds::from_points(markers.into_iter().map(|m| m.lng_lat))
}
