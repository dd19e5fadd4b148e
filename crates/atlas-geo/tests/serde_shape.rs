// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON shape of coordinates and bounds under the `serde` feature.
#![cfg(feature = "serde")]

use atlas_geo::{LngLat, LngLatBounds};

#[test]
fn lnglat_is_a_two_element_array() {
    let p: LngLat = serde_json::from_str("[1.5, -2]").unwrap();
    assert_eq!(p, LngLat::new(1.5, -2.0));
    assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0]");
}

#[test]
fn bounds_are_sw_then_ne() {
    let b: LngLatBounds = serde_json::from_str("[[1, 1], [0, 0]]").unwrap();
    assert_eq!(b.to_array(), [[0.0, 0.0], [1.0, 1.0]]);
}
