// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Longitude/latitude coordinate pair.

/// A geographic coordinate in degrees.
///
/// Field order follows GeoJSON: longitude first.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct LngLat {
    /// Longitude in degrees, east positive.
    pub lng: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl LngLat {
    /// Constructs a coordinate from longitude and latitude.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns the coordinate as a `[lng, lat]` array.
    pub const fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Returns `true` when both components are finite.
    pub fn is_finite(self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// Returns this coordinate with its longitude wrapped into `(-180, 180]`.
    ///
    /// Latitude is left untouched.
    #[must_use]
    pub fn wrap(self) -> Self {
        Self {
            lng: wrap_longitude(self.lng),
            lat: self.lat,
        }
    }

    /// Returns this coordinate shifted north by `delta` degrees of latitude.
    #[must_use]
    pub fn offset_lat(self, delta: f64) -> Self {
        Self {
            lng: self.lng,
            lat: self.lat + delta,
        }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        p.to_array()
    }
}

/// Wraps a longitude into `(-180, 180]`.
///
/// Exactly `-180` maps to `180`, so every meridian has one representation.
pub fn wrap_longitude(lng: f64) -> f64 {
    const MIN: f64 = -180.0;
    const MAX: f64 = 180.0;
    let span = MAX - MIN;
    let wrapped = ((lng - MIN) % span + span) % span + MIN;
    if (wrapped - MIN).abs() < f64::EPSILON {
        MAX
    } else {
        wrapped
    }
}
