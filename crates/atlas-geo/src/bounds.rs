// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal bounding boxes over geographic coordinates.

use crate::LngLat;

/// Axis-aligned geographic bounding box.
///
/// Invariants:
/// - `sw.lng <= ne.lng` and `sw.lat <= ne.lat`.
/// - Longitude is compared as a flat axis; the box never crosses ±180°.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")
)]
pub struct LngLatBounds {
    sw: LngLat,
    ne: LngLat,
}

impl LngLatBounds {
    /// Builds the box spanned by two opposite corners, in any order.
    pub fn from_corners(a: LngLat, b: LngLat) -> Self {
        Self {
            sw: LngLat::new(a.lng.min(b.lng), a.lat.min(b.lat)),
            ne: LngLat::new(a.lng.max(b.lng), a.lat.max(b.lat)),
        }
    }

    /// Builds a degenerate box covering a single coordinate.
    pub const fn point(p: LngLat) -> Self {
        Self { sw: p, ne: p }
    }

    /// Builds the minimal box that contains all `points`.
    ///
    /// Returns `None` for an empty input; there is no meaningful box to fit.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::point(first);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// Returns the south-west corner.
    pub const fn sw(&self) -> LngLat {
        self.sw
    }

    /// Returns the north-east corner.
    pub const fn ne(&self) -> LngLat {
        self.ne
    }

    /// Grows the box to include `p`.
    pub fn extend(&mut self, p: LngLat) {
        self.sw.lng = self.sw.lng.min(p.lng);
        self.sw.lat = self.sw.lat.min(p.lat);
        self.ne.lng = self.ne.lng.max(p.lng);
        self.ne.lat = self.ne.lat.max(p.lat);
    }

    /// Returns the union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.extend(other.sw);
        out.extend(other.ne);
        out
    }

    /// Returns `true` if `p` lies inside the box (inclusive on edges).
    pub fn contains(&self, p: LngLat) -> bool {
        p.lng >= self.sw.lng && p.lng <= self.ne.lng && p.lat >= self.sw.lat && p.lat <= self.ne.lat
    }

    /// Returns the midpoint of the box.
    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.sw.lng + self.ne.lng) / 2.0,
            (self.sw.lat + self.ne.lat) / 2.0,
        )
    }

    /// Returns the box as `[[sw_lng, sw_lat], [ne_lng, ne_lat]]`.
    pub const fn to_array(&self) -> [[f64; 2]; 2] {
        [self.sw.to_array(), self.ne.to_array()]
    }
}

impl From<[[f64; 2]; 2]> for LngLatBounds {
    fn from([a, b]: [[f64; 2]; 2]) -> Self {
        Self::from_corners(a.into(), b.into())
    }
}

impl From<LngLatBounds> for [[f64; 2]; 2] {
    fn from(b: LngLatBounds) -> Self {
        b.to_array()
    }
}
