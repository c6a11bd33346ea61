use crate::graph::ShapePoint;

/// Fixed-point geographic position in micro-degrees.
///
/// A position is also a node's global identity; `key` packs it into the 64-bit
/// form used by the hollow index and for equality shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub ilon: i32,
    pub ilat: i32,
}

impl Pos {
    pub fn new(ilon: i32, ilat: i32) -> Self {
        Self { ilon, ilat }
    }

    /// Packed key: longitude in the high word, latitude masked into the low word.
    pub fn key(self) -> u64 {
        ((self.ilon as i64 as u64) << 32) | u64::from(self.ilat as u32)
    }

    pub fn from_key(key: u64) -> Self {
        Self { ilon: (key >> 32) as i32, ilat: key as i32 }
    }

    /// Flat-earth distance approximation in meters, scaling longitude by a
    /// short cosine series over the offset latitude. Rounds up by one meter so
    /// distinct positions never report zero.
    pub fn distance_to(self, other: Pos) -> i32 {
        let l = f64::from(self.ilat - 90_000_000) * 0.000_000_012_341_34;
        let l2 = l * l;
        let l4 = l2 * l2;
        let coslat = 1.0 - l2 + l4 / 6.0;

        let dlat = f64::from(self.ilat - other.ilat) / 1_000_000.0;
        let dlon = f64::from(self.ilon - other.ilon) / 1_000_000.0 * coslat;
        let d = (dlat * dlat + dlon * dlon).sqrt() * (6_378_000.0 / 57.3);
        (d + 1.0) as i32
    }
}

/// Distance-bound predicate consulted once per completed shape-point chain.
///
/// A negative answer is diagnostic only: the decoder logs it and keeps the
/// link. See DESIGN.md for why culling is not enforced here.
pub trait RadiusCheck {
    fn is_within_radius(&self, origin: Pos, shape: &[ShapePoint], target: Pos) -> bool;
}

/// Accepts a chain only if every point and the target stay within a fixed
/// radius of the origin.
#[derive(Clone, Copy, Debug)]
pub struct MaxRadiusCheck {
    pub radius_m: i32,
}

impl RadiusCheck for MaxRadiusCheck {
    fn is_within_radius(&self, origin: Pos, shape: &[ShapePoint], target: Pos) -> bool {
        shape.iter().all(|sp| origin.distance_to(sp.pos) <= self.radius_m)
            && origin.distance_to(target) <= self.radius_m
    }
}
