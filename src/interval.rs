/*

    Responsible for creating a struct that represents
    ranges from a to b and functionality to check if
    x is in range [a,b] or two ranges overlap.

    Bounds3 reasons about each axis through this type,
    see Bounds3::axis( ).

    See also associated constants of Interval class:
    - EMPTY: (inf, -inf)
    - UNIVERSE: (-inf, inf)

    @author: Bartu
    @date: Sept 2025

*/

use crate::numeric::{Float, significantly_less_than};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Float,
    pub max: Float,
}

impl Interval {

    pub const EMPTY: Self = Self {
        min: Float::INFINITY,
        max: Float::NEG_INFINITY,
    };

    pub const UNIVERSE: Self = Self {
        min: Float::NEG_INFINITY,
        max: Float::INFINITY,
    };

    pub fn new(min: Float, max: Float) -> Self {
        Self {
            min,
            max,
        }
    }

    /// Interval spanned by two values given in any order.
    pub fn from_unordered(a: Float, b: Float) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// False when max < min, e.g. the result of intersecting disjoint intervals.
    pub fn validate(&self) -> bool {
        self.max >= self.min
    }

    /// Signed size, negative for an inverted interval.
    pub fn size(&self) -> Float {
        self.max - self.min
    }

    pub fn contains(&self, x: Float) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn expand(&mut self, x: Float) {
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    /// Overlap of two intervals. Not validated: disjoint inputs give max < min.
    pub fn intersection(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Smallest interval covering both.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Open overlap test. Touching intervals do not overlap.
    ///
    /// With a positive epsilon the overlap must also be wider than epsilon.
    pub fn overlaps(&self, other: &Interval, epsilon: Float) -> bool {
        if epsilon > 0.0 {
            significantly_less_than(self.min, other.max, epsilon)
                && significantly_less_than(other.min, self.max, epsilon)
        } else {
            self.min < other.max && other.min < self.max
        }
    }
}
