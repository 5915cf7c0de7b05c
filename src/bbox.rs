/*

    Rectangular 3D bounds specified by two corner vectors.

    Corners are not required to be sorted: v1 is normally the
    minimum and v2 the maximum, but nothing enforces it. Use
    sorted( ) to normalize, is_sorted( ) to check.

    All operations return a new Bounds3 (the type is Copy) and
    never change the receiver. Where a result corner is value-equal
    to an input corner, the stored input corner is reused, see
    numeric::intern( ).

    @author: bartu
    @date: 9 Nov, 2025
*/

use serde::Serialize;

use crate::error::{Corner, GeomError};
use crate::interval::Interval;
use crate::json_parser::deser_opt_vec3;
use crate::prelude::*;
use crate::transform::Transform3D;

/// World coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a Vector3.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds3 {
    v1: Vector3,
    v2: Vector3,
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds3 {

    /// Zero-volume box at the origin.
    pub const EMPTY: Self = Self {
        v1: Vector3::ZERO,
        v2: Vector3::ZERO,
    };

    pub fn new(v1: Vector3, v2: Vector3) -> Self {
        Self { v1, v2 }
    }

    /// Missing corners default to the zero vector.
    pub fn from_corners(v1: Option<Vector3>, v2: Option<Vector3>) -> Self {
        Self {
            v1: v1.unwrap_or(Vector3::ZERO),
            v2: v2.unwrap_or(Vector3::ZERO),
        }
    }

    /// Build from raw coordinate slices, e.g. data coming from a mesh
    /// buffer. Each slice must hold exactly three finite numbers.
    pub fn try_from_slices(v1: &[Float], v2: &[Float]) -> Result<Self, GeomError> {
        Ok(Self {
            v1: corner_from_slice(v1, Corner::V1)?,
            v2: corner_from_slice(v2, Corner::V2)?,
        })
    }

    /// Bounds of a point cloud, None if there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| acc.join_point(&p)))
    }

    #[inline]
    pub fn v1(&self) -> Vector3 {
        self.v1
    }

    #[inline]
    pub fn v2(&self) -> Vector3 {
        self.v2
    }

    // ------------------------------------------------------------------
    // Measures
    // ------------------------------------------------------------------

    /// Average of the corners.
    pub fn center(&self) -> Vector3 {
        intern((self.v1 + self.v2) * 0.5, &[self.v1])
    }

    pub fn center_x(&self) -> Float {
        0.5 * (self.v1.x + self.v2.x)
    }

    pub fn center_y(&self) -> Float {
        0.5 * (self.v1.y + self.v2.y)
    }

    pub fn center_z(&self) -> Float {
        0.5 * (self.v1.z + self.v2.z)
    }

    // Signed, negative along unsorted axes
    pub fn delta_x(&self) -> Float {
        self.v2.x - self.v1.x
    }

    pub fn delta_y(&self) -> Float {
        self.v2.y - self.v1.y
    }

    pub fn delta_z(&self) -> Float {
        self.v2.z - self.v1.z
    }

    /// Absolute extent per axis.
    pub fn size(&self) -> Vector3 {
        intern((self.v2 - self.v1).abs(), &[self.v2])
    }

    pub fn size_x(&self) -> Float {
        self.delta_x().abs()
    }

    pub fn size_y(&self) -> Float {
        self.delta_y().abs()
    }

    pub fn size_z(&self) -> Float {
        self.delta_z().abs()
    }

    /// Always non-negative, regardless of corner order.
    pub fn volume(&self) -> Float {
        (self.delta_x() * self.delta_y() * self.delta_z()).abs()
    }

    /// True if the box has zero extent along at least one axis.
    pub fn is_empty(&self) -> bool {
        self.v1.x == self.v2.x || self.v1.y == self.v2.y || self.v1.z == self.v2.z
    }

    pub fn is_sorted(&self) -> bool {
        self.v1.x <= self.v2.x && self.v1.y <= self.v2.y && self.v1.z <= self.v2.z
    }

    /// Sorted range of the box along one axis.
    pub fn axis(&self, axis: Axis) -> Interval {
        let i = axis.index();
        Interval::from_unordered(self.v1[i], self.v2[i])
    }

    /// Closed containment test, works for unsorted boxes too.
    pub fn contains(&self, point: &Vector3) -> bool {
        Axis::ALL
            .iter()
            .all(|&a| self.axis(a).contains(point[a.index()]))
    }

    // ------------------------------------------------------------------
    // Extremes
    // ------------------------------------------------------------------

    pub fn min(&self) -> Vector3 {
        intern(self.v1.min(self.v2), &[self.v1])
    }

    pub fn max(&self) -> Vector3 {
        intern(self.v1.max(self.v2), &[self.v2])
    }

    pub fn min_x(&self) -> Float {
        self.v1.x.min(self.v2.x)
    }

    pub fn min_y(&self) -> Float {
        self.v1.y.min(self.v2.y)
    }

    pub fn min_z(&self) -> Float {
        self.v1.z.min(self.v2.z)
    }

    pub fn max_x(&self) -> Float {
        self.v1.x.max(self.v2.x)
    }

    pub fn max_y(&self) -> Float {
        self.v1.y.max(self.v2.y)
    }

    pub fn max_z(&self) -> Float {
        self.v1.z.max(self.v2.z)
    }

    /// Box with v1 = min( ) and v2 = max( ).
    pub fn sorted(&self) -> Self {
        self.set(Some(self.min()), Some(self.max()))
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    pub fn plus(&self, v: &Vector3) -> Self {
        self.set(Some(self.v1 + *v), Some(self.v2 + *v))
    }

    pub fn minus(&self, v: &Vector3) -> Self {
        self.set(Some(self.v1 - *v), Some(self.v2 - *v))
    }

    pub fn multiply(&self, factor: Float) -> Self {
        self.set(Some(self.v1 * factor), Some(self.v2 * factor))
    }

    /// Replace one or both corners. Returns self unchanged when the given
    /// corners equal the current ones.
    pub fn set(&self, new_v1: Option<Vector3>, new_v2: Option<Vector3>) -> Self {
        let same_v1 = new_v1.is_none_or(|v| v == self.v1);
        let same_v2 = new_v2.is_none_or(|v| v == self.v2);
        if same_v1 && same_v2 {
            *self
        } else {
            Self::new(new_v1.unwrap_or(self.v1), new_v2.unwrap_or(self.v2))
        }
    }

    /// Bounds with the given corners, reusing stored corners of box1 and
    /// box2 where they are value-equal. If both corners coincide with the
    /// corners of box1 (or box2) the result equals that box exactly.
    pub fn rebuild(box1: &Bounds3, box2: &Bounds3, v1: Vector3, v2: Vector3) -> Self {
        let pool = [box1.v1, box1.v2, box2.v1, box2.v2];
        let v1 = intern(v1, &pool);
        let v2 = intern(v2, &pool);
        let v2 = intern(v2, &[v1]);
        Self::new(v1, v2)
    }

    // ------------------------------------------------------------------
    // Box algebra
    // ------------------------------------------------------------------

    /// Intersection of two boxes.
    ///
    /// Disjoint boxes give a box whose v1 exceeds v2 along the separating
    /// axes. Such a result is not necessarily is_empty( ), so callers should
    /// check is_sorted( ) or use intersects( ) to test for overlap.
    pub fn intersect(a: &Bounds3, b: &Bounds3) -> Self {
        let (mut lo, mut hi) = (Vector3::ZERO, Vector3::ZERO);
        for axis in Axis::ALL {
            let overlap = a.axis(axis).intersection(&b.axis(axis));
            lo[axis.index()] = overlap.min;
            hi[axis.index()] = overlap.max;
        }
        Self::rebuild(a, b, lo, hi)
    }

    /// True if the boxes overlap with a non-zero volume. Touching boxes do
    /// not intersect.
    ///
    /// With a positive epsilon the overlap along every axis must also exceed
    /// epsilon, so boxes that only overlap by numerical noise are reported as
    /// disjoint. None or a non-positive epsilon means an exact test.
    pub fn intersects(a: &Bounds3, b: &Bounds3, epsilon: Option<Float>) -> bool {
        let epsilon = epsilon.unwrap_or(0.0);
        Axis::ALL
            .iter()
            .all(|&axis| a.axis(axis).overlaps(&b.axis(axis), epsilon))
    }

    /// Smallest sorted box containing both boxes.
    pub fn join_box(&self, other: &Bounds3) -> Self {
        let (mut lo, mut hi) = (Vector3::ZERO, Vector3::ZERO);
        for axis in Axis::ALL {
            let hull = self.axis(axis).hull(&other.axis(axis));
            lo[axis.index()] = hull.min;
            hi[axis.index()] = hull.max;
        }
        Self::rebuild(self, other, lo, hi)
    }

    /// Smallest sorted box containing this box and the point.
    pub fn join_point(&self, point: &Vector3) -> Self {
        let lo = point.min(self.v1.min(self.v2));
        let hi = point.max(self.v1.max(self.v2));
        self.set(Some(intern(lo, &[*point])), Some(intern(hi, &[*point])))
    }

    /// Treat this box as an oriented box in a local frame and return the
    /// world axis-aligned box of its 8 corners after box2world.
    pub fn convert_obb_to_aabb(&self, box2world: &Transform3D) -> Self {
        let xs = [self.v1.x, self.v2.x];
        let ys = [self.v1.y, self.v2.y];
        let zs = [self.v1.z, self.v2.z];

        let mut ranges = [Interval::EMPTY; 3];
        for &x in &xs {
            for &y in &ys {
                for &z in &zs {
                    ranges[0].expand(box2world.transform_x(x, y, z));
                    ranges[1].expand(box2world.transform_y(x, y, z));
                    ranges[2].expand(box2world.transform_z(x, y, z));
                }
            }
        }

        Self::new(
            Vector3::new(ranges[0].min, ranges[1].min, ranges[2].min),
            Vector3::new(ranges[0].max, ranges[1].max, ranges[2].max),
        )
    }
}

fn corner_from_slice(coords: &[Float], which: Corner) -> Result<Vector3, GeomError> {
    if coords.len() != 3 {
        debug!("Rejecting corner {} with {} components", which, coords.len());
        return Err(GeomError::InvalidCorner { which, len: coords.len() });
    }
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(GeomError::NonFiniteCorner { which });
    }
    Ok(Vector3::from_slice(coords))
}

// Both corners are optional in JSON and default to zero, like from_corners( ).
impl<'de> Deserialize<'de> for Bounds3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default, deserialize_with = "deser_opt_vec3")]
            v1: Option<Vector3>,
            #[serde(default, deserialize_with = "deser_opt_vec3")]
            v2: Option<Vector3>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(Bounds3::from_corners(helper.v1, helper.v2))
    }
}


// ====================================================================================================
// BBoxable
// ====================================================================================================

/// Anything that can report sorted axis-aligned bounds.
pub trait BBoxable {
    fn get_bbox(&self) -> Bounds3;
}

impl BBoxable for Bounds3 {
    fn get_bbox(&self) -> Bounds3 {
        self.sorted()
    }
}

impl BBoxable for [Vector3] {
    /// EMPTY for an empty slice.
    fn get_bbox(&self) -> Bounds3 {
        Bounds3::from_points(self.iter().copied()).unwrap_or(Bounds3::EMPTY)
    }
}
