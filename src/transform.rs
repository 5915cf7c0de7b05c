/*

    Affine transform in the fixed 3x4 form used by bounds
    and UV mapping: a 3x3 rotation/scale block plus translation.

      | xx xy xz xo |
      | yx yy yz yo |
      | zx zy zz zo |

    Element names are row-major (first letter = output axis,
    second letter = input axis), while the underlying bevy_math
    DAffine3 stores the block column-major. Be careful here.

    @date: Oct, 2025
    @author: bartu
*/

use bevy_math::{DAffine3, DMat3};
use serde::{Serialize, Serializer};

use crate::json_parser::deser_float_array;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D(pub DAffine3);

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {

    pub const IDENTITY: Self = Self(DAffine3::IDENTITY);

    /// Build from row-major coefficients.
    #[allow(clippy::too_many_arguments)]
    pub fn from_rows(
        xx: Float, xy: Float, xz: Float, xo: Float,
        yx: Float, yy: Float, yz: Float, yo: Float,
        zx: Float, zy: Float, zz: Float, zo: Float,
    ) -> Self {
        let matrix3 = DMat3::from_cols(
            Vector3::new(xx, yx, zx),
            Vector3::new(xy, yy, zy),
            Vector3::new(xz, yz, zz),
        );
        Self(DAffine3::from_mat3_translation(matrix3, Vector3::new(xo, yo, zo)))
    }

    pub fn from_row_array(m: [Float; 12]) -> Self {
        Self::from_rows(
            m[0], m[1], m[2], m[3],
            m[4], m[5], m[6], m[7],
            m[8], m[9], m[10], m[11],
        )
    }

    /// Coefficients in the same order from_rows( ) takes them.
    pub fn to_row_array(&self) -> [Float; 12] {
        [
            self.xx(), self.xy(), self.xz(), self.xo(),
            self.yx(), self.yy(), self.yz(), self.yo(),
            self.zx(), self.zy(), self.zz(), self.zo(),
        ]
    }

    pub fn from_translation(translation: Vector3) -> Self {
        Self(DAffine3::from_translation(translation))
    }

    pub fn from_rotation_z(angle: Float) -> Self {
        Self(DAffine3::from_rotation_z(angle))
    }

    /// Rotation around a (not necessarily normalized) axis.
    pub fn from_axis_angle(axis: Vector3, angle: Float) -> Self {
        Self(DAffine3::from_axis_angle(axis.normalize(), angle))
    }

    pub fn with_translation(&self, translation: Vector3) -> Self {
        Self(DAffine3::from_mat3_translation(self.0.matrix3, translation))
    }

    /// Apply self first, then other.
    pub fn then(&self, other: &Transform3D) -> Self {
        Self(other.0 * self.0)
    }

    #[inline]
    pub fn xx(&self) -> Float {
        self.0.matrix3.x_axis.x
    }

    #[inline]
    pub fn xy(&self) -> Float {
        self.0.matrix3.y_axis.x
    }

    #[inline]
    pub fn xz(&self) -> Float {
        self.0.matrix3.z_axis.x
    }

    #[inline]
    pub fn yx(&self) -> Float {
        self.0.matrix3.x_axis.y
    }

    #[inline]
    pub fn yy(&self) -> Float {
        self.0.matrix3.y_axis.y
    }

    #[inline]
    pub fn yz(&self) -> Float {
        self.0.matrix3.z_axis.y
    }

    #[inline]
    pub fn zx(&self) -> Float {
        self.0.matrix3.x_axis.z
    }

    #[inline]
    pub fn zy(&self) -> Float {
        self.0.matrix3.y_axis.z
    }

    #[inline]
    pub fn zz(&self) -> Float {
        self.0.matrix3.z_axis.z
    }

    #[inline]
    pub fn xo(&self) -> Float {
        self.0.translation.x
    }

    #[inline]
    pub fn yo(&self) -> Float {
        self.0.translation.y
    }

    #[inline]
    pub fn zo(&self) -> Float {
        self.0.translation.z
    }

    // The inverse_* accessors assume an orthonormal 3x3 block, where the
    // inverse is the transpose. Transforms with scale need DAffine3::inverse( ).

    /// X translation of the inverse transform.
    pub fn inverse_xo(&self) -> Float {
        -(self.xx() * self.xo() + self.yx() * self.yo() + self.zx() * self.zo())
    }

    /// Y translation of the inverse transform.
    pub fn inverse_yo(&self) -> Float {
        -(self.xy() * self.xo() + self.yy() * self.yo() + self.zy() * self.zo())
    }

    /// Z translation of the inverse transform.
    pub fn inverse_zo(&self) -> Float {
        -(self.xz() * self.xo() + self.yz() * self.yo() + self.zz() * self.zo())
    }

    /// Rigid-body inverse (transposed block, see inverse_xo( )).
    pub fn inverse(&self) -> Self {
        Self(DAffine3::from_mat3_translation(
            self.0.matrix3.transpose(),
            Vector3::new(self.inverse_xo(), self.inverse_yo(), self.inverse_zo()),
        ))
    }

    #[inline]
    pub fn transform_x(&self, x: Float, y: Float, z: Float) -> Float {
        self.xx() * x + self.xy() * y + self.xz() * z + self.xo()
    }

    #[inline]
    pub fn transform_y(&self, x: Float, y: Float, z: Float) -> Float {
        self.yx() * x + self.yy() * y + self.yz() * z + self.yo()
    }

    #[inline]
    pub fn transform_z(&self, x: Float, y: Float, z: Float) -> Float {
        self.zx() * x + self.zy() * y + self.zz() * z + self.zo()
    }

    #[inline]
    pub fn transform_point(&self, p: &Vector3) -> Vector3 {
        self.0.transform_point3(*p)
    }

    /// Like transform_point( ) but ignores translation.
    #[inline]
    pub fn transform_dir(&self, d: &Vector3) -> Vector3 {
        self.0.transform_vector3(*d)
    }

    pub fn approx_eq(&self, other: &Transform3D) -> bool {
        self.0.abs_diff_eq(other.0, DEFAULT_EPSILON)
    }
}

// Both directions use the 12 row-major coefficients, either as
// a JSON array or as a whitespace separated string.
impl<'de> Deserialize<'de> for Transform3D {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let m: [Float; 12] = deser_float_array(deserializer)?;
        Ok(Transform3D::from_row_array(m))
    }
}

impl Serialize for Transform3D {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_row_array().serialize(serializer)
    }
}
