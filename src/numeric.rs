/*

    Declare numeric types used throughout this crate.

    WARNING: If you like to use f32 instead of f64
    during computations, you need to change all of these:
    pub type Float = f32;
    pub type Vector3 = Vec3;
    pub type Vector2 = Vec2;

    @date: 2 Oct, 2025
    @author: Bartu
*/

use bevy_math::{DVec2, DVec3};
pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update Vector types
pub type Vector3 = DVec3;
pub type Vector2 = DVec2;

/// Tolerance used by the approx_* helpers.
pub const DEFAULT_EPSILON: Float = 1e-8;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < DEFAULT_EPSILON
}

pub fn approx_eq(a: Float, b: Float) -> bool {
    approx_zero(a - b)
}

pub fn approx_eq_vec3(a: &Vector3, b: &Vector3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// True if `a` is less than `b` by more than `epsilon`,
/// i.e. `a < b - epsilon`. Values within epsilon count as equal.
#[inline]
pub fn significantly_less_than(a: Float, b: Float, epsilon: Float) -> bool {
    (b - a) > epsilon
}

/// Return `existing` if it is value-equal to `candidate`, otherwise `candidate`.
///
/// Vectors are plain values here, so this only keeps the bit pattern that was
/// already stored (e.g. -0.0 vs 0.0) instead of the freshly computed one.
#[inline]
pub fn intern(candidate: Vector3, existing: &[Vector3]) -> Vector3 {
    existing
        .iter()
        .copied()
        .find(|v| *v == candidate)
        .unwrap_or(candidate)
}
