// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a Quaternion type for representing 3D rotations.
//!
//! The type itself and its algebra live in this module. Construction from other
//! rotation representations, the log/exp maps, interpolation, packing and the
//! keyframe spline are split into the submodules below, all of them extending
//! the same [`Quaternion`] type.
//!
//! # Result buffers
//!
//! Every operation returns a fresh value. Operations evaluated in per-frame loops
//! also have an `*_into` variant that writes into caller-owned storage and returns
//! a reference to it. Inputs are taken by value, so they are fully read before the
//! output is written and an input variable may be passed as the output:
//!
//! ```
//! use rota_core::math::Quaternion;
//!
//! let mut q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
//! Quaternion::multiply_into(q, Quaternion::new(8.0, 7.0, 6.0, 5.0), &mut q);
//! assert_eq!(q, Quaternion::new(28.0, 56.0, 30.0, -20.0));
//! ```

use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::{acos_clamped, approx_eq_eps, Vec3, EPSILON12};
use crate::error::{MathError, Result};
use std::fmt;
use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};

pub mod conversion;
pub mod fast;
pub mod interpolation;
pub mod manifold;
pub mod packing;
pub mod spline;

pub use self::conversion::HeadingPitchRoll;
pub use self::packing::PACKED_LENGTH;
pub use self::spline::SquadSpline;

/// Below this value of `1 - w²` the half-angle sine is treated as zero and
/// [`Quaternion::compute_axis`] returns the zero vector.
pub const AXIS_EPSILON: f64 = EPSILON12;

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector" part
/// and `w` is the "scalar" part. For representing rotations, it should be a "unit
/// quaternion" where `x² + y² + z² + w² = 1`; `q` and `-q` then describe the same
/// rotation. The type stores arbitrary components, and intermediate results are
/// often not unit length.
///
/// The default value is the all-zero quaternion, which is *not* a rotation. Use
/// [`Quaternion::IDENTITY`] for "no rotation".
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f64,
    /// The y component of the vector part.
    pub y: f64,
    /// The z component of the vector part.
    pub z: f64,
    /// The scalar (real) part.
    pub w: f64,
}

impl Quaternion {
    /// The all-zero quaternion.
    pub const ZERO: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `from_axis_angle` or other rotation-specific constructors.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from a vector part and a scalar part.
    #[inline]
    pub const fn from_parts(vector: Vec3, w: f64) -> Self {
        Self {
            x: vector.x,
            y: vector.y,
            z: vector.z,
            w,
        }
    }

    /// Returns the vector part `(x, y, z)`.
    #[inline]
    pub const fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns the quaternion scaled to a length of 1.
    ///
    /// The caller must guarantee a non-zero magnitude: normalizing the zero
    /// quaternion yields NaN components. See [`Quaternion::try_normalize`].
    #[inline]
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    /// Returns the normalized quaternion, or `None` when the magnitude is zero or
    /// not finite.
    #[inline]
    pub fn try_normalize(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude > 0.0 && magnitude.is_finite() {
            Some(*self / magnitude)
        } else {
            None
        }
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Computes the multiplicative inverse, `conjugate / magnitude_squared`.
    ///
    /// For a unit quaternion, the inverse is equal to its conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.magnitude_squared()
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Computes the Hamilton product `self * rhs`.
    ///
    /// Quaternion multiplication is not commutative. Applied to a vector, the
    /// product rotates by `rhs` first and then by `self`.
    #[inline]
    pub fn multiply(self, rhs: Self) -> Self {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }

    /// Subtracts `rhs` component-wise.
    #[inline]
    pub fn subtract(self, rhs: Self) -> Self {
        self - rhs
    }

    /// Scales all components by `scalar`.
    #[inline]
    pub fn multiply_by_scalar(self, scalar: f64) -> Self {
        debug_assert!(!scalar.is_nan(), "scalar must be a number");
        self * scalar
    }

    /// Divides all components by `scalar`.
    ///
    /// Dividing by zero follows IEEE semantics and yields infinities or NaN. Use
    /// [`Quaternion::checked_divide_by_scalar`] to fail fast instead.
    #[inline]
    pub fn divide_by_scalar(self, scalar: f64) -> Self {
        debug_assert!(!scalar.is_nan(), "scalar must be a number");
        self / scalar
    }

    /// Divides all components by `scalar`, failing when `scalar` is exactly zero.
    ///
    /// # Errors
    /// Returns [`MathError::DivisionByZero`] for a zero divisor and
    /// [`MathError::InvalidArgument`] for a NaN divisor.
    pub fn checked_divide_by_scalar(self, scalar: f64) -> Result<Self> {
        if scalar.is_nan() {
            return Err(MathError::invalid_argument("scalar", "scalar must be a number"));
        }
        if scalar == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(self / scalar)
    }

    /// Negates all components. For a unit quaternion the result is the same rotation.
    #[inline]
    pub fn negate(self) -> Self {
        -self
    }

    /// Computes the rotation axis of a unit quaternion.
    ///
    /// Returns the zero vector when the half-angle sine underflows, which covers
    /// `w >= 1` whatever the vector part holds.
    pub fn compute_axis(&self) -> Vec3 {
        let sin_squared = 1.0 - self.w * self.w;
        if self.w >= 1.0 || sin_squared <= AXIS_EPSILON {
            return Vec3::ZERO;
        }
        self.vector_part() * (1.0 / sin_squared.sqrt())
    }

    /// Computes the rotation angle of a unit quaternion, in radians, in `[0, 2π]`.
    #[inline]
    pub fn compute_angle(&self) -> f64 {
        2.0 * acos_clamped(self.w)
    }

    /// Rotates a 3D vector by this unit quaternion (`q v q*`).
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = self.vector_part();
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Exact component-wise equality between two optional operands.
    ///
    /// If either operand is absent the result is `false`.
    #[inline]
    pub fn equals(left: Option<&Self>, right: Option<&Self>) -> bool {
        matches!((left, right), (Some(left), Some(right)) if left == right)
    }

    /// Component-wise equality within an absolute tolerance.
    ///
    /// Each component may differ by at most `epsilon` (inclusive). If either
    /// operand is absent the result is `false`.
    pub fn equals_epsilon(left: Option<&Self>, right: Option<&Self>, epsilon: f64) -> bool {
        debug_assert!(epsilon >= 0.0, "epsilon must be a non-negative number");
        match (left, right) {
            (Some(left), Some(right)) => {
                approx_eq_eps(left.x, right.x, epsilon)
                    && approx_eq_eps(left.y, right.y, epsilon)
                    && approx_eq_eps(left.z, right.z, epsilon)
                    && approx_eq_eps(left.w, right.w, epsilon)
            }
            _ => false,
        }
    }

    // --- Result-buffer variants ---

    /// Writes `a + b` into `result`.
    #[inline]
    pub fn add_into(a: Self, b: Self, result: &mut Self) -> &mut Self {
        *result = a + b;
        result
    }

    /// Writes `a - b` into `result`.
    #[inline]
    pub fn subtract_into(a: Self, b: Self, result: &mut Self) -> &mut Self {
        *result = a - b;
        result
    }

    /// Writes the Hamilton product `a * b` into `result`.
    #[inline]
    pub fn multiply_into(a: Self, b: Self, result: &mut Self) -> &mut Self {
        *result = a.multiply(b);
        result
    }

    /// Writes `q * scalar` into `result`.
    #[inline]
    pub fn multiply_by_scalar_into(q: Self, scalar: f64, result: &mut Self) -> &mut Self {
        *result = q.multiply_by_scalar(scalar);
        result
    }

    /// Writes `q / scalar` into `result`.
    #[inline]
    pub fn divide_by_scalar_into(q: Self, scalar: f64, result: &mut Self) -> &mut Self {
        *result = q.divide_by_scalar(scalar);
        result
    }

    /// Writes the conjugate of `q` into `result`.
    #[inline]
    pub fn conjugate_into(q: Self, result: &mut Self) -> &mut Self {
        *result = q.conjugate();
        result
    }

    /// Writes the normalized `q` into `result`.
    #[inline]
    pub fn normalize_into(q: Self, result: &mut Self) -> &mut Self {
        *result = q.normalize();
        result
    }

    /// Writes the inverse of `q` into `result`.
    #[inline]
    pub fn inverse_into(q: Self, result: &mut Self) -> &mut Self {
        *result = q.inverse();
        result
    }

    /// Writes `-q` into `result`.
    #[inline]
    pub fn negate_into(q: Self, result: &mut Self) -> &mut Self {
        *result = -q;
        result
    }

    /// Writes the rotation axis of `q` into `result`.
    #[inline]
    pub fn compute_axis_into(q: Self, result: &mut Vec3) -> &mut Vec3 {
        *result = q.compute_axis();
        result
    }
}

// --- Formatting and Conversions ---

impl fmt::Display for Quaternion {
    /// Formats the quaternion as `(x, y, z, w)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl From<[f64; 4]> for Quaternion {
    /// Builds a quaternion from `[x, y, z, w]`.
    #[inline]
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self { x, y, z, w }
    }
}

impl From<Quaternion> for [f64; 4] {
    /// Returns `[x, y, z, w]`.
    #[inline]
    fn from(q: Quaternion) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

// --- Operator Overloads ---

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// Note that quaternion multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// Combines this rotation with another (`self = self * rhs`).
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this unit quaternion.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(rhs)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a standard rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f64) -> Self::Output {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            w: self.w * scalar,
        }
    }
}

impl Div<f64> for Quaternion {
    type Output = Self;
    /// Divides all components of the quaternion by a scalar.
    #[inline]
    fn div(self, scalar: f64) -> Self::Output {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
            w: self.w / scalar,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components of the quaternion.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

// --- Approximate Comparisons ---

// Component-wise: `q` and `-q` are different values here even though they are
// the same rotation.
impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON14, EPSILON15, FRAC_PI_2, PI};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_default_is_zero_and_identity() {
        let q = Quaternion::default();
        assert_eq!(q, Quaternion::ZERO);
        assert_eq!(q, Quaternion::new(0.0, 0.0, 0.0, 0.0));

        let q_ident = Quaternion::IDENTITY;
        assert_eq!(q_ident, Quaternion::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(q_ident.magnitude(), 1.0);
    }

    #[test]
    fn test_construct_with_all_values() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((q.x, q.y, q.z, q.w), (1.0, 2.0, 3.0, 4.0));
        assert_eq!(q.vector_part(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Quaternion::from_parts(Vec3::new(1.0, 2.0, 3.0), 4.0), q);
    }

    #[test]
    fn test_conjugate() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugate(), Quaternion::new(-1.0, -2.0, -3.0, 4.0));

        let mut result = Quaternion::ZERO;
        let returned = Quaternion::conjugate_into(q, &mut result);
        assert_eq!(*returned, Quaternion::new(-1.0, -2.0, -3.0, 4.0));
        assert_eq!(result, Quaternion::new(-1.0, -2.0, -3.0, 4.0));
    }

    #[test]
    fn test_conjugate_into_aliased_input() {
        let mut q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        Quaternion::conjugate_into(q, &mut q);
        assert_eq!(q, Quaternion::new(-1.0, -2.0, -3.0, 4.0));
    }

    #[test]
    fn test_magnitude() {
        let q = Quaternion::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(q.magnitude_squared(), 54.0);
        assert_eq!(q.magnitude(), 54.0_f64.sqrt());
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert_eq!(q.normalize(), Quaternion::new(1.0, 0.0, 0.0, 0.0));

        let mut q_alias = q;
        Quaternion::normalize_into(q_alias, &mut q_alias);
        assert_eq!(q_alias, Quaternion::new(1.0, 0.0, 0.0, 0.0));

        let q_non_unit = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_relative_eq!(q_non_unit.normalize().magnitude(), 1.0, epsilon = EPSILON15);
    }

    #[test]
    fn test_normalize_zero_quaternion() {
        let q_norm = Quaternion::ZERO.normalize();
        assert!(q_norm.x.is_nan() && q_norm.w.is_nan());
        assert!(Quaternion::ZERO.try_normalize().is_none());
        assert_eq!(
            Quaternion::new(0.0, 0.0, 0.0, 3.0).try_normalize(),
            Some(Quaternion::IDENTITY)
        );
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::new(2.0, 3.0, 4.0, 5.0);
        let m = q.magnitude_squared();
        let expected = Quaternion::new(-2.0 / m, -3.0 / m, -4.0 / m, 5.0 / m);
        assert_eq!(q.inverse(), expected);

        let mut q_alias = q;
        Quaternion::inverse_into(q_alias, &mut q_alias);
        assert_eq!(q_alias, expected);

        assert_abs_diff_eq!(q * q.inverse(), Quaternion::IDENTITY, epsilon = EPSILON14);
        assert_abs_diff_eq!(q.inverse() * q, Quaternion::IDENTITY, epsilon = EPSILON14);
    }

    #[test]
    fn test_inverse_of_unit_is_conjugate() {
        let q = Quaternion::new(-0.4, 1.3, 2.2, 0.7).normalize();
        assert_abs_diff_eq!(q.inverse(), q.conjugate(), epsilon = EPSILON14);
    }

    #[test]
    fn test_dot() {
        let left = Quaternion::new(2.0, 3.0, 6.0, 8.0);
        let right = Quaternion::new(4.0, 5.0, 7.0, 9.0);
        assert_eq!(left.dot(right), 137.0);
    }

    #[test]
    fn test_multiply() {
        let left = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let right = Quaternion::new(8.0, 7.0, 6.0, 5.0);
        let expected = Quaternion::new(28.0, 56.0, 30.0, -20.0);
        assert_eq!(left.multiply(right), expected);
        assert_eq!(left * right, expected);

        let mut result = Quaternion::ZERO;
        assert_eq!(*Quaternion::multiply_into(left, right, &mut result), expected);

        let mut left_alias = left;
        Quaternion::multiply_into(left_alias, right, &mut left_alias);
        assert_eq!(left_alias, expected);

        let mut q = left;
        q *= right;
        assert_eq!(q, expected);
    }

    #[test]
    fn test_multiply_is_associative_not_commutative() {
        let a = Quaternion::new(0.1, -0.7, 0.3, 0.9);
        let b = Quaternion::new(1.5, 0.2, -0.4, 0.3);
        let c = Quaternion::new(-0.6, 0.8, 1.1, -0.2);
        assert_abs_diff_eq!((a * b) * c, a * (b * c), epsilon = EPSILON14);
        assert!(!(a * b).abs_diff_eq(&(b * a), 1e-3));
    }

    #[test]
    fn test_add_and_subtract() {
        let left = Quaternion::new(2.0, 3.0, 6.0, 8.0);
        let right = Quaternion::new(4.0, 5.0, 7.0, 9.0);
        assert_eq!(left + right, Quaternion::new(6.0, 8.0, 13.0, 17.0));

        let mut left_alias = left;
        Quaternion::add_into(left_alias, right, &mut left_alias);
        assert_eq!(left_alias, Quaternion::new(6.0, 8.0, 13.0, 17.0));

        let left = Quaternion::new(2.0, 3.0, 4.0, 8.0);
        let right = Quaternion::new(1.0, 5.0, 7.0, 9.0);
        assert_eq!(left.subtract(right), Quaternion::new(1.0, -2.0, -3.0, -1.0));

        let mut result = Quaternion::ZERO;
        Quaternion::subtract_into(left, right, &mut result);
        assert_eq!(result, Quaternion::new(1.0, -2.0, -3.0, -1.0));
    }

    #[test]
    fn test_scalar_multiply_and_divide() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.multiply_by_scalar(2.0), Quaternion::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(q.divide_by_scalar(2.0), Quaternion::new(0.5, 1.0, 1.5, 2.0));

        let mut q_alias = q;
        Quaternion::multiply_by_scalar_into(q_alias, 2.0, &mut q_alias);
        assert_eq!(q_alias, Quaternion::new(2.0, 4.0, 6.0, 8.0));

        let mut q_alias = q;
        Quaternion::divide_by_scalar_into(q_alias, 2.0, &mut q_alias);
        assert_eq!(q_alias, Quaternion::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn test_divide_by_zero() {
        let q = Quaternion::new(1.0, -2.0, 0.0, 4.0);
        let r = q.divide_by_scalar(0.0);
        assert_eq!(r.x, f64::INFINITY);
        assert_eq!(r.y, f64::NEG_INFINITY);
        assert!(r.z.is_nan());

        assert_eq!(q.checked_divide_by_scalar(0.0), Err(MathError::DivisionByZero));
        assert!(matches!(
            q.checked_divide_by_scalar(f64::NAN),
            Err(MathError::InvalidArgument { name: "scalar", .. })
        ));
        assert_eq!(
            q.checked_divide_by_scalar(2.0),
            Ok(Quaternion::new(0.5, -1.0, 0.0, 2.0))
        );
    }

    #[test]
    fn test_negate() {
        let q = Quaternion::new(1.0, -2.0, -5.0, 4.0);
        assert_eq!(q.negate(), Quaternion::new(-1.0, 2.0, 5.0, -4.0));
        assert_eq!(-q, q.negate());

        let mut q_alias = q;
        Quaternion::negate_into(q_alias, &mut q_alias);
        assert_eq!(q_alias, Quaternion::new(-1.0, 2.0, 5.0, -4.0));
    }

    #[test]
    fn test_compute_axis() {
        // 60 degrees keeps the sine and cosine of the half angle distinct.
        let angle = PI / 3.0;
        let (sin, cos) = (angle / 2.0).sin_cos();
        let expected = Vec3::new(2.0, 3.0, 6.0).normalize();
        let q = Quaternion::from_parts(expected * sin, cos);
        assert_abs_diff_eq!(q.compute_axis(), expected, epsilon = EPSILON14);

        let mut result = Vec3::ZERO;
        Quaternion::compute_axis_into(q, &mut result);
        assert_abs_diff_eq!(result, expected, epsilon = EPSILON14);
    }

    #[test]
    fn test_compute_axis_is_zero_when_w_is_one() {
        let q = Quaternion::new(4.0, 2.0, 3.0, 1.0);
        let mut result = Vec3::new(1.0, 2.0, 3.0);
        Quaternion::compute_axis_into(q, &mut result);
        assert_eq!(result, Vec3::ZERO);

        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, -1.0).compute_axis(), Vec3::ZERO);
        assert_eq!(Quaternion::new(1.0, 1.0, 1.0, 7.0).compute_axis(), Vec3::ZERO);
    }

    #[test]
    fn test_compute_angle() {
        let angle = PI / 3.0;
        let (sin, cos) = (angle / 2.0).sin_cos();
        let axis = Vec3::new(2.0, 3.0, 6.0).normalize();
        let q = Quaternion::from_parts(axis * sin, cos);
        assert_abs_diff_eq!(q.compute_angle(), angle, epsilon = EPSILON14);

        assert_eq!(Quaternion::IDENTITY.compute_angle(), 0.0);
        // Slightly out of domain from accumulated rounding.
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 1.0 + f64::EPSILON).compute_angle(), 0.0);
        assert_relative_eq!(
            Quaternion::new(0.0, 0.0, 0.0, -1.0).compute_angle(),
            2.0 * PI,
            epsilon = EPSILON14
        );
    }

    #[test]
    fn test_rotate_vec3_and_operator() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let v_expected = Vec3::new(0.0, 0.0, -1.0);
        assert_abs_diff_eq!(q.rotate_vec3(Vec3::X), v_expected, epsilon = EPSILON14);
        assert_abs_diff_eq!(q * Vec3::X, v_expected, epsilon = EPSILON14);
    }

    #[test]
    fn test_multiplication_composition_order() {
        let rot_y = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let rot_x = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
        let combined = rot_x * rot_y; // Y then X

        let v_after_y = rot_y * Vec3::Z;
        let v_after_y_then_x = rot_x * v_after_y;
        assert_abs_diff_eq!(v_after_y_then_x, Vec3::X, epsilon = EPSILON14);
        assert_abs_diff_eq!(combined * Vec3::Z, v_after_y_then_x, epsilon = EPSILON14);
    }

    #[test]
    fn test_equals() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let same = Some(&q);
        assert!(Quaternion::equals(same, Some(&Quaternion::new(1.0, 2.0, 3.0, 4.0))));
        assert!(!Quaternion::equals(same, Some(&Quaternion::new(2.0, 2.0, 3.0, 4.0))));
        assert!(!Quaternion::equals(same, Some(&Quaternion::new(2.0, 1.0, 3.0, 4.0))));
        assert!(!Quaternion::equals(same, Some(&Quaternion::new(1.0, 2.0, 4.0, 4.0))));
        assert!(!Quaternion::equals(same, Some(&Quaternion::new(1.0, 2.0, 3.0, 5.0))));
    }

    #[test]
    fn test_equals_with_absent_operand() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert!(!Quaternion::equals(Some(&q), None));
        assert!(!Quaternion::equals(None, Some(&q)));
        assert!(!Quaternion::equals(None, None));
        assert!(!Quaternion::equals_epsilon(Some(&q), None, 1.0));
        assert!(!Quaternion::equals_epsilon(None, Some(&q), 1.0));
        assert!(!Quaternion::equals_epsilon(None, None, 1.0));
    }

    #[test]
    fn test_equals_epsilon() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let eq = |other: Quaternion, epsilon: f64| {
            Quaternion::equals_epsilon(Some(&q), Some(&other), epsilon)
        };
        assert!(eq(Quaternion::new(1.0, 2.0, 3.0, 4.0), 0.0));
        assert!(eq(Quaternion::new(1.0, 2.0, 3.0, 4.0), 1.0));
        assert!(eq(Quaternion::new(2.0, 2.0, 3.0, 4.0), 1.0));
        assert!(eq(Quaternion::new(1.0, 3.0, 3.0, 4.0), 1.0));
        assert!(eq(Quaternion::new(1.0, 2.0, 4.0, 4.0), 1.0));
        assert!(eq(Quaternion::new(1.0, 2.0, 3.0, 5.0), 1.0));
        assert!(!eq(Quaternion::new(2.0, 2.0, 3.0, 4.0), 0.99999));
        assert!(!eq(Quaternion::new(1.0, 3.0, 3.0, 4.0), 0.99999));
        assert!(!eq(Quaternion::new(1.0, 2.0, 4.0, 4.0), 0.99999));
        assert!(!eq(Quaternion::new(1.0, 2.0, 3.0, 5.0), 0.99999));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "epsilon must be a non-negative number")]
    fn test_equals_epsilon_rejects_nan_epsilon() {
        let q = Quaternion::IDENTITY;
        Quaternion::equals_epsilon(Some(&q), Some(&q), f64::NAN);
    }

    #[test]
    fn test_display() {
        let q = Quaternion::new(1.123, 2.345, 6.789, 6.123);
        assert_eq!(q.to_string(), "(1.123, 2.345, 6.789, 6.123)");
    }

    #[test]
    fn test_array_conversions() {
        let q = Quaternion::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(q, Quaternion::new(1.0, 2.0, 3.0, 4.0));
        let array: [f64; 4] = q.into();
        assert_eq!(array, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_bincode_encoding() {
        let q = Quaternion::new(0.25, -0.5, 0.75, 0.125);
        let config = bincode::config::standard();
        let bytes = bincode::encode_to_vec(q, config).expect("encoding should succeed");
        let (decoded, read): (Quaternion, usize) =
            bincode::decode_from_slice(&bytes, config).expect("decoding should succeed");
        assert_eq!(decoded, q);
        assert_eq!(read, bytes.len());
    }
}
