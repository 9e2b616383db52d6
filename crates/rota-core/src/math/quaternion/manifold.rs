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

//! Logarithm and exponential maps between unit quaternions and rotation vectors.
//!
//! `log` takes a unit quaternion to the tangent space at the identity, where it is
//! the vector `axis * angle / 2`. `exp` goes back. Spline tangents are averaged in
//! that flat space.

use super::Quaternion;
use crate::math::{acos_clamped, Vec3, EPSILON15};

/// Half-angles below this use a Taylor series instead of dividing by `sin`.
pub const SMALL_ANGLE: f64 = 1e-4;

/// Vector-part magnitudes below this make [`Quaternion::log`] return zero.
pub const LOG_FLOOR: f64 = EPSILON15;

impl Quaternion {
    /// Computes the logarithm of a unit quaternion as the rotation vector
    /// `axis * angle / 2`.
    ///
    /// Returns the zero vector when `|w| >= 1` or the vector part is shorter than
    /// [`LOG_FLOOR`]; the axis is undefined there.
    pub fn log(&self) -> Vec3 {
        let v = self.vector_part();
        if self.w.abs() >= 1.0 || v.length() < LOG_FLOOR {
            log::trace!("Quaternion::log at the identity, returning the zero vector");
            return Vec3::ZERO;
        }

        let theta = acos_clamped(self.w);
        let scale = if theta < SMALL_ANGLE {
            1.0 + theta * theta / 6.0
        } else {
            theta / theta.sin()
        };
        v * scale
    }

    /// Computes the exponential of a rotation vector, the inverse of [`Quaternion::log`].
    ///
    /// With `theta = |v|`, the result is `(sin(theta) / theta * v, cos(theta))`.
    pub fn exp(v: Vec3) -> Self {
        let theta = v.length();
        let sinc = if theta < SMALL_ANGLE {
            1.0 - theta * theta / 6.0
        } else {
            theta.sin() / theta
        };
        Self::from_parts(v * sinc, theta.cos())
    }

    /// Writes the logarithm of `q` into `result`.
    #[inline]
    pub fn log_into(q: Self, result: &mut Vec3) -> &mut Vec3 {
        *result = q.log();
        result
    }

    /// Writes the exponential of `v` into `result`.
    #[inline]
    pub fn exp_into(v: Vec3, result: &mut Self) -> &mut Self {
        *result = Self::exp(v);
        result
    }
}
