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

//! Linear, spherical and spherical-quadrangle interpolation between quaternions.
//!
//! None of these functions clamp `t`: values outside `[0, 1]` extrapolate.

use super::Quaternion;
use crate::math::EPSILON6;

/// When `1 - |dot(start, end)|` is below this, spherical interpolation falls back
/// to [`Quaternion::lerp`].
pub const SLERP_LERP_THRESHOLD: f64 = EPSILON6;

/// Returns the exact slerp weights `(sin((1 - t)θ) / sin θ, sin(tθ) / sin θ)`
/// for `cos θ = cos_theta`.
#[inline]
pub(super) fn slerp_weights(cos_theta: f64, t: f64) -> (f64, f64) {
    let theta = cos_theta.acos();
    let inv_sin_theta = 1.0 / theta.sin();
    (
        ((1.0 - t) * theta).sin() * inv_sin_theta,
        (t * theta).sin() * inv_sin_theta,
    )
}

impl Quaternion {
    /// Linearly interpolates between two quaternions, component-wise.
    ///
    /// The result is not normalized.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f64) -> Self {
        debug_assert!(!t.is_nan(), "t must be a number");
        start + (end - start) * t
    }

    /// Performs Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Slerp provides a smooth, constant-speed interpolation between two rotations,
    /// following the shortest path on the surface of a 4D sphere.
    ///
    /// # Arguments
    /// * `start`: The starting quaternion (at t=0.0).
    /// * `end`: The ending quaternion (at t=1.0).
    /// * `t`: The interpolation factor.
    pub fn slerp(start: Self, end: Self, t: f64) -> Self {
        debug_assert!(!t.is_nan(), "t must be a number");
        let mut cos_theta = start.dot(end);
        let mut end_adjusted = end;

        // If the dot product is negative, slerp won't take the shorter path.
        if cos_theta < 0.0 {
            end_adjusted = -end;
            cos_theta = -cos_theta;
        }

        // Nearly colinear: sin(theta) is too small to divide by.
        if 1.0 - cos_theta < SLERP_LERP_THRESHOLD {
            log::trace!("slerp endpoints are nearly colinear, falling back to lerp");
            return Self::lerp(start, end_adjusted, t);
        }

        let (scale_start, scale_end) = slerp_weights(cos_theta, t);
        start * scale_start + end_adjusted * scale_end
    }

    /// Computes the inner quadrangle point used as a tangent control by
    /// [`Quaternion::squad`] between `q0 -> q1 -> q2`.
    ///
    /// The result is `q1 * exp(-(log(q1⁻¹ q0) + log(q1⁻¹ q2)) / 4)`.
    pub fn compute_inner_quadrangle(q0: Self, q1: Self, q2: Self) -> Self {
        let q1_inv = q1.inverse();
        let log_prev = (q1_inv * q0).log();
        let log_next = (q1_inv * q2).log();
        let tangent = (log_prev + log_next) * -0.25;
        q1 * Self::exp(tangent)
    }

    /// Spherical quadrangle interpolation between `q1` and `q2`, with `s1` and `s2`
    /// the inner quadrangle points from [`Quaternion::compute_inner_quadrangle`].
    pub fn squad(q1: Self, q2: Self, s1: Self, s2: Self, t: f64) -> Self {
        let slerp_q = Self::slerp(q1, q2, t);
        let slerp_s = Self::slerp(s1, s2, t);
        Self::slerp(slerp_q, slerp_s, 2.0 * t * (1.0 - t))
    }

    /// Writes [`Quaternion::lerp`] into `result`.
    #[inline]
    pub fn lerp_into(start: Self, end: Self, t: f64, result: &mut Self) -> &mut Self {
        *result = Self::lerp(start, end, t);
        result
    }

    /// Writes [`Quaternion::slerp`] into `result`.
    #[inline]
    pub fn slerp_into(start: Self, end: Self, t: f64, result: &mut Self) -> &mut Self {
        *result = Self::slerp(start, end, t);
        result
    }

    /// Writes [`Quaternion::compute_inner_quadrangle`] into `result`.
    #[inline]
    pub fn compute_inner_quadrangle_into(
        q0: Self,
        q1: Self,
        q2: Self,
        result: &mut Self,
    ) -> &mut Self {
        *result = Self::compute_inner_quadrangle(q0, q1, q2);
        result
    }

    /// Writes [`Quaternion::squad`] into `result`.
    #[inline]
    pub fn squad_into(
        q1: Self,
        q2: Self,
        s1: Self,
        s2: Self,
        t: f64,
        result: &mut Self,
    ) -> &mut Self {
        *result = Self::squad(q1, q2, s1, s2, t);
        result
    }
}
