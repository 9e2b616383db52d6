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

//! Polynomial approximations of [`Quaternion::slerp`] and [`Quaternion::squad`].
//!
//! The slerp weights `sin(tθ) / sin θ` are expanded as a series in `x = cos θ`
//! (D. Eberly, "A Fast and Accurate Algorithm for Computing SLERP"). Eight terms
//! are kept, with the last one scaled by a correction factor.
//!
//! The truncation error grows as `x` falls: it passes `1e-6` near `x = 0.53` and
//! reaches about `4e-5` close to `x = 0`. Below [`FAST_SLERP_MIN_DOT`] the exact
//! weights are used instead, which keeps the error under `5e-7` for unit inputs
//! and every `t` in `[0, 1]`. Above it no `sin` or `acos` is evaluated.

use super::interpolation::{slerp_weights, SLERP_LERP_THRESHOLD};
use super::Quaternion;

/// Below this `|dot(start, end)|`, [`Quaternion::fast_slerp`] switches to the
/// exact slerp weights. That is a rotation of about 106° between the endpoints.
pub const FAST_SLERP_MIN_DOT: f64 = 0.6;

/// Correction factor applied to the last term of the series.
const OPMU: f64 = 1.901_107_453_517_3;

/// `u[i] = 1 / (s (2s + 1))` with `s = i + 1`, last term corrected.
const U: [f64; 8] = [
    1.0 / 3.0,
    1.0 / 10.0,
    1.0 / 21.0,
    1.0 / 36.0,
    1.0 / 55.0,
    1.0 / 78.0,
    1.0 / 105.0,
    OPMU / 136.0,
];

/// `v[i] = s / (2s + 1)` with `s = i + 1`, last term corrected.
const V: [f64; 8] = [
    1.0 / 3.0,
    2.0 / 5.0,
    3.0 / 7.0,
    4.0 / 9.0,
    5.0 / 11.0,
    6.0 / 13.0,
    7.0 / 15.0,
    OPMU * 8.0 / 17.0,
];

/// Evaluates `1 + b0 (1 + b1 (... (1 + b7)))` with `b[i] = (u[i] t² - v[i]) (x - 1)`.
#[inline]
fn series(t_squared: f64, x_minus_one: f64) -> f64 {
    let mut acc = 1.0;
    for i in (0..U.len()).rev() {
        acc = 1.0 + (U[i] * t_squared - V[i]) * x_minus_one * acc;
    }
    acc
}

impl Quaternion {
    /// Approximates [`Quaternion::slerp`] without trigonometric calls.
    ///
    /// Takes the same shortest-arc and near-colinear branches as the exact
    /// version and agrees with it to within `5e-7` for unit inputs and `t` in
    /// `[0, 1]`. Endpoints further apart than [`FAST_SLERP_MIN_DOT`] use the
    /// exact weights.
    pub fn fast_slerp(start: Self, end: Self, t: f64) -> Self {
        debug_assert!(!t.is_nan(), "t must be a number");
        let mut x = start.dot(end);
        let mut end_adjusted = end;
        if x < 0.0 {
            end_adjusted = -end;
            x = -x;
        }

        if 1.0 - x < SLERP_LERP_THRESHOLD {
            log::trace!("fast_slerp endpoints are nearly colinear, falling back to lerp");
            return Self::lerp(start, end_adjusted, t);
        }

        let (scale_start, scale_end) = if x < FAST_SLERP_MIN_DOT {
            slerp_weights(x, t)
        } else {
            let x_minus_one = x - 1.0;
            let d = 1.0 - t;
            (d * series(d * d, x_minus_one), t * series(t * t, x_minus_one))
        };
        start * scale_start + end_adjusted * scale_end
    }

    /// Approximates [`Quaternion::squad`] using [`Quaternion::fast_slerp`].
    pub fn fast_squad(q1: Self, q2: Self, s1: Self, s2: Self, t: f64) -> Self {
        let slerp_q = Self::fast_slerp(q1, q2, t);
        let slerp_s = Self::fast_slerp(s1, s2, t);
        Self::fast_slerp(slerp_q, slerp_s, 2.0 * t * (1.0 - t))
    }

    /// Writes [`Quaternion::fast_slerp`] into `result`.
    #[inline]
    pub fn fast_slerp_into(start: Self, end: Self, t: f64, result: &mut Self) -> &mut Self {
        *result = Self::fast_slerp(start, end, t);
        result
    }

    /// Writes [`Quaternion::fast_squad`] into `result`.
    #[inline]
    pub fn fast_squad_into(
        q1: Self,
        q2: Self,
        s1: Self,
        s2: Self,
        t: f64,
        result: &mut Self,
    ) -> &mut Self {
        *result = Self::fast_squad(q1, q2, s1, s2, t);
        result
    }
}
