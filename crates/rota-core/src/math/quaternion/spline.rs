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

//! A keyframed rotation track interpolated with [`Quaternion::squad`].

use super::Quaternion;
use crate::error::{ensure_finite, MathError, Result};

type Interpolator = fn(Quaternion, Quaternion, Quaternion, Quaternion, f64) -> Quaternion;

/// A smooth rotation spline through timed keyframes.
///
/// Keyframes are stored sorted by time, each one sign-flipped into the hemisphere
/// of its predecessor so every segment takes the short arc. One inner quadrangle
/// point per keyframe is computed up front; the first and last keyframes reuse
/// themselves as their missing neighbour.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadSpline {
    keyframes: Vec<(f64, Quaternion)>,
    inner: Vec<Quaternion>,
}

impl SquadSpline {
    /// Builds a spline from `(time, rotation)` pairs, given in any order.
    ///
    /// Rotations should be unit quaternions.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] when `keyframes` is empty, when a
    /// time or a rotation component is not finite, or when two keyframes share
    /// the same time.
    pub fn new(mut keyframes: Vec<(f64, Quaternion)>) -> Result<Self> {
        if keyframes.is_empty() {
            return Err(MathError::invalid_argument(
                "keyframes",
                "at least one keyframe is required",
            ));
        }
        for &(time, rotation) in &keyframes {
            ensure_finite("time", time)?;
            if !rotation.is_finite() {
                return Err(MathError::invalid_argument(
                    "rotation",
                    format!("expected finite components, got {rotation}"),
                ));
            }
        }

        if !keyframes.windows(2).all(|pair| pair[0].0 <= pair[1].0) {
            log::warn!(
                "SquadSpline received {} keyframes out of time order, sorting them",
                keyframes.len()
            );
            keyframes.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        if let Some(pair) = keyframes.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(MathError::invalid_argument(
                "time",
                format!("duplicate keyframe time {}", pair[0].0),
            ));
        }

        for i in 1..keyframes.len() {
            let prev = keyframes[i - 1].1;
            if prev.dot(keyframes[i].1) < 0.0 {
                keyframes[i].1 = -keyframes[i].1;
            }
        }

        let last = keyframes.len() - 1;
        let inner = (0..keyframes.len())
            .map(|i| {
                let prev = keyframes[i.saturating_sub(1)].1;
                let next = keyframes[(i + 1).min(last)].1;
                Quaternion::compute_inner_quadrangle(prev, keyframes[i].1, next)
            })
            .collect();

        Ok(Self { keyframes, inner })
    }

    /// Samples the spline at `time` using [`Quaternion::squad`].
    ///
    /// Times before the first keyframe or after the last one are clamped. `time`
    /// must not be NaN.
    pub fn evaluate(&self, time: f64) -> Quaternion {
        self.sample(time, Quaternion::squad)
    }

    /// Samples the spline at `time` using [`Quaternion::fast_squad`].
    pub fn evaluate_fast(&self, time: f64) -> Quaternion {
        self.sample(time, Quaternion::fast_squad)
    }

    fn sample(&self, time: f64, interpolate: Interpolator) -> Quaternion {
        debug_assert!(!time.is_nan(), "time must be a number");
        // Release builds map a NaN time to the first keyframe.
        let (first_time, first) = self.keyframes[0];
        let (last_time, last) = self.keyframes[self.keyframes.len() - 1];
        if time.is_nan() || time <= first_time {
            return first;
        }
        if time >= last_time {
            return last;
        }

        // first_time < time < last_time, so 1 <= segment end <= len - 1.
        let i = self.keyframes.partition_point(|&(t, _)| t <= time) - 1;
        let (t0, q0) = self.keyframes[i];
        let (t1, q1) = self.keyframes[i + 1];
        let t = (time - t0) / (t1 - t0);
        interpolate(q0, q1, self.inner[i], self.inner[i + 1], t)
    }

    /// Returns the number of keyframes.
    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always `false`: a spline holds at least one keyframe.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Returns the keyframes, sorted by time and hemisphere-aligned.
    #[inline]
    pub fn keyframes(&self) -> &[(f64, Quaternion)] {
        &self.keyframes
    }

    /// Returns the time of the first keyframe.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.keyframes[0].0
    }

    /// Returns the time of the last keyframe.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.keyframes[self.keyframes.len() - 1].0
    }
}
