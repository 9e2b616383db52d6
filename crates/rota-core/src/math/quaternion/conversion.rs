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

//! Conversions from other rotation representations into [`Quaternion`].

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::Quaternion;
use crate::error::{ensure_finite, MathError, Result};
use crate::math::{degrees_to_radians, Mat3, Vec3};

/// A rotation expressed as three successive angles, in radians.
///
/// Roll turns about the forward axis (+X), pitch about the lateral axis (+Y) and
/// heading about the vertical axis (+Z). Roll is applied first and heading last.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct HeadingPitchRoll {
    /// Rotation about the +Z axis.
    pub heading: f64,
    /// Rotation about the +Y axis.
    pub pitch: f64,
    /// Rotation about the +X axis.
    pub roll: f64,
}

impl HeadingPitchRoll {
    /// Creates a new set of angles, in radians.
    #[inline]
    pub const fn new(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading,
            pitch,
            roll,
        }
    }

    /// Creates a new set of angles from values in degrees.
    #[inline]
    pub fn from_degrees(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading: degrees_to_radians(heading),
            pitch: degrees_to_radians(pitch),
            roll: degrees_to_radians(roll),
        }
    }
}

impl From<HeadingPitchRoll> for Quaternion {
    #[inline]
    fn from(hpr: HeadingPitchRoll) -> Self {
        Quaternion::from_heading_pitch_roll(hpr.heading, hpr.pitch, hpr.roll)
    }
}

impl Quaternion {
    /// Creates a quaternion representing a rotation around a specified axis.
    ///
    /// # Arguments
    /// * `axis`: The axis of rotation. It is normalized internally.
    /// * `angle_radians`: The angle of rotation in radians.
    ///
    /// A zero-length axis yields `(0, 0, 0, cos(angle / 2))`, which is not a unit
    /// quaternion. Use [`Quaternion::try_from_axis_angle`] to reject it instead.
    pub fn from_axis_angle(axis: Vec3, angle_radians: f64) -> Self {
        debug_assert!(
            axis.try_normalize().is_some(),
            "axis must be a non-zero finite vector"
        );
        let normalized_axis = axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::from_parts(normalized_axis * s, c)
    }

    /// Validating form of [`Quaternion::from_axis_angle`].
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] when the axis is zero-length or not
    /// finite, or when the angle is not finite.
    pub fn try_from_axis_angle(axis: Vec3, angle_radians: f64) -> Result<Self> {
        ensure_finite("angle", angle_radians)?;
        let axis = axis.try_normalize().ok_or_else(|| {
            MathError::invalid_argument("axis", "expected a non-zero finite vector")
        })?;
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Ok(Self::from_parts(axis * s, c))
    }

    /// Creates a quaternion from a 3x3 rotation matrix.
    ///
    /// The matrix should be orthonormal. Whichever of `w`, `x`, `y` or `z` has the
    /// largest magnitude is recovered first from the diagonal, so the division that
    /// follows is never by a small number. The result is not renormalized.
    pub fn from_rotation_matrix(m: &Mat3) -> Self {
        let m00 = m.get(0, 0);
        let m11 = m.get(1, 1);
        let m22 = m.get(2, 2);
        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self {
                x: (m.get(2, 1) - m.get(1, 2)) / s,
                y: (m.get(0, 2) - m.get(2, 0)) / s,
                z: (m.get(1, 0) - m.get(0, 1)) / s,
                w: 0.25 * s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self {
                x: 0.25 * s,
                y: (m.get(0, 1) + m.get(1, 0)) / s,
                z: (m.get(0, 2) + m.get(2, 0)) / s,
                w: (m.get(2, 1) - m.get(1, 2)) / s,
            }
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self {
                x: (m.get(0, 1) + m.get(1, 0)) / s,
                y: 0.25 * s,
                z: (m.get(1, 2) + m.get(2, 1)) / s,
                w: (m.get(0, 2) - m.get(2, 0)) / s,
            }
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self {
                x: (m.get(0, 2) + m.get(2, 0)) / s,
                y: (m.get(1, 2) + m.get(2, 1)) / s,
                z: 0.25 * s,
                w: (m.get(1, 0) - m.get(0, 1)) / s,
            }
        }
    }

    /// Creates a quaternion from heading, pitch and roll angles, in radians.
    ///
    /// Composed as `Qz(heading) * Qy(pitch) * Qx(roll)`: roll is applied first and
    /// heading last.
    pub fn from_heading_pitch_roll(heading: f64, pitch: f64, roll: f64) -> Self {
        let roll_q = Self::from_axis_angle(Vec3::X, roll);
        let pitch_q = Self::from_axis_angle(Vec3::Y, pitch);
        let heading_q = Self::from_axis_angle(Vec3::Z, heading);
        heading_q * (pitch_q * roll_q)
    }

    /// Validating form of [`Quaternion::from_heading_pitch_roll`].
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] naming the first non-finite angle.
    pub fn try_from_heading_pitch_roll(heading: f64, pitch: f64, roll: f64) -> Result<Self> {
        ensure_finite("heading", heading)?;
        ensure_finite("pitch", pitch)?;
        ensure_finite("roll", roll)?;
        Ok(Self::from_heading_pitch_roll(heading, pitch, roll))
    }

    /// Writes [`Quaternion::from_axis_angle`] into `result`.
    #[inline]
    pub fn from_axis_angle_into(axis: Vec3, angle_radians: f64, result: &mut Self) -> &mut Self {
        *result = Self::from_axis_angle(axis, angle_radians);
        result
    }

    /// Writes [`Quaternion::from_rotation_matrix`] into `result`.
    #[inline]
    pub fn from_rotation_matrix_into<'a>(m: &Mat3, result: &'a mut Self) -> &'a mut Self {
        *result = Self::from_rotation_matrix(m);
        result
    }

    /// Writes [`Quaternion::from_heading_pitch_roll`] into `result`.
    #[inline]
    pub fn from_heading_pitch_roll_into(
        heading: f64,
        pitch: f64,
        roll: f64,
        result: &mut Self,
    ) -> &mut Self {
        *result = Self::from_heading_pitch_roll(heading, pitch, roll);
        result
    }
}
