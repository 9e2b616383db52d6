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

//! Provides the rotation mathematics primitives.
//!
//! This module contains the [`Quaternion`] type and everything needed to build,
//! compose, interpolate and serialize rotations with it, plus the [`Vec3`] and
//! [`Mat3`] types it exchanges data with. All scalars are `f64`: animation code
//! composes and interpolates rotations every frame, and single precision drifts
//! visibly over long sequences.
//!
//! All angular functions in this module operate in **radians** by default, unless
//! explicitly specified otherwise (e.g., `degrees_to_radians`).

// --- Fundamental Constants ---

/// Tolerance of `1e-6`. Used as the near-colinear threshold of spherical interpolation.
pub const EPSILON6: f64 = 1e-6;
/// Tolerance of `1e-11`.
pub const EPSILON11: f64 = 1e-11;
/// Tolerance of `1e-12`.
pub const EPSILON12: f64 = 1e-12;
/// Tolerance of `1e-14`.
pub const EPSILON14: f64 = 1e-14;
/// Tolerance of `1e-15`.
pub const EPSILON15: f64 = 1e-15;

// Re-export standard mathematical constants for convenience.
pub use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f64 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f64 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod matrix;
pub mod quaternion;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::matrix::Mat3;
pub use self::quaternion::{HeadingPitchRoll, Quaternion, SquadSpline, PACKED_LENGTH};
pub use self::vector::Vec3;

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use rota_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use rota_core::math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

/// Clamps a value to a specified minimum and maximum range.
///
/// # Examples
///
/// ```
/// use rota_core::math::clamp;
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min_val: T, max_val: T) -> T {
    if value < min_val {
        min_val
    } else if value > max_val {
        max_val
    } else {
        value
    }
}

/// Computes `acos` after clamping the input to `[-1.0, 1.0]`.
///
/// Dot products of unit quaternions routinely land a few ulps outside the
/// domain of `acos`; clamping keeps the result finite.
///
/// # Examples
///
/// ```
/// use rota_core::math::{acos_clamped, PI};
/// assert_eq!(acos_clamped(1.0000000001), 0.0);
/// assert_eq!(acos_clamped(-2.0), PI);
/// ```
#[inline]
pub fn acos_clamped(value: f64) -> f64 {
    clamp(value, -1.0, 1.0).acos()
}

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// The comparison is inclusive, so an `epsilon` of `0.0` means exact equality.
///
/// # Examples
///
/// ```
/// use rota_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// assert!(approx_eq_eps(3.0, 3.0, 0.0));
/// ```
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}
