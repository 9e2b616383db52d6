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

//! # Rota Core
//!
//! Quaternion algebra for representing, composing, converting and interpolating
//! 3D rotations, together with the small vector and matrix types it exchanges
//! data with.
//!
//! ```
//! use rota_core::{Quaternion, Vec3};
//!
//! let quarter_turn = Quaternion::from_axis_angle(Vec3::Z, std::f64::consts::FRAC_PI_2);
//! let rotated = quarter_turn * Vec3::X;
//! assert!((rotated - Vec3::Y).length() < 1e-12);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod math;

pub use error::{MathError, Result};
pub use math::{HeadingPitchRoll, Mat3, Quaternion, SquadSpline, Vec3};
