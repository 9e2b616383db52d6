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

//! Defines the `Mat3` rotation matrix type and associated operations.

use approx::{AbsDiffEq, RelativeEq};

use super::{Quaternion, Vec3};
use std::ops::{Index, IndexMut, Mul};

/// A 3x3 column-major matrix, used here as the rotation-matrix representation.
///
/// Elements are addressed as `(row, column)` through [`Mat3::get`]; `m[c]` returns
/// column `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// A 3x3 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };

    /// Creates a new matrix from three column vectors.
    #[inline]
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Creates a new matrix from three row vectors.
    ///
    /// This matches the reading order of a matrix written out on paper.
    #[inline]
    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::from_cols(r0, r1, r2).transpose()
    }

    /// Returns the element at `row`, `col`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is greater than 2.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cols[col][row]
    }

    /// Returns a row of the matrix as a `Vec3`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
        )
    }

    /// Creates a matrix for a rotation around the X-axis.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_x(angle_radians: f64) -> Self {
        let (s, c) = angle_radians.sin_cos();
        Self {
            cols: [
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, c, s),
                Vec3::new(0.0, -s, c),
            ],
        }
    }

    /// Creates a matrix for a right-handed rotation around the Y-axis.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_y(angle_radians: f64) -> Self {
        let (s, c) = angle_radians.sin_cos();
        Self {
            cols: [
                Vec3::new(c, 0.0, -s),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(s, 0.0, c),
            ],
        }
    }

    /// Creates a matrix for a rotation around the Z-axis.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_z(angle_radians: f64) -> Self {
        let (s, c) = angle_radians.sin_cos();
        Self {
            cols: [
                Vec3::new(c, s, 0.0),
                Vec3::new(-s, c, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
        }
    }

    /// Creates a rotation matrix from a normalized axis and an angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. Must be a unit vector.
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f64) -> Self {
        let (s, c) = angle_radians.sin_cos();
        let t = 1.0 - c;
        let x = axis.x;
        let y = axis.y;
        let z = axis.z;
        Self {
            cols: [
                Vec3::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y),
                Vec3::new(t * y * x - s * z, t * y * y + c, t * y * z + s * x),
                Vec3::new(t * z * x + s * y, t * z * y - s * x, t * z * z + c),
            ],
        }
    }

    /// Creates a rotation matrix from a unit quaternion.
    ///
    /// The quaternion is used as given; a non-unit input yields a scaled,
    /// non-orthonormal matrix.
    #[inline]
    pub fn from_quat(q: Quaternion) -> Self {
        let x = q.x;
        let y = q.y;
        let z = q.z;
        let w = q.w;
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;
        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Self::from_cols(
            Vec3::new(1.0 - (yy + zz), xy + wz, xz - wy),
            Vec3::new(xy - wz, 1.0 - (xx + zz), yz + wx),
            Vec3::new(xz + wy, yz - wx, 1.0 - (xx + yy)),
        )
    }

    /// Computes the determinant of the matrix.
    ///
    /// A proper rotation matrix has a determinant of 1.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let c0 = self.cols[0];
        let c1 = self.cols[1];
        let c2 = self.cols[2];
        c0.x * (c1.y * c2.z - c2.y * c1.z) - c1.x * (c0.y * c2.z - c2.y * c0.z)
            + c2.x * (c0.y * c1.z - c1.y * c0.z)
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    ///
    /// For a rotation matrix this is also its inverse.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            Vec3::new(self.cols[0].x, self.cols[1].x, self.cols[2].x),
            Vec3::new(self.cols[0].y, self.cols[1].y, self.cols[2].y),
            Vec3::new(self.cols[0].z, self.cols[1].z, self.cols[2].z),
        )
    }
}

// --- Operator Overloads ---

impl Default for Mat3 {
    /// Returns the 3x3 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat3`.
    #[inline]
    fn mul(self, rhs: Mat3) -> Self::Output {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    /// Transforms a `Vec3` by this matrix.
    #[inline]
    fn mul(self, v: Vec3) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl Index<usize> for Mat3 {
    type Output = Vec3;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

impl IndexMut<usize> for Mat3 {
    /// Allows mutably accessing a matrix column by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cols[index]
    }
}

// --- Approximate Comparisons ---

impl AbsDiffEq for Mat3 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat3 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON12, EPSILON14, EPSILON15, PI};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_default() {
        assert_eq!(Mat3::default(), Mat3::IDENTITY);
        let m = Mat3::from_rotation_x(0.3);
        assert_abs_diff_eq!(m * Mat3::IDENTITY, m);
        assert_abs_diff_eq!(Mat3::IDENTITY * m, m);
    }

    #[test]
    fn test_from_rows_and_get() {
        let m = Mat3::from_rows(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.get(2, 2), 9.0);
        assert_eq!(m.row(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m[0], Vec3::new(1.0, 4.0, 7.0));
    }

    #[test]
    fn test_rotations() {
        let angle = PI / 6.0;
        let mx = Mat3::from_rotation_x(angle);
        let my = Mat3::from_rotation_y(angle);
        let mz = Mat3::from_rotation_z(angle);

        let expected_px = Vec3::new(0.0, angle.cos(), angle.sin());
        assert_abs_diff_eq!(mx * Vec3::Y, expected_px, epsilon = EPSILON15);

        let expected_py = Vec3::new(angle.cos(), 0.0, -angle.sin()); // RH
        assert_abs_diff_eq!(my * Vec3::X, expected_py, epsilon = EPSILON15);

        let expected_pz = Vec3::new(angle.cos(), angle.sin(), 0.0);
        assert_abs_diff_eq!(mz * Vec3::X, expected_pz, epsilon = EPSILON15);
    }

    #[test]
    fn test_from_axis_angle_matches_single_axis_rotations() {
        let angle = 0.7;
        assert_abs_diff_eq!(
            Mat3::from_axis_angle(Vec3::X, angle),
            Mat3::from_rotation_x(angle),
            epsilon = EPSILON15
        );
        assert_abs_diff_eq!(
            Mat3::from_axis_angle(Vec3::Y, angle),
            Mat3::from_rotation_y(angle),
            epsilon = EPSILON15
        );
        assert_abs_diff_eq!(
            Mat3::from_axis_angle(Vec3::Z, angle),
            Mat3::from_rotation_z(angle),
            epsilon = EPSILON15
        );
    }

    #[test]
    fn test_from_quat() {
        let axis = Vec3::new(1.0, -2.0, 3.0).normalize();
        let angle = PI / 7.0;
        let q = Quaternion::from_axis_angle(axis, angle);
        let m_from_q = Mat3::from_quat(q);

        assert_abs_diff_eq!(m_from_q, Mat3::from_axis_angle(axis, angle), epsilon = EPSILON12);

        let v = Vec3::new(0.5, 1.0, -0.2);
        assert_abs_diff_eq!(q * v, m_from_q * v, epsilon = EPSILON12);
    }

    #[test]
    fn test_determinant_and_transpose() {
        assert_eq!(Mat3::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3::ZERO.determinant(), 0.0);

        let m = Mat3::from_rotation_y(PI / 5.0) * Mat3::from_rotation_x(0.4);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = EPSILON14);
        assert_abs_diff_eq!(m * m.transpose(), Mat3::IDENTITY, epsilon = EPSILON14);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_mul_mat3() {
        let rot90z = Mat3::from_rotation_z(PI / 2.0);
        let rot180z = rot90z * rot90z;
        assert_abs_diff_eq!(rot180z, Mat3::from_rotation_z(PI), epsilon = EPSILON15);
        assert_abs_diff_eq!(rot90z * Vec3::X, Vec3::Y, epsilon = EPSILON15);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds() {
        let m = Mat3::IDENTITY;
        let _ = m[3];
    }
}
