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

//! Flat-buffer layout for quaternions.
//!
//! A quaternion occupies [`PACKED_LENGTH`] consecutive slots, in `x, y, z, w`
//! order. Packed arrays of quaternions use the same stride with no padding, which
//! is also the in-memory layout of `[Quaternion]`.

use super::Quaternion;
use crate::error::{MathError, Result};

/// The number of `f64` slots used to pack a quaternion.
pub const PACKED_LENGTH: usize = 4;

/// Returns the end of the `slots`-long range starting at `offset`, or
/// [`MathError::BufferTooSmall`] if it does not fit in `actual` slots.
fn packed_end(offset: usize, slots: usize, actual: usize) -> Result<usize> {
    match offset.checked_add(slots) {
        Some(end) if end <= actual => Ok(end),
        end => Err(MathError::BufferTooSmall {
            required: end.unwrap_or(usize::MAX),
            actual,
        }),
    }
}

impl Quaternion {
    /// Stores the quaternion into `array`, starting at `starting_index`.
    ///
    /// # Errors
    /// Returns [`MathError::BufferTooSmall`] when fewer than [`PACKED_LENGTH`]
    /// slots are available from `starting_index`. Nothing is written then.
    pub fn pack(&self, array: &mut [f64], starting_index: usize) -> Result<()> {
        let end = packed_end(starting_index, PACKED_LENGTH, array.len())?;
        array[starting_index..end].copy_from_slice(&[self.x, self.y, self.z, self.w]);
        Ok(())
    }

    /// Retrieves a quaternion from `array`, starting at `starting_index`.
    ///
    /// # Errors
    /// Returns [`MathError::BufferTooSmall`] when fewer than [`PACKED_LENGTH`]
    /// slots are available from `starting_index`.
    pub fn unpack(array: &[f64], starting_index: usize) -> Result<Self> {
        packed_end(starting_index, PACKED_LENGTH, array.len())?;
        Ok(Self {
            x: array[starting_index],
            y: array[starting_index + 1],
            z: array[starting_index + 2],
            w: array[starting_index + 3],
        })
    }

    /// Writes [`Quaternion::unpack`] into `result`. `result` is left untouched on error.
    pub fn unpack_into<'a>(
        array: &[f64],
        starting_index: usize,
        result: &'a mut Self,
    ) -> Result<&'a mut Self> {
        *result = Self::unpack(array, starting_index)?;
        Ok(result)
    }

    /// Stores every quaternion of `quaternions` into `array`, back to back,
    /// starting at `starting_index`.
    ///
    /// # Errors
    /// Returns [`MathError::BufferTooSmall`] when the whole run does not fit.
    pub fn pack_slice(
        quaternions: &[Quaternion],
        array: &mut [f64],
        starting_index: usize,
    ) -> Result<()> {
        let flat: &[f64] = bytemuck::cast_slice(quaternions);
        let end = packed_end(starting_index, flat.len(), array.len())?;
        array[starting_index..end].copy_from_slice(flat);
        Ok(())
    }

    /// Views a packed array as a slice of quaternions, without copying.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidArgument`] when the length of `array` is not a
    /// multiple of [`PACKED_LENGTH`].
    pub fn unpack_slice(array: &[f64]) -> Result<&[Quaternion]> {
        bytemuck::try_cast_slice(array).map_err(|e| {
            MathError::invalid_argument(
                "array",
                format!("cannot view {} slots as quaternions: {e:?}", array.len()),
            )
        })
    }
}
