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

//! Defines the error type returned by the fallible math entry points.
//!
//! Numeric degeneracies (a near-colinear slerp, the logarithm at the identity,
//! ...) are not errors: they are handled by explicit branches in the math code.
//! A [`MathError`] is only produced when a caller breaks the contract of a
//! `try_*`/`checked_*` constructor or of the packing functions.

use std::fmt;

/// An error raised when a math operation is called with arguments that violate its contract.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// An argument was outside the domain accepted by the operation.
    InvalidArgument {
        /// The name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A fail-fast division was asked to divide by exactly zero.
    DivisionByZero,
    /// A flat buffer is too short for the requested packing operation.
    BufferTooSmall {
        /// The minimum number of slots the operation needs.
        required: usize,
        /// The number of slots the buffer actually has.
        actual: usize,
    },
}

impl MathError {
    /// Builds an [`MathError::InvalidArgument`] for the parameter `name`.
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        MathError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::InvalidArgument { name, reason } => {
                write!(f, "Invalid argument '{name}': {reason}")
            }
            MathError::DivisionByZero => write!(f, "Division by zero"),
            MathError::BufferTooSmall { required, actual } => {
                write!(
                    f,
                    "Buffer too small: {required} slots required, {actual} available"
                )
            }
        }
    }
}

impl std::error::Error for MathError {}

/// A specialized `Result` type for fallible math operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Fails with [`MathError::InvalidArgument`] unless `value` is a finite number.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MathError::invalid_argument(
            name,
            format!("expected a finite number, got {value}"),
        ))
    }
}
