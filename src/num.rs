//! Utilities related to numbers.

use std::fmt;

/// Floating point marker trait for easier control over trait bounds.
pub trait BFloat:
    Sync + Send + num::Float + num::cast::FromPrimitive + ieee754::Ieee754 + fmt::Debug
{
}

impl BFloat for f32 {}
impl BFloat for f64 {}

/// Converts a grid size or index into the given floating point type.
///
/// Every `usize` is representable (possibly with rounding) by both `f32` and `f64`,
/// so the conversion falls back to infinity only for exotic float types.
pub fn from_usize<F: BFloat>(value: usize) -> F {
    F::from_usize(value).unwrap_or_else(F::infinity)
}
