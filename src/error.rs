//! Errors raised when loading a penalty field.

use crate::geometry::{Dim3, In3D};
use thiserror::Error;

/// Ways in which sampled field data can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PenaltyFieldError {
    #[error("Grid has no samples along the {dim}-dimension")]
    EmptyAxis { dim: Dim3 },

    #[error("Grid scale along the {dim}-dimension must be finite and non-zero, got {scale}")]
    InvalidScale { dim: Dim3, scale: f64 },

    #[error("Number of {quantity} samples does not match grid shape: expected {expected}, got {actual}")]
    SampleCountMismatch {
        quantity: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Grid shape {shape} has too many samples to address")]
    ShapeOverflow { shape: In3D<usize> },

    #[error("Extent {actual} of the {quantity} grid does not match grid shape {expected}")]
    ExtentMismatch {
        quantity: &'static str,
        expected: In3D<usize>,
        actual: In3D<usize>,
    },
}

pub type Result<T> = std::result::Result<T, PenaltyFieldError>;
