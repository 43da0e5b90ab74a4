//! The `penalty_field` crate provides sampled obstacle penalty fields for
//! gradient-based trajectory optimization.
//!
//! A [`field::PenaltyField`] stores penalty values and penalty gradients on a
//! regular grid placed in world space, and evaluates both at arbitrary points by
//! trilinear interpolation. Points outside the strict interior of the grid have
//! zero penalty and zero gradient.

pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod interpolation;
pub mod num;

pub use error::{PenaltyFieldError, Result};
pub use field::PenaltyField;
