//! Interpolation of scalar and vector samples on regular grids.

pub mod trilinear;

use crate::{
    geometry::{Point3, Vec3},
    grid::GridPointQuery3,
    num::BFloat,
};
use ndarray::prelude::*;

/// Defines the operations a sample type must support in order to be interpolated,
/// i.e. the operations of a vector space over the floating point type `F`.
pub trait Interpolant<F: BFloat>: Clone + Send + Sync {
    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns the sum of this value and the given value.
    fn sum_with(&self, other: &Self) -> Self;

    /// Returns this value multiplied by the given factor.
    fn scaled(&self, factor: F) -> Self;

    /// Returns `low_weight*low + high_weight*high`.
    fn weighted_sum(low: &Self, low_weight: F, high: &Self, high_weight: F) -> Self {
        low.scaled(low_weight).sum_with(&high.scaled(high_weight))
    }
}

impl<F: BFloat> Interpolant<F> for F {
    fn zero() -> Self {
        <F as num::Zero>::zero()
    }

    fn sum_with(&self, other: &Self) -> Self {
        *self + *other
    }

    fn scaled(&self, factor: F) -> Self {
        factor * *self
    }
}

impl<F: BFloat> Interpolant<F> for Vec3<F> {
    fn zero() -> Self {
        Vec3::zero()
    }

    fn sum_with(&self, other: &Self) -> Self {
        self + other
    }

    fn scaled(&self, factor: F) -> Self {
        self * factor
    }
}

/// Defines the properties of a 3D interpolator.
pub trait Interpolator3: Clone + Sync + Send {
    /// Computes the interpolated value of the given array of samples at the
    /// given fractional index coordinates.
    ///
    /// # Parameters
    ///
    /// - `values`: Samples to interpolate, indexed as `values[[i, j, k]]`.
    /// - `index_point`: Fractional index coordinates where the interpolated value should be computed.
    ///
    /// # Returns
    ///
    /// A `GridPointQuery3<T>` which is either:
    ///
    /// - `Inside`: Contains the interpolated value.
    /// - `Outside`: The interpolation point was outside the region the interpolator can handle.
    ///
    /// # Type parameters
    ///
    /// - `F`: Floating point type of the coordinates and weights.
    /// - `T`: Type of the samples.
    fn interp<F, T>(&self, values: &Array3<T>, index_point: &Point3<F>) -> GridPointQuery3<T>
    where
        F: BFloat,
        T: Interpolant<F>;

    /// Computes the interpolated value of the given array of samples at the
    /// given fractional index coordinates, falling back to zero outside.
    fn interp_or_zero<F, T>(&self, values: &Array3<T>, index_point: &Point3<F>) -> T
    where
        F: BFloat,
        T: Interpolant<F>,
    {
        self.interp(values, index_point).unwrap_or_else(T::zero)
    }
}
