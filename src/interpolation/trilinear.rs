//! Trilinear interpolation between the eight samples surrounding a point.

use super::{Interpolant, Interpolator3};
use crate::{
    geometry::{
        Dim3::{self, X, Y, Z},
        Idx3, In3D, Point3, Vec3,
    },
    grid::{self, GridPointQuery3},
    num::BFloat,
};
use ndarray::prelude::*;

/// A 3D interpolator blending the eight samples at the corners of the
/// grid cell containing the interpolation point.
///
/// Only points in the strict interior of the grid are interpolated, so the
/// enclosing cell never extends beyond the array of samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrilinearInterpolator3;

/// The grid cell enclosing an interpolation point, together with the linear
/// weights of its lower and upper corners along each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TrilinearStencil<F> {
    lower_corner: Idx3<usize>,
    lower_weights: Vec3<F>,
    upper_weights: Vec3<F>,
}

impl TrilinearInterpolator3 {
    /// Finds the stencil for interpolating at the given fractional index
    /// coordinates in a grid with the given shape.
    ///
    /// Returns `Outside` unless the point lies in the strict interior of the grid
    /// along every axis.
    pub fn stencil<F: BFloat>(
        shape: &In3D<usize>,
        index_point: &Point3<F>,
    ) -> GridPointQuery3<TrilinearStencil<F>> {
        let mut lower_corner = Idx3::origin();
        let mut lower_weights = Vec3::zero();
        let mut upper_weights = Vec3::zero();

        for &dim in &Dim3::slice() {
            let coord = index_point[dim];
            if !grid::is_strictly_interior(coord, shape[dim]) {
                return GridPointQuery3::Outside;
            }
            let lower_coord = coord.floor();
            // The float comparison above can round for huge axes, so the
            // upper corner is checked on the integer index as well.
            lower_corner[dim] = match lower_coord.to_usize() {
                Some(idx) if idx < shape[dim].saturating_sub(1) => idx,
                _ => return GridPointQuery3::Outside,
            };
            upper_weights[dim] = coord - lower_coord;
            lower_weights[dim] = (lower_coord + F::one()) - coord;
        }

        GridPointQuery3::Inside(TrilinearStencil {
            lower_corner,
            lower_weights,
            upper_weights,
        })
    }
}

impl<F: BFloat> TrilinearStencil<F> {
    /// Returns a reference to the indices of the lowest corner of the cell.
    pub fn lower_corner(&self) -> &Idx3<usize> {
        &self.lower_corner
    }

    /// Returns the indices of the eight cell corners together with the weight
    /// each corner sample receives in the interpolated value.
    ///
    /// Corners are ordered with the x-offset varying fastest.
    pub fn corners(&self) -> [(Idx3<usize>, F); 8] {
        let (i, j, k) = (
            self.lower_corner[X],
            self.lower_corner[Y],
            self.lower_corner[Z],
        );
        let (xl, yl, zl) = (
            self.lower_weights[X],
            self.lower_weights[Y],
            self.lower_weights[Z],
        );
        let (xu, yu, zu) = (
            self.upper_weights[X],
            self.upper_weights[Y],
            self.upper_weights[Z],
        );
        [
            (Idx3::new(i, j, k), xl * yl * zl),
            (Idx3::new(i + 1, j, k), xu * yl * zl),
            (Idx3::new(i, j + 1, k), xl * yu * zl),
            (Idx3::new(i + 1, j + 1, k), xu * yu * zl),
            (Idx3::new(i, j, k + 1), xl * yl * zu),
            (Idx3::new(i + 1, j, k + 1), xu * yl * zu),
            (Idx3::new(i, j + 1, k + 1), xl * yu * zu),
            (Idx3::new(i + 1, j + 1, k + 1), xu * yu * zu),
        ]
    }

    /// Blends the corner samples by successive linear interpolation along x, y and z.
    fn blend<T: Interpolant<F>>(&self, values: &Array3<T>) -> T {
        let (x0, y0, z0) = (
            self.lower_corner[X],
            self.lower_corner[Y],
            self.lower_corner[Z],
        );
        let (x1, y1, z1) = (x0 + 1, y0 + 1, z0 + 1);

        let (xdm, ydm, zdm) = (
            self.lower_weights[X],
            self.lower_weights[Y],
            self.lower_weights[Z],
        );
        let (xd, yd, zd) = (
            self.upper_weights[X],
            self.upper_weights[Y],
            self.upper_weights[Z],
        );

        let c00 = T::weighted_sum(&values[[x0, y0, z0]], xdm, &values[[x1, y0, z0]], xd);
        let c10 = T::weighted_sum(&values[[x0, y1, z0]], xdm, &values[[x1, y1, z0]], xd);
        let c01 = T::weighted_sum(&values[[x0, y0, z1]], xdm, &values[[x1, y0, z1]], xd);
        let c11 = T::weighted_sum(&values[[x0, y1, z1]], xdm, &values[[x1, y1, z1]], xd);

        let c0 = T::weighted_sum(&c00, ydm, &c10, yd);
        let c1 = T::weighted_sum(&c01, ydm, &c11, yd);

        T::weighted_sum(&c0, zdm, &c1, zd)
    }
}

impl Interpolator3 for TrilinearInterpolator3 {
    fn interp<F, T>(&self, values: &Array3<T>, index_point: &Point3<F>) -> GridPointQuery3<T>
    where
        F: BFloat,
        T: Interpolant<F>,
    {
        let (size_x, size_y, size_z) = values.dim();
        Self::stencil(&In3D::new(size_x, size_y, size_z), index_point)
            .map(|stencil| stencil.blend(values))
    }
}
