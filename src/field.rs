//! Sampled obstacle penalty fields.

use crate::{
    error::{PenaltyFieldError, Result},
    geometry::{Idx3, In3D, Point3, Vec3},
    grid::{GridPlacement3, GridPointQuery3},
    interpolation::{trilinear::TrilinearInterpolator3, Interpolator3},
    num::BFloat,
};
use ndarray::prelude::*;
use rayon::prelude::*;
use tracing::{debug, warn};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Deserializer, Serialize};

/// A 3D obstacle penalty field.
///
/// Holds a regular grid of scalar penalty samples and a parallel grid of
/// penalty gradient samples, together with the placement of the grid in world
/// space. Penalties and gradients at arbitrary world space points are obtained
/// by interpolating between the samples. Points outside the strict interior of
/// the grid have zero penalty and zero gradient.
///
/// Cloning a field copies both grids, so a clone is unaffected by later
/// reloading of the original.
///
/// A deserialized field is checked like a loaded one, and additionally both
/// sample grids must have the extents of its placement. The interpolator is
/// not serialized and is restored as `I::default()`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct PenaltyField<F, I = TrilinearInterpolator3> {
    placement: GridPlacement3<F>,
    penalties: Array3<F>,
    gradients: Array3<Vec3<F>>,
    #[cfg_attr(feature = "serialization", serde(skip_serializing))]
    interpolator: I,
}

#[cfg(feature = "serialization")]
#[derive(Deserialize)]
#[serde(rename = "PenaltyField", bound(deserialize = "F: BFloat + Deserialize<'de>"))]
struct StoredPenaltyField<F> {
    placement: GridPlacement3<F>,
    penalties: Array3<F>,
    gradients: Array3<Vec3<F>>,
}

#[cfg(feature = "serialization")]
impl<'de, F, I> Deserialize<'de> for PenaltyField<F, I>
where
    F: BFloat + Deserialize<'de>,
    I: Interpolator3 + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = StoredPenaltyField::<F>::deserialize(deserializer)?;
        let expected = stored.placement.shape();
        for (quantity, (nx, ny, nz)) in [
            ("penalty", stored.penalties.dim()),
            ("gradient", stored.gradients.dim()),
        ] {
            let actual = In3D::new(nx, ny, nz);
            if &actual != expected {
                return Err(serde::de::Error::custom(
                    PenaltyFieldError::ExtentMismatch {
                        quantity,
                        expected: expected.clone(),
                        actual,
                    },
                ));
            }
        }
        Ok(Self {
            placement: stored.placement,
            penalties: stored.penalties,
            gradients: stored.gradients,
            interpolator: I::default(),
        })
    }
}

impl<F: BFloat> PenaltyField<F> {
    /// Creates a new unconfigured penalty field using trilinear interpolation.
    ///
    /// The field has no samples until `set_pen` is called, so every query
    /// returns zero.
    pub fn new() -> Self {
        Self::with_interpolator(TrilinearInterpolator3)
    }

    /// Creates a new penalty field using trilinear interpolation and loads it
    /// with the given samples.
    ///
    /// See `set_pen` for a description of the parameters.
    pub fn from_samples(
        start: Point3<F>,
        scale: Vec3<F>,
        shape: In3D<usize>,
        penalties: &[F],
        gradient_x: &[F],
        gradient_y: &[F],
        gradient_z: &[F],
    ) -> Result<Self> {
        let mut field = Self::new();
        field.set_pen(
            start, scale, shape, penalties, gradient_x, gradient_y, gradient_z,
        )?;
        Ok(field)
    }
}

impl<F: BFloat> Default for PenaltyField<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, I> PenaltyField<F, I>
where
    F: BFloat,
    I: Interpolator3,
{
    /// Creates a new unconfigured penalty field using the given interpolator.
    pub fn with_interpolator(interpolator: I) -> Self {
        Self {
            placement: GridPlacement3::empty(),
            penalties: Array3::zeros((0, 0, 0)),
            gradients: Array3::from_elem((0, 0, 0), Vec3::zero()),
            interpolator,
        }
    }

    /// Replaces the content of the field with the given samples.
    ///
    /// # Parameters
    ///
    /// - `start`: World space position of the sample with indices `(0, 0, 0)`.
    /// - `scale`: World space distance between adjacent samples along each axis.
    /// - `shape`: Number of samples along each axis.
    /// - `penalties`: Penalty samples.
    /// - `gradient_x`: x-components of the penalty gradient samples.
    /// - `gradient_y`: y-components of the penalty gradient samples.
    /// - `gradient_z`: z-components of the penalty gradient samples.
    ///
    /// All sample sequences are flat and x-major, so the sample with indices
    /// `(i, j, k)` is at position `(i*shape[Y] + j)*shape[Z] + k`.
    ///
    /// # Errors
    ///
    /// Returns an error without modifying the field if any axis has no samples,
    /// if any scale component is zero or not finite, or if the length of any of
    /// the sample sequences differs from the number of grid points.
    #[allow(clippy::too_many_arguments)]
    pub fn set_pen(
        &mut self,
        start: Point3<F>,
        scale: Vec3<F>,
        shape: In3D<usize>,
        penalties: &[F],
        gradient_x: &[F],
        gradient_y: &[F],
        gradient_z: &[F],
    ) -> Result<()> {
        let placement = GridPlacement3::new(start, scale, shape)
            .and_then(|placement| {
                Self::check_sample_counts(
                    &placement,
                    &[
                        ("penalty", penalties),
                        ("x-gradient", gradient_x),
                        ("y-gradient", gradient_y),
                        ("z-gradient", gradient_z),
                    ],
                )?;
                Ok(placement)
            })
            .map_err(|err| {
                warn!("Rejected penalty field samples: {}", err);
                err
            })?;

        let array_shape = placement.shape().to_tuple();

        self.penalties = Array3::from_shape_fn(array_shape, |(i, j, k)| {
            penalties[placement.flat_index(i, j, k)]
        });
        self.gradients = Array3::from_shape_fn(array_shape, |(i, j, k)| {
            let idx = placement.flat_index(i, j, k);
            Vec3::new(gradient_x[idx], gradient_y[idx], gradient_z[idx])
        });

        debug!(
            "Loaded penalty field with shape {} starting at {:?} with scale {:?}",
            placement.shape(),
            placement.start(),
            placement.scale()
        );
        self.placement = placement;
        Ok(())
    }

    fn check_sample_counts(
        placement: &GridPlacement3<F>,
        sequences: &[(&'static str, &[F])],
    ) -> Result<()> {
        let expected = placement.n_samples();
        match sequences
            .iter()
            .find(|(_, samples)| samples.len() != expected)
        {
            Some(&(quantity, samples)) => Err(PenaltyFieldError::SampleCountMismatch {
                quantity,
                expected,
                actual: samples.len(),
            }),
            None => Ok(()),
        }
    }

    /// Computes the interpolated penalty at the given world space point.
    ///
    /// Returns zero if the point is outside the strict interior of the grid.
    pub fn penalty(&self, point: &Point3<F>) -> F {
        let index_point = self.placement.index_space_point(point);
        self.interpolator
            .interp_or_zero(&self.penalties, &index_point)
    }

    /// Computes the interpolated penalty gradient at the given world space point.
    ///
    /// Returns the zero vector if the point is outside the strict interior of the grid.
    pub fn penalty_gradient(&self, point: &Point3<F>) -> Vec3<F> {
        let index_point = self.placement.index_space_point(point);
        self.interpolator
            .interp_or_zero(&self.gradients, &index_point)
    }

    /// Computes both the interpolated penalty and penalty gradient at the
    /// given world space point, mapping the point to the grid only once.
    pub fn penalty_and_gradient(&self, point: &Point3<F>) -> (F, Vec3<F>) {
        let index_point = self.placement.index_space_point(point);
        (
            self.interpolator
                .interp_or_zero(&self.penalties, &index_point),
            self.interpolator
                .interp_or_zero(&self.gradients, &index_point),
        )
    }

    /// Computes the interpolated penalties at all the given world space points in parallel.
    pub fn penalties(&self, points: &[Point3<F>]) -> Vec<F> {
        points
            .par_iter()
            .map(|point| self.penalty(point))
            .collect()
    }

    /// Computes the interpolated penalty gradients at all the given world space points in parallel.
    pub fn penalty_gradients(&self, points: &[Point3<F>]) -> Vec<Vec3<F>> {
        points
            .par_iter()
            .map(|point| self.penalty_gradient(point))
            .collect()
    }

    /// Whether the given world space point lies in the strict interior of the
    /// grid, where penalties are interpolated rather than zero.
    pub fn is_inside(&self, point: &Point3<F>) -> bool {
        self.placement.find_interior_point(point).is_inside()
    }

    /// Maps the given world space point to fractional index coordinates in the grid.
    pub fn index_space_point(&self, point: &Point3<F>) -> Point3<F> {
        self.placement.index_space_point(point)
    }

    /// Looks up the given world space point, returning its fractional index
    /// coordinates if it lies in the strict interior of the grid.
    pub fn find_interior_point(&self, point: &Point3<F>) -> GridPointQuery3<Point3<F>> {
        self.placement.find_interior_point(point)
    }

    /// Whether the field has been loaded with samples.
    pub fn is_configured(&self) -> bool {
        self.placement.n_samples() > 0
    }

    /// Returns a reference to the placement of the grid in world space.
    pub fn placement(&self) -> &GridPlacement3<F> {
        &self.placement
    }

    /// Returns a reference to the number of samples along each axis.
    pub fn shape(&self) -> &In3D<usize> {
        self.placement.shape()
    }

    /// Returns a reference to the world space position of the first sample.
    pub fn start(&self) -> &Point3<F> {
        self.placement.start()
    }

    /// Returns a reference to the world space distance between adjacent samples.
    pub fn scale(&self) -> &Vec3<F> {
        self.placement.scale()
    }

    /// Returns a reference to the interpolator.
    pub fn interpolator(&self) -> &I {
        &self.interpolator
    }

    /// Returns a view of the 3D array of penalty samples.
    pub fn penalty_values(&self) -> ArrayView3<F> {
        self.penalties.view()
    }

    /// Returns a view of the 3D array of penalty gradient samples.
    pub fn gradient_values(&self) -> ArrayView3<Vec3<F>> {
        self.gradients.view()
    }

    /// Returns the penalty sample at the given 3D index, or `None` if out of bounds.
    pub fn penalty_sample(&self, indices: &Idx3<usize>) -> Option<F> {
        self.penalties.get(indices.to_array_index()).copied()
    }

    /// Returns the penalty gradient sample at the given 3D index, or `None` if out of bounds.
    pub fn gradient_sample(&self, indices: &Idx3<usize>) -> Option<&Vec3<F>> {
        self.gradients.get(indices.to_array_index())
    }
}
