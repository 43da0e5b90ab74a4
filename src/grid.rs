//! Placement of a regular sample grid in world space.

use crate::{
    error::{PenaltyFieldError, Result},
    geometry::{
        Dim3::{self, X, Y, Z},
        In3D, Point3, Vec3,
    },
    num::{self, BFloat},
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Deserializer, Serialize};

/// The result of looking up a point in a grid: either the point lies
/// inside the interpolatable part of the grid, or it does not.
#[derive(Debug, Clone, PartialEq)]
pub enum GridPointQuery3<T> {
    Inside(T),
    Outside,
}

impl<T> GridPointQuery3<T> {
    /// Maps the contained value of an `Inside` query.
    pub fn map<U, M>(self, map_inside: M) -> GridPointQuery3<U>
    where
        M: FnOnce(T) -> U,
    {
        match self {
            Self::Inside(value) => GridPointQuery3::Inside(map_inside(value)),
            Self::Outside => GridPointQuery3::Outside,
        }
    }

    /// Returns the contained value, or the result of the given closure if outside.
    pub fn unwrap_or_else<D>(self, outside_value: D) -> T
    where
        D: FnOnce() -> T,
    {
        match self {
            Self::Inside(value) => value,
            Self::Outside => outside_value(),
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, Self::Inside(_))
    }
}

/// Maps a world space point to fractional array index coordinates,
/// computed component-wise as `(point - start)/scale`.
pub fn index_space_point<F: BFloat>(
    point: &Point3<F>,
    start: &Point3<F>,
    scale: &Vec3<F>,
) -> Point3<F> {
    (point - start).component_div(scale).to_point3()
}

/// Whether the given fractional index coordinate lies strictly between the
/// first and last index of a grid axis with the given number of samples.
///
/// Only such coordinates are surrounded by a full cell of samples on both sides,
/// so the outermost layer of samples is never interpolated towards from outside.
/// NaN is never interior.
pub fn is_strictly_interior<F: BFloat>(coord: F, size: usize) -> bool {
    coord > F::zero() && coord < num::from_usize::<F>(size) - F::one()
}

/// Position, spacing and shape of a regular 3D grid of samples.
///
/// Deserialization goes through the same validation as `new`. The only
/// accepted placement without samples is the one produced by `empty`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct GridPlacement3<F> {
    start: Point3<F>,
    scale: Vec3<F>,
    shape: In3D<usize>,
    #[cfg_attr(feature = "serialization", serde(skip_serializing))]
    n_samples: usize,
}

#[cfg(feature = "serialization")]
#[derive(Deserialize)]
#[serde(rename = "GridPlacement3")]
struct StoredGridPlacement3<F> {
    start: Point3<F>,
    scale: Vec3<F>,
    shape: In3D<usize>,
}

#[cfg(feature = "serialization")]
impl<'de, F> Deserialize<'de> for GridPlacement3<F>
where
    F: BFloat + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = StoredGridPlacement3::<F>::deserialize(deserializer)?;
        if stored.shape == In3D::same(0) {
            return Ok(Self::empty());
        }
        Self::new(stored.start, stored.scale, stored.shape).map_err(serde::de::Error::custom)
    }
}

impl<F: BFloat> GridPlacement3<F> {
    /// Creates a new grid placement from the world space position of the
    /// first sample, the world space distance between adjacent samples along
    /// each axis and the number of samples along each axis.
    ///
    /// # Errors
    ///
    /// - `EmptyAxis` if any axis has no samples.
    /// - `InvalidScale` if any scale component is zero or not finite.
    /// - `ShapeOverflow` if the total number of samples does not fit in a `usize`.
    pub fn new(start: Point3<F>, scale: Vec3<F>, shape: In3D<usize>) -> Result<Self> {
        for &dim in &Dim3::slice() {
            if shape[dim] == 0 {
                return Err(PenaltyFieldError::EmptyAxis { dim });
            }
            let axis_scale = scale[dim];
            if axis_scale == F::zero() || !axis_scale.is_finite() {
                return Err(PenaltyFieldError::InvalidScale {
                    dim,
                    scale: axis_scale.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        let n_samples = shape[X]
            .checked_mul(shape[Y])
            .and_then(|n| n.checked_mul(shape[Z]))
            .ok_or_else(|| PenaltyFieldError::ShapeOverflow {
                shape: shape.clone(),
            })?;
        Ok(Self {
            start,
            scale,
            shape,
            n_samples,
        })
    }

    /// Creates a placement for a grid without samples. No point lies
    /// inside such a grid.
    pub fn empty() -> Self {
        Self {
            start: Point3::origin(),
            scale: Vec3::equal_components(F::one()),
            shape: In3D::same(0),
            n_samples: 0,
        }
    }

    /// Returns a reference to the world space position of the first sample.
    pub fn start(&self) -> &Point3<F> {
        &self.start
    }

    /// Returns a reference to the world space distance between adjacent samples.
    pub fn scale(&self) -> &Vec3<F> {
        &self.scale
    }

    /// Returns a reference to the number of samples along each axis.
    pub fn shape(&self) -> &In3D<usize> {
        &self.shape
    }

    /// Returns the total number of samples in the grid.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Maps the given world space point to fractional index coordinates in this grid.
    pub fn index_space_point(&self, point: &Point3<F>) -> Point3<F> {
        index_space_point(point, &self.start, &self.scale)
    }

    /// Whether the given fractional index coordinates lie in the strict interior
    /// of the grid along every axis.
    pub fn contains_index_space_point(&self, index_point: &Point3<F>) -> bool {
        Dim3::slice()
            .iter()
            .all(|&dim| is_strictly_interior(index_point[dim], self.shape[dim]))
    }

    /// Maps the given world space point to index space and returns the
    /// fractional index coordinates if they lie in the strict interior.
    pub fn find_interior_point(&self, point: &Point3<F>) -> GridPointQuery3<Point3<F>> {
        let index_point = self.index_space_point(point);
        if self.contains_index_space_point(&index_point) {
            GridPointQuery3::Inside(index_point)
        } else {
            GridPointQuery3::Outside
        }
    }

    /// Returns the position in a flat x-major sample sequence of the sample
    /// with the given indices.
    pub fn flat_index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(
            i < self.shape[X] && j < self.shape[Y] && k < self.shape[Z],
            "Sample index out of bounds"
        );
        (i * self.shape[Y] + j) * self.shape[Z] + k
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_placement(shape: In3D<usize>) -> GridPlacement3<f64> {
        GridPlacement3::new(Point3::origin(), Vec3::equal_components(1.0), shape).unwrap()
    }

    #[test]
    fn world_points_map_to_fractional_indices() {
        let start = Point3::new(1.0, -2.0, 0.5);
        let scale = Vec3::new(0.5, 2.0, -0.25);
        let mapped = index_space_point(&Point3::new(2.25, 1.0, 0.0), &start, &scale);
        assert_abs_diff_eq!(mapped, Point3::new(2.5, 1.5, 2.0));
    }

    #[test]
    fn mapping_start_gives_index_origin() {
        let placement = GridPlacement3::new(
            Point3::new(-3.0, 4.0, 10.0),
            Vec3::new(0.1, 0.2, 0.3),
            In3D::new(4, 5, 6),
        )
        .unwrap();
        assert_eq!(
            placement.index_space_point(&Point3::new(-3.0, 4.0, 10.0)),
            Point3::origin()
        );
    }

    #[test]
    fn strict_interior_excludes_first_and_last_index() {
        assert!(!is_strictly_interior(0.0, 3));
        assert!(is_strictly_interior(1e-9, 3));
        assert!(is_strictly_interior(1.0, 3));
        assert!(is_strictly_interior(1.999, 3));
        assert!(!is_strictly_interior(2.0, 3));
        assert!(!is_strictly_interior(-0.5, 3));
        assert!(!is_strictly_interior(f64::NAN, 3));
    }

    #[test]
    fn tiny_axes_have_no_interior() {
        for &coord in &[-1.0, 0.0, 0.5, 1.0] {
            assert!(!is_strictly_interior(coord, 0));
            assert!(!is_strictly_interior(coord, 1));
        }
        assert!(is_strictly_interior(0.5, 2));
        assert!(!is_strictly_interior(1.0, 2));
    }

    #[test]
    fn interior_lookup_requires_every_axis_inside() {
        let placement = unit_placement(In3D::new(3, 4, 5));
        assert_eq!(
            placement.find_interior_point(&Point3::new(1.5, 2.5, 3.5)),
            GridPointQuery3::Inside(Point3::new(1.5, 2.5, 3.5))
        );
        assert_eq!(
            placement.find_interior_point(&Point3::new(1.5, 3.0, 3.5)),
            GridPointQuery3::Outside
        );
        assert_eq!(
            placement.find_interior_point(&Point3::new(0.0, 1.0, 1.0)),
            GridPointQuery3::Outside
        );
        assert!(!GridPlacement3::<f64>::empty()
            .find_interior_point(&Point3::origin())
            .is_inside());
    }

    #[test]
    fn invalid_placements_are_rejected() {
        assert_eq!(
            GridPlacement3::new(
                Point3::origin(),
                Vec3::equal_components(1.0),
                In3D::new(3, 0, 3)
            ),
            Err(PenaltyFieldError::EmptyAxis { dim: Y })
        );
        assert_eq!(
            GridPlacement3::new(
                Point3::origin(),
                Vec3::new(1.0, 1.0, 0.0),
                In3D::new(3, 3, 3)
            ),
            Err(PenaltyFieldError::InvalidScale { dim: Z, scale: 0.0 })
        );
        assert!(matches!(
            GridPlacement3::new(
                Point3::origin(),
                Vec3::new(f64::INFINITY, 1.0, 1.0),
                In3D::new(3, 3, 3)
            ),
            Err(PenaltyFieldError::InvalidScale { dim: X, .. })
        ));
        assert!(matches!(
            GridPlacement3::new(
                Point3::origin(),
                Vec3::equal_components(1.0),
                In3D::new(usize::MAX, 2, 1)
            ),
            Err(PenaltyFieldError::ShapeOverflow { .. })
        ));
    }

    #[test]
    fn flat_index_is_x_major() {
        let placement = unit_placement(In3D::new(2, 3, 4));
        assert_eq!(placement.n_samples(), 24);
        assert_eq!(placement.flat_index(0, 0, 0), 0);
        assert_eq!(placement.flat_index(0, 0, 1), 1);
        assert_eq!(placement.flat_index(0, 1, 0), 4);
        assert_eq!(placement.flat_index(1, 0, 0), 12);
        assert_eq!(placement.flat_index(1, 2, 3), 23);
    }
}
