//! Points, vectors and indices in three dimensions.

use crate::num::BFloat;
use std::{
    fmt,
    ops::{Add, Index, IndexMut, Mul, Sub},
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "for-testing"))]
use approx::{AbsDiffEq, RelativeEq};

/// Denotes the x-, y- or z-dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Dim3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Dim3 {
    /// Creates an array for iterating over the x-, y- and z-dimensions.
    pub fn slice() -> [Self; 3] {
        [Self::X, Self::Y, Self::Z]
    }
}

impl fmt::Display for Dim3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

use Dim3::{X, Y, Z};

/// Three values, one per dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct In3D<T>([T; 3]);

impl<T> In3D<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    /// Creates a new 3D quantity by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim3) -> T,
    {
        Self::new(
            create_component(X),
            create_component(Y),
            create_component(Z),
        )
    }

    pub fn same(a: T) -> Self
    where
        T: Copy,
    {
        Self([a; 3])
    }

    /// Returns the components as an `(x, y, z)` tuple, the form `ndarray`
    /// takes shapes in.
    pub fn to_tuple(&self) -> (T, T, T)
    where
        T: Copy,
    {
        let [x, y, z] = self.0;
        (x, y, z)
    }
}

impl<T> Index<Dim3> for In3D<T> {
    type Output = T;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim as usize]
    }
}

impl<T> IndexMut<Dim3> for In3D<T> {
    fn index_mut(&mut self, dim: Dim3) -> &mut Self::Output {
        &mut self.0[dim as usize]
    }
}

impl<T: fmt::Display> fmt::Display for In3D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self[X], self[Y], self[Z])
    }
}

/// Implements componentwise approximate comparison for a float triple type.
#[cfg(any(test, feature = "for-testing"))]
macro_rules! impl_approx_eq_3d {
    ($T:ident) => {
        impl<F> AbsDiffEq for $T<F>
        where
            F: BFloat + AbsDiffEq<Epsilon = F>,
        {
            type Epsilon = F;

            fn default_epsilon() -> F {
                F::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
                Dim3::slice()
                    .iter()
                    .all(|&dim| self[dim].abs_diff_eq(&other[dim], epsilon))
            }
        }

        impl<F> RelativeEq for $T<F>
        where
            F: BFloat + RelativeEq<Epsilon = F>,
        {
            fn default_max_relative() -> F {
                F::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
                Dim3::slice()
                    .iter()
                    .all(|&dim| self[dim].relative_eq(&other[dim], epsilon, max_relative))
            }
        }
    };
}

/// A 3D vector, used for grid spacings and penalty gradients.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Vec3<F>(In3D<F>);

impl<F: BFloat> Vec3<F> {
    pub fn new(x: F, y: F, z: F) -> Self {
        Self(In3D::new(x, y, z))
    }

    /// Creates a new 3D vector by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim3) -> F,
    {
        Self(In3D::with_each_component(create_component))
    }

    pub fn zero() -> Self {
        Self::equal_components(F::zero())
    }

    pub fn equal_components(a: F) -> Self {
        Self(In3D::same(a))
    }

    /// Reinterprets the vector as a position relative to the origin.
    pub fn to_point3(&self) -> Point3<F> {
        Point3(self.0.clone())
    }

    pub fn is_zero(&self) -> bool {
        Dim3::slice().iter().all(|&dim| self[dim] == F::zero())
    }

    /// Divides each component by the corresponding component of `divisor`.
    pub fn component_div(&self, divisor: &Self) -> Self {
        Self::with_each_component(|dim| self[dim] / divisor[dim])
    }
}

impl<F: BFloat> Index<Dim3> for Vec3<F> {
    type Output = F;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim]
    }
}

impl<F: BFloat> IndexMut<Dim3> for Vec3<F> {
    fn index_mut(&mut self, dim: Dim3) -> &mut Self::Output {
        &mut self.0[dim]
    }
}

impl<'a, F: BFloat> Add<&'a Vec3<F>> for &'a Vec3<F> {
    type Output = Vec3<F>;
    fn add(self, other: &'a Vec3<F>) -> Self::Output {
        Vec3::with_each_component(|dim| self[dim] + other[dim])
    }
}

impl<F: BFloat> Mul<F> for &Vec3<F> {
    type Output = Vec3<F>;
    fn mul(self, factor: F) -> Self::Output {
        Vec3::with_each_component(|dim| factor * self[dim])
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl_approx_eq_3d!(Vec3);

/// A position in 3D space, either in world coordinates or in fractional
/// grid index coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Point3<F>(In3D<F>);

impl<F: BFloat> Point3<F> {
    pub fn new(x: F, y: F, z: F) -> Self {
        Self(In3D::new(x, y, z))
    }

    pub fn origin() -> Self {
        Self(In3D::same(F::zero()))
    }
}

impl<F: BFloat> Index<Dim3> for Point3<F> {
    type Output = F;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim]
    }
}

/// The displacement from `other` to `self`.
impl<'a, F: BFloat> Sub<&'a Point3<F>> for &'a Point3<F> {
    type Output = Vec3<F>;
    fn sub(self, other: &'a Point3<F>) -> Self::Output {
        Vec3::with_each_component(|dim| self[dim] - other[dim])
    }
}

impl<'a, F: BFloat> Add<&'a Vec3<F>> for &'a Point3<F> {
    type Output = Point3<F>;
    fn add(self, displacement: &'a Vec3<F>) -> Self::Output {
        Point3(In3D::with_each_component(|dim| self[dim] + displacement[dim]))
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl_approx_eq_3d!(Point3);

/// A 3D array index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Idx3<I>(In3D<I>);

impl<I: num::Integer + Copy> Idx3<I> {
    pub fn new(i: I, j: I, k: I) -> Self {
        Self(In3D::new(i, j, k))
    }

    pub fn origin() -> Self {
        Self(In3D::same(I::zero()))
    }
}

impl Idx3<usize> {
    /// Returns the index in the form `ndarray::Array3` is indexed with.
    pub fn to_array_index(&self) -> [usize; 3] {
        self.0 .0
    }
}

impl<I> Index<Dim3> for Idx3<I> {
    type Output = I;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim]
    }
}

impl<I> IndexMut<Dim3> for Idx3<I> {
    fn index_mut(&mut self, dim: Dim3) -> &mut Self::Output {
        &mut self.0[dim]
    }
}
