// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Geometry kernel for shape fields in a multidimensional range index.
//!
//! Index time: a [`Geometry`](data::Geometry) is quantized, tessellated and
//! every triangle is written as a fixed-width, order-canonical record
//! ([`EncodedTriangle`](encoding::EncodedTriangle)). Query time: a
//! [`ShapeQuery`](query::ShapeQuery) prunes range-index cells with
//! [`Component2D::relate`](component::Component2D::relate) and decides how
//! each document's triangles relate to the query geometry.
use num_traits::*;
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::*;

pub mod algorithms;
pub mod component;
pub mod data;
pub mod encoding;
mod intersection;
mod orientation;
pub mod query;
pub mod shape;
mod utils;

pub use orientation::Orientation;

pub use intersection::{
  point_in_triangle, point_on_segment, segment_intersects_box, segment_intersects_triangle,
  segments_cross, segments_intersect,
};

/// Reason a shape could not be turned into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
  /// Fewer than three distinct points in a ring.
  InsufficientVertices,
  /// Every point of the shell lies on one line.
  CoLinearViolation,
  /// Two ring edges cross. Only reported when the tessellator is asked to
  /// check for it.
  SelfIntersections,
  /// A hole has a vertex or an edge outside of its shell.
  HoleOutsideShell,
  /// Ear clipping ran out of ears and no valid split diagonal exists.
  Untessellatable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  MalformedGeometry(Malformed),
  InvalidLatitude,
  InvalidLongitude,
  /// Planar coordinate that is not finite or does not fit an `f32`.
  InvalidCoordinate,
  InvalidRadius,
  /// The geometry cannot be stored as triangles (circles are query-only).
  UnsupportedGeometry,
  /// A stored record has an unknown type tag or reserved bits set.
  InvalidEncoding,
  /// No quantized value exists beyond the requested extreme.
  ArithmeticOverflow,
}

impl Error {
  pub fn is_malformed_geometry(&self) -> bool {
    matches!(self, Error::MalformedGeometry(_))
  }
}

impl From<Malformed> for Error {
  fn from(reason: Malformed) -> Error {
    Error::MalformedGeometry(reason)
  }
}

impl std::fmt::Display for Malformed {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Malformed::InsufficientVertices => write!(f, "Insufficient vertices"),
      Malformed::CoLinearViolation => write!(f, "All shell points are colinear"),
      Malformed::SelfIntersections => write!(f, "Self intersections"),
      Malformed::HoleOutsideShell => write!(f, "Hole is not contained in its shell"),
      Malformed::Untessellatable => write!(f, "Unable to tessellate shape"),
    }
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::MalformedGeometry(reason) => write!(f, "Malformed geometry: {}", reason),
      Error::InvalidLatitude => write!(f, "Latitude must be a number in [-90, 90]"),
      Error::InvalidLongitude => write!(f, "Longitude must be a number in [-180, 180]"),
      Error::InvalidCoordinate => write!(f, "Coordinate must be finite and fit in an f32"),
      Error::InvalidRadius => write!(f, "Radius must be finite and non-negative"),
      Error::UnsupportedGeometry => write!(f, "Geometry cannot be indexed"),
      Error::InvalidEncoding => write!(f, "Invalid triangle encoding"),
      Error::ArithmeticOverflow => write!(f, "No representable value beyond the extreme"),
    }
  }
}

impl std::error::Error for Error {}

pub trait TotalOrd {
  fn total_cmp(&self, other: &Self) -> Ordering;

  fn total_min(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::min_by(self, other, TotalOrd::total_cmp)
  }

  fn total_max(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::max_by(self, other, TotalOrd::total_cmp)
  }
}

impl<A: TotalOrd> TotalOrd for &A {
  fn total_cmp(&self, other: &Self) -> Ordering {
    (*self).total_cmp(*other)
  }
}

impl<A: TotalOrd, B: TotalOrd> TotalOrd for (A, B) {
  fn total_cmp(&self, other: &Self) -> Ordering {
    self
      .0
      .total_cmp(&other.0)
      .then_with(|| self.1.total_cmp(&other.1))
  }
}

pub trait PolygonScalar:
  std::fmt::Debug + Neg<Output = Self> + NumOps<Self, Self> + TotalOrd + PartialOrd + Sum + Clone
{
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> std::cmp::Ordering;
}

macro_rules! fixed_precision {
  ( $ty:ty, $uty:ty, $long:ty, $ulong: ty ) => {
    impl TotalOrd for $ty {
      fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
      }
    }

    impl PolygonScalar for $ty {
      fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> std::cmp::Ordering {
        // Return the absolute difference along with its sign.
        // diff(0, 10) => (10, true)
        // diff(10, 0) => (10, false)
        // diff(i32::MIN,i32::MAX) => (u32::MAX as u64, true)
        // diff(a,b) = (c, sign) where a = if sign { b-c } else { b+c }
        fn diff(a: $ty, b: $ty) -> ($ulong, bool) {
          if b > a {
            (b.wrapping_sub(a) as $uty as $ulong, true)
          } else {
            (a.wrapping_sub(b) as $uty as $ulong, false)
          }
        }
        let (ux, ux_neg) = diff(q[0], p[0]);
        let (vy, vy_neg) = diff(r[1], p[1]);
        let ux_vy_neg = ux_neg.bitxor(vy_neg) && ux != 0 && vy != 0;
        let (uy, uy_neg) = diff(q[1], p[1]);
        let (vx, vx_neg) = diff(r[0], p[0]);
        let uy_vx_neg = uy_neg.bitxor(vx_neg) && uy != 0 && vx != 0;
        match (ux_vy_neg, uy_vx_neg) {
          (true, false) => Ordering::Less,
          (false, true) => Ordering::Greater,
          (true, true) => (uy * vx).cmp(&(ux * vy)),
          (false, false) => (ux * vy).cmp(&(uy * vx)),
        }
      }
    }
  };
}

macro_rules! floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          <$ty>::total_cmp(self, other)
        }
      }

      impl PolygonScalar for $ty {
      // This function uses the arbitrary precision machinery of `geometry_predicates` to
      // compute the exact orientation of three 2D points. Quantized coordinates are
      // exact doubles, so the sign is never misclassified by rounding.
      fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> std::cmp::Ordering {
        let orient = geometry_predicates::predicates::orient2d(
          [p[0].into(), p[1].into()],
          [q[0].into(), q[1].into()],
          [r[0].into(), r[1].into()],
        );
        if orient > 0.0 {
          Ordering::Greater
        } else if orient < 0.0 {
          Ordering::Less
        } else {
          Ordering::Equal
        }
      }
    })*
  };
}

fixed_precision!(i32, u32, i64, u64);
fixed_precision!(i64, u64, i128, u128);
floating_precision!(f64);

#[cfg(test)]
pub mod testing;
