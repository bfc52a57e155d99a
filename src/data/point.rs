use std::ops::Deref;
use std::ops::Index;

use crate::{Error, Orientation, PolygonScalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)] // Required for correctness!
pub struct Point<T, const N: usize = 2> {
  pub array: [T; N],
}

// Methods on N-dimensional points.
impl<T, const N: usize> Point<T, N> {
  pub const fn new(array: [T; N]) -> Point<T, N> {
    Point { array }
  }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T, const N: usize> Deref for Point<T, N> {
  type Target = [T; N];
  fn deref(&self) -> &[T; N] {
    &self.array
  }
}

impl<T> From<(T, T)> for Point<T, 2> {
  fn from(point: (T, T)) -> Point<T, 2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl<T> From<[T; 2]> for Point<T, 2> {
  fn from(array: [T; 2]) -> Point<T, 2> {
    Point { array }
  }
}

// Methods on two-dimensional points.
impl<T> Point<T, 2> {
  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }

  pub fn orientation(&self, q: &Point<T, 2>, r: &Point<T, 2>) -> Orientation
  where
    T: PolygonScalar,
  {
    Orientation::new(&self.array, &q.array, &r.array)
  }
}

impl Point<f64, 2> {
  /// Reject NaN and infinite coordinates. Coordinate ranges are checked by
  /// the encoding that quantizes the point.
  pub fn validate(&self) -> Result<(), Error> {
    if self.array.iter().all(|v| v.is_finite()) {
      Ok(())
    } else {
      Err(Error::InvalidCoordinate)
    }
  }
}

impl Point<i32, 2> {
  /// Sort key used by the triangle codec: ascending y, then ascending x.
  pub fn yx(&self) -> (i32, i32) {
    (self.array[1], self.array[0])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deref_into_array() {
    let p = Point::new([1, 2]);
    let arr: &[i32; 2] = &p;
    assert_eq!(arr, &[1, 2]);
    assert_eq!(*p.x_coord(), 1);
    assert_eq!(*p.y_coord(), 2);
  }

  #[test]
  fn yx_order() {
    let a = Point::new([5, 0]);
    let b = Point::new([-5, 1]);
    assert!(a.yx() < b.yx());
  }

  #[test]
  fn reject_nan() {
    assert_eq!(
      Point::new([f64::NAN, 0.0]).validate(),
      Err(Error::InvalidCoordinate)
    );
    assert!(Point::new([1.0, -2.0]).validate().is_ok());
  }
}
