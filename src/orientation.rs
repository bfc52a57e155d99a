use std::cmp::Ordering;

use crate::PolygonScalar;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// For fixed-precision types (i32, i64) the determinant is computed in the
  /// next wider integer type and this function never overflows. For `f64` the
  /// sign is computed exactly with adaptive precision.
  ///
  /// This is the only orientation test in the crate: the tessellator, the
  /// triangle codec and every query component go through it.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use shapekernel::data::Point;
  /// # use shapekernel::Orientation;
  /// let p1 = Point::new([ 0, 0 ]);
  /// let p2 = Point::new([ 0, 1 ]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 0, 2 ])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ -1, 2 ])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 1, 2 ])).is_cw());
  /// ```
  pub fn new<T>(p1: &[T; 2], p2: &[T; 2], p3: &[T; 2]) -> Orientation
  where
    T: PolygonScalar,
  {
    match T::cmp_slope(p1, p2, p3) {
      Ordering::Less => Orientation::ClockWise,
      Ordering::Equal => Orientation::CoLinear,
      Ordering::Greater => Orientation::CounterClockWise,
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, Orientation::CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, Orientation::CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, Orientation::ClockWise)
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      Orientation::CounterClockWise => Orientation::ClockWise,
      Orientation::ClockWise => Orientation::CounterClockWise,
      Orientation::CoLinear => Orientation::CoLinear,
    }
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  #[test]
  fn orientation_limit_1() {
    PolygonScalar::cmp_slope(
      &[i32::MAX, i32::MAX],
      &[i32::MIN, i32::MIN],
      &[i32::MIN, i32::MIN],
    );
  }

  #[test]
  fn cmp_slope_1() {
    assert_eq!(
      PolygonScalar::cmp_slope(&[0i32, 0], &[1, 1], &[2, 2],),
      Ordering::Equal
    );
  }

  #[test]
  fn cmp_slope_2() {
    assert_eq!(
      Orientation::new(&[0i32, 0], &[0, 1], &[2, 2],),
      Orientation::ClockWise
    );
  }

  #[test]
  fn orientation_limit_2() {
    let options = &[i32::MIN, i32::MAX, 0, -10, 10];
    for [a, b, c, d, e, f] in crate::utils::permutations([options; 6]) {
      let int = Orientation::new(&[a, b], &[c, d], &[e, f]);
      let wide = Orientation::new(
        &[i64::from(a), i64::from(b)],
        &[i64::from(c), i64::from(d)],
        &[i64::from(e), i64::from(f)],
      );
      assert_eq!(int, wide);
    }
  }

  #[test]
  fn float_nearly_colinear() {
    let p = [0.5, 0.5];
    let q = [12.0, 12.0];
    let r = [24.0, 24.0 + 1e-14];
    assert_eq!(Orientation::new(&p, &q, &r), Orientation::CounterClockWise);
    assert_eq!(Orientation::new(&p, &r, &q), Orientation::ClockWise);
  }

  #[test]
  fn float_tiny_offset() {
    let a = [1e-26, 0.0];
    let b = [-1.0, 0.0];
    let c = [1.0, 0.0];
    assert!(Orientation::new(&a, &b, &c).is_colinear());
  }

  #[proptest]
  fn int_matches_float(a: [i32; 2], b: [i32; 2], c: [i32; 2]) {
    let to_f64 = |p: [i32; 2]| [f64::from(p[0]), f64::from(p[1])];
    prop_assert_eq!(
      Orientation::new(&a, &b, &c),
      Orientation::new(&to_f64(a), &to_f64(b), &to_f64(c))
    );
  }

  #[proptest]
  fn reverse_prop(a: [i32; 2], b: [i32; 2], c: [i32; 2]) {
    prop_assert_eq!(Orientation::new(&a, &b, &c), Orientation::new(&a, &c, &b).reverse());
    prop_assert_eq!(Orientation::new(&a, &b, &c), Orientation::new(&b, &c, &a));
  }
}
