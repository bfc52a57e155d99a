use crate::data::{Point, Polygon};
use crate::Error;

pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Axis aligned box. In geo space `min_x > max_x` describes a box that wraps
/// the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
  pub min_x: f64,
  pub max_x: f64,
  pub min_y: f64,
  pub max_y: f64,
}

impl Rectangle {
  pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Rectangle, Error> {
    let rect = Rectangle {
      min_x,
      max_x,
      min_y,
      max_y,
    };
    if ![min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite()) {
      return Err(Error::InvalidCoordinate);
    }
    if min_y > max_y {
      return Err(Error::InvalidCoordinate);
    }
    Ok(rect)
  }

  /// Smallest box around the points. Never wraps. Empty input gives an empty
  /// (inverted) box.
  pub fn bounding(points: &[Point<f64, 2>]) -> Rectangle {
    let mut rect = Rectangle {
      min_x: f64::INFINITY,
      max_x: f64::NEG_INFINITY,
      min_y: f64::INFINITY,
      max_y: f64::NEG_INFINITY,
    };
    for pt in points {
      rect.min_x = rect.min_x.min(pt.array[0]);
      rect.max_x = rect.max_x.max(pt.array[0]);
      rect.min_y = rect.min_y.min(pt.array[1]);
      rect.max_y = rect.max_y.max(pt.array[1]);
    }
    rect
  }

  pub fn crosses_antimeridian(&self) -> bool {
    self.min_x > self.max_x
  }

  /// Decompose into non-wrapping pieces: the box itself, or
  /// `[min_x, 180]` and `[-180, max_x]`.
  pub fn split_antimeridian(&self) -> Vec<Rectangle> {
    if self.crosses_antimeridian() {
      vec![
        Rectangle {
          max_x: MAX_LON,
          ..*self
        },
        Rectangle {
          min_x: MIN_LON,
          ..*self
        },
      ]
    } else {
      vec![*self]
    }
  }

  /// Inclusive containment for a non-wrapping box.
  pub fn contains_point(&self, pt: &Point<f64, 2>) -> bool {
    let (x, y) = (pt.array[0], pt.array[1]);
    self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
  }

  /// Closed boxes share at least one point. Both must be non-wrapping.
  pub fn intersects(&self, other: &Rectangle) -> bool {
    !(self.max_x < other.min_x
      || self.min_x > other.max_x
      || self.max_y < other.min_y
      || self.min_y > other.max_y)
  }

  pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
    self.min_x <= other.min_x
      && other.max_x <= self.max_x
      && self.min_y <= other.min_y
      && other.max_y <= self.max_y
  }

  /// Smallest box covering both. Both must be non-wrapping.
  #[must_use]
  pub fn union(&self, other: &Rectangle) -> Rectangle {
    Rectangle {
      min_x: self.min_x.min(other.min_x),
      max_x: self.max_x.max(other.max_x),
      min_y: self.min_y.min(other.min_y),
      max_y: self.max_y.max(other.max_y),
    }
  }

  /// Corners in counter-clockwise order starting at the lower left.
  pub fn corners(&self) -> [Point<f64, 2>; 4] {
    [
      Point::new([self.min_x, self.min_y]),
      Point::new([self.max_x, self.min_y]),
      Point::new([self.max_x, self.max_y]),
      Point::new([self.min_x, self.max_y]),
    ]
  }

  /// The non-wrapping box as a polygon.
  pub fn to_polygon(&self) -> Result<Polygon, Error> {
    Polygon::new(self.corners().to_vec())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn split_wrapping_box() {
    let rect = Rectangle::new(170.0, -170.0, -20.0, 20.0).unwrap();
    let pieces = rect.split_antimeridian();
    assert_eq!(pieces.len(), 2);
    assert_eq!((pieces[0].min_x, pieces[0].max_x), (170.0, 180.0));
    assert_eq!((pieces[1].min_x, pieces[1].max_x), (-180.0, -170.0));
    assert!(pieces.iter().all(|p| p.min_y == -20.0 && p.max_y == 20.0));
  }

  #[test]
  fn split_regular_box() {
    let rect = Rectangle::new(-1.0, 1.0, -1.0, 1.0).unwrap();
    assert_eq!(rect.split_antimeridian(), vec![rect]);
  }

  #[test]
  fn box_overlap() {
    let a = Rectangle::new(0.0, 2.0, 0.0, 2.0).unwrap();
    let b = Rectangle::new(2.0, 3.0, 1.0, 5.0).unwrap();
    let c = Rectangle::new(2.5, 3.0, 1.0, 5.0).unwrap();
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert!(a.union(&c).contains_rectangle(&b));
    assert!(!a.contains_rectangle(&b));
  }

  #[test]
  fn rejects_nan() {
    assert_eq!(
      Rectangle::new(f64::NAN, 1.0, 0.0, 1.0),
      Err(Error::InvalidCoordinate)
    );
  }

  #[test]
  fn degenerate_box_polygon() {
    let rect = Rectangle::new(0.0, 0.0, 0.0, 1.0).unwrap();
    assert!(rect.to_polygon().is_ok());
    assert!(rect.contains_point(&Point::new([0.0, 0.5])));
  }
}
