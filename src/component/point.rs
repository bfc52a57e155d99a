use super::{Component2D, Relation, WithinRelation};
use crate::data::{Point, Rectangle};
use crate::{point_in_triangle, point_on_segment};

/// Query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
  point: Point<f64, 2>,
}

impl Point2D {
  pub fn new(point: Point<f64, 2>) -> Point2D {
    Point2D { point }
  }
}

impl Component2D for Point2D {
  fn bounding_box(&self) -> Rectangle {
    Rectangle::bounding(&[self.point])
  }

  fn relate(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Relation {
    let (x, y) = (self.point.array[0], self.point.array[1]);
    if min_x <= x && x <= max_x && min_y <= y && y <= max_y {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains(&self, x: f64, y: f64) -> bool {
    self.point.array == [x, y]
  }

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    point_on_segment(&self.point, a, b)
  }

  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.contains_point(a) && self.contains_point(b)
  }

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    point_in_triangle(&self.point, a, b, c)
  }

  fn contains_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    self.contains_point(a) && self.contains_point(b) && self.contains_point(c)
  }

  fn within_point(&self, p: &Point<f64, 2>) -> WithinRelation {
    if self.contains_point(p) {
      WithinRelation::Candidate
    } else {
      WithinRelation::Disjoint
    }
  }

  fn within_line(
    &self,
    a: &Point<f64, 2>,
    _ab: bool,
    b: &Point<f64, 2>,
    _ends: [bool; 2],
  ) -> WithinRelation {
    if self.intersects_line(a, b) {
      WithinRelation::Candidate
    } else {
      WithinRelation::Disjoint
    }
  }

  fn within_triangle(
    &self,
    a: &Point<f64, 2>,
    _ab: bool,
    b: &Point<f64, 2>,
    _bc: bool,
    c: &Point<f64, 2>,
    _ca: bool,
  ) -> WithinRelation {
    if self.intersects_triangle(a, b, c) {
      WithinRelation::Candidate
    } else {
      WithinRelation::Disjoint
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn point_relations() {
    let q = Point2D::new(Point::new([1.0, 1.0]));
    assert_eq!(q.relate(0.0, 2.0, 0.0, 2.0), Relation::Crosses);
    assert_eq!(q.relate(1.5, 2.0, 0.0, 2.0), Relation::Outside);
    assert!(q.contains(1.0, 1.0));
    let (a, b, c) = (Point::new([0.0, 0.0]), Point::new([2.0, 2.0]), Point::new([2.0, 0.0]));
    assert!(q.intersects_line(&a, &b));
    assert!(!q.contains_line(&a, &b));
    assert!(q.intersects_triangle(&a, &b, &c));
    assert_eq!(q.within_triangle(&a, false, &b, false, &c, false), WithinRelation::Candidate);
    assert_eq!(q.within_line(&a, true, &c, [true; 2]), WithinRelation::Disjoint);
    assert_eq!(q.within_point(&Point::new([1.0, 1.0])), WithinRelation::Candidate);
  }
}
