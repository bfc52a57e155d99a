use super::{triangle_bbox, Component2D, Polygon2D, Relation, WithinRelation};
use crate::data::{Point, Rectangle};
use crate::{point_in_triangle, segment_intersects_box, Error};

/// Query box that does not wrap. Wrapping boxes are split before they get
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle2D {
  rect: Rectangle,
  // Exact polygon predicates for the CONTAINS verdict.
  polygon: Polygon2D,
}

impl Rectangle2D {
  pub fn new(rect: Rectangle) -> Result<Rectangle2D, Error> {
    debug_assert!(!rect.crosses_antimeridian());
    Ok(Rectangle2D {
      rect,
      polygon: Polygon2D::new(rect.to_polygon()?),
    })
  }

  fn touches_segment(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    let r = &self.rect;
    segment_intersects_box(a, b, r.min_x, r.max_x, r.min_y, r.max_y)
  }
}

impl Component2D for Rectangle2D {
  fn bounding_box(&self) -> Rectangle {
    self.rect
  }

  fn relate(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Relation {
    let cell = Rectangle {
      min_x,
      max_x,
      min_y,
      max_y,
    };
    if !self.rect.intersects(&cell) {
      Relation::Outside
    } else if self.rect.contains_rectangle(&cell) {
      Relation::Inside
    } else {
      Relation::Crosses
    }
  }

  fn contains(&self, x: f64, y: f64) -> bool {
    self.rect.contains_point(&Point::new([x, y]))
  }

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.touches_segment(a, b)
  }

  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.contains_point(a) && self.contains_point(b)
  }

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    if !self.rect.intersects(&triangle_bbox(a, b, c)) {
      return false;
    }
    self.touches_segment(a, b)
      || self.touches_segment(b, c)
      || self.touches_segment(c, a)
      || point_in_triangle(&[self.rect.min_x, self.rect.min_y], a, b, c)
  }

  fn contains_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    self.contains_point(a) && self.contains_point(b) && self.contains_point(c)
  }

  fn within_point(&self, _p: &Point<f64, 2>) -> WithinRelation {
    WithinRelation::Disjoint
  }

  fn within_line(
    &self,
    _a: &Point<f64, 2>,
    _ab: bool,
    _b: &Point<f64, 2>,
    _ends: [bool; 2],
  ) -> WithinRelation {
    WithinRelation::Disjoint
  }

  fn within_triangle(
    &self,
    a: &Point<f64, 2>,
    ab: bool,
    b: &Point<f64, 2>,
    bc: bool,
    c: &Point<f64, 2>,
    ca: bool,
  ) -> WithinRelation {
    self.polygon.within_triangle(a, ab, b, bc, c, ca)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn p(x: f64, y: f64) -> Point<f64, 2> {
    Point::new([x, y])
  }

  #[test]
  fn relate_cells() {
    let q = Rectangle2D::new(Rectangle::new(0.0, 10.0, 0.0, 10.0).unwrap()).unwrap();
    assert_eq!(q.relate(1.0, 2.0, 1.0, 2.0), Relation::Inside);
    assert_eq!(q.relate(0.0, 10.0, 0.0, 10.0), Relation::Inside);
    assert_eq!(q.relate(5.0, 15.0, 1.0, 2.0), Relation::Crosses);
    assert_eq!(q.relate(10.5, 15.0, 1.0, 2.0), Relation::Outside);
  }

  #[test]
  fn triangle_around_box() {
    let q = Rectangle2D::new(Rectangle::new(0.0, 1.0, 0.0, 1.0).unwrap()).unwrap();
    let (a, b, c) = (p(-10.0, -10.0), p(10.0, -10.0), p(0.0, 10.0));
    assert!(q.intersects_triangle(&a, &b, &c));
    assert!(!q.contains_triangle(&a, &b, &c));
    assert_eq!(q.within_triangle(&a, true, &b, true, &c, true), WithinRelation::Candidate);
    let (a, b, c) = (p(0.2, 0.2), p(0.8, 0.2), p(0.5, 0.8));
    assert!(q.contains_triangle(&a, &b, &c));
    assert!(q.intersects_triangle(&a, &b, &c));
  }

  #[test]
  fn degenerate_box() {
    let q = Rectangle2D::new(Rectangle::new(0.0, 0.0, 0.0, 10.0).unwrap()).unwrap();
    assert!(q.contains(0.0, 5.0));
    assert!(q.intersects_line(&p(-1.0, 5.0), &p(1.0, 5.0)));
    assert!(!q.contains_line(&p(-1.0, 5.0), &p(1.0, 5.0)));
  }
}
