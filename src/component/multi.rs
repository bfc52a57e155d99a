use super::{Component2D, Relation, WithinRelation};
use crate::data::{Point, Rectangle};

/// Union of several components.
#[derive(Debug)]
pub struct Multi2D {
  components: Vec<Box<dyn Component2D>>,
  bbox: Rectangle,
}

impl Multi2D {
  pub fn new(components: Vec<Box<dyn Component2D>>) -> Multi2D {
    let bbox = components
      .iter()
      .map(|c| c.bounding_box())
      .reduce(|a, b| a.union(&b))
      .unwrap_or_else(|| Rectangle::bounding(&[]));
    Multi2D { components, bbox }
  }

  pub fn components(&self) -> &[Box<dyn Component2D>] {
    &self.components
  }

  fn any<F>(&self, f: F) -> bool
  where
    F: Fn(&dyn Component2D) -> bool,
  {
    self.components.iter().any(|c| f(c.as_ref()))
  }

  fn within<F>(&self, f: F) -> WithinRelation
  where
    F: Fn(&dyn Component2D) -> WithinRelation,
  {
    let mut relation = WithinRelation::Disjoint;
    for c in &self.components {
      relation = relation.combine(f(c.as_ref()));
      if relation == WithinRelation::NotWithin {
        break;
      }
    }
    relation
  }
}

impl Component2D for Multi2D {
  fn bounding_box(&self) -> Rectangle {
    self.bbox
  }

  fn relate(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Relation {
    let mut relation = Relation::Outside;
    for c in &self.components {
      match c.relate(min_x, max_x, min_y, max_y) {
        Relation::Inside => return Relation::Inside,
        Relation::Crosses => relation = Relation::Crosses,
        Relation::Outside => {}
      }
    }
    relation
  }

  fn contains(&self, x: f64, y: f64) -> bool {
    self.any(|c| c.contains(x, y))
  }

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.any(|c| c.intersects_line(a, b))
  }

  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.any(|c| c.contains_line(a, b))
  }

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    self.any(|q| q.intersects_triangle(a, b, c))
  }

  fn contains_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    self.any(|q| q.contains_triangle(a, b, c))
  }

  fn within_point(&self, p: &Point<f64, 2>) -> WithinRelation {
    self.within(|c| c.within_point(p))
  }

  fn within_line(
    &self,
    a: &Point<f64, 2>,
    ab: bool,
    b: &Point<f64, 2>,
    ends: [bool; 2],
  ) -> WithinRelation {
    self.within(|c| c.within_line(a, ab, b, ends))
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
    self.within(|q| q.within_triangle(a, ab, b, bc, c, ca))
  }
}
