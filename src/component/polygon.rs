use super::{piece_midpoints, segment_bbox, triangle_bbox, Component2D, DocumentTriangle, Relation};
use super::WithinRelation;
use crate::data::{Point, PointLocation, Polygon, Rectangle, TriangleView};
use crate::{point_in_triangle, point_on_segment, segment_intersects_box, segments_cross};
use crate::{segments_intersect, Orientation};

/// Query polygon with holes. The boundary belongs to the polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
  polygon: Polygon,
  edges: Vec<[Point<f64, 2>; 2]>,
  bbox: Rectangle,
}

impl Polygon2D {
  pub fn new(polygon: Polygon) -> Polygon2D {
    let mut edges = Vec::new();
    for ring in std::iter::once(polygon.shell()).chain(polygon.holes().iter().map(Vec::as_slice)) {
      let n = ring.len();
      for i in 0..n {
        edges.push([ring[i], ring[(i + 1) % n]]);
      }
    }
    let bbox = polygon.bounding_box();
    Polygon2D {
      polygon,
      edges,
      bbox,
    }
  }

  fn vertices(&self) -> impl Iterator<Item = &Point<f64, 2>> + '_ {
    self.edges.iter().map(|[p, _]| p)
  }

  fn locate(&self, p: &Point<f64, 2>) -> PointLocation {
    if !self.bbox.contains_point(p) {
      return PointLocation::Outside;
    }
    self.polygon.locate(p)
  }

  fn is_interior(&self, p: &Point<f64, 2>) -> bool {
    self.locate(p) == PointLocation::Inside
  }

  fn crosses_boundary(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.edges.iter().any(|[p, q]| segments_cross(a, b, p, q))
  }

  fn touches_boundary(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.edges.iter().any(|[p, q]| segments_intersect(a, b, p, q))
  }

  // The pieces of `a`-`b` between the polygon vertices lying on it. Each
  // piece is either inside or outside the polygon, decided by its midpoint.
  fn pieces(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> Vec<Point<f64, 2>> {
    let cuts: Vec<&Point<f64, 2>> = self
      .vertices()
      .filter(|v| point_on_segment(*v, a, b))
      .collect();
    piece_midpoints(a, b, cuts.into_iter())
  }

  /// Some point of the segment lies strictly inside the polygon.
  pub fn segment_enters_interior(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    if !self.bbox.intersects(&segment_bbox(a, b)) {
      return false;
    }
    if self.is_interior(a) || self.is_interior(b) || self.crosses_boundary(a, b) {
      return true;
    }
    self.pieces(a, b).iter().any(|mid| self.is_interior(mid))
  }

  fn box_edges_intersect(&self, cell: &Rectangle) -> bool {
    self.edges.iter().any(|[p, q]| {
      segment_intersects_box(p, q, cell.min_x, cell.max_x, cell.min_y, cell.max_y)
    })
  }
}

impl Component2D for Polygon2D {
  fn bounding_box(&self) -> Rectangle {
    self.bbox
  }

  fn relate(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Relation {
    let cell = Rectangle {
      min_x,
      max_x,
      min_y,
      max_y,
    };
    if !self.bbox.intersects(&cell) {
      return Relation::Outside;
    }
    if self.box_edges_intersect(&cell) {
      return Relation::Crosses;
    }
    // The boundary misses the cell, so the whole cell is on one side of it.
    if self.contains_point(&Point::new([min_x, min_y])) {
      Relation::Inside
    } else {
      Relation::Outside
    }
  }

  fn contains(&self, x: f64, y: f64) -> bool {
    self.locate(&Point::new([x, y])) != PointLocation::Outside
  }

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    if !self.bbox.intersects(&segment_bbox(a, b)) {
      return false;
    }
    self.contains_point(a) || self.contains_point(b) || self.touches_boundary(a, b)
  }

  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    if !self.bbox.contains_rectangle(&segment_bbox(a, b)) {
      return false;
    }
    if !self.contains_point(a) || !self.contains_point(b) || self.crosses_boundary(a, b) {
      return false;
    }
    self.pieces(a, b).iter().all(|mid| self.contains_point(mid))
  }

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    if !self.bbox.intersects(&triangle_bbox(a, b, c)) {
      return false;
    }
    if self.contains_point(a) || self.contains_point(b) || self.contains_point(c) {
      return true;
    }
    if self.touches_boundary(a, b) || self.touches_boundary(b, c) || self.touches_boundary(c, a) {
      return true;
    }
    point_in_triangle(&self.polygon.shell()[0], a, b, c)
  }

  fn contains_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    if !(self.contains_line(a, b) && self.contains_line(b, c) && self.contains_line(c, a)) {
      return false;
    }
    if Orientation::new(a, b, c).is_colinear() {
      return true;
    }
    // No hole may poke into the triangle.
    let view = TriangleView::new([a, b, c]);
    let hole_inside = self
      .polygon
      .holes()
      .iter()
      .flatten()
      .any(|v| view.locate(v) == PointLocation::Inside);
    !hole_inside && self.contains_point(&view.centroid())
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
    if !self.bbox.intersects(&triangle_bbox(a, b, c)) {
      return WithinRelation::Disjoint;
    }
    // Vertices of stored triangles are vertices of the document boundary.
    if self.is_interior(a) || self.is_interior(b) || self.is_interior(c) {
      return WithinRelation::NotWithin;
    }
    let mut relation = WithinRelation::Disjoint;
    for (p, q, real) in [(a, b, ab), (b, c, bc), (c, a, ca)] {
      if self.segment_enters_interior(p, q) {
        if real {
          return WithinRelation::NotWithin;
        }
        relation = WithinRelation::Candidate;
      }
    }
    if relation == WithinRelation::Candidate {
      return relation;
    }
    let doc = match DocumentTriangle::new(a, ab, b, bc, c, ca) {
      Some(doc) => doc,
      None => return WithinRelation::Disjoint,
    };
    // The query reaches into the triangle even when all its vertices are
    // on the triangle boundary.
    let covers_query = self
      .edges
      .iter()
      .any(|[p, q]| doc.segment_enters_interior(p, q));
    let centroid = TriangleView::new([a, b, c]).centroid();
    if covers_query || self.is_interior(&centroid) {
      WithinRelation::Candidate
    } else {
      WithinRelation::Disjoint
    }
  }
}
