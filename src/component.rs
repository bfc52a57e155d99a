//! Query-side predicates.
//!
//! A [`Component2D`] is built once per query geometry and then shared
//! read-only by every thread that evaluates candidate documents. All
//! coordinates are decoded doubles; exactness comes from
//! [`Orientation::new`](crate::Orientation::new).
use crate::data::{Point, PointLocation, Rectangle, TriangleView};
use crate::{point_on_segment, segments_cross, Orientation};

mod circle;
mod line;
mod multi;
mod point;
mod polygon;
mod rectangle;

pub use circle::{haversine_meters, Circle2D, DistanceMetric, EARTH_MEAN_RADIUS_METERS};
pub use line::Line2D;
pub use multi::Multi2D;
pub use point::Point2D;
pub use polygon::Polygon2D;
pub use rectangle::Rectangle2D;

/// Relation of a range-index cell to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
  /// The cell is entirely inside the query.
  Inside,
  /// The cell and the query do not touch.
  Outside,
  /// Anything else. Always a safe answer.
  Crosses,
}

/// Verdict of one stored primitive towards "the query lies within the
/// document".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WithinRelation {
  /// The primitive covers part of the query and does not rule it out.
  Candidate,
  /// The document boundary passes through the query.
  NotWithin,
  /// The primitive says nothing about the query.
  Disjoint,
}

impl WithinRelation {
  /// Accumulate verdicts: `NotWithin` wins, then `Candidate`.
  #[must_use]
  pub fn combine(self, other: WithinRelation) -> WithinRelation {
    use WithinRelation::*;
    match (self, other) {
      (NotWithin, _) | (_, NotWithin) => NotWithin,
      (Candidate, _) | (_, Candidate) => Candidate,
      (Disjoint, Disjoint) => Disjoint,
    }
  }
}

pub trait Component2D: Send + Sync + std::fmt::Debug {
  /// Bounding box of the query geometry. Never wraps.
  fn bounding_box(&self) -> Rectangle;

  fn relate(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Relation;

  fn contains(&self, x: f64, y: f64) -> bool;

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool;

  /// Implies [`intersects_line`](Component2D::intersects_line).
  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool;

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool;

  /// Implies [`intersects_triangle`](Component2D::intersects_triangle).
  fn contains_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool;

  fn within_point(&self, p: &Point<f64, 2>) -> WithinRelation;

  /// `ends` marks the endpoints that end the document polyline.
  fn within_line(
    &self,
    a: &Point<f64, 2>,
    ab: bool,
    b: &Point<f64, 2>,
    ends: [bool; 2],
  ) -> WithinRelation;

  /// Edge flags tell original boundary edges (`true`) from tessellation
  /// diagonals.
  #[allow(clippy::too_many_arguments)]
  fn within_triangle(
    &self,
    a: &Point<f64, 2>,
    ab: bool,
    b: &Point<f64, 2>,
    bc: bool,
    c: &Point<f64, 2>,
    ca: bool,
  ) -> WithinRelation;

  fn min_x(&self) -> f64 {
    self.bounding_box().min_x
  }

  fn max_x(&self) -> f64 {
    self.bounding_box().max_x
  }

  fn min_y(&self) -> f64 {
    self.bounding_box().min_y
  }

  fn max_y(&self) -> f64 {
    self.bounding_box().max_y
  }

  fn contains_point(&self, p: &Point<f64, 2>) -> bool {
    self.contains(p.array[0], p.array[1])
  }
}

pub(crate) fn triangle_bbox(a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> Rectangle {
  Rectangle::bounding(&[*a, *b, *c])
}

pub(crate) fn segment_bbox(a: &Point<f64, 2>, b: &Point<f64, 2>) -> Rectangle {
  Rectangle::bounding(&[*a, *b])
}

// Position of `p` along the line through `a` and `b`, measured on the axis
// where the segment is longest. Monotone for points on that line.
pub(crate) fn along(a: &Point<f64, 2>, b: &Point<f64, 2>, p: &Point<f64, 2>) -> f64 {
  let dx = (b.array[0] - a.array[0]).abs();
  let dy = (b.array[1] - a.array[1]).abs();
  if dx >= dy {
    p.array[0]
  } else {
    p.array[1]
  }
}

// Split `a`-`b` at the given points (which are assumed to lie on it) and
// return the midpoints of the pieces.
pub(crate) fn piece_midpoints<'a, I>(a: &Point<f64, 2>, b: &Point<f64, 2>, cuts: I) -> Vec<Point<f64, 2>>
where
  I: Iterator<Item = &'a Point<f64, 2>>,
{
  let mut stops: Vec<Point<f64, 2>> = vec![*a, *b];
  stops.extend(cuts.copied());
  stops.sort_by(|p, q| along(a, b, p).total_cmp(&along(a, b, q)));
  stops.dedup();
  stops
    .windows(2)
    .map(|w| {
      Point::new([
        (w[0].array[0] + w[1].array[0]) / 2.0,
        (w[0].array[1] + w[1].array[1]) / 2.0,
      ])
    })
    .collect()
}

/// Document triangle in counter-clockwise order. `real[i]` is the flag of
/// the edge from `v[i]` to `v[i + 1]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentTriangle {
  v: [Point<f64, 2>; 3],
  real: [bool; 3],
}

impl DocumentTriangle {
  /// `None` for a flat triangle.
  pub(crate) fn new(
    a: &Point<f64, 2>,
    ab: bool,
    b: &Point<f64, 2>,
    bc: bool,
    c: &Point<f64, 2>,
    ca: bool,
  ) -> Option<DocumentTriangle> {
    match Orientation::new(a, b, c) {
      Orientation::CounterClockWise => Some(DocumentTriangle {
        v: [*a, *b, *c],
        real: [ab, bc, ca],
      }),
      Orientation::ClockWise => Some(DocumentTriangle {
        v: [*a, *c, *b],
        real: [ca, bc, ab],
      }),
      Orientation::CoLinear => None,
    }
  }

  pub(crate) fn locate(&self, p: &Point<f64, 2>) -> PointLocation {
    TriangleView::new([&self.v[0], &self.v[1], &self.v[2]]).locate(p)
  }

  fn edge(&self, i: usize) -> (&Point<f64, 2>, &Point<f64, 2>) {
    (&self.v[i], &self.v[(i + 1) % 3])
  }

  // Both edges at vertex `i` are original, so the angle of the triangle at
  // `i` is the whole angle of the document there.
  fn is_corner(&self, i: usize) -> bool {
    self.real[i] && self.real[(i + 2) % 3]
  }

  // Moving from vertex `i` towards `x` immediately leaves the closed triangle.
  fn leaves_at_vertex(&self, i: usize, x: &Point<f64, 2>) -> bool {
    let (v, next, prev) = (&self.v[i], &self.v[(i + 1) % 3], &self.v[(i + 2) % 3]);
    Orientation::new(v, next, x).is_cw() || Orientation::new(prev, v, x).is_cw()
  }

  fn pieces(&self, s: &Point<f64, 2>, t: &Point<f64, 2>) -> Vec<Point<f64, 2>> {
    piece_midpoints(s, t, self.v.iter().filter(|v| point_on_segment(*v, s, t)))
  }

  /// Some point of `s`-`t` lies strictly inside the triangle.
  pub(crate) fn segment_enters_interior(&self, s: &Point<f64, 2>, t: &Point<f64, 2>) -> bool {
    if self.locate(s) == PointLocation::Inside || self.locate(t) == PointLocation::Inside {
      return true;
    }
    if (0..3).any(|i| {
      let (p, q) = self.edge(i);
      segments_cross(s, t, p, q)
    }) {
      return true;
    }
    self
      .pieces(s, t)
      .iter()
      .any(|mid| self.locate(mid) == PointLocation::Inside)
  }

  /// `s`-`t` shares more than isolated points with the closed triangle. A
  /// degenerate segment only has to touch it.
  pub(crate) fn segment_overlaps(&self, s: &Point<f64, 2>, t: &Point<f64, 2>) -> bool {
    if s == t {
      return self.locate(s) != PointLocation::Outside;
    }
    self.segment_enters_interior(s, t)
      || self
        .pieces(s, t)
        .iter()
        .any(|mid| self.locate(mid) == PointLocation::OnBoundary)
  }

  /// Moving along `s`-`t` passes out of the document through an original
  /// edge or through a vertex between two original edges.
  pub(crate) fn segment_leaves(&self, s: &Point<f64, 2>, t: &Point<f64, 2>) -> bool {
    for i in 0..3 {
      let (p, q) = self.edge(i);
      if self.real[i] && segments_cross(s, t, p, q) {
        return true;
      }
    }
    for i in 0..3 {
      let v = &self.v[i];
      if self.is_corner(i) && point_on_segment(v, s, t) {
        if (s != v && self.leaves_at_vertex(i, s)) || (t != v && self.leaves_at_vertex(i, t)) {
          return true;
        }
      }
    }
    // An endpoint on an original edge, the other endpoint beyond it.
    for (x, y) in [(s, t), (t, s)] {
      for i in 0..3 {
        let (p, q) = self.edge(i);
        if self.real[i]
          && x != p
          && x != q
          && point_on_segment(x, p, q)
          && Orientation::new(p, q, y).is_cw()
        {
          return true;
        }
      }
    }
    false
  }
}
