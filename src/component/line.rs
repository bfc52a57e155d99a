use super::{along, piece_midpoints, segment_bbox, Component2D, DocumentTriangle, Relation, WithinRelation};
use crate::data::{Line, Point, Rectangle};
use crate::{point_on_segment, segment_intersects_box, segment_intersects_triangle};
use crate::{segments_intersect, Orientation};

/// Query polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Line2D {
  points: Vec<Point<f64, 2>>,
  bbox: Rectangle,
}

impl Line2D {
  pub fn new(line: &Line) -> Line2D {
    Line2D {
      points: line.points().to_vec(),
      bbox: line.bounding_box(),
    }
  }

  fn segments(&self) -> impl Iterator<Item = (&Point<f64, 2>, &Point<f64, 2>)> + '_ {
    self.points.windows(2).map(|w| (&w[0], &w[1]))
  }

  // Query segments that overlap `a`-`b` along a common line.
  fn collinear_overlaps<'a>(
    &'a self,
    a: &'a Point<f64, 2>,
    b: &'a Point<f64, 2>,
  ) -> impl Iterator<Item = (&'a Point<f64, 2>, &'a Point<f64, 2>)> + 'a {
    self.segments().filter(move |(p, q)| {
      Orientation::new(a, b, p).is_colinear()
        && Orientation::new(a, b, q).is_colinear()
        && segments_intersect(a, b, p, q)
    })
  }
}

impl Component2D for Line2D {
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
    if self
      .segments()
      .any(|(a, b)| segment_intersects_box(a, b, min_x, max_x, min_y, max_y))
    {
      Relation::Crosses
    } else {
      Relation::Outside
    }
  }

  fn contains(&self, x: f64, y: f64) -> bool {
    let p = [x, y];
    self.segments().any(|(a, b)| point_on_segment(&p, a, b))
  }

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    if !self.bbox.intersects(&segment_bbox(a, b)) {
      return false;
    }
    self.segments().any(|(p, q)| segments_intersect(a, b, p, q))
  }

  // Covered when every piece between the overlapping query vertices is on
  // the polyline.
  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    if a == b {
      return self.contains_point(a);
    }
    if !self.contains_point(a) || !self.contains_point(b) {
      return false;
    }
    let (lo, hi) = {
      let (s, t) = (along(a, b, a), along(a, b, b));
      (s.min(t), s.max(t))
    };
    let cuts: Vec<Point<f64, 2>> = self
      .collinear_overlaps(a, b)
      .flat_map(|(p, q)| vec![*p, *q])
      .filter(|p| {
        let s = along(a, b, p);
        lo < s && s < hi
      })
      .collect();
    piece_midpoints(a, b, cuts.iter()).iter().all(|mid| {
      self
        .collinear_overlaps(a, b)
        .any(|(p, q)| point_on_segment(mid, p, q))
    })
  }

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    if !self.bbox.intersects(&Rectangle::bounding(&[*a, *b, *c])) {
      return false;
    }
    self
      .segments()
      .any(|(p, q)| segment_intersects_triangle(p, q, a, b, c))
  }

  fn contains_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    Orientation::new(a, b, c).is_colinear()
      && self.contains_line(a, b)
      && self.contains_line(b, c)
      && self.contains_line(c, a)
  }

  fn within_point(&self, _p: &Point<f64, 2>) -> WithinRelation {
    WithinRelation::Disjoint
  }

  // `ends` marks the document endpoints where its polyline stops. A query
  // running along the document past such an end is not within it.
  fn within_line(
    &self,
    a: &Point<f64, 2>,
    _ab: bool,
    b: &Point<f64, 2>,
    ends: [bool; 2],
  ) -> WithinRelation {
    let (s0, s1) = (along(a, b, a), along(a, b, b));
    let (lo, hi) = (s0.min(s1), s0.max(s1));
    let (lo_end, hi_end) = if s0 <= s1 {
      (ends[0], ends[1])
    } else {
      (ends[1], ends[0])
    };
    let mut relation = WithinRelation::Disjoint;
    for (p, q) in self.collinear_overlaps(a, b) {
      let (t0, t1) = (along(a, b, p), along(a, b, q));
      let (qlo, qhi) = (t0.min(t1), t0.max(t1));
      // A shared stretch, not a single touching point.
      if qhi.min(hi) > qlo.max(lo) {
        if (lo_end && qlo < lo) || (hi_end && qhi > hi) {
          return WithinRelation::NotWithin;
        }
        relation = WithinRelation::Candidate;
      }
    }
    relation
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
    if !self.intersects_triangle(a, b, c) {
      return WithinRelation::Disjoint;
    }
    let doc = match DocumentTriangle::new(a, ab, b, bc, c, ca) {
      Some(doc) => doc,
      None => return WithinRelation::Disjoint,
    };
    if self.segments().any(|(s, t)| doc.segment_leaves(s, t)) {
      return WithinRelation::NotWithin;
    }
    if self.segments().any(|(s, t)| doc.segment_overlaps(s, t)) {
      WithinRelation::Candidate
    } else {
      WithinRelation::Disjoint
    }
  }
}
