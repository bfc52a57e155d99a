use super::{triangle_bbox, Component2D, Relation, WithinRelation};
use crate::data::{Circle, Point, Rectangle, MAX_LON, MIN_LON};
use crate::point_in_triangle;

pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_008.7714;

/// Great-circle distance between two `[lon, lat]` points.
pub fn haversine_meters(a: &Point<f64, 2>, b: &Point<f64, 2>) -> f64 {
  let lat1 = a.array[1].to_radians();
  let lat2 = b.array[1].to_radians();
  let dlat = lat2 - lat1;
  let dlon = (b.array[0] - a.array[0]).to_radians();
  let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
  2.0 * EARTH_MEAN_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
  Euclidean,
  /// Meters on a spherical earth with x as longitude.
  Haversine,
}

impl DistanceMetric {
  pub fn distance(self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> f64 {
    match self {
      DistanceMetric::Euclidean => {
        (a.array[0] - b.array[0]).hypot(a.array[1] - b.array[1])
      }
      DistanceMetric::Haversine => haversine_meters(a, b),
    }
  }
}

/// Query circle.
///
/// Under the haversine metric, closest points on segments are found in the
/// lon/lat plane, which is an approximation away from the equator.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle2D {
  center: Point<f64, 2>,
  radius: f64,
  metric: DistanceMetric,
  bbox: Rectangle,
}

impl Circle2D {
  pub fn new(circle: &Circle, metric: DistanceMetric) -> Circle2D {
    let (cx, cy) = (circle.center.array[0], circle.center.array[1]);
    let r = circle.radius;
    let bbox = match metric {
      DistanceMetric::Euclidean => Rectangle {
        min_x: cx - r,
        max_x: cx + r,
        min_y: cy - r,
        max_y: cy + r,
      },
      DistanceMetric::Haversine => geo_bbox(cx, cy, r),
    };
    Circle2D {
      center: circle.center,
      radius: r,
      metric,
      bbox,
    }
  }

  fn distance(&self, p: &Point<f64, 2>) -> f64 {
    self.metric.distance(&self.center, p)
  }

  // Closest point of the segment to the center, in coordinate space.
  fn segment_distance(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> f64 {
    let (ax, ay) = (a.array[0], a.array[1]);
    let (dx, dy) = (b.array[0] - ax, b.array[1] - ay);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
      0.0
    } else {
      (((self.center.array[0] - ax) * dx + (self.center.array[1] - ay) * dy) / len2).clamp(0.0, 1.0)
    };
    let closest = Point::new([ax + t * dx, ay + t * dy]);
    self.distance(&closest).min(self.distance(a)).min(self.distance(b))
  }
}

fn geo_bbox(lon: f64, lat: f64, radius: f64) -> Rectangle {
  let angle = radius / EARTH_MEAN_RADIUS_METERS;
  let dlat = angle.to_degrees();
  let min_y = lat - dlat;
  let max_y = lat + dlat;
  let full = |min_y: f64, max_y: f64| Rectangle {
    min_x: MIN_LON,
    max_x: MAX_LON,
    min_y: min_y.max(-90.0),
    max_y: max_y.min(90.0),
  };
  if min_y <= -90.0 || max_y >= 90.0 {
    return full(min_y, max_y);
  }
  let ratio = angle.sin() / lat.to_radians().cos();
  if ratio >= 1.0 {
    return full(min_y, max_y);
  }
  let dlon = ratio.asin().to_degrees();
  if lon - dlon < MIN_LON || lon + dlon > MAX_LON {
    // Wraps the antimeridian; widen instead of splitting.
    return full(min_y, max_y);
  }
  Rectangle {
    min_x: lon - dlon,
    max_x: lon + dlon,
    min_y,
    max_y,
  }
}

impl Component2D for Circle2D {
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
    let corners_in = cell.corners().iter().all(|c| self.contains_point(c));
    match self.metric {
      DistanceMetric::Euclidean => {
        if corners_in {
          return Relation::Inside;
        }
        let closest = Point::new([
          self.center.array[0].clamp(min_x, max_x),
          self.center.array[1].clamp(min_y, max_y),
        ]);
        if self.distance(&closest) <= self.radius {
          Relation::Crosses
        } else {
          Relation::Outside
        }
      }
      DistanceMetric::Haversine => {
        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;
        let edges_in = [
          Point::new([mid_x, min_y]),
          Point::new([mid_x, max_y]),
          Point::new([min_x, mid_y]),
          Point::new([max_x, mid_y]),
        ]
        .iter()
        .all(|c| self.contains_point(c));
        if corners_in && edges_in {
          Relation::Inside
        } else {
          Relation::Crosses
        }
      }
    }
  }

  fn contains(&self, x: f64, y: f64) -> bool {
    self.distance(&Point::new([x, y])) <= self.radius
  }

  fn intersects_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.segment_distance(a, b) <= self.radius
  }

  fn contains_line(&self, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
    self.contains_point(a) && self.contains_point(b)
  }

  fn intersects_triangle(&self, a: &Point<f64, 2>, b: &Point<f64, 2>, c: &Point<f64, 2>) -> bool {
    if !self.bbox.intersects(&triangle_bbox(a, b, c)) {
      return false;
    }
    point_in_triangle(&self.center, a, b, c)
      || self.intersects_line(a, b)
      || self.intersects_line(b, c)
      || self.intersects_line(c, a)
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
    if !self.bbox.intersects(&triangle_bbox(a, b, c)) {
      return WithinRelation::Disjoint;
    }
    if [a, b, c].iter().any(|v| self.distance(v) < self.radius) {
      return WithinRelation::NotWithin;
    }
    let mut relation = WithinRelation::Disjoint;
    for (p, q, real) in [(a, b, ab), (b, c, bc), (c, a, ca)] {
      if self.segment_distance(p, q) < self.radius {
        if real {
          return WithinRelation::NotWithin;
        }
        relation = WithinRelation::Candidate;
      }
    }
    if relation == WithinRelation::Disjoint && point_in_triangle(&self.center, a, b, c) {
      relation = WithinRelation::Candidate;
    }
    relation
  }
}
