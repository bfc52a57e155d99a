use super::{Point, PointLocation};
use crate::{Orientation, PolygonScalar};

/// Triangle in quantized space as produced by the tessellator. Each flag is
/// true iff the edge lies on the boundary of the original shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
  pub a: Point<i32, 2>,
  pub b: Point<i32, 2>,
  pub c: Point<i32, 2>,
  pub ab: bool,
  pub bc: bool,
  pub ca: bool,
}

impl Triangle {
  pub fn new(vertices: [Point<i32, 2>; 3], edges: [bool; 3]) -> Triangle {
    let [a, b, c] = vertices;
    let [ab, bc, ca] = edges;
    Triangle {
      a,
      b,
      c,
      ab,
      bc,
      ca,
    }
  }

  pub fn vertices(&self) -> [Point<i32, 2>; 3] {
    [self.a, self.b, self.c]
  }

  pub fn edges(&self) -> [bool; 3] {
    [self.ab, self.bc, self.ca]
  }

  pub fn view(&'_ self) -> TriangleView<'_, i32> {
    TriangleView([&self.a, &self.b, &self.c])
  }
}

/// Borrowed triangle of any orientation.
pub struct TriangleView<'a, T>([&'a Point<T, 2>; 3]);

impl<'a, T> TriangleView<'a, T>
where
  T: PolygonScalar,
{
  pub fn new(pts: [&'a Point<T, 2>; 3]) -> TriangleView<'a, T> {
    TriangleView(pts)
  }

  pub fn orientation(&self) -> Orientation {
    let arr = &self.0;
    Orientation::new(arr[0], arr[1], arr[2])
  }

  // O(1)
  pub fn locate(&self, pt: &Point<T, 2>) -> PointLocation {
    use Orientation::*;
    let [a, b, c] = self.0;
    let (a, c) = match self.orientation() {
      ClockWise => (c, a),
      _ => (a, c),
    };
    let ab = a.orientation(b, pt);
    let bc = b.orientation(c, pt);
    let ca = c.orientation(a, pt);
    if ab == ClockWise || bc == ClockWise || ca == ClockWise {
      PointLocation::Outside
    } else if ab == CoLinear || bc == CoLinear || ca == CoLinear {
      PointLocation::OnBoundary
    } else {
      PointLocation::Inside
    }
  }
}

impl<'a> TriangleView<'a, f64> {
  pub fn signed_area_2x(&self) -> f64 {
    let [a, b, c] = self.0;
    let (ax, ay) = (a.array[0], a.array[1]);
    let (bx, by) = (b.array[0], b.array[1]);
    let (cx, cy) = (c.array[0], c.array[1]);
    ax * by - bx * ay + bx * cy - cx * by + cx * ay - ax * cy
    // x1*y2 - x2*y1 +
    // x2*y3 - x3*y2 +
    // x3*y1 - x1*y3
  }

  pub fn centroid(&self) -> Point<f64, 2> {
    let [a, b, c] = self.0;
    Point::new([
      (a.array[0] + b.array[0] + c.array[0]) / 3.0,
      (a.array[1] + b.array[1] + c.array[1]) / 3.0,
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn locate_both_windings() {
    let a = Point::new([0, 0]);
    let b = Point::new([4, 0]);
    let c = Point::new([0, 4]);
    for view in [TriangleView::new([&a, &b, &c]), TriangleView::new([&a, &c, &b])] {
      assert_eq!(view.locate(&Point::new([1, 1])), PointLocation::Inside);
      assert_eq!(view.locate(&Point::new([2, 2])), PointLocation::OnBoundary);
      assert_eq!(view.locate(&Point::new([3, 3])), PointLocation::Outside);
    }
  }

  #[test]
  fn degenerate_locate() {
    let a = Point::new([0, 0]);
    let b = Point::new([2, 0]);
    let c = Point::new([4, 0]);
    let view = TriangleView::new([&a, &b, &c]);
    assert_eq!(view.orientation(), Orientation::CoLinear);
    assert_eq!(view.locate(&Point::new([1, 0])), PointLocation::OnBoundary);
    assert_ne!(view.locate(&Point::new([1, 1])), PointLocation::Inside);
  }

  #[test]
  fn area_and_centroid() {
    let a = Point::new([0.0, 0.0]);
    let b = Point::new([3.0, 0.0]);
    let c = Point::new([0.0, 3.0]);
    let view = TriangleView::new([&a, &b, &c]);
    assert_eq!(view.signed_area_2x(), 9.0);
    assert_eq!(view.centroid(), Point::new([1.0, 1.0]));
  }
}
