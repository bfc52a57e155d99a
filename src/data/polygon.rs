use crate::data::{Point, PointLocation, Rectangle};
use crate::{point_on_segment, Error, Malformed, Orientation};

/// Polygon with an outer shell and zero or more holes.
///
/// Rings may be given closed (first point repeated at the end) or open; they
/// are stored open. Winding order is unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
  shell: Vec<Point<f64, 2>>,
  holes: Vec<Vec<Point<f64, 2>>>,
}

impl Polygon {
  pub fn new(shell: Vec<Point<f64, 2>>) -> Result<Polygon, Error> {
    Polygon::with_holes(shell, vec![])
  }

  pub fn with_holes(
    shell: Vec<Point<f64, 2>>,
    holes: Vec<Vec<Point<f64, 2>>>,
  ) -> Result<Polygon, Error> {
    let shell = open_ring(shell)?;
    let holes = holes.into_iter().map(open_ring).collect::<Result<_, _>>()?;
    Ok(Polygon { shell, holes })
  }

  /// Convenience constructor from `(x, y)` pairs.
  pub fn from_coords(shell: &[(f64, f64)]) -> Result<Polygon, Error> {
    Polygon::new(shell.iter().copied().map(Point::from).collect())
  }

  pub fn shell(&self) -> &[Point<f64, 2>] {
    &self.shell
  }

  pub fn holes(&self) -> &[Vec<Point<f64, 2>>] {
    &self.holes
  }

  pub fn bounding_box(&self) -> Rectangle {
    Rectangle::bounding(&self.shell)
  }

  /// Twice the signed area of the shell minus the holes, using the shell's
  /// own winding for the sign.
  pub fn signed_area_2x(&self) -> f64 {
    let shell = ring_signed_area_2x(&self.shell);
    let holes: f64 = self
      .holes
      .iter()
      .map(|hole| ring_signed_area_2x(hole).abs())
      .sum();
    shell.signum() * (shell.abs() - holes)
  }

  /// Locate a point against the shell and the holes. Hole boundaries count as
  /// the polygon boundary.
  pub fn locate(&self, pt: &Point<f64, 2>) -> PointLocation {
    match locate_in_ring(&self.shell, pt) {
      PointLocation::Outside => PointLocation::Outside,
      PointLocation::OnBoundary => PointLocation::OnBoundary,
      PointLocation::Inside => {
        for hole in &self.holes {
          match locate_in_ring(hole, pt) {
            PointLocation::Inside => return PointLocation::Outside,
            PointLocation::OnBoundary => return PointLocation::OnBoundary,
            PointLocation::Outside => {}
          }
        }
        PointLocation::Inside
      }
    }
  }
}

fn open_ring(mut ring: Vec<Point<f64, 2>>) -> Result<Vec<Point<f64, 2>>, Error> {
  for pt in &ring {
    pt.validate()?;
  }
  if ring.len() > 1 && ring.first() == ring.last() {
    ring.pop();
  }
  if ring.len() < 3 {
    return Err(Malformed::InsufficientVertices.into());
  }
  Ok(ring)
}

pub fn ring_signed_area_2x(ring: &[Point<f64, 2>]) -> f64 {
  let n = ring.len();
  (0..n)
    .map(|i| {
      let p = &ring[i];
      let q = &ring[(i + 1) % n];
      p.array[0] * q.array[1] - q.array[0] * p.array[1]
    })
    .sum()
}

/// Winding-number point location. Every turn is decided by
/// [`Orientation::new`], so the answer is exact for any finite input.
pub fn locate_in_ring(ring: &[Point<f64, 2>], pt: &Point<f64, 2>) -> PointLocation {
  let n = ring.len();
  let mut winding = 0i64;
  for i in 0..n {
    let a = &ring[i];
    let b = &ring[(i + 1) % n];
    if point_on_segment(pt, a, b) {
      return PointLocation::OnBoundary;
    }
    let (ay, by, py) = (a.array[1], b.array[1], pt.array[1]);
    if ay <= py {
      if by > py && Orientation::new(a, b, pt).is_ccw() {
        winding += 1;
      }
    } else if by <= py && Orientation::new(a, b, pt).is_cw() {
      winding -= 1;
    }
  }
  if winding == 0 {
    PointLocation::Outside
  } else {
    PointLocation::Inside
  }
}
