//! Ear-clipping tessellation of quantized polygons with holes.
//!
//! Rings are snapped onto the encoding grid first, so every emitted vertex is
//! exactly a value the triangle codec stores. Holes are merged into the shell
//! through bridge edges and the resulting weakly simple ring is clipped with
//! plain ears, then with filtered points, then with cured local
//! intersections and finally by splitting along a valid diagonal.
//!
//! Every emitted triangle records which of its edges lie on an original ring
//! edge. Bridges and clipping diagonals are synthetic.
use log::debug;
use ordered_float::OrderedFloat;

use crate::data::polygon::{locate_in_ring, ring_signed_area_2x};
use crate::data::{Point, PointLocation, Polygon, Triangle};
use crate::encoding::Encoding;
use crate::utils::List;
use crate::{point_in_triangle, point_on_segment, segments_cross, segments_intersect};
use crate::{Error, Malformed, Orientation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TessellatorOptions {
  /// Fail with `SelfIntersections` when two ring edges cross, instead of
  /// trying to tessellate around the crossing.
  pub check_self_intersections: bool,
}

impl TessellatorOptions {
  #[must_use]
  pub fn with_self_intersection_check(mut self, enabled: bool) -> TessellatorOptions {
    self.check_self_intersections = enabled;
    self
  }
}

/// Tessellate a polygon in the coordinate space of `E`.
///
/// ```rust
/// # use shapekernel::algorithms::{tessellate, TessellatorOptions};
/// # use shapekernel::data::Polygon;
/// # use shapekernel::encoding::XYEncoding;
/// let square = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let triangles = tessellate::<XYEncoding>(&square, &TessellatorOptions::default()).unwrap();
/// assert_eq!(triangles.len(), 2);
/// ```
pub fn tessellate<E: Encoding>(
  polygon: &Polygon,
  options: &TessellatorOptions,
) -> Result<Vec<Triangle>, Error> {
  let shell = Ring::quantize::<E>(polygon.shell())?;
  if shell.len() < 3 {
    return Err(Malformed::InsufficientVertices.into());
  }
  if shell.is_flat() {
    return Err(Malformed::CoLinearViolation.into());
  }
  let mut holes = Vec::with_capacity(polygon.holes().len());
  for hole in polygon.holes() {
    let ring = Ring::quantize::<E>(hole)?;
    if ring
      .decoded
      .iter()
      .any(|pt| locate_in_ring(&shell.decoded, pt) == PointLocation::Outside)
    {
      return Err(Malformed::HoleOutsideShell.into());
    }
    // A concave shell can hold every hole vertex while a hole edge leaves it.
    if ring.edges().any(|(a, b)| leaves_ring(&shell, a, b)) {
      return Err(Malformed::HoleOutsideShell.into());
    }
    if ring.len() < 3 || ring.is_flat() {
      debug!("dropping hole without area ({} distinct points)", ring.len());
      continue;
    }
    holes.push(ring);
  }
  if options.check_self_intersections {
    check_self_intersections(&shell, &holes)?;
  }

  let mut tess = Tessellator::with_capacity(
    shell.len() + holes.iter().map(Ring::len).sum::<usize>(),
  );
  let outer = tess.push_ring(&shell, true);
  let outer = if holes.is_empty() {
    outer
  } else {
    let starts = holes.iter().map(|hole| tess.push_ring(hole, false)).collect();
    tess.eliminate_holes(outer, starts)?
  };
  if let Err(err) = tess.earcut(outer, Pass::Plain) {
    debug!("tessellation failed after {} triangles: {}", tess.triangles.len(), err);
    return Err(err);
  }
  if tess.triangles.is_empty() {
    return Err(Malformed::Untessellatable.into());
  }
  Ok(tess.triangles)
}

fn leaves_ring(ring: &Ring, a: &Point<f64, 2>, b: &Point<f64, 2>) -> bool {
  let mid = Point::new([(a.array[0] + b.array[0]) / 2.0, (a.array[1] + b.array[1]) / 2.0]);
  ring.edges().any(|(c, d)| segments_cross(a, b, c, d))
    || locate_in_ring(&ring.decoded, &mid) == PointLocation::Outside
}

// All pairs of ring edges. Edges that share an endpoint never cross.
fn check_self_intersections(shell: &Ring, holes: &[Ring]) -> Result<(), Error> {
  let edges: Vec<(&Point<f64, 2>, &Point<f64, 2>)> = std::iter::once(shell)
    .chain(holes.iter())
    .flat_map(|ring| ring.edges())
    .collect();
  for (i, (a, b)) in edges.iter().enumerate() {
    for (c, d) in &edges[i + 1..] {
      if segments_cross(a, b, c, d) {
        debug!("edges {:?}-{:?} and {:?}-{:?} cross", a, b, c, d);
        return Err(Malformed::SelfIntersections.into());
      }
    }
  }
  Ok(())
}

///////////////////////////////////////////////////////////////////////////////
// Quantized rings

struct Ring {
  encoded: Vec<Point<i32, 2>>,
  decoded: Vec<Point<f64, 2>>,
}

impl Ring {
  // Snap onto the grid and drop repeated points, including a repeated
  // closing point.
  fn quantize<E: Encoding>(ring: &[Point<f64, 2>]) -> Result<Ring, Error> {
    let mut encoded: Vec<Point<i32, 2>> = Vec::with_capacity(ring.len());
    for pt in ring {
      let pt = E::encode_point(pt)?;
      if encoded.last() != Some(&pt) {
        encoded.push(pt);
      }
    }
    while encoded.len() > 1 && encoded.first() == encoded.last() {
      encoded.pop();
    }
    let decoded = encoded.iter().map(E::decode_point).collect();
    Ok(Ring { encoded, decoded })
  }

  fn len(&self) -> usize {
    self.encoded.len()
  }

  fn is_flat(&self) -> bool {
    let (a, b) = (&self.decoded[0], &self.decoded[1]);
    self
      .decoded
      .iter()
      .all(|c| Orientation::new(a, b, c).is_colinear())
  }

  fn edges(&self) -> impl Iterator<Item = (&Point<f64, 2>, &Point<f64, 2>)> + '_ {
    let n = self.decoded.len();
    (0..n).map(move |i| (&self.decoded[i], &self.decoded[(i + 1) % n]))
  }
}

///////////////////////////////////////////////////////////////////////////////
// Ear clipping over a linked ring of nodes

#[derive(Debug, Clone, Copy)]
struct Node {
  pt: Point<f64, 2>,
  encoded: Point<i32, 2>,
  // Shared by a node and the copies made when splitting the ring.
  vertex: usize,
  // The edge towards the next node lies on an original ring edge.
  boundary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
  Plain,
  Filtered,
  Cured,
}

struct Tessellator {
  nodes: Vec<Node>,
  list: List,
  edges: Vec<[Point<f64, 2>; 2]>,
  triangles: Vec<Triangle>,
}

impl Tessellator {
  fn with_capacity(capacity: usize) -> Tessellator {
    Tessellator {
      nodes: Vec::with_capacity(capacity),
      list: List::with_capacity(capacity),
      edges: Vec::with_capacity(capacity),
      triangles: Vec::new(),
    }
  }

  fn pt(&self, node: usize) -> &Point<f64, 2> {
    &self.nodes[node].pt
  }

  fn x(&self, node: usize) -> f64 {
    self.nodes[node].pt.array[0]
  }

  fn y(&self, node: usize) -> f64 {
    self.nodes[node].pt.array[1]
  }

  fn next(&self, node: usize) -> usize {
    self.list.next(node)
  }

  fn prev(&self, node: usize) -> usize {
    self.list.prev(node)
  }

  fn orient(&self, a: usize, b: usize, c: usize) -> Orientation {
    Orientation::new(self.pt(a), self.pt(b), self.pt(c))
  }

  fn ccw(&self, a: usize, b: usize, c: usize) -> bool {
    self.orient(a, b, c).is_ccw()
  }

  fn cw(&self, a: usize, b: usize, c: usize) -> bool {
    self.orient(a, b, c).is_cw()
  }

  fn same_point(&self, a: usize, b: usize) -> bool {
    self.pt(a) == self.pt(b)
  }

  // Link a ring in the requested winding. Returns the leftmost node.
  fn push_ring(&mut self, ring: &Ring, ccw: bool) -> usize {
    let n = ring.len();
    let order: Vec<usize> = if (ring_signed_area_2x(&ring.decoded) > 0.0) == ccw {
      (0..n).collect()
    } else {
      (0..n).rev().collect()
    };
    let mut last = None;
    let mut leftmost = None;
    for i in order {
      let id = match last {
        None => self.list.push(),
        Some(prev) => self.list.insert_after(prev),
      };
      self.nodes.push(Node {
        pt: ring.decoded[i],
        encoded: ring.encoded[i],
        vertex: id,
        boundary: true,
      });
      let key = |node: usize| (OrderedFloat(self.x(node)), OrderedFloat(self.y(node)));
      leftmost = match leftmost {
        Some(best) if key(best) <= key(id) => Some(best),
        _ => Some(id),
      };
      last = Some(id);
    }
    for (a, b) in ring.edges() {
      self.edges.push([*a, *b]);
    }
    leftmost.unwrap_or(0)
  }

  fn push_copy(&mut self, node: usize) -> usize {
    let id = self.list.push();
    let copy = self.nodes[node];
    self.nodes.push(copy);
    id
  }

  // The segment a-b is covered by a single original ring edge.
  fn on_boundary(&self, a: usize, b: usize) -> bool {
    let (a, b) = (self.pt(a), self.pt(b));
    self
      .edges
      .iter()
      .any(|[p, q]| point_on_segment(a, p, q) && point_on_segment(b, p, q))
  }

  fn emit(&mut self, a: usize, b: usize, c: usize, edges: [bool; 3]) {
    let vertices = [
      self.nodes[a].encoded,
      self.nodes[b].encoded,
      self.nodes[c].encoded,
    ];
    self.triangles.push(Triangle::new(vertices, edges));
  }

  fn earcut(&mut self, start: usize, pass: Pass) -> Result<(), Error> {
    let mut ear = start;
    let mut stop = start;
    while self.prev(ear) != self.next(ear) {
      let prev = self.prev(ear);
      let next = self.next(ear);
      if self.is_ear(ear) {
        let ca = self.on_boundary(next, prev);
        let edges = [self.nodes[prev].boundary, self.nodes[ear].boundary, ca];
        self.emit(prev, ear, next, edges);
        self.list.delete(ear);
        self.nodes[prev].boundary = ca;
        // Skipping a vertex gives fewer slivers.
        ear = self.next(next);
        stop = ear;
        continue;
      }
      ear = next;
      if ear == stop {
        return match pass {
          Pass::Plain => {
            let start = self.filter_points(ear, ear);
            self.earcut(start, Pass::Filtered)
          }
          Pass::Filtered => {
            debug!("no ears left, curing local intersections");
            let start = self.filter_points(ear, ear);
            let start = self.cure_local_intersections(start);
            self.earcut(start, Pass::Cured)
          }
          Pass::Cured => {
            debug!("no ears left, splitting the ring along a diagonal");
            self.split_earcut(ear)
          }
        };
      }
    }
    Ok(())
  }

  fn is_ear(&self, ear: usize) -> bool {
    let a = self.prev(ear);
    let c = self.next(ear);
    if !self.ccw(a, ear, c) {
      return false;
    }
    let (pa, pb, pc) = (self.pt(a), self.pt(ear), self.pt(c));
    let mut p = self.next(c);
    while p != a {
      let pt = self.pt(p);
      if pt != pa
        && pt != pb
        && pt != pc
        && point_in_triangle(pt, pa, pb, pc)
        && !self.ccw(self.prev(p), p, self.next(p))
      {
        return false;
      }
      p = self.next(p);
    }
    true
  }

  // Remove duplicate and collinear nodes between `start` and `end`. Returns a
  // node that is still linked.
  fn filter_points(&mut self, start: usize, end: usize) -> usize {
    let mut p = start;
    let mut end = end;
    loop {
      let mut again = false;
      let prev = self.prev(p);
      let next = self.next(p);
      let duplicate = self.same_point(p, next);
      if duplicate || self.orient(prev, p, next).is_colinear() {
        self.nodes[prev].boundary =
          self.nodes[prev].boundary && (duplicate || self.nodes[p].boundary);
        self.list.delete(p);
        p = prev;
        end = prev;
        if p == self.next(p) {
          break;
        }
        again = true;
      } else {
        p = next;
      }
      if !again && p == end {
        break;
      }
    }
    end
  }

  // Clip pairs of edges that cross right next to each other.
  fn cure_local_intersections(&mut self, start: usize) -> usize {
    let mut start = start;
    let mut p = start;
    loop {
      let a = self.prev(p);
      let pn = self.next(p);
      let b = self.next(pn);
      if a != b
        && b != p
        && !self.same_point(a, b)
        && segments_intersect(self.pt(a), self.pt(p), self.pt(pn), self.pt(b))
        && self.locally_inside(a, b)
        && self.locally_inside(b, a)
      {
        let ca = self.on_boundary(b, a);
        let edges = [self.nodes[a].boundary, self.on_boundary(p, b), ca];
        self.emit(a, p, b, edges);
        self.list.delete(p);
        self.list.delete(pn);
        self.nodes[a].boundary = ca;
        p = b;
        start = b;
      }
      p = self.next(p);
      if p == start {
        break;
      }
    }
    self.filter_points(p, p)
  }

  fn split_earcut(&mut self, start: usize) -> Result<(), Error> {
    let mut a = start;
    loop {
      let mut b = self.next(self.next(a));
      while b != self.prev(a) {
        if self.nodes[a].vertex != self.nodes[b].vertex && self.is_valid_diagonal(a, b) {
          let c = self.split_polygon(a, b);
          let a = self.filter_points(a, self.next(a));
          let c = self.filter_points(c, self.next(c));
          self.earcut(a, Pass::Plain)?;
          return self.earcut(c, Pass::Plain);
        }
        b = self.next(b);
      }
      a = self.next(a);
      if a == start {
        break;
      }
    }
    Err(Malformed::Untessellatable.into())
  }

  fn is_valid_diagonal(&self, a: usize, b: usize) -> bool {
    let (an, ap) = (self.next(a), self.prev(a));
    let (bn, bp) = (self.next(b), self.prev(b));
    let vertex = |node: usize| self.nodes[node].vertex;
    vertex(an) != vertex(b)
      && vertex(ap) != vertex(b)
      && !self.intersects_polygon(a, b)
      && ((self.locally_inside(a, b)
        && self.locally_inside(b, a)
        && self.middle_inside(a, b)
        && (!self.orient(ap, a, bp).is_colinear() || !self.orient(a, bp, b).is_colinear()))
        || (self.same_point(a, b) && self.cw(ap, a, an) && self.cw(bp, b, bn)))
  }

  fn intersects_polygon(&self, a: usize, b: usize) -> bool {
    let vertex = |node: usize| self.nodes[node].vertex;
    let (va, vb) = (vertex(a), vertex(b));
    let mut p = a;
    loop {
      let n = self.next(p);
      if vertex(p) != va
        && vertex(n) != va
        && vertex(p) != vb
        && vertex(n) != vb
        && segments_intersect(self.pt(p), self.pt(n), self.pt(a), self.pt(b))
      {
        return true;
      }
      p = n;
      if p == a {
        return false;
      }
    }
  }

  // The diagonal a-b leaves `a` towards the interior.
  fn locally_inside(&self, a: usize, b: usize) -> bool {
    let (ap, an) = (self.prev(a), self.next(a));
    if self.ccw(ap, a, an) {
      !self.ccw(a, b, an) && !self.ccw(a, ap, b)
    } else {
      self.ccw(a, b, ap) || self.ccw(a, an, b)
    }
  }

  // Crossing test for the midpoint of a-b.
  fn middle_inside(&self, a: usize, b: usize) -> bool {
    let mid = [(self.x(a) + self.x(b)) / 2.0, (self.y(a) + self.y(b)) / 2.0];
    let mut inside = false;
    let mut p = a;
    loop {
      let n = self.next(p);
      let (py, ny) = (self.y(p), self.y(n));
      if (py > mid[1]) != (ny > mid[1]) {
        let turn = Orientation::new(self.pt(p), self.pt(n), &mid);
        let west = if ny > py { turn.is_ccw() } else { turn.is_cw() };
        if west {
          inside = !inside;
        }
      }
      p = n;
      if p == a {
        return inside;
      }
    }
  }

  // Connect `a` and `b` with a synthetic edge, splitting the ring in two.
  // Returns the copy of `b`, which starts the second ring.
  fn split_polygon(&mut self, a: usize, b: usize) -> usize {
    let a2 = self.push_copy(a);
    let b2 = self.push_copy(b);
    let an = self.next(a);
    let bp = self.prev(b);
    self.list.link(a, b);
    self.list.link(a2, an);
    self.list.link(b2, a2);
    self.list.link(bp, b2);
    self.nodes[a].boundary = false;
    self.nodes[b2].boundary = false;
    b2
  }

  ///////////////////////////////////////////////////////////////////////////
  // Holes

  fn eliminate_holes(&mut self, outer: usize, mut holes: Vec<usize>) -> Result<usize, Error> {
    holes.sort_by_key(|&h| (OrderedFloat(self.x(h)), OrderedFloat(self.y(h))));
    let mut outer = outer;
    for hole in holes {
      let bridge = match self.find_hole_bridge(hole, outer) {
        Some(bridge) => bridge,
        None => {
          debug!("no bridge from hole at {:?} to the shell", self.pt(hole));
          return Err(Malformed::Untessellatable.into());
        }
      };
      let reverse = self.split_polygon(bridge, hole);
      self.filter_points(reverse, self.next(reverse));
      outer = self.filter_points(bridge, self.next(bridge));
    }
    Ok(outer)
  }

  // Cast a ray from the leftmost hole vertex to the left and connect to the
  // closest visible ring vertex.
  fn find_hole_bridge(&self, hole: usize, outer: usize) -> Option<usize> {
    let (hx, hy) = (self.x(hole), self.y(hole));
    let mut qx = f64::NEG_INFINITY;
    let mut candidate = None;
    let mut p = outer;
    loop {
      let n = self.next(p);
      let (px, py, nx, ny) = (self.x(p), self.y(p), self.x(n), self.y(n));
      if hy <= py && hy >= ny && ny != py {
        let x = px + (hy - py) * (nx - px) / (ny - py);
        if x <= hx && x > qx {
          qx = x;
          let m = if px < nx { p } else { n };
          if x == hx {
            return Some(m);
          }
          candidate = Some(m);
        }
      }
      p = n;
      if p == outer {
        break;
      }
    }
    let mut m = candidate?;

    // Vertices inside the triangle (hole, ray hit, m) block the view of m.
    // Pick the one making the smallest angle with the ray.
    let stop = m;
    let (mx, my) = (self.x(m), self.y(m));
    let (t_a, t_c) = if hy < my {
      ([hx, hy], [qx, hy])
    } else {
      ([qx, hy], [hx, hy])
    };
    let mut tan_min = f64::INFINITY;
    let mut p = m;
    loop {
      let (px, py) = (self.x(p), self.y(p));
      if hx >= px && px >= mx && hx != px && point_in_triangle(self.pt(p), &t_a, &[mx, my], &t_c) {
        let tan = (hy - py).abs() / (hx - px);
        let better = tan < tan_min
          || (tan == tan_min
            && (px > self.x(m) || (px == self.x(m) && self.sector_contains_sector(m, p))));
        if self.locally_inside(p, hole) && better {
          m = p;
          tan_min = tan;
        }
      }
      p = self.next(p);
      if p == stop {
        break;
      }
    }
    Some(m)
  }

  fn sector_contains_sector(&self, m: usize, p: usize) -> bool {
    self.ccw(self.prev(m), m, self.prev(p)) && self.ccw(self.next(p), m, self.next(m))
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::encoding::{GeoEncoding, XYEncoding};
  use crate::testing::*;

  use claims::{assert_err, assert_ok};
  use num_rational::BigRational;
  use num_traits::{Signed, Zero};
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn square(min: f64, max: f64) -> Vec<Point<f64, 2>> {
    vec![
      Point::new([min, min]),
      Point::new([max, min]),
      Point::new([max, max]),
      Point::new([min, max]),
    ]
  }

  fn triangles_area_2x<E: Encoding>(triangles: &[Triangle]) -> BigRational {
    triangles.iter().fold(BigRational::zero(), |acc, t| {
      let pts = t.vertices().map(|p| E::decode_point(&p));
      acc + exact_area_2x(&pts).abs()
    })
  }

  fn boundary_edges(triangles: &[Triangle]) -> usize {
    triangles
      .iter()
      .map(|t| t.edges().iter().filter(|e| **e).count())
      .sum()
  }

  #[test]
  fn square_two_triangles() {
    let poly = Polygon::new(square(0.0, 10.0)).unwrap();
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    assert_eq!(triangles.len(), 2);
    assert_eq!(boundary_edges(&triangles), 4);
    for t in &triangles {
      assert_eq!(t.edges().iter().filter(|e| !**e).count(), 1);
      assert!(t.view().orientation().is_ccw());
    }
    assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      BigRational::from_integer(200.into())
    );
  }

  #[test]
  fn clockwise_input() {
    let mut ring = square(0.0, 10.0);
    ring.reverse();
    let poly = Polygon::new(ring).unwrap();
    let triangles = assert_ok!(tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()));
    assert_eq!(triangles.len(), 2);
  }

  #[test]
  fn square_with_hole() {
    let poly = Polygon::with_holes(square(0.0, 10.0), vec![square(3.0, 6.0)]).unwrap();
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    assert_eq!(triangles.len(), 8);
    assert_eq!(boundary_edges(&triangles), 8);
    assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      BigRational::from_integer((2 * (100 - 9)).into())
    );
  }

  #[test]
  fn collinear_points_are_merged() {
    let ring = vec![
      Point::new([0.0, 0.0]),
      Point::new([5.0, 0.0]),
      Point::new([10.0, 0.0]),
      Point::new([10.0, 10.0]),
      Point::new([0.0, 10.0]),
    ];
    let poly = Polygon::new(ring).unwrap();
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      BigRational::from_integer(200.into())
    );
  }

  #[test]
  fn geo_polygon_is_quantized() {
    let ring = vec![
      Point::new([-10.123456789, -5.0]),
      Point::new([10.0, -5.0]),
      Point::new([0.0, 5.987654321]),
    ];
    let poly = Polygon::new(ring.clone()).unwrap();
    let triangles = tessellate::<GeoEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    assert_eq!(triangles.len(), 1);
    let expected: Vec<Point<i32, 2>> = ring
      .iter()
      .map(|p| GeoEncoding::encode_point(p).unwrap())
      .collect();
    for v in triangles[0].vertices().iter() {
      assert!(expected.contains(v));
    }
    assert_eq!(triangles[0].edges(), [true; 3]);
  }

  #[test]
  fn flat_shell() {
    let ring = vec![
      Point::new([0.0, 0.0]),
      Point::new([1.0, 1.0]),
      Point::new([2.0, 2.0]),
    ];
    let poly = Polygon::new(ring).unwrap();
    assert_eq!(
      tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()),
      Err(Error::MalformedGeometry(Malformed::CoLinearViolation))
    );
  }

  #[test]
  fn points_collapse_on_grid() {
    let ring = vec![
      Point::new([0.0, 0.0]),
      Point::new([1e-9, 0.0]),
      Point::new([0.0, 1e-9]),
    ];
    let poly = Polygon::new(ring).unwrap();
    assert_eq!(
      tessellate::<GeoEncoding>(&poly, &TessellatorOptions::default()),
      Err(Error::MalformedGeometry(Malformed::InsufficientVertices))
    );
  }

  #[test]
  fn hole_outside_shell() {
    let poly = Polygon::with_holes(square(0.0, 10.0), vec![square(8.0, 12.0)]).unwrap();
    assert_eq!(
      tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()),
      Err(Error::MalformedGeometry(Malformed::HoleOutsideShell))
    );
  }

  #[test]
  fn hole_edge_crossing_concave_shell() {
    // U-shaped shell, the hole bar spans the notch between the arms.
    let shell = vec![
      Point::new([0.0, 0.0]),
      Point::new([10.0, 0.0]),
      Point::new([10.0, 10.0]),
      Point::new([7.0, 10.0]),
      Point::new([7.0, 3.0]),
      Point::new([3.0, 3.0]),
      Point::new([3.0, 10.0]),
      Point::new([0.0, 10.0]),
    ];
    let bar = vec![
      Point::new([1.0, 5.0]),
      Point::new([9.0, 5.0]),
      Point::new([9.0, 6.0]),
      Point::new([1.0, 6.0]),
    ];
    let poly = Polygon::with_holes(shell.clone(), vec![bar]).unwrap();
    assert_eq!(
      tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()),
      Err(Error::MalformedGeometry(Malformed::HoleOutsideShell))
    );
    let low = vec![
      Point::new([1.0, 1.0]),
      Point::new([9.0, 1.0]),
      Point::new([9.0, 2.0]),
      Point::new([1.0, 2.0]),
    ];
    let poly = Polygon::with_holes(shell, vec![low]).unwrap();
    assert_ok!(tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()));
  }

  #[test]
  fn two_holes() {
    let poly =
      Polygon::with_holes(square(0.0, 20.0), vec![square(2.0, 5.0), square(10.0, 15.0)]).unwrap();
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    assert_eq!(boundary_edges(&triangles), 12);
    assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      BigRational::from_integer((2 * (400 - 9 - 25)).into())
    );
  }

  #[test]
  fn hole_touching_the_shell() {
    let hole = vec![Point::new([0.0, 5.0]), Point::new([4.0, 3.0]), Point::new([4.0, 7.0])];
    let poly = Polygon::with_holes(square(0.0, 10.0), vec![hole]).unwrap();
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      BigRational::from_integer((200 - 16).into())
    );
  }

  #[test]
  fn self_intersection_check() {
    let bowtie = Polygon::from_coords(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]).unwrap();
    let options = TessellatorOptions::default().with_self_intersection_check(true);
    assert_eq!(
      tessellate::<XYEncoding>(&bowtie, &options),
      Err(Error::MalformedGeometry(Malformed::SelfIntersections))
    );
    let poly = Polygon::new(square(0.0, 1.0)).unwrap();
    assert_ok!(tessellate::<XYEncoding>(&poly, &options));
  }

  #[test]
  fn bowtie_without_check() {
    let bowtie = Polygon::from_coords(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]).unwrap();
    match tessellate::<XYEncoding>(&bowtie, &TessellatorOptions::default()) {
      Ok(triangles) => assert!(!triangles.is_empty()),
      Err(err) => assert!(err.is_malformed_geometry()),
    }
  }

  #[test]
  fn invalid_geo_coordinates() {
    let poly = Polygon::from_coords(&[(0.0, 0.0), (200.0, 0.0), (0.0, 10.0)]).unwrap();
    assert_err!(tessellate::<GeoEncoding>(&poly, &TessellatorOptions::default()));
  }

  #[proptest]
  fn star_polygons_cover_their_area(#[strategy(3usize..40)] n: usize, seed: u64) {
    let poly = random_star_polygon(n, seed);
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    prop_assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      exact_area_2x(poly.shell()).abs()
    );
    for t in &triangles {
      prop_assert!(!t.view().orientation().is_cw());
    }
  }

  #[proptest]
  fn star_polygons_with_hole(#[strategy(3usize..30)] n: usize, seed: u64) {
    let poly = random_star_polygon_with_hole(n, seed);
    let triangles = tessellate::<XYEncoding>(&poly, &TessellatorOptions::default()).unwrap();
    let hole = exact_area_2x(&poly.holes()[0]).abs();
    prop_assert_eq!(
      triangles_area_2x::<XYEncoding>(&triangles),
      exact_area_2x(poly.shell()).abs() - hole
    );
  }
}
