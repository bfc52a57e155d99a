// Exact segment, triangle and box tests built on `Orientation::new`.
//
// All tests are inclusive: touching counts as intersecting.
use crate::{Orientation, PolygonScalar};

fn min<T: PartialOrd + Copy>(a: T, b: T) -> T {
  if b < a {
    b
  } else {
    a
  }
}

fn max<T: PartialOrd + Copy>(a: T, b: T) -> T {
  if b > a {
    b
  } else {
    a
  }
}

fn in_span<T: PartialOrd + Copy>(v: T, a: T, b: T) -> bool {
  min(a, b) <= v && v <= max(a, b)
}

/// True iff `p` lies on the closed segment `a`-`b`.
pub fn point_on_segment<T>(p: &[T; 2], a: &[T; 2], b: &[T; 2]) -> bool
where
  T: PolygonScalar + Copy,
{
  in_span(p[0], a[0], b[0])
    && in_span(p[1], a[1], b[1])
    && Orientation::new(a, b, p).is_colinear()
}

/// Closed segments `a`-`b` and `c`-`d` share at least one point.
pub fn segments_intersect<T>(a: &[T; 2], b: &[T; 2], c: &[T; 2], d: &[T; 2]) -> bool
where
  T: PolygonScalar + Copy,
{
  if max(a[0], b[0]) < min(c[0], d[0])
    || max(c[0], d[0]) < min(a[0], b[0])
    || max(a[1], b[1]) < min(c[1], d[1])
    || max(c[1], d[1]) < min(a[1], b[1])
  {
    return false;
  }
  let o1 = Orientation::new(a, b, c);
  let o2 = Orientation::new(a, b, d);
  let o3 = Orientation::new(c, d, a);
  let o4 = Orientation::new(c, d, b);
  if o1 != o2 && o3 != o4 {
    return true;
  }
  (o1.is_colinear() && point_on_segment(c, a, b))
    || (o2.is_colinear() && point_on_segment(d, a, b))
    || (o3.is_colinear() && point_on_segment(a, c, d))
    || (o4.is_colinear() && point_on_segment(b, c, d))
}

/// Segments cross at a single point interior to both of them.
pub fn segments_cross<T>(a: &[T; 2], b: &[T; 2], c: &[T; 2], d: &[T; 2]) -> bool
where
  T: PolygonScalar + Copy,
{
  let o1 = Orientation::new(a, b, c);
  let o2 = Orientation::new(a, b, d);
  let o3 = Orientation::new(c, d, a);
  let o4 = Orientation::new(c, d, b);
  !o1.is_colinear()
    && !o3.is_colinear()
    && o1 == o2.reverse()
    && o3 == o4.reverse()
}

/// Point in the closed triangle `a`, `b`, `c` of either winding. A flat
/// triangle degrades to its three edges.
pub fn point_in_triangle<T>(p: &[T; 2], a: &[T; 2], b: &[T; 2], c: &[T; 2]) -> bool
where
  T: PolygonScalar + Copy,
{
  let min_x = min(a[0], min(b[0], c[0]));
  let max_x = max(a[0], max(b[0], c[0]));
  let min_y = min(a[1], min(b[1], c[1]));
  let max_y = max(a[1], max(b[1], c[1]));
  if p[0] < min_x || p[0] > max_x || p[1] < min_y || p[1] > max_y {
    return false;
  }
  let winding = Orientation::new(a, b, c);
  if winding.is_colinear() {
    return point_on_segment(p, a, b) || point_on_segment(p, b, c) || point_on_segment(p, c, a);
  }
  let outside = winding.reverse();
  Orientation::new(a, b, p) != outside
    && Orientation::new(b, c, p) != outside
    && Orientation::new(c, a, p) != outside
}

/// Closed segment `p`-`q` touches the closed triangle `a`, `b`, `c`.
pub fn segment_intersects_triangle<T>(
  p: &[T; 2],
  q: &[T; 2],
  a: &[T; 2],
  b: &[T; 2],
  c: &[T; 2],
) -> bool
where
  T: PolygonScalar + Copy,
{
  point_in_triangle(p, a, b, c)
    || point_in_triangle(q, a, b, c)
    || segments_intersect(p, q, a, b)
    || segments_intersect(p, q, b, c)
    || segments_intersect(p, q, c, a)
}

/// Closed segment `a`-`b` touches the closed box.
pub fn segment_intersects_box<T>(
  a: &[T; 2],
  b: &[T; 2],
  min_x: T,
  max_x: T,
  min_y: T,
  max_y: T,
) -> bool
where
  T: PolygonScalar + Copy,
{
  if max(a[0], b[0]) < min_x
    || min(a[0], b[0]) > max_x
    || max(a[1], b[1]) < min_y
    || min(a[1], b[1]) > max_y
  {
    return false;
  }
  let inside = |p: &[T; 2]| min_x <= p[0] && p[0] <= max_x && min_y <= p[1] && p[1] <= max_y;
  if inside(a) || inside(b) {
    return true;
  }
  let ll = [min_x, min_y];
  let lr = [max_x, min_y];
  let ur = [max_x, max_y];
  let ul = [min_x, max_y];
  segments_intersect(a, b, &ll, &lr)
    || segments_intersect(a, b, &lr, &ur)
    || segments_intersect(a, b, &ur, &ul)
    || segments_intersect(a, b, &ul, &ll)
}
