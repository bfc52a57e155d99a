use super::Encoding;
use crate::data::{Point, Triangle};
use crate::{Error, Orientation};

/// Width of one dimension of a record.
pub const WORD_BYTES: usize = 4;
/// Six coordinate words followed by one metadata word.
pub const BYTES: usize = 7 * WORD_BYTES;

const TYPE_MASK: u32 = 0b11;
const AB_BIT: u32 = 1 << 2;
const BC_BIT: u32 = 1 << 3;
const CA_BIT: u32 = 1 << 4;
const USED_BITS: u32 = TYPE_MASK | AB_BIT | BC_BIT | CA_BIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriangleType {
  Point = 1,
  Line = 2,
  Triangle = 3,
}

impl TriangleType {
  fn bits(self) -> u32 {
    match self {
      TriangleType::Point => 1,
      TriangleType::Line => 2,
      TriangleType::Triangle => 3,
    }
  }

  fn from_bits(bits: u32) -> Result<TriangleType, Error> {
    match bits {
      1 => Ok(TriangleType::Point),
      2 => Ok(TriangleType::Line),
      3 => Ok(TriangleType::Triangle),
      _ => Err(Error::InvalidEncoding),
    }
  }
}

/// Fixed-width, order-canonical triangle record.
///
/// Every word is written big-endian with its sign bit flipped, so comparing
/// the bytes of a word compares the signed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedTriangle([u8; BYTES]);

/// Canonical triangle recovered from an [`EncodedTriangle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedTriangle {
  pub a_x: i32,
  pub a_y: i32,
  pub b_x: i32,
  pub b_y: i32,
  pub c_x: i32,
  pub c_y: i32,
  pub ab: bool,
  pub bc: bool,
  pub ca: bool,
  pub kind: TriangleType,
}

fn write_word(out: &mut [u8; BYTES], index: usize, v: i32) {
  let bytes = ((v as u32) ^ 0x8000_0000).to_be_bytes();
  out[index * WORD_BYTES..(index + 1) * WORD_BYTES].copy_from_slice(&bytes);
}

fn read_word(bytes: &[u8; BYTES], index: usize) -> i32 {
  let mut word = [0; WORD_BYTES];
  word.copy_from_slice(&bytes[index * WORD_BYTES..(index + 1) * WORD_BYTES]);
  (u32::from_be_bytes(word) ^ 0x8000_0000) as i32
}

// Pick one representative among the rotations and reflections of the input.
fn canonicalize(
  v: [Point<i32, 2>; 3],
  e: [bool; 3],
) -> ([Point<i32, 2>; 3], [bool; 3], TriangleType) {
  let edge_flag = |i: usize, j: usize| match (i.min(j), i.max(j)) {
    (0, 1) => e[0],
    (1, 2) => e[1],
    _ => e[2],
  };
  if v[0] == v[1] && v[1] == v[2] {
    return ([v[0]; 3], [true; 3], TriangleType::Point);
  }
  // Collapsed edge: the segment left over is covered by the other two edges.
  let segment = if v[0] == v[1] {
    Some((v[0], v[2], e[1] || e[2]))
  } else if v[1] == v[2] {
    Some((v[0], v[1], e[0] || e[2]))
  } else if v[2] == v[0] {
    Some((v[0], v[1], e[0] || e[1]))
  } else {
    None
  };
  if let Some((p, q, flag)) = segment {
    let (p, q) = if p.yx() <= q.yx() { (p, q) } else { (q, p) };
    return ([p, q, p], [flag; 3], TriangleType::Line);
  }

  let mut first = 0;
  for i in 1..3 {
    if v[i].yx() < v[first].yx() {
      first = i;
    }
  }
  let order = match Orientation::new(&v[0], &v[1], &v[2]) {
    Orientation::CounterClockWise => [first, (first + 1) % 3, (first + 2) % 3],
    Orientation::ClockWise => [first, (first + 2) % 3, (first + 1) % 3],
    Orientation::CoLinear => {
      let mut order = [0, 1, 2];
      order.sort_by_key(|&i| v[i].yx());
      order
    }
  };
  let [i, j, k] = order;
  (
    [v[i], v[j], v[k]],
    [edge_flag(i, j), edge_flag(j, k), edge_flag(k, i)],
    TriangleType::Triangle,
  )
}

impl EncodedTriangle {
  /// Encode three quantized vertices and the boundary flags of the edges
  /// `ab`, `bc` and `ca`. Any rotation or reflection of the same triangle,
  /// with its flags permuted alongside, gives the same record.
  pub fn encode(vertices: [Point<i32, 2>; 3], edges: [bool; 3]) -> EncodedTriangle {
    let (v, e, kind) = canonicalize(vertices, edges);
    EncodedTriangle::write(v, e, kind)
  }

  fn write(v: [Point<i32, 2>; 3], e: [bool; 3], kind: TriangleType) -> EncodedTriangle {
    let mut meta = kind.bits();
    if e[0] {
      meta |= AB_BIT;
    }
    if e[1] {
      meta |= BC_BIT;
    }
    if e[2] {
      meta |= CA_BIT;
    }
    let mut out = [0; BYTES];
    for (i, pt) in v.iter().enumerate() {
      write_word(&mut out, 2 * i, pt.array[0]);
      write_word(&mut out, 2 * i + 1, pt.array[1]);
    }
    write_word(&mut out, 6, meta as i32);
    EncodedTriangle(out)
  }

  pub fn point(pt: Point<i32, 2>) -> EncodedTriangle {
    EncodedTriangle::encode([pt, pt, pt], [true; 3])
  }

  /// A segment on its own: both endpoints end the line.
  pub fn line(a: Point<i32, 2>, b: Point<i32, 2>) -> EncodedTriangle {
    EncodedTriangle::line_segment(a, b, [true; 2])
  }

  /// One segment of a polyline. `ends` tells whether `a` and `b` are ends of
  /// the polyline. The record is `(p, q, p)` with `p` the `(y, x)`-smaller
  /// endpoint; `ab` is set, `bc` marks `q` as an end and `ca` marks `p`.
  pub fn line_segment(a: Point<i32, 2>, b: Point<i32, 2>, ends: [bool; 2]) -> EncodedTriangle {
    if a == b {
      return EncodedTriangle::point(a);
    }
    let (p, q, [p_end, q_end]) = if a.yx() <= b.yx() {
      (a, b, ends)
    } else {
      (b, a, [ends[1], ends[0]])
    };
    EncodedTriangle::write([p, q, p], [true, q_end, p_end], TriangleType::Line)
  }

  pub fn from_bytes(bytes: &[u8]) -> Result<EncodedTriangle, Error> {
    let mut out = [0; BYTES];
    if bytes.len() != BYTES {
      return Err(Error::InvalidEncoding);
    }
    out.copy_from_slice(bytes);
    Ok(EncodedTriangle(out))
  }

  pub fn as_bytes(&self) -> &[u8; BYTES] {
    &self.0
  }

  /// Signed value of dimension `index` (0..7). Dimensions 0-5 are
  /// `aX, aY, bX, bY, cX, cY`.
  pub fn word(&self, index: usize) -> i32 {
    read_word(&self.0, index)
  }

  pub fn decode(&self) -> Result<DecodedTriangle, Error> {
    let meta = self.word(6) as u32;
    if meta & !USED_BITS != 0 {
      return Err(Error::InvalidEncoding);
    }
    let kind = TriangleType::from_bits(meta & TYPE_MASK)?;
    Ok(DecodedTriangle {
      a_x: self.word(0),
      a_y: self.word(1),
      b_x: self.word(2),
      b_y: self.word(3),
      c_x: self.word(4),
      c_y: self.word(5),
      ab: meta & AB_BIT != 0,
      bc: meta & BC_BIT != 0,
      ca: meta & CA_BIT != 0,
      kind,
    })
  }
}

impl From<&Triangle> for EncodedTriangle {
  fn from(triangle: &Triangle) -> EncodedTriangle {
    EncodedTriangle::encode(triangle.vertices(), triangle.edges())
  }
}

impl DecodedTriangle {
  pub fn a(&self) -> Point<i32, 2> {
    Point::new([self.a_x, self.a_y])
  }

  pub fn b(&self) -> Point<i32, 2> {
    Point::new([self.b_x, self.b_y])
  }

  pub fn c(&self) -> Point<i32, 2> {
    Point::new([self.c_x, self.c_y])
  }

  pub fn is_point(&self) -> bool {
    self.kind == TriangleType::Point
  }

  pub fn is_line(&self) -> bool {
    self.kind == TriangleType::Line
  }

  /// Whether `a` and `b` of a LINE record end their polyline.
  pub fn line_ends(&self) -> [bool; 2] {
    [self.ca, self.bc]
  }

  /// `(min_x, max_x, min_y, max_y)` in encoded space.
  pub fn bounding_box(&self) -> (i32, i32, i32, i32) {
    let xs = [self.a_x, self.b_x, self.c_x];
    let ys = [self.a_y, self.b_y, self.c_y];
    (
      xs.iter().copied().fold(i32::MAX, i32::min),
      xs.iter().copied().fold(i32::MIN, i32::max),
      ys.iter().copied().fold(i32::MAX, i32::min),
      ys.iter().copied().fold(i32::MIN, i32::max),
    )
  }

  /// Vertices decoded into coordinate space.
  pub fn points<E: Encoding>(&self) -> [Point<f64, 2>; 3] {
    [
      E::decode_point(&self.a()),
      E::decode_point(&self.b()),
      E::decode_point(&self.c()),
    ]
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;
  use crate::data::TriangleView;
  use crate::encoding::GeoEncoding;

  use claims::assert_err;
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn geo(lon: f64, lat: f64) -> Point<i32, 2> {
    GeoEncoding::encode_point(&Point::new([lon, lat])).unwrap()
  }

  // The six orderings of one triangle with the edge flags carried along.
  fn variants(v: [Point<i32, 2>; 3], e: [bool; 3]) -> Vec<([Point<i32, 2>; 3], [bool; 3])> {
    let [a, b, c] = v;
    let [ab, bc, ca] = e;
    vec![
      ([a, b, c], [ab, bc, ca]),
      ([b, c, a], [bc, ca, ab]),
      ([c, a, b], [ca, ab, bc]),
      ([a, c, b], [ca, bc, ab]),
      ([c, b, a], [bc, ab, ca]),
      ([b, a, c], [ab, ca, bc]),
    ]
  }

  #[test]
  fn rotated_start_vertex() {
    let (a, b, c) = (geo(0.0, 0.0), geo(2.0, 0.0), geo(1.0, 2.0));
    let first = EncodedTriangle::encode([a, b, c], [true; 3]).decode().unwrap();
    let second = EncodedTriangle::encode([c, a, b], [true; 3]).decode().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.kind, TriangleType::Triangle);
    assert_eq!(first.a(), a);
  }

  #[test]
  fn replicated_point() {
    let p = geo(45.0, 45.0);
    let decoded = EncodedTriangle::encode([p, p, p], [false; 3]).decode().unwrap();
    assert_eq!(decoded.kind, TriangleType::Point);
    assert!(decoded.a_x == decoded.b_x && decoded.b_x == decoded.c_x);
    assert!(decoded.a_y == decoded.b_y && decoded.b_y == decoded.c_y);
    assert_eq!(EncodedTriangle::point(p), EncodedTriangle::encode([p, p, p], [false; 3]));
  }

  #[test]
  fn near_degenerate_is_a_triangle() {
    let (a, b, c) = (geo(1e-26, 0.0), geo(-1.0, 0.0), geo(1.0, 0.0));
    let decoded = EncodedTriangle::encode([a, b, c], [true, false, true])
      .decode()
      .unwrap();
    assert_eq!(decoded.kind, TriangleType::Triangle);
    assert_eq!((decoded.a(), decoded.b(), decoded.c()), (b, a, c));
    assert_eq!((decoded.ab, decoded.bc, decoded.ca), (true, true, false));
    for (v, e) in variants([a, b, c], [true, false, true]) {
      assert_eq!(EncodedTriangle::encode(v, e).decode().unwrap(), decoded);
    }
  }

  #[test]
  fn segment_keeps_boundary_flag() {
    let (p, q) = (Point::new([5, 1]), Point::new([0, 0]));
    let decoded = EncodedTriangle::encode([p, p, q], [true, false, false])
      .decode()
      .unwrap();
    assert_eq!(decoded.kind, TriangleType::Line);
    assert_eq!((decoded.a(), decoded.b(), decoded.c()), (q, p, q));
    assert!(!decoded.ab && !decoded.bc && !decoded.ca);
    let decoded = EncodedTriangle::line(p, q).decode().unwrap();
    assert!(decoded.ab && decoded.bc && decoded.ca);
    assert!(decoded.is_line());
  }

  #[test]
  fn polyline_ends_follow_their_endpoint() {
    let (p, q) = (Point::new([5, 1]), Point::new([0, 0]));
    let decoded = EncodedTriangle::line_segment(p, q, [true, false]).decode().unwrap();
    assert_eq!((decoded.a(), decoded.b()), (q, p));
    assert_eq!(decoded.line_ends(), [false, true]);
    assert!(decoded.ab);
    let swapped = EncodedTriangle::line_segment(q, p, [false, true]);
    assert_eq!(swapped.decode().unwrap(), decoded);
    assert!(EncodedTriangle::line_segment(p, p, [false; 2]).decode().unwrap().is_point());
  }

  #[test]
  fn rejects_bad_metadata() {
    let mut bytes = *EncodedTriangle::point(Point::new([0, 0])).as_bytes();
    bytes[BYTES - 1] &= !0b11;
    assert_err!(EncodedTriangle::from_bytes(&bytes).unwrap().decode());
    bytes[BYTES - 1] |= 0b1110_0001;
    assert_eq!(
      EncodedTriangle::from_bytes(&bytes).unwrap().decode(),
      Err(Error::InvalidEncoding)
    );
    assert_eq!(EncodedTriangle::from_bytes(&bytes[1..]), Err(Error::InvalidEncoding));
  }

  #[test]
  fn bounding_box() {
    let t = EncodedTriangle::encode(
      [Point::new([3, -1]), Point::new([-4, 2]), Point::new([0, 7])],
      [true; 3],
    );
    assert_eq!(t.decode().unwrap().bounding_box(), (-4, 3, -1, 7));
  }

  #[proptest]
  fn canonical_under_permutation(v: [(i8, i8); 3], e: [bool; 3]) {
    let v = v.map(|(x, y)| Point::new([i32::from(x), i32::from(y)]));
    let expected = EncodedTriangle::encode(v, e);
    for (pts, flags) in variants(v, e) {
      prop_assert_eq!(EncodedTriangle::encode(pts, flags), expected);
    }
  }

  #[proptest]
  fn canonical_is_fixed_point(v: [[i32; 2]; 3], e: [bool; 3]) {
    let first = EncodedTriangle::encode(v.map(Point::new), e).decode().unwrap();
    let again = EncodedTriangle::encode(
      [first.a(), first.b(), first.c()],
      [first.ab, first.bc, first.ca],
    );
    prop_assert_eq!(again.decode().unwrap(), first);
    let (a, b, c) = (first.a(), first.b(), first.c());
    prop_assert!(!TriangleView::new([&a, &b, &c]).orientation().is_cw());
  }

  #[proptest]
  fn byte_order_is_numeric_order(a: i32, b: i32) {
    let ta = EncodedTriangle::point(Point::new([a, 0]));
    let tb = EncodedTriangle::point(Point::new([b, 0]));
    prop_assert_eq!(a.cmp(&b), ta.as_bytes()[..4].cmp(&tb.as_bytes()[..4]));
    prop_assert_eq!(ta.word(0), a);
  }
}
