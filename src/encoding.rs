//! Quantization of coordinates to sortable 32-bit integers and the canonical
//! triangle record.
//!
//! Both [`GeoEncoding`] and [`XYEncoding`] are lossy and monotone:
//! `a <= b` implies `encode(a) <= encode(b)`, and `decode(encode(v))` is a
//! fixed point of `decode(encode(_))`.
use crate::data::Point;
use crate::Error;

mod geo;
mod triangle;
mod xy;

pub use geo::GeoEncoding;
pub use triangle::{DecodedTriangle, EncodedTriangle, TriangleType, BYTES, WORD_BYTES};
pub use xy::XYEncoding;

/// Coordinate space: how doubles map onto the quantized `i32` grid.
pub trait Encoding: Copy + Clone + Default + std::fmt::Debug + Send + Sync + 'static {
  /// Lat/lon space. The x axis wraps at the antimeridian and circle radii
  /// are in meters.
  const GEO: bool;

  /// Largest encoded value `<= x`.
  fn encode_x(x: f64) -> Result<i32, Error>;
  /// Smallest encoded value whose decoding is `>= x`.
  fn encode_x_ceil(x: f64) -> Result<i32, Error>;
  fn encode_y(y: f64) -> Result<i32, Error>;
  fn encode_y_ceil(y: f64) -> Result<i32, Error>;
  fn decode_x(x: i32) -> f64;
  fn decode_y(y: i32) -> f64;

  fn encode_point(pt: &Point<f64, 2>) -> Result<Point<i32, 2>, Error> {
    Ok(Point::new([
      Self::encode_x(pt.array[0])?,
      Self::encode_y(pt.array[1])?,
    ]))
  }

  fn decode_point(pt: &Point<i32, 2>) -> Point<f64, 2> {
    Point::new([Self::decode_x(pt.array[0]), Self::decode_y(pt.array[1])])
  }

  /// Snap a point onto the grid: `decode(encode(pt))`.
  fn quantize_point(pt: &Point<f64, 2>) -> Result<Point<f64, 2>, Error> {
    Ok(Self::decode_point(&Self::encode_point(pt)?))
  }

  fn quantize_x(x: f64) -> Result<f64, Error> {
    Ok(Self::decode_x(Self::encode_x(x)?))
  }

  fn quantize_y(y: f64) -> Result<f64, Error> {
    Ok(Self::decode_y(Self::encode_y(y)?))
  }
}

/// The encoded value right above `v`.
pub fn next_up(v: i32) -> Result<i32, Error> {
  v.checked_add(1).ok_or(Error::ArithmeticOverflow)
}

/// The encoded value right below `v`.
pub fn next_down(v: i32) -> Result<i32, Error> {
  v.checked_sub(1).ok_or(Error::ArithmeticOverflow)
}
