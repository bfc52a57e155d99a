use super::Encoding;
use crate::Error;

/// Planar quantization onto the `f32` grid.
///
/// The `f32` bit pattern is turned into an `i32` whose signed order matches
/// the float order. Negative zero shares the code of positive zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XYEncoding;

// Code of -0.0. Never produced by the encoder.
const NEGATIVE_ZERO: i32 = -1;

fn sortable(bits: i32) -> i32 {
  bits ^ ((bits >> 31) & 0x7fff_ffff)
}

fn nearest(v: f64) -> Result<f32, Error> {
  if !v.is_finite() || v.abs() > f64::from(f32::MAX) {
    return Err(Error::InvalidCoordinate);
  }
  // In range, so the conversion rounds to nearest and stays finite.
  Ok(v as f32)
}

fn code(f: f32) -> i32 {
  if f == 0.0 {
    0
  } else {
    sortable(f.to_bits() as i32)
  }
}

impl XYEncoding {
  pub fn encode_float(v: f64) -> Result<i32, Error> {
    let f = nearest(v)?;
    let c = code(f);
    if f64::from(f) > v {
      Ok(match c - 1 {
        NEGATIVE_ZERO => NEGATIVE_ZERO - 1,
        c => c,
      })
    } else {
      Ok(c)
    }
  }

  pub fn encode_float_ceil(v: f64) -> Result<i32, Error> {
    let f = nearest(v)?;
    let c = code(f);
    if f64::from(f) < v {
      Ok(match c + 1 {
        NEGATIVE_ZERO => 0,
        c => c,
      })
    } else {
      Ok(c)
    }
  }

  pub fn decode_float(v: i32) -> f64 {
    f64::from(f32::from_bits(sortable(v) as u32))
  }
}

impl Encoding for XYEncoding {
  const GEO: bool = false;

  fn encode_x(x: f64) -> Result<i32, Error> {
    XYEncoding::encode_float(x)
  }

  fn encode_x_ceil(x: f64) -> Result<i32, Error> {
    XYEncoding::encode_float_ceil(x)
  }

  fn encode_y(y: f64) -> Result<i32, Error> {
    XYEncoding::encode_float(y)
  }

  fn encode_y_ceil(y: f64) -> Result<i32, Error> {
    XYEncoding::encode_float_ceil(y)
  }

  fn decode_x(x: i32) -> f64 {
    XYEncoding::decode_float(x)
  }

  fn decode_y(y: i32) -> f64 {
    XYEncoding::decode_float(y)
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  #[test]
  fn zeros() {
    assert_eq!(XYEncoding::encode_float(0.0), Ok(0));
    assert_eq!(XYEncoding::encode_float(-0.0), Ok(0));
    assert_eq!(XYEncoding::encode_float_ceil(-0.0), Ok(0));
    assert_eq!(XYEncoding::decode_float(0), 0.0);
  }

  #[test]
  fn tiny_values() {
    let tiny = f64::from(f32::from_bits(1));
    assert_eq!(XYEncoding::encode_float(1e-50), Ok(0));
    assert_eq!(XYEncoding::encode_float_ceil(1e-50), Ok(1));
    assert_eq!(XYEncoding::decode_float(1), tiny);
    assert_eq!(XYEncoding::encode_float(-1e-50), Ok(-2));
    assert_eq!(XYEncoding::decode_float(-2), -tiny);
    assert_eq!(XYEncoding::encode_float_ceil(-1e-50), Ok(0));
  }

  #[test]
  fn order_across_sign() {
    let values = [-1e30, -2.5, -1.0, -1e-30, 0.0, 1e-30, 1.0, 2.5, 1e30];
    let codes: Vec<i32> = values
      .iter()
      .map(|v| XYEncoding::encode_float(*v).unwrap())
      .collect();
    assert!(codes.windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn rejects_out_of_range() {
    assert_eq!(XYEncoding::encode_float(f64::NAN), Err(Error::InvalidCoordinate));
    assert_eq!(XYEncoding::encode_float(1e39), Err(Error::InvalidCoordinate));
    assert_eq!(XYEncoding::encode_float_ceil(f64::NEG_INFINITY), Err(Error::InvalidCoordinate));
    assert!(XYEncoding::encode_float(f64::from(f32::MAX)).is_ok());
  }

  #[proptest]
  fn float_exact_round_trip(v: f32) {
    prop_assume!(v.is_finite());
    let c = XYEncoding::encode_float(f64::from(v)).unwrap();
    prop_assert_eq!(XYEncoding::decode_float(c), f64::from(v));
    prop_assert_eq!(XYEncoding::encode_float_ceil(f64::from(v)), Ok(c));
  }

  #[proptest]
  fn floor_and_ceil_bracket(#[strategy(-1e6..1e6f64)] v: f64) {
    let lo = XYEncoding::decode_float(XYEncoding::encode_float(v).unwrap());
    let hi = XYEncoding::decode_float(XYEncoding::encode_float_ceil(v).unwrap());
    prop_assert!(lo <= v && v <= hi);
    let once = XYEncoding::quantize_x(v).unwrap();
    prop_assert_eq!(XYEncoding::quantize_x(once), Ok(once));
  }
}
