use super::Encoding;
use crate::data::{MAX_LON, MIN_LON};
use crate::Error;

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

// 2^32 cells over each axis. Both constants are 45 * 2^-k, so `i * DECODE`
// is exact for every i32 and encode/decode round-trips bit for bit.
const LAT_DECODE: f64 = 180.0 / 4_294_967_296.0;
const LON_DECODE: f64 = 360.0 / 4_294_967_296.0;

/// Latitude/longitude quantization: x is longitude, y is latitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoEncoding;

fn check_latitude(lat: f64) -> Result<(), Error> {
  if (MIN_LAT..=MAX_LAT).contains(&lat) {
    Ok(())
  } else {
    Err(Error::InvalidLatitude)
  }
}

fn check_longitude(lon: f64) -> Result<(), Error> {
  if (MIN_LON..=MAX_LON).contains(&lon) {
    Ok(())
  } else {
    Err(Error::InvalidLongitude)
  }
}

// The top of the range has no cell of its own and shares i32::MAX.
fn quantize(v: f64, max: f64, decode: f64, round: fn(f64) -> f64) -> i32 {
  if v == max {
    i32::MAX
  } else {
    let q = round(v / decode);
    if q >= 2_147_483_647.0 {
      i32::MAX
    } else {
      q as i32
    }
  }
}

impl GeoEncoding {
  pub fn encode_latitude(lat: f64) -> Result<i32, Error> {
    check_latitude(lat)?;
    Ok(quantize(lat, MAX_LAT, LAT_DECODE, f64::floor))
  }

  pub fn encode_latitude_ceil(lat: f64) -> Result<i32, Error> {
    check_latitude(lat)?;
    Ok(quantize(lat, MAX_LAT, LAT_DECODE, f64::ceil))
  }

  pub fn encode_longitude(lon: f64) -> Result<i32, Error> {
    check_longitude(lon)?;
    Ok(quantize(lon, MAX_LON, LON_DECODE, f64::floor))
  }

  pub fn encode_longitude_ceil(lon: f64) -> Result<i32, Error> {
    check_longitude(lon)?;
    Ok(quantize(lon, MAX_LON, LON_DECODE, f64::ceil))
  }

  pub fn decode_latitude(lat: i32) -> f64 {
    f64::from(lat) * LAT_DECODE
  }

  pub fn decode_longitude(lon: i32) -> f64 {
    f64::from(lon) * LON_DECODE
  }
}

impl Encoding for GeoEncoding {
  const GEO: bool = true;

  fn encode_x(x: f64) -> Result<i32, Error> {
    GeoEncoding::encode_longitude(x)
  }

  fn encode_x_ceil(x: f64) -> Result<i32, Error> {
    GeoEncoding::encode_longitude_ceil(x)
  }

  fn encode_y(y: f64) -> Result<i32, Error> {
    GeoEncoding::encode_latitude(y)
  }

  fn encode_y_ceil(y: f64) -> Result<i32, Error> {
    GeoEncoding::encode_latitude_ceil(y)
  }

  fn decode_x(x: i32) -> f64 {
    GeoEncoding::decode_longitude(x)
  }

  fn decode_y(y: i32) -> f64 {
    GeoEncoding::decode_latitude(y)
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  use proptest::prelude::*;
  use test_strategy::proptest;

  #[test]
  fn extremes() {
    assert_eq!(GeoEncoding::encode_latitude(-90.0), Ok(i32::MIN));
    assert_eq!(GeoEncoding::encode_latitude(90.0), Ok(i32::MAX));
    assert_eq!(GeoEncoding::encode_latitude_ceil(90.0), Ok(i32::MAX));
    assert_eq!(GeoEncoding::encode_longitude(-180.0), Ok(i32::MIN));
    assert_eq!(GeoEncoding::encode_longitude(180.0), Ok(i32::MAX));
    assert_eq!(GeoEncoding::decode_latitude(i32::MIN), -90.0);
    assert_eq!(GeoEncoding::decode_longitude(0), 0.0);
  }

  #[test]
  fn out_of_range() {
    assert_eq!(GeoEncoding::encode_latitude(90.5), Err(Error::InvalidLatitude));
    assert_eq!(GeoEncoding::encode_latitude(f64::NAN), Err(Error::InvalidLatitude));
    assert_eq!(GeoEncoding::encode_longitude(-181.0), Err(Error::InvalidLongitude));
    assert_eq!(GeoEncoding::encode_longitude_ceil(f64::INFINITY), Err(Error::InvalidLongitude));
  }

  #[test]
  fn tiny_values_floor_and_ceil() {
    assert_eq!(GeoEncoding::encode_longitude(1e-26), Ok(0));
    assert_eq!(GeoEncoding::encode_longitude_ceil(1e-26), Ok(1));
    assert_eq!(GeoEncoding::encode_longitude(-1e-26), Ok(-1));
  }

  #[proptest]
  fn decode_encode_identity(v: i32) {
    prop_assert_eq!(GeoEncoding::encode_latitude(GeoEncoding::decode_latitude(v)), Ok(v));
    prop_assert_eq!(GeoEncoding::encode_longitude(GeoEncoding::decode_longitude(v)), Ok(v));
    prop_assert_eq!(GeoEncoding::encode_latitude_ceil(GeoEncoding::decode_latitude(v)), Ok(v));
  }

  #[proptest]
  fn quantization_is_fixed_point(#[strategy(-90.0..=90.0f64)] lat: f64) {
    let once = GeoEncoding::quantize_y(lat).unwrap();
    prop_assert_eq!(GeoEncoding::quantize_y(once), Ok(once));
    prop_assert!(once <= lat);
  }

  #[proptest]
  fn ceil_bounds(#[strategy(-180.0..=180.0f64)] lon: f64) {
    let lo = GeoEncoding::encode_longitude(lon).unwrap();
    let hi = GeoEncoding::encode_longitude_ceil(lon).unwrap();
    prop_assert!(lo <= hi);
    prop_assert!(hi - lo <= 1);
  }

  #[proptest]
  fn monotone(#[strategy(-90.0..=90.0f64)] a: f64, #[strategy(-90.0..=90.0f64)] b: f64) {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    prop_assert!(GeoEncoding::encode_latitude(a).unwrap() <= GeoEncoding::encode_latitude(b).unwrap());
  }
}
