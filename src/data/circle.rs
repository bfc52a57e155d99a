use crate::data::Point;
use crate::Error;

/// Circle query shape. In geo space the radius is in meters, otherwise in
/// coordinate units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
  pub center: Point<f64, 2>,
  pub radius: f64,
}

impl Circle {
  pub fn new(center: Point<f64, 2>, radius: f64) -> Result<Circle, Error> {
    center.validate()?;
    if !radius.is_finite() || radius < 0.0 {
      return Err(Error::InvalidRadius);
    }
    Ok(Circle { center, radius })
  }
}
