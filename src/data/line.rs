use crate::data::{Point, Rectangle};
use crate::{Error, Malformed};

/// Polyline with at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
  points: Vec<Point<f64, 2>>,
}

impl Line {
  pub fn new(points: Vec<Point<f64, 2>>) -> Result<Line, Error> {
    for pt in &points {
      pt.validate()?;
    }
    if points.len() < 2 {
      return Err(Malformed::InsufficientVertices.into());
    }
    Ok(Line { points })
  }

  pub fn from_coords(coords: &[(f64, f64)]) -> Result<Line, Error> {
    Line::new(coords.iter().copied().map(Point::from).collect())
  }

  pub fn points(&self) -> &[Point<f64, 2>] {
    &self.points
  }

  /// Consecutive point pairs.
  pub fn segments(&self) -> impl Iterator<Item = (&Point<f64, 2>, &Point<f64, 2>)> + '_ {
    self.points.windows(2).map(|w| (&w[0], &w[1]))
  }

  pub fn bounding_box(&self) -> Rectangle {
    Rectangle::bounding(&self.points)
  }
}
