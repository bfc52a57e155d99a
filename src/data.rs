mod circle;
mod geometry;
mod line;
pub(crate) mod point;
pub mod polygon;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use geometry::Geometry;
pub use line::Line;
pub use point::Point;
pub use polygon::Polygon;
pub use rectangle::{Rectangle, MAX_LON, MIN_LON};
pub use triangle::{Triangle, TriangleView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
