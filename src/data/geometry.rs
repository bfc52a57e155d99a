use crate::data::{Circle, Line, Point, Polygon, Rectangle};

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
  Point(Point<f64, 2>),
  Line(Line),
  Polygon(Polygon),
  Rectangle(Rectangle),
  Circle(Circle),
  Collection(Vec<Geometry>),
}

impl Geometry {
  /// Depth-first iterator over the non-collection leaves.
  pub fn leaves(&self) -> Vec<&Geometry> {
    let mut out = Vec::new();
    let mut stack = vec![self];
    while let Some(geom) = stack.pop() {
      match geom {
        Geometry::Collection(items) => stack.extend(items.iter().rev()),
        other => out.push(other),
      }
    }
    out
  }
}

impl From<Point<f64, 2>> for Geometry {
  fn from(pt: Point<f64, 2>) -> Geometry {
    Geometry::Point(pt)
  }
}

impl From<Line> for Geometry {
  fn from(line: Line) -> Geometry {
    Geometry::Line(line)
  }
}

impl From<Polygon> for Geometry {
  fn from(poly: Polygon) -> Geometry {
    Geometry::Polygon(poly)
  }
}

impl From<Rectangle> for Geometry {
  fn from(rect: Rectangle) -> Geometry {
    Geometry::Rectangle(rect)
  }
}

impl From<Circle> for Geometry {
  fn from(circle: Circle) -> Geometry {
    Geometry::Circle(circle)
  }
}
