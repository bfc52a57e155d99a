//! Evaluation of a query geometry against the triangles of one document.
use std::marker::PhantomData;

use log::trace;

use crate::component::{
  Circle2D, Component2D, DistanceMetric, Line2D, Multi2D, Point2D, Polygon2D, Rectangle2D,
  Relation, WithinRelation,
};
use crate::data::{Geometry, Line, Point, Polygon, Rectangle};
use crate::encoding::{DecodedTriangle, EncodedTriangle, Encoding, TriangleType};
use crate::Error;

/// How the query geometry relates to the union of a document's triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRelation {
  /// Some triangle touches the query.
  Intersects,
  /// No triangle touches the query.
  Disjoint,
  /// Every triangle lies inside the query.
  Within,
  /// The query lies inside the union of the triangles.
  Contains,
}

/// A query built once and shared by every document it is evaluated against.
#[derive(Debug)]
pub struct ShapeQuery<E: Encoding> {
  relation: QueryRelation,
  component: Multi2D,
  _encoding: PhantomData<E>,
}

impl<E: Encoding> ShapeQuery<E> {
  /// Quantize `geometries` onto the grid of `E` and build their components.
  /// Collections are flattened and antimeridian boxes are split; every
  /// resulting piece must be contained on its own for `Contains`.
  pub fn new(relation: QueryRelation, geometries: &[Geometry]) -> Result<ShapeQuery<E>, Error> {
    let mut pieces = Vec::new();
    for geometry in geometries {
      for leaf in geometry.leaves() {
        push_components::<E>(leaf, &mut pieces)?;
      }
    }
    if pieces.is_empty() {
      return Err(Error::UnsupportedGeometry);
    }
    Ok(ShapeQuery {
      relation,
      component: Multi2D::new(pieces),
      _encoding: PhantomData,
    })
  }

  pub fn relation(&self) -> QueryRelation {
    self.relation
  }

  /// The union of all query pieces.
  pub fn component(&self) -> &dyn Component2D {
    &self.component
  }

  /// Relate a range-index cell given in encoded coordinates.
  pub fn relate_cell(&self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Relation {
    self.component.relate(
      E::decode_x(min_x),
      E::decode_x(max_x),
      E::decode_y(min_y),
      E::decode_y(max_y),
    )
  }

  /// Decide the query relation for one document.
  pub fn matches(&self, triangles: &[DecodedTriangle]) -> bool {
    let union: &dyn Component2D = &self.component;
    let result = match self.relation {
      QueryRelation::Intersects => triangles.iter().any(|t| self.intersects(union, t)),
      QueryRelation::Disjoint => !triangles.iter().any(|t| self.intersects(union, t)),
      QueryRelation::Within => {
        !triangles.is_empty() && triangles.iter().all(|t| self.contained(union, t))
      }
      QueryRelation::Contains => self
        .component
        .components()
        .iter()
        .all(|piece| self.contains_piece(piece.as_ref(), triangles)),
    };
    trace!("{:?} over {} triangles: {}", self.relation, triangles.len(), result);
    result
  }

  /// Decode stored records and decide the query relation.
  pub fn matches_encoded(&self, records: &[EncodedTriangle]) -> Result<bool, Error> {
    let triangles = records
      .iter()
      .map(EncodedTriangle::decode)
      .collect::<Result<Vec<_>, _>>()?;
    Ok(self.matches(&triangles))
  }

  fn intersects(&self, query: &dyn Component2D, t: &DecodedTriangle) -> bool {
    let [a, b, c] = t.points::<E>();
    match t.kind {
      TriangleType::Point => query.contains_point(&a),
      TriangleType::Line => query.intersects_line(&a, &b),
      TriangleType::Triangle => query.intersects_triangle(&a, &b, &c),
    }
  }

  fn contained(&self, query: &dyn Component2D, t: &DecodedTriangle) -> bool {
    let [a, b, c] = t.points::<E>();
    match t.kind {
      TriangleType::Point => query.contains_point(&a),
      TriangleType::Line => query.contains_line(&a, &b),
      TriangleType::Triangle => query.contains_triangle(&a, &b, &c),
    }
  }

  fn within(&self, query: &dyn Component2D, t: &DecodedTriangle) -> WithinRelation {
    let [a, b, c] = t.points::<E>();
    match t.kind {
      TriangleType::Point => query.within_point(&a),
      TriangleType::Line => query.within_line(&a, t.ab, &b, t.line_ends()),
      TriangleType::Triangle => query.within_triangle(&a, t.ab, &b, t.bc, &c, t.ca),
    }
  }

  fn contains_piece(&self, piece: &dyn Component2D, triangles: &[DecodedTriangle]) -> bool {
    let mut relation = WithinRelation::Disjoint;
    for t in triangles {
      relation = relation.combine(self.within(piece, t));
      if relation == WithinRelation::NotWithin {
        return false;
      }
    }
    relation == WithinRelation::Candidate
  }
}

fn quantize_points<E: Encoding>(points: &[Point<f64, 2>]) -> Result<Vec<Point<f64, 2>>, Error> {
  points.iter().map(E::quantize_point).collect()
}

// Lower bounds round down and upper bounds round up, so the quantized box
// covers every stored value of the original box.
fn quantize_rectangle<E: Encoding>(rect: &Rectangle) -> Result<Rectangle, Error> {
  Ok(Rectangle {
    min_x: E::decode_x(E::encode_x(rect.min_x)?),
    max_x: E::decode_x(E::encode_x_ceil(rect.max_x)?),
    min_y: E::decode_y(E::encode_y(rect.min_y)?),
    max_y: E::decode_y(E::encode_y_ceil(rect.max_y)?),
  })
}

fn push_components<E: Encoding>(
  geometry: &Geometry,
  out: &mut Vec<Box<dyn Component2D>>,
) -> Result<(), Error> {
  match geometry {
    Geometry::Point(pt) => out.push(Box::new(Point2D::new(E::quantize_point(pt)?))),
    Geometry::Line(line) => {
      let line = Line::new(quantize_points::<E>(line.points())?)?;
      out.push(Box::new(Line2D::new(&line)));
    }
    Geometry::Polygon(poly) => {
      let holes = poly
        .holes()
        .iter()
        .map(|hole| quantize_points::<E>(hole))
        .collect::<Result<Vec<_>, _>>()?;
      let poly = Polygon::with_holes(quantize_points::<E>(poly.shell())?, holes)?;
      out.push(Box::new(Polygon2D::new(poly)));
    }
    Geometry::Rectangle(rect) => {
      if rect.crosses_antimeridian() && !E::GEO {
        return Err(Error::InvalidCoordinate);
      }
      for piece in rect.split_antimeridian() {
        out.push(Box::new(Rectangle2D::new(quantize_rectangle::<E>(&piece)?)?));
      }
    }
    Geometry::Circle(circle) => {
      let mut circle = *circle;
      circle.center = E::quantize_point(&circle.center)?;
      let metric = if E::GEO {
        DistanceMetric::Haversine
      } else {
        DistanceMetric::Euclidean
      };
      out.push(Box::new(Circle2D::new(&circle, metric)));
    }
    Geometry::Collection(items) => {
      for item in items {
        push_components::<E>(item, out)?;
      }
    }
  }
  Ok(())
}
