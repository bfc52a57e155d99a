//! Index-time entry point: geometry in, triangle records out.
use std::marker::PhantomData;

use log::debug;

use crate::algorithms::{tessellate, TessellatorOptions};
use crate::data::{Geometry, Point, Polygon, Rectangle, TriangleView};
use crate::encoding::{DecodedTriangle, EncodedTriangle, Encoding, TriangleType};
use crate::Error;

/// Turns document geometries into stored triangle records for one encoding.
#[derive(Debug, Clone, Copy)]
pub struct ShapeIndexer<E: Encoding> {
  options: TessellatorOptions,
  _encoding: PhantomData<E>,
}

impl<E: Encoding> Default for ShapeIndexer<E> {
  fn default() -> Self {
    ShapeIndexer::new()
  }
}

impl<E: Encoding> ShapeIndexer<E> {
  pub fn new() -> ShapeIndexer<E> {
    ShapeIndexer::with_options(TessellatorOptions::default())
  }

  pub fn with_options(options: TessellatorOptions) -> ShapeIndexer<E> {
    ShapeIndexer {
      options,
      _encoding: PhantomData,
    }
  }

  pub fn options(&self) -> &TessellatorOptions {
    &self.options
  }

  /// Records for every leaf of `geometry`. Points become POINT records, each
  /// line segment a LINE record and polygons their tessellation. Circles are
  /// query-only and fail with `UnsupportedGeometry`.
  ///
  /// ```rust
  /// # use shapekernel::data::{Geometry, Point};
  /// # use shapekernel::encoding::GeoEncoding;
  /// # use shapekernel::shape::ShapeIndexer;
  /// let records = ShapeIndexer::<GeoEncoding>::new()
  ///   .triangles(&Geometry::Point(Point::new([10.0, 20.0])))
  ///   .unwrap();
  /// assert!(records[0].decode().unwrap().is_point());
  /// ```
  pub fn triangles(&self, geometry: &Geometry) -> Result<Vec<EncodedTriangle>, Error> {
    let mut out = Vec::new();
    for leaf in geometry.leaves() {
      self.push_leaf(leaf, &mut out)?;
    }
    debug!("indexed geometry into {} records", out.len());
    Ok(out)
  }

  fn push_leaf(&self, geometry: &Geometry, out: &mut Vec<EncodedTriangle>) -> Result<(), Error> {
    match geometry {
      Geometry::Point(pt) => out.push(EncodedTriangle::point(E::encode_point(pt)?)),
      Geometry::Line(line) => {
        let points = line
          .points()
          .iter()
          .map(E::encode_point)
          .collect::<Result<Vec<_>, _>>()?;
        let last = points.len().saturating_sub(2);
        out.extend(
          points
            .windows(2)
            .enumerate()
            .map(|(i, w)| EncodedTriangle::line_segment(w[0], w[1], [i == 0, i == last])),
        );
      }
      Geometry::Polygon(poly) => self.push_polygon(poly, out)?,
      Geometry::Rectangle(rect) => {
        if rect.crosses_antimeridian() && !E::GEO {
          return Err(Error::InvalidCoordinate);
        }
        for piece in rect.split_antimeridian() {
          self.push_rectangle(&piece, out)?;
        }
      }
      Geometry::Circle(_) => return Err(Error::UnsupportedGeometry),
      Geometry::Collection(items) => {
        for item in items {
          self.push_leaf(item, out)?;
        }
      }
    }
    Ok(())
  }

  fn push_polygon(&self, poly: &Polygon, out: &mut Vec<EncodedTriangle>) -> Result<(), Error> {
    let triangles = tessellate::<E>(poly, &self.options)?;
    out.extend(triangles.iter().map(EncodedTriangle::from));
    Ok(())
  }

  // A box that is flat on the grid is stored as the segment or point it
  // collapses to.
  fn push_rectangle(&self, rect: &Rectangle, out: &mut Vec<EncodedTriangle>) -> Result<(), Error> {
    let lower = E::encode_point(&Point::new([rect.min_x, rect.min_y]))?;
    let upper = E::encode_point(&Point::new([rect.max_x, rect.max_y]))?;
    if lower.array[0] == upper.array[0] || lower.array[1] == upper.array[1] {
      out.push(EncodedTriangle::line(lower, upper));
      return Ok(());
    }
    self.push_polygon(&rect.to_polygon()?, out)
  }
}

/// Per-document aggregate kept next to the triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSummary {
  pub min_x: i32,
  pub max_x: i32,
  pub min_y: i32,
  pub max_y: i32,
  /// Highest dimension among the records.
  pub dimension: TriangleType,
  /// Centroid of the highest-dimension records, weighted by area for
  /// triangles and by length for segments.
  pub centroid: Point<f64, 2>,
}

impl ShapeSummary {
  /// `None` for a document without records.
  pub fn from_triangles<E: Encoding>(triangles: &[DecodedTriangle]) -> Option<ShapeSummary> {
    let dimension = triangles.iter().map(|t| t.kind).max()?;
    let (mut min_x, mut max_x) = (i32::MAX, i32::MIN);
    let (mut min_y, mut max_y) = (i32::MAX, i32::MIN);
    for t in triangles {
      let (lx, hx, ly, hy) = t.bounding_box();
      min_x = min_x.min(lx);
      max_x = max_x.max(hx);
      min_y = min_y.min(ly);
      max_y = max_y.max(hy);
    }

    let mut weighted = [0.0, 0.0];
    let mut plain = [0.0, 0.0];
    let mut total = 0.0;
    let mut count = 0.0;
    for t in triangles.iter().filter(|t| t.kind == dimension) {
      let [a, b, c] = t.points::<E>();
      let (center, weight) = match dimension {
        TriangleType::Point => (a, 0.0),
        TriangleType::Line => (
          Point::new([
            (a.array[0] + b.array[0]) / 2.0,
            (a.array[1] + b.array[1]) / 2.0,
          ]),
          (b.array[0] - a.array[0]).hypot(b.array[1] - a.array[1]),
        ),
        TriangleType::Triangle => {
          let view = TriangleView::new([&a, &b, &c]);
          (view.centroid(), view.signed_area_2x() / 2.0)
        }
      };
      for i in 0..2 {
        weighted[i] += center.array[i] * weight;
        plain[i] += center.array[i];
      }
      total += weight;
      count += 1.0;
    }
    // Zero total weight: every record is degenerate, fall back to the mean.
    let centroid = if total > 0.0 {
      Point::new([weighted[0] / total, weighted[1] / total])
    } else {
      Point::new([plain[0] / count, plain[1] / count])
    };

    Some(ShapeSummary {
      min_x,
      max_x,
      min_y,
      max_y,
      dimension,
      centroid,
    })
  }
}
