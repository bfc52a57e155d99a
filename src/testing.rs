// Generators and exact arithmetic shared by the unit tests.
use crate::data::{Point, Polygon};

use num_rational::BigRational;
use num_traits::Zero;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn exact(v: f64) -> BigRational {
  BigRational::from_float(v).unwrap_or_else(BigRational::zero)
}

/// Twice the signed shoelace area, computed without rounding.
pub fn exact_area_2x(ring: &[Point<f64, 2>]) -> BigRational {
  let n = ring.len();
  (0..n).fold(BigRational::zero(), |acc, i| {
    let p = &ring[i];
    let q = &ring[(i + 1) % n];
    acc + exact(p.array[0]) * exact(q.array[1]) - exact(q.array[0]) * exact(p.array[1])
  })
}

// Strictly increasing angles around the origin give a simple, star-shaped
// ring. Integer coordinates are exact in every encoding.
fn star_ring(rng: &mut SmallRng, n: usize, min_r: f64, max_r: f64) -> Vec<Point<f64, 2>> {
  let step = std::f64::consts::TAU / n as f64;
  (0..n)
    .map(|i| {
      let angle = (i as f64 + rng.gen_range(0.0..0.5)) * step;
      let r = rng.gen_range(min_r..max_r);
      Point::new([(r * angle.cos()).round(), (r * angle.sin()).round()])
    })
    .collect()
}

pub fn random_star_polygon(n: usize, seed: u64) -> Polygon {
  let mut rng = SmallRng::seed_from_u64(seed);
  let ring = star_ring(&mut rng, n, 5_000.0, 10_000.0);
  Polygon::new(ring).unwrap_or_else(|err| panic!("bad star polygon: {}", err))
}

/// Star polygon with a small star hole around its center.
pub fn random_star_polygon_with_hole(n: usize, seed: u64) -> Polygon {
  let mut rng = SmallRng::seed_from_u64(seed);
  let shell = star_ring(&mut rng, n.max(4), 5_000.0, 10_000.0);
  let hole = star_ring(&mut rng, n.max(3), 200.0, 1_000.0);
  Polygon::with_holes(shell, vec![hole]).unwrap_or_else(|err| panic!("bad star polygon: {}", err))
}

#[cfg(test)]
mod tests {
  use super::*;
  use num_bigint::BigInt;

  #[test]
  fn exact_unit_square() {
    let ring = vec![
      Point::new([0.0, 0.0]),
      Point::new([1.0, 0.0]),
      Point::new([1.0, 1.0]),
      Point::new([0.0, 1.0]),
    ];
    assert_eq!(exact_area_2x(&ring), BigRational::from_integer(BigInt::from(2)));
  }

  #[test]
  fn star_is_counter_clockwise() {
    for seed in 0..20 {
      let poly = random_star_polygon(12, seed);
      assert!(exact_area_2x(poly.shell()) > BigRational::zero());
    }
  }
}
