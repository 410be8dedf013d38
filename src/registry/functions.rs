
//! Math functions backing the builtin registry callbacks.

use std::f64::consts::PI;

/// Above this, the iterative product overflows `f64` usefulness and
/// the Lanczos approximation takes over anyway.
const EXACT_FACTORIAL_LIMIT: f64 = 100.0;

/// Factorial, extended to the reals via the gamma function. Exact
/// (iterative) for small non-negative integers.
pub fn factorial(x: f64) -> f64 {
  if x == f64::INFINITY {
    return f64::INFINITY;
  }
  if x >= 0.0 && x < EXACT_FACTORIAL_LIMIT && x.fract() == 0.0 {
    let mut product = 1.0;
    let mut n = 2.0;
    while n <= x {
      product *= n;
      n += 1.0;
    }
    return product;
  }
  lanczos_gamma(x + 1.0)
}

pub fn gamma(z: f64) -> f64 {
  factorial(z - 1.0)
}

/// Lanczos approximation of the gamma function with g = 7, using the
/// reflection formula for the left half-plane.
fn lanczos_gamma(z: f64) -> f64 {
  const G: usize = 7;
  const C: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
  ];

  if z < 0.5 {
    return PI / ((PI * z).sin() * lanczos_gamma(1.0 - z));
  }
  let z = z - 1.0;
  let mut x = C[0];
  for (i, c) in C.iter().enumerate().skip(1).take(G + 1) {
    x += c / (z + i as f64);
  }
  let t = z + G as f64 + 0.5;

  let p = t.powf(z + 0.5);
  if p == f64::INFINITY {
    return f64::INFINITY;
  }

  (2.0 * PI).sqrt() * p * (-t).exp() * x
}

/// Ordered selections: n! / (n - r)!.
pub fn permutation(n: f64, r: f64) -> f64 {
  factorial(n) / factorial(n - r)
}

/// Unordered selections: nPr / r!.
pub fn combination(n: f64, r: f64) -> f64 {
  permutation(n, r) / factorial(r)
}

/// Greatest common divisor. NaN unless both arguments are integers.
pub fn gcd(a: f64, b: f64) -> f64 {
  if a.fract() != 0.0 || b.fract() != 0.0 {
    return f64::NAN;
  }

  let mut a = a;
  let mut b = b;
  while b != 0.0 {
    (a, b) = (b, a % b);
  }
  a.abs()
}

/// Degrees to radians; backs the postfix `d` operator.
pub fn degrees_to_radians(degrees: f64) -> f64 {
  PI * degrees / 180.0
}
