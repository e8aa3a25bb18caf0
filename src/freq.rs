//! The frequency-domain multiplication back-end.
//!
//! Multiplies a pair of equal-length polynomials in `Z_q[x]/(x^n + 1)` by
//! zero-padding both to length `2n`, running a cyclic convolution through a
//! forward DFT / pointwise product / inverse DFT, and folding the length-`2n`
//! result back down to `n` terms: `r[i] = c[i] - c[i+n]`. On valid inputs
//! this must agree coefficient-for-coefficient with
//! [`crate::matrix::negacyclic_convolution`] after reduction to `[0, q)`.
//!
//! A sign twist by `(-1)^k` before an `n`-point transform also reduces
//! negacyclic multiplication to a cyclic one, but only when `n` is odd: a
//! wrap-around term `x^{m+n}` untwists to `(-1)^m \cdot (-1)^{m+n}`, which
//! equals `-1` (the required `x^n \equiv -1`) only if `n` is odd. This
//! scheme's default `n = 256` is even, so the fold approach is used instead;
//! it holds for any `n`.
//!
//! `n` is at most a few hundred for this scheme, so a small self-contained
//! `O(n^2)` DFT is used rather than a crate-provided FFT; the quadratic cost
//! is immaterial at this size.

use crate::errors::Error;

#[derive(Clone, Copy, Debug, Default)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    fn add(self, other: Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }

    fn mul(self, other: Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }
}

/// Naive discrete Fourier transform; `inverse` selects the conjugate
/// twiddle factors and the `1/n` normalization.
fn dft(input: &[Complex], inverse: bool) -> Vec<Complex> {
    let n = input.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    let mut output = vec![Complex::default(); n];

    for (k, slot) in output.iter_mut().enumerate() {
        let mut sum = Complex::default();
        for (t, &x) in input.iter().enumerate() {
            let angle = sign * 2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
            sum = sum.add(x.mul(Complex::new(angle.cos(), angle.sin())));
        }
        *slot = sum;
    }

    if inverse {
        for c in output.iter_mut() {
            c.re /= n as f64;
            c.im /= n as f64;
        }
    }
    output
}

/// Multiplies `a` and `b` in `Z_q[x]/(x^n + 1)` via the zero-pad /
/// forward-transform / pointwise-multiply / inverse-transform / fold
/// sequence described at the top of this module.
pub fn multiply_polynomials_frequency(
    a: &[i64],
    b: &[i64],
    q: i64,
    n: usize,
) -> Result<Vec<i64>, Error> {
    if a.len() != b.len() {
        return Err(Error::ShapeError(
            "frequency-domain multiply requires equal-length operands".to_string(),
        ));
    }
    if a.len() != n {
        return Err(Error::ShapeError(
            "frequency-domain multiply operand length does not match n".to_string(),
        ));
    }

    let padded = |v: &[i64]| -> Vec<Complex> {
        let mut out = vec![Complex::default(); 2 * n];
        for (slot, &c) in out.iter_mut().zip(v) {
            *slot = Complex::new(c as f64, 0.0);
        }
        out
    };

    let fa = dft(&padded(a), false);
    let fb = dft(&padded(b), false);
    let pointwise: Vec<Complex> = fa.iter().zip(&fb).map(|(&x, &y)| x.mul(y)).collect();
    let convolved = dft(&pointwise, true);

    let mut result = vec![0i64; n];
    for (i, slot) in result.iter_mut().enumerate() {
        let low = convolved[i].re.round() as i64;
        let high = convolved[i + n].re.round() as i64;
        *slot = (low - high).rem_euclid(q);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::negacyclic_convolution;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn agrees_with_schoolbook_on_tiny_ring() {
        let q = 17;
        let n = 4;
        let a = vec![1, 2, 3, 4];
        let b = vec![5, 6, 7, 8];
        let schoolbook = negacyclic_convolution(&a, &b, n, q);
        let frequency = multiply_polynomials_frequency(&a, &b, q, n).unwrap();
        assert_eq!(schoolbook, frequency);
    }

    #[test]
    fn wraps_with_the_correct_sign_on_even_n() {
        // x^3 * x^3 = x^6 = -x^2 in Z_17[x]/(x^4+1). A twist by (-1)^k would
        // get this wrong for even n, landing on the cyclic (x^n = +1) answer
        // [0, 0, 1, 0] instead of the negacyclic one.
        let q = 17;
        let n = 4;
        let x3 = vec![0, 0, 0, 1];
        let frequency = multiply_polynomials_frequency(&x3, &x3, q, n).unwrap();
        assert_eq!(frequency, vec![0, 0, 16, 0]);
    }

    #[test]
    fn agrees_with_schoolbook_on_random_pairs() {
        let q = 3329;
        let n = 256;
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..100 {
            let a: Vec<i64> = (0..n).map(|_| rng.gen_range(-3..=3)).collect();
            let b: Vec<i64> = (0..n).map(|_| rng.gen_range(-3..=3)).collect();
            let schoolbook = negacyclic_convolution(&a, &b, n, q);
            let frequency = multiply_polynomials_frequency(&a, &b, q, n).unwrap();
            assert_eq!(schoolbook, frequency);
        }
    }

    #[test]
    fn rejects_length_mismatch() {
        let result = multiply_polynomials_frequency(&[1, 2, 3], &[1, 2], 17, 3);
        assert!(matches!(result, Err(Error::ShapeError(_))));
    }
}
