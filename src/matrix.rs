//! The polynomial-matrix algebra engine.
//!
//! A [`PolyMatrix`] is a dense `n_rows x n_cols` grid of polynomials, each
//! with `n` coefficients in the negacyclic ring `Z_q[x]/(x^n + 1)`. This is
//! the core the rest of the crate (the frequency-domain multiplier and the
//! PKE protocol) is built on top of.
//!
//! Arithmetic never mutates an operand: every operation returns a new
//! value, and every coefficient of a returned matrix is in the canonical
//! range `[0, q)`.

use zeroize::Zeroize;

use crate::errors::Error;
use crate::freq;
use crate::sampler::Sampler;

/// Selects which algorithm computes a single polynomial-pair product
/// inside [`PolyMatrix::multiply_with_backend`].
///
/// Kept as an explicit value threaded through calls (a field on [`crate::pke::Pke`]
/// or a parameter here) rather than a process-wide flag, so callers can mix
/// back-ends within the same program without mutating shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MulBackend {
    /// Schoolbook double loop plus negacyclic fold-and-reduce.
    #[default]
    Schoolbook,
    /// Sign-twist + DFT + pointwise multiply + inverse DFT + untwist.
    FrequencyDomain,
}

/// A dynamically-sized operand to [`PolyMatrix::add`]: either another
/// matrix or an integer added to every constant term.
///
/// Modeled as two distinct, type-safe variants rather than runtime type
/// inspection, so the compiler rules out passing anything else.
pub enum Operand {
    Matrix(PolyMatrix),
    Scalar(i64),
}

impl From<PolyMatrix> for Operand {
    fn from(value: PolyMatrix) -> Self {
        Operand::Matrix(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Scalar(value)
    }
}

/// A dense `n_rows x n_cols` matrix of polynomials in `Z_q[x]/(x^n + 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct PolyMatrix {
    pub q: i64,
    pub n_rows: usize,
    pub n_cols: usize,
    pub n: usize,
    coeffs: Vec<Vec<Vec<i64>>>,
}

impl PolyMatrix {
    /// Allocates an `n_rows x n_cols x n` coefficient store. When
    /// `max_value == 0` every coefficient is zero; otherwise each
    /// coefficient is drawn independently from the sampler, centered on
    /// `[-max_value, max_value]` when `include_negative` is set, or wide on
    /// `[0, max_value)` otherwise.
    pub fn construct<S: Sampler>(
        sampler: &mut S,
        q: i64,
        n_rows: usize,
        n_cols: usize,
        max_value: i64,
        n: usize,
        include_negative: bool,
    ) -> Result<Self, Error> {
        check_shape(q, n_rows, n_cols, n)?;
        if max_value < 0 {
            return Err(Error::ArgumentError(
                "max_value must be non-negative".to_string(),
            ));
        }

        let mut coeffs = vec![vec![vec![0i64; n]; n_cols]; n_rows];
        if max_value != 0 {
            for row in coeffs.iter_mut() {
                for poly in row.iter_mut() {
                    for c in poly.iter_mut() {
                        *c = if include_negative {
                            sampler.centered_uniform(max_value)
                        } else {
                            sampler.wide_uniform(max_value)
                        };
                    }
                }
            }
        }

        Ok(PolyMatrix {
            q,
            n_rows,
            n_cols,
            n,
            coeffs,
        })
    }

    /// Convenience equivalent to `construct` with `max_value = 0`.
    pub fn zero(q: i64, n_rows: usize, n_cols: usize, n: usize) -> Result<Self, Error> {
        check_shape(q, n_rows, n_cols, n)?;
        Ok(PolyMatrix {
            q,
            n_rows,
            n_cols,
            n,
            coeffs: vec![vec![vec![0i64; n]; n_cols]; n_rows],
        })
    }

    /// Builds a 1x1 matrix directly from a coefficient vector of length `n`.
    /// Used to lift an encoded message into the ring.
    pub fn from_coeffs(q: i64, n: usize, coeffs: Vec<i64>) -> Result<Self, Error> {
        if q <= 0 || n == 0 {
            return Err(Error::ArgumentError("q and n must be positive".to_string()));
        }
        if coeffs.len() != n {
            return Err(Error::ShapeError(
                "coefficient vector length must equal n".to_string(),
            ));
        }
        Ok(PolyMatrix {
            q,
            n_rows: 1,
            n_cols: 1,
            n,
            coeffs: vec![vec![coeffs]],
        })
    }

    /// The coefficients of the polynomial at `(row, col)`, row-major.
    pub fn poly(&self, row: usize, col: usize) -> &[i64] {
        &self.coeffs[row][col]
    }

    /// Adds another matrix or an integer constant-term bias.
    pub fn add(&self, operand: impl Into<Operand>) -> Result<Self, Error> {
        match operand.into() {
            Operand::Matrix(other) => self.add_matrix(&other),
            Operand::Scalar(value) => self.add_scalar(value),
        }
    }

    /// Element-wise addition, reduced modulo `q`. Shapes must match in
    /// `(n_rows, n_cols)`; mismatched polynomial lengths are zero-extended
    /// to the longer of the two.
    pub fn add_matrix(&self, other: &PolyMatrix) -> Result<Self, Error> {
        self.combine(other, |a, b| a + b)
    }

    /// Element-wise subtraction, reduced modulo `q` into `[0, q)`.
    pub fn sub(&self, other: &PolyMatrix) -> Result<Self, Error> {
        self.combine(other, |a, b| a - b)
    }

    fn combine(&self, other: &PolyMatrix, op: impl Fn(i64, i64) -> i64) -> Result<Self, Error> {
        if self.n_rows != other.n_rows || self.n_cols != other.n_cols {
            return Err(Error::ShapeError(
                "matrix dimensions do not match".to_string(),
            ));
        }

        let n = self.n.max(other.n);
        let mut coeffs = vec![vec![vec![0i64; n]; self.n_cols]; self.n_rows];
        for r in 0..self.n_rows {
            for c in 0..self.n_cols {
                let a = &self.coeffs[r][c];
                let b = &other.coeffs[r][c];
                for (i, slot) in coeffs[r][c].iter_mut().enumerate() {
                    let av = a.get(i).copied().unwrap_or(0);
                    let bv = b.get(i).copied().unwrap_or(0);
                    *slot = op(av, bv).rem_euclid(self.q);
                }
            }
        }

        Ok(PolyMatrix {
            q: self.q,
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            n,
            coeffs,
        })
    }

    /// Adds `scalar` into every polynomial's constant term, reduced modulo
    /// `q`; all other coefficients are unchanged.
    pub fn add_scalar(&self, scalar: i64) -> Result<Self, Error> {
        let mut coeffs = self.coeffs.clone();
        for row in coeffs.iter_mut() {
            for poly in row.iter_mut() {
                poly[0] = (poly[0] + scalar).rem_euclid(self.q);
            }
        }
        Ok(PolyMatrix {
            q: self.q,
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            n: self.n,
            coeffs,
        })
    }

    /// Matrix product in `Z_q[x]/(x^n + 1)`, using the schoolbook
    /// negacyclic convolution for each polynomial product.
    pub fn multiply(&self, other: &PolyMatrix) -> Result<Self, Error> {
        self.multiply_with_backend(other, MulBackend::Schoolbook)
    }

    /// Matrix product with an explicit choice of per-entry multiplication
    /// back-end. Both back-ends must agree on valid inputs.
    pub fn multiply_with_backend(
        &self,
        other: &PolyMatrix,
        backend: MulBackend,
    ) -> Result<Self, Error> {
        if self.n_cols != other.n_rows {
            return Err(Error::ShapeError(
                "inner dimensions do not match for multiply".to_string(),
            ));
        }
        if self.n != other.n {
            return Err(Error::ShapeError(
                "polynomial degree bound mismatch for multiply".to_string(),
            ));
        }

        let n = self.n;
        let mut coeffs = vec![vec![vec![0i64; n]; other.n_cols]; self.n_rows];
        for r in 0..self.n_rows {
            for c in 0..other.n_cols {
                let mut acc = vec![0i64; n];
                for m in 0..self.n_cols {
                    let a = &self.coeffs[r][m];
                    let b = &other.coeffs[m][c];
                    let product = match backend {
                        MulBackend::Schoolbook => negacyclic_convolution(a, b, n, self.q),
                        MulBackend::FrequencyDomain => {
                            freq::multiply_polynomials_frequency(a, b, self.q, n)?
                        }
                    };
                    for (slot, value) in acc.iter_mut().zip(product) {
                        *slot += value;
                    }
                }
                for (slot, value) in coeffs[r][c].iter_mut().zip(acc) {
                    *slot = value.rem_euclid(self.q);
                }
            }
        }

        Ok(PolyMatrix {
            q: self.q,
            n_rows: self.n_rows,
            n_cols: other.n_cols,
            n,
            coeffs,
        })
    }

    /// Swaps `n_rows` with `n_cols`; each polynomial is kept as-is.
    pub fn transpose(&self) -> Self {
        let mut coeffs = vec![vec![vec![0i64; self.n]; self.n_rows]; self.n_cols];
        for r in 0..self.n_rows {
            for c in 0..self.n_cols {
                coeffs[c][r] = self.coeffs[r][c].clone();
            }
        }
        PolyMatrix {
            q: self.q,
            n_rows: self.n_cols,
            n_cols: self.n_rows,
            n: self.n,
            coeffs,
        }
    }
}

fn check_shape(q: i64, n_rows: usize, n_cols: usize, n: usize) -> Result<(), Error> {
    if q <= 0 {
        return Err(Error::ArgumentError("q must be positive".to_string()));
    }
    if n_rows == 0 || n_cols == 0 {
        return Err(Error::ArgumentError(
            "n_rows and n_cols must be positive".to_string(),
        ));
    }
    if n == 0 {
        return Err(Error::ArgumentError("n must be positive".to_string()));
    }
    Ok(())
}

/// The product of two length-`n` polynomials in `Z_q[x]/(x^n + 1)`: an
/// ordinary convolution of length `2n - 1`, folded with a sign flip at
/// index `n` (since `x^n` is congruent to `-1` in this ring), then reduced
/// modulo `q` into `[0, q)`.
pub fn negacyclic_convolution(a: &[i64], b: &[i64], n: usize, q: i64) -> Vec<i64> {
    let mut conv = vec![0i64; 2 * n - 1];
    for (i, &av) in a.iter().take(n).enumerate() {
        if av == 0 {
            continue;
        }
        for (j, &bv) in b.iter().take(n).enumerate() {
            conv[i + j] += av * bv;
        }
    }

    let mut result = vec![0i64; n];
    result[..n].copy_from_slice(&conv[..n]);
    for (j, &c) in conv.iter().enumerate().skip(n) {
        result[j - n] -= c;
    }
    for coeff in result.iter_mut() {
        *coeff = coeff.rem_euclid(q);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn poly1x1(q: i64, n: usize, coeffs: &[i64]) -> PolyMatrix {
        PolyMatrix::from_coeffs(q, n, coeffs.to_vec()).unwrap()
    }

    fn poly_vec(q: i64, n: usize, rows: &[&[i64]]) -> PolyMatrix {
        PolyMatrix {
            q,
            n_rows: rows.len(),
            n_cols: 1,
            n,
            coeffs: rows.iter().map(|r| vec![r.to_vec()]).collect(),
        }
    }

    #[test]
    fn tiny_ring_add() {
        let a = poly_vec(17, 4, &[&[1, 2, 3, 4], &[5, 6, 7, 8]]);
        let b = poly_vec(17, 4, &[&[16, 16, 16, 16], &[0, 0, 0, 0]]);
        let sum = a.add_matrix(&b).unwrap();
        assert_eq!(sum.poly(0, 0), &[0, 1, 2, 3]);
        assert_eq!(sum.poly(1, 0), &[5, 6, 7, 8]);
    }

    #[test]
    fn add_dispatches_to_add_matrix_for_a_matrix_operand() {
        let a = poly1x1(17, 4, &[1, 2, 3, 4]);
        let b = poly1x1(17, 4, &[16, 16, 16, 16]);
        assert_eq!(a.add(b.clone()).unwrap(), a.add_matrix(&b).unwrap());
    }

    #[test]
    fn add_dispatches_to_add_scalar_for_an_integer_operand() {
        let a = poly1x1(17, 4, &[3, 0, 0, 0]);
        assert_eq!(a.add(20i64).unwrap(), a.add_scalar(20).unwrap());
    }

    #[test]
    fn negacyclic_identity() {
        let x3 = poly1x1(17, 4, &[0, 0, 0, 1]);
        let product = x3.multiply(&x3).unwrap();
        assert_eq!(product.poly(0, 0), &[0, 0, 16, 0]);
    }

    #[test]
    fn scalar_add_bias() {
        let a = poly1x1(17, 4, &[3, 0, 0, 0]);
        let result = a.add_scalar(20).unwrap();
        assert_eq!(result.poly(0, 0), &[6, 0, 0, 0]);
    }

    #[test]
    fn add_is_commutative() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sampler = crate::sampler::RngSampler::new(&mut rng);
        let a = PolyMatrix::construct(&mut sampler, 3329, 2, 2, 3329, 16, false).unwrap();
        let b = PolyMatrix::construct(&mut sampler, 3329, 2, 2, 3329, 16, false).unwrap();
        assert_eq!(a.add_matrix(&b).unwrap(), b.add_matrix(&a).unwrap());
    }

    #[test]
    fn multiply_is_associative() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut sampler = crate::sampler::RngSampler::new(&mut rng);
        let a = PolyMatrix::construct(&mut sampler, 17, 2, 2, 17, 8, false).unwrap();
        let b = PolyMatrix::construct(&mut sampler, 17, 2, 2, 17, 8, false).unwrap();
        let c = PolyMatrix::construct(&mut sampler, 17, 2, 2, 17, 8, false).unwrap();

        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn transpose_is_involution() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sampler = crate::sampler::RngSampler::new(&mut rng);
        let m = PolyMatrix::construct(&mut sampler, 3329, 3, 2, 3329, 16, false).unwrap();
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn coefficients_stay_canonical() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = crate::sampler::RngSampler::new(&mut rng);
        let a = PolyMatrix::construct(&mut sampler, 3329, 2, 2, 3329, 16, false).unwrap();
        let b = PolyMatrix::construct(&mut sampler, 3329, 2, 2, 3329, 16, false).unwrap();
        for m in [
            a.add_matrix(&b).unwrap(),
            a.sub(&b).unwrap(),
            a.multiply(&b).unwrap(),
        ] {
            for row in 0..m.n_rows {
                for col in 0..m.n_cols {
                    for &c in m.poly(row, col) {
                        assert!((0..3329).contains(&c));
                    }
                }
            }
        }
    }

    #[test]
    fn add_rejects_shape_mismatch() {
        let a = poly1x1(17, 4, &[1, 2, 3, 4]);
        let b = poly_vec(17, 4, &[&[1, 2, 3, 4], &[5, 6, 7, 8]]);
        assert!(matches!(a.add_matrix(&b), Err(Error::ShapeError(_))));
    }

    #[test]
    fn multiply_rejects_inner_dimension_mismatch() {
        let a = poly_vec(17, 4, &[&[1, 0, 0, 0], &[0, 1, 0, 0]]);
        let b = poly_vec(17, 4, &[&[1, 0, 0, 0], &[0, 1, 0, 0]]);
        assert!(matches!(a.multiply(&b), Err(Error::ShapeError(_))));
    }

    #[test]
    fn construct_rejects_non_positive_arguments() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sampler = crate::sampler::RngSampler::new(&mut rng);
        assert!(matches!(
            PolyMatrix::construct(&mut sampler, 0, 1, 1, 1, 4, false),
            Err(Error::ArgumentError(_))
        ));
    }

    #[test]
    fn schoolbook_and_frequency_backends_agree() {
        let mut rng = StdRng::seed_from_u64(123);
        let mut sampler = crate::sampler::RngSampler::new(&mut rng);
        for _ in 0..20 {
            let a = PolyMatrix::construct(&mut sampler, 3329, 1, 1, 3, 256, true).unwrap();
            let b = PolyMatrix::construct(&mut sampler, 3329, 1, 1, 3, 256, true).unwrap();
            let schoolbook = a.multiply(&b).unwrap();
            let frequency = a
                .multiply_with_backend(&b, MulBackend::FrequencyDomain)
                .unwrap();
            assert_eq!(schoolbook, frequency);
        }
    }
}
