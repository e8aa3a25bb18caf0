//! The Module-LWE PKE protocol: key generation, encryption, and decryption
//! built on top of [`PolyMatrix`].
//!
//! Deliberately simple: no NTT-domain representation, no compression, no
//! seed-derived matrix, no hashing. `A` and the secrets are freshly sampled
//! on every `generate_keys` call.

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::errors::Error;
use crate::matrix::{MulBackend, PolyMatrix};
use crate::sampler::RngSampler;

/// The scheme's tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PkeParams {
    /// Polynomial degree bound.
    pub n: usize,
    /// Coefficient modulus.
    pub q: i64,
    /// Module rank (matrix/vector dimension).
    pub k: usize,
    /// Secret/randomness centered-uniform bound.
    pub eta1: i64,
    /// Error centered-uniform bound.
    pub eta2: i64,
}

impl Default for PkeParams {
    fn default() -> Self {
        PkeParams {
            n: 256,
            q: 3329,
            k: 3,
            eta1: 2,
            eta2: 2,
        }
    }
}

/// A public key: the public matrix `A` and `t = A*s + e`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub a: PolyMatrix,
    pub t: PolyMatrix,
}

/// A private key: the small secret vector `s`. Zeroized on drop, since it
/// is the one piece of state in this crate worth not leaving in memory.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    pub s: PolyMatrix,
}

/// A ciphertext: the pair `(u, v)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub u: PolyMatrix,
    pub v: PolyMatrix,
}

/// The Module-LWE PKE, parameterized by [`PkeParams`] and a choice of
/// multiplication back-end.
pub struct Pke {
    params: PkeParams,
    backend: MulBackend,
}

impl Pke {
    /// Validates `params` once at construction time and fixes the
    /// multiplication back-end for the lifetime of this instance.
    pub fn new(params: PkeParams, backend: MulBackend) -> Result<Self, Error> {
        if params.q <= 0 || params.n == 0 || params.k == 0 {
            return Err(Error::ArgumentError(
                "n, q and k must be positive".to_string(),
            ));
        }
        if params.eta1 <= 0 || params.eta2 <= 0 {
            return Err(Error::ArgumentError(
                "eta1 and eta2 must be positive".to_string(),
            ));
        }
        Ok(Pke { params, backend })
    }

    /// The default-parameter PKE (`n=256, q=3329, k=3, eta1=2, eta2=2`)
    /// using the schoolbook multiplication back-end.
    pub fn with_defaults() -> Self {
        Pke::new(PkeParams::default(), MulBackend::Schoolbook)
            .expect("default parameters are always valid")
    }

    pub fn params(&self) -> PkeParams {
        self.params
    }

    fn multiply(&self, a: &PolyMatrix, b: &PolyMatrix) -> Result<PolyMatrix, Error> {
        a.multiply_with_backend(b, self.backend)
    }

    /// KeyGen: samples a fresh public matrix `A`, secret `s`, and error `e`,
    /// and returns `((A, t), s)` with `t = A*s + e`.
    pub fn generate_keys<R: RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(PublicKey, PrivateKey), Error> {
        let PkeParams { n, q, k, eta1, eta2 } = self.params;
        let mut sampler = RngSampler::new(rng);

        let a = PolyMatrix::construct(&mut sampler, q, k, k, q, n, false)?;
        let s = PolyMatrix::construct(&mut sampler, q, k, 1, eta1, n, true)?;
        let e = PolyMatrix::construct(&mut sampler, q, k, 1, eta2, n, true)?;

        let t = self.multiply(&a, &s)?.add_matrix(&e)?;

        Ok((PublicKey { a, t }, PrivateKey { s }))
    }

    /// Encrypt: samples fresh `r, e1, e2`, encodes `message`, and returns
    /// `(u, v) = (A^T*r + e1, t^T*r + e2 + m_hat)`.
    pub fn encrypt<R: RngCore>(
        &self,
        message: &[u8],
        pk: &PublicKey,
        rng: &mut R,
    ) -> Result<Ciphertext, Error> {
        let PkeParams { n, q, k, eta1, eta2 } = self.params;
        let mut sampler = RngSampler::new(rng);

        let r = PolyMatrix::construct(&mut sampler, q, k, 1, eta1, n, true)?;
        let e1 = PolyMatrix::construct(&mut sampler, q, k, 1, eta2, n, true)?;
        let e2 = PolyMatrix::construct(&mut sampler, q, 1, 1, eta2, n, true)?;

        let m_hat = PolyMatrix::from_coeffs(q, n, codec::encode(message, q, n)?)?;

        let u = self.multiply(&pk.a.transpose(), &r)?.add_matrix(&e1)?;
        let v = self
            .multiply(&pk.t.transpose(), &r)?
            .add_matrix(&e2)?
            .add_matrix(&m_hat)?;

        Ok(Ciphertext { u, v })
    }

    /// Decrypt: computes `d = v - s^T*u` and decodes it back to bytes.
    pub fn decrypt(&self, ct: &Ciphertext, sk: &PrivateKey) -> Result<Vec<u8>, Error> {
        let noisy = self.multiply(&sk.s.transpose(), &ct.u)?;
        let d = ct.v.sub(&noisy)?;
        codec::decode(d.poly(0, 0), self.params.q)
    }
}
