//! Uniform-integer sampling, the randomness boundary the rest of the crate
//! builds on.
//!
//! [`Sampler`] is generic over any `rand::RngCore` rather than reaching for
//! a process-global one. Production callers pass `rand::rngs::OsRng`; tests
//! pass a seeded `rand::rngs::StdRng` for reproducibility.

use rand::{Rng, RngCore};

/// Produces integers drawn uniformly from either `[0, m)` or `[-m, m]`.
pub trait Sampler {
    /// A coefficient drawn uniformly from `[0, bound)`. Returns `0` when
    /// `bound <= 0`.
    fn wide_uniform(&mut self, bound: i64) -> i64;

    /// A coefficient drawn uniformly from the `2*eta + 1` integers in
    /// `[-eta, eta]`. Returns `0` when `eta <= 0`.
    fn centered_uniform(&mut self, eta: i64) -> i64;
}

/// A [`Sampler`] backed by any `rand::RngCore`.
pub struct RngSampler<'a, R: RngCore> {
    rng: &'a mut R,
}

impl<'a, R: RngCore> RngSampler<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<'a, R: RngCore> Sampler for RngSampler<'a, R> {
    fn wide_uniform(&mut self, bound: i64) -> i64 {
        if bound <= 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    fn centered_uniform(&mut self, eta: i64) -> i64 {
        if eta <= 0 {
            return 0;
        }
        self.rng.gen_range(-eta..=eta)
    }
}
