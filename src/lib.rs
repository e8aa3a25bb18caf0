//! # A toy Module-LWE public-key encryption scheme
//!
//! A **pure Rust** implementation of a Kyber-style (Module-LWE) public-key
//! encryption scheme: polynomial-matrix algebra over the negacyclic ring
//! `Z_q[x]/(x^n + 1)`, two interchangeable multiplication back-ends
//! (schoolbook convolution and a frequency-domain twist/FFT variant), and a
//! key-generation / encryption / decryption protocol built on top of it.
//!
//! ## What this is not
//!
//! This is **not** a hardened, constant-time, standards-compliant KEM. It
//! does not implement NIST ML-KEM's wire format, ciphertext compression, or
//! the Fujisaki-Okamoto transform that turns a PKE into a CCA-secure KEM.
//! Decryption has a (very small, but non-zero) failure probability with
//! these parameters; this crate does not try to hide that.
//!
//! ## Quick start
//!
//! ```rust
//! use modlwe_pke::Pke;
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pke = Pke::with_defaults();
//!
//! let (pk, sk) = pke.generate_keys(&mut OsRng)?;
//! let ciphertext = pke.encrypt(b"attack at dawn", &pk, &mut OsRng)?;
//! let message = pke.decrypt(&ciphertext, &sk)?;
//!
//! assert_eq!(&message[..14], b"attack at dawn");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`sampler`]: the uniform-integer sampling boundary (wide `[0, q)` and
//!   centered `[-eta, eta]`), generic over any `rand::RngCore`.
//! - [`matrix`]: the polynomial-matrix algebra engine — construction,
//!   add/sub/multiply/transpose in `Z_q[x]/(x^n + 1)`.
//! - [`freq`]: the alternate frequency-domain polynomial multiplier.
//! - [`codec`]: encoding a byte message into a ring element and back.
//! - [`pke`]: the protocol itself — [`Pke`], [`PkeParams`], [`PublicKey`],
//!   [`PrivateKey`], [`Ciphertext`].
//! - [`errors`]: the [`Error`] enum shared across all of the above.

pub mod codec;
pub mod errors;
pub mod freq;
pub mod matrix;
pub mod pke;
pub mod sampler;

pub use errors::Error;
pub use matrix::{MulBackend, Operand, PolyMatrix};
pub use pke::{Ciphertext, Pke, PkeParams, PrivateKey, PublicKey};
