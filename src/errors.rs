//! Error kinds raised by misuse of the polynomial-matrix and PKE APIs.
//!
//! Every fallible function in this crate returns a [`Result<_, Error>`];
//! nothing in library code panics.

use std::fmt;

/// The error kinds the core can raise.
///
/// `DecryptionAnomaly` is deliberately absent here: a noise budget overrun
/// is not detected by the core (it has no way to know the original
/// plaintext), so it is never represented as an `Error` variant. It is only
/// observable by comparing `decrypt(encrypt(m))` against `m` at the call
/// site, which is exactly what this crate's round-trip tests do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Dimension mismatch in add/sub/multiply, or unequal operand lengths
    /// in the frequency-domain multiplier.
    ShapeError(String),
    /// An operand to `add` was neither a polynomial matrix nor an integer.
    ///
    /// `PolyMatrix::add` takes `impl Into<Operand>`, and `Operand` only has
    /// `Matrix`/`Scalar` variants, so this is unreachable through the public
    /// API — the type system rejects a wrong-type operand at compile time.
    /// Kept as a variant anyway so this enum's error taxonomy stays complete
    /// if a future operand type is added.
    TypeError(String),
    /// Non-positive dimensions, non-positive `q`/`n`, or an out-of-range
    /// sampling bound at construction time.
    ArgumentError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeError(msg) => write!(f, "shape error: {msg}"),
            Error::TypeError(msg) => write!(f, "type error: {msg}"),
            Error::ArgumentError(msg) => write!(f, "argument error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
