// src/error.rs
//
// Error taxonomy for the hashing core. Everything surfaces synchronously
// through these variants; the library itself never logs and never retries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HashError>;

#[derive(Error, Debug)]
pub enum HashError {
    /// Malformed or zero-sized pixel input.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    /// Hash size outside the supported range.
    #[error("invalid hash config: {reason}")]
    InvalidConfig { reason: String },

    /// Hamming distance between vectors of different bit lengths.
    #[error("hash length mismatch: {left} vs {right} bits")]
    LengthMismatch { left: usize, right: usize },

    /// Hex digest that does not parse back into a hash.
    #[error("invalid hex digest: {reason}")]
    InvalidHex { reason: String },
}
