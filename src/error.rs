//! Error types for prefix-code construction and decoding.

use thiserror::Error;

/// Which rule an ambiguous insertion broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// The codeword already ends on a node labeled with a different symbol.
    Relabel,
    /// The codeword is a strict prefix of a codeword already in the trie.
    PrefixOfExisting,
    /// A codeword already in the trie is a strict prefix of this one.
    ExtendsExisting,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Conflict::Relabel => "codeword already assigned to another symbol",
            Conflict::PrefixOfExisting => "codeword is a prefix of an existing codeword",
            Conflict::ExtendsExisting => "an existing codeword is a prefix of this codeword",
        };
        f.write_str(s)
    }
}

/// Error variants for prefix-code operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A codeword must contain at least one bit.
    #[error("invalid codeword: empty bit sequence")]
    InvalidCodeword,

    /// A bit value other than 0 or 1 was supplied.
    #[error("invalid bit {bit} at position {position}")]
    InvalidBit {
        /// Index of the offending bit.
        position: usize,
        /// The value found there.
        bit: u8,
    },

    /// The requested bit count exceeds what the buffer holds.
    #[error("bit count {requested} out of range: buffer holds {available} bits")]
    OutOfRange {
        /// Bits asked for.
        requested: usize,
        /// `8 * buffer.len()`.
        available: usize,
    },

    /// The codebook is not prefix-free.
    #[error("ambiguous codebook at {codeword:?}: {conflict}")]
    AmbiguousCodebook {
        /// The codeword whose insertion was rejected.
        codeword: Vec<u8>,
        /// What it collided with.
        conflict: Conflict,
    },

    /// Encoding met a symbol the codebook does not contain.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Provided probability is outside `(0, 1]` or non-finite.
    #[error("invalid probability: {0}")]
    InvalidProbability(f64),

    /// A distribution parameter is out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The outcome lies outside the distribution's support.
    #[error("outcome {n} outside support [{min}, {max}]")]
    OutOfSupport {
        /// The outcome asked for.
        n: u64,
        /// Smallest supported outcome.
        min: u64,
        /// Largest supported outcome.
        max: u64,
    },
}

/// A specialized Result type for prefix-code operations.
pub type Result<T> = std::result::Result<T, Error>;
