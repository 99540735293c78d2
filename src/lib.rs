//! # Prefix Codes
//!
//! *Decoding variable-length, delimiter-free bitstreams with a binary trie.*
//!
//! ## Intuition First
//!
//! Think of a phone tree: "press 1 for sales, press 2 then 3 for billing". You
//! never need a separator between keypresses because no complete option is the
//! beginning of another. A prefix code works the same way with bits: as soon as
//! the bits read so far spell a whole codeword, you know which symbol it is and
//! start over.
//!
//! A binary trie is exactly that phone tree. Every left edge is a 0, every right
//! edge a 1, and the node a codeword ends on holds its symbol.
//!
//! ## The Problem
//!
//! Fixed-width codes waste bits on frequent symbols. Variable-length codes fix
//! that, but only if the decoder can tell where one codeword ends and the next
//! begins without extra framing. Prefix-freeness is what makes that possible.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Information content -log2 p as the ideal code length
//! 1949  Kraft       Σ 2^-l_i <= 1 characterizes prefix code lengths
//! 1952  Huffman     Optimal prefix codes from symbol frequencies
//! 1959  de la Briandais  Tree-structured string lookup
//! 1960  Fredkin     Names it the "trie"
//! 1996  DEFLATE     Canonical Huffman codes in gzip/zlib/PNG
//! 2015  HPACK       Static prefix code for HTTP/2 header strings
//! ```
//!
//! ## Mathematical Formulation
//!
//! A code is a map `c: S -> {0,1}+`. It is prefix-free when no `c(a)` is a
//! proper prefix of `c(b)`. Every prefix-free code satisfies the Kraft
//! inequality
//!
//! ```text
//! Σ_s 2^-|c(s)| <= 1
//! ```
//!
//! and for a source with probabilities `p_s` the expected length is bounded
//! below by the entropy `H = -Σ p_s log2 p_s` (see [`dist`]).
//!
//! ## Complexity Analysis
//!
//! - **Insert**: `O(|codeword|)`.
//! - **Decode**: `O(bit_count)`. Each bit is looked at once; a failed branch
//!   restarts at the root without rewinding.
//! - **Space**: one node per distinct codeword prefix.
//!
//! ## Failure Modes
//!
//! 1. **Ambiguous codebooks**: if one codeword is a prefix of another, the
//!    longer one can never be decoded. [`ConflictPolicy::Reject`] (the default)
//!    refuses such insertions; [`ConflictPolicy::Overwrite`] logs and accepts.
//! 2. **Corrupted streams**: an unknown path restarts matching at the root, so
//!    decoding realigns itself but may emit wrong symbols around the damage.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`PrefixCodeTrie`]: insertion of pre-built codewords and decoding.
//! - [`Codebook`]: ordered symbol → codeword table, with an encoder.
//! - [`bits`]: MSB-first bit extraction and writing.
//! - [`dist`]: binomial, geometric and negative-binomial models with their
//!   information content and entropy.
//!
//! ```
//! use prefixcode::PrefixCodeTrie;
//!
//! let mut trie = PrefixCodeTrie::new();
//! trie.insert(&[0], "x1".to_string())?;
//! trie.insert(&[1, 0, 0], "x2".to_string())?;
//! trie.insert(&[1, 0, 1], "x3".to_string())?;
//! trie.insert(&[1, 1], "x4".to_string())?;
//!
//! let symbols = trie.decode(&[0xD2, 0x9F, 0x20], 21)?;
//! assert_eq!(symbols[..4], ["x4", "x1", "x2", "x3"]);
//! # Ok::<(), prefixcode::Error>(())
//! ```
//!
//! ## References
//!
//! - Shannon, C. E. (1948). "A Mathematical Theory of Communication."
//! - Kraft, L. G. (1949). "A device for quantizing, grouping, and coding amplitude-modulated pulses."
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod codebook;
pub mod dist;
pub mod error;
pub mod trie;

pub use bits::{extract_bits, BitWriter};
pub use codebook::{parse_codeword, Codebook};
pub use dist::{Binomial, Distribution, Geometric, LnFactorials, NegativeBinomial, MAX_OUTCOME};
pub use error::{Conflict, Error};
pub use trie::{ConflictPolicy, PrefixCodeTrie, TrieNode};
