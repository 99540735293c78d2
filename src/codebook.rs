//! Codebooks: the symbol → codeword mapping a trie is built from.
//!
//! Building code lengths (Huffman, package-merge, ...) is left to the caller; a
//! codebook only stores codewords it is handed.

use std::collections::HashMap;
use std::hash::Hash;

use crate::bits::BitWriter;
use crate::error::{Error, Result};
use crate::trie::{validate_codeword, ConflictPolicy, PrefixCodeTrie};

/// Ordered mapping from symbol to codeword.
///
/// Entries keep insertion order, which is the order `build_trie` inserts them.
#[derive(Debug, Clone)]
pub struct Codebook<S = String> {
    entries: Vec<(S, Vec<u8>)>,
    index: HashMap<S, usize>,
}

impl<S: Clone + Eq + Hash> Codebook<S> {
    /// Create an empty codebook.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Assign `codeword` to `symbol`, replacing any earlier codeword for it.
    ///
    /// # Errors
    /// `Error::InvalidCodeword` or `Error::InvalidBit` for a malformed codeword.
    pub fn insert(&mut self, symbol: S, codeword: Vec<u8>) -> Result<()> {
        validate_codeword(&codeword)?;
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 = codeword,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, codeword));
            }
        }
        Ok(())
    }

    /// Build a codebook from `(symbol, codeword)` pairs.
    ///
    /// # Errors
    /// Fails on the first malformed codeword.
    pub fn from_pairs<I: IntoIterator<Item = (S, Vec<u8>)>>(pairs: I) -> Result<Self> {
        let mut book = Self::new();
        for (symbol, codeword) in pairs {
            book.insert(symbol, codeword)?;
        }
        Ok(book)
    }

    /// Codeword of `symbol`.
    pub fn get(&self, symbol: &S) -> Option<&[u8]> {
        self.index
            .get(symbol)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[u8])> {
        self.entries.iter().map(|(s, c)| (s, c.as_slice()))
    }

    /// Kraft sum `Σ 2^-len`. At most 1 for any prefix-free code, exactly 1
    /// when the code is complete.
    pub fn kraft_sum(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, c)| 2f64.powi(-(c.len() as i32)))
            .sum()
    }

    /// Insert every entry into a fresh trie.
    ///
    /// # Errors
    /// `Error::AmbiguousCodebook` if the code is not prefix-free and `policy`
    /// is `Reject`.
    pub fn build_trie(&self, policy: ConflictPolicy) -> Result<PrefixCodeTrie<S>> {
        let mut trie = PrefixCodeTrie::with_policy(policy);
        for (symbol, codeword) in &self.entries {
            trie.insert(codeword, symbol.clone())?;
        }
        Ok(trie)
    }
}

impl<S: Clone + Eq + Hash + std::fmt::Debug> Codebook<S> {
    /// Pack the codewords of `symbols` MSB-first.
    ///
    /// Returns the bytes and the exact number of meaningful bits; the rest of
    /// the last byte is zero padding.
    ///
    /// # Errors
    /// `Error::UnknownSymbol` if a symbol has no codeword.
    pub fn encode(&self, symbols: &[S]) -> Result<(Vec<u8>, usize)> {
        let mut writer = BitWriter::new();
        for symbol in symbols {
            let codeword = self
                .get(symbol)
                .ok_or_else(|| Error::UnknownSymbol(format!("{symbol:?}")))?;
            writer.write_all(codeword);
        }
        Ok(writer.finish())
    }
}

impl<S: Clone + Eq + Hash> Default for Codebook<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a codeword written as a string of `'0'` and `'1'` characters.
///
/// # Errors
/// `Error::InvalidCodeword` if empty, `Error::InvalidBit` on any other character.
pub fn parse_codeword(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::InvalidCodeword);
    }
    text.bytes()
        .enumerate()
        .map(|(position, c)| match c {
            b'0' => Ok(0),
            b'1' => Ok(1),
            other => Err(Error::InvalidBit {
                position,
                bit: other,
            }),
        })
        .collect()
}
