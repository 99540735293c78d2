//! Prefix-code trie.
//!
//! A binary trie whose edges are labeled 0 or 1. Each codeword is a
//! root-to-node path and the node it ends on carries the symbol. Decoding walks
//! the trie one bit at a time and emits a symbol whenever it lands on a labeled
//! node, then starts over from the root.
//!
//! # Resynchronization
//!
//! When the cursor sits partway down a path and the next bit has no branch, the
//! decoder does not fail. It jumps back to the root and matches that same bit
//! from there. A corrupted stream therefore realigns itself instead of aborting.
//! If even the root has no branch for the bit (only possible when the codebook
//! leaves one half of the code space unused) the bit is skipped.

use tracing::{debug, trace, warn};

use crate::bits::extract_bits;
use crate::error::{Conflict, Error, Result};

/// What to do when an insertion would make the codebook ambiguous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Refuse the insertion with `Error::AmbiguousCodebook`.
    #[default]
    Reject,
    /// Log a warning and store the symbol anyway. The later insertion wins, so
    /// the resulting trie depends on insertion order.
    Overwrite,
}

/// A node of the trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode<S> {
    children: [Option<Box<TrieNode<S>>>; 2],
    symbol: Option<S>,
}

impl<S> TrieNode<S> {
    fn empty() -> Self {
        Self {
            children: [None, None],
            symbol: None,
        }
    }

    /// The child reached by `bit`, if any. Bits other than 0/1 have no child.
    pub fn child(&self, bit: u8) -> Option<&TrieNode<S>> {
        self.children.get(bit as usize)?.as_deref()
    }

    /// The symbol stored here, if this node ends a codeword.
    pub fn symbol(&self) -> Option<&S> {
        self.symbol.as_ref()
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(|c| c.count())
            .sum::<usize>()
    }
}

/// Binary trie mapping prefix-free codewords to symbols.
#[derive(Debug, Clone)]
pub struct PrefixCodeTrie<S = String> {
    root: TrieNode<S>,
    policy: ConflictPolicy,
    symbols: usize,
}

impl<S> PrefixCodeTrie<S> {
    /// Create an empty trie that rejects ambiguous codebooks.
    pub fn new() -> Self {
        Self::with_policy(ConflictPolicy::default())
    }

    /// Create an empty trie with an explicit conflict policy.
    pub fn with_policy(policy: ConflictPolicy) -> Self {
        Self {
            root: TrieNode::empty(),
            policy,
            symbols: 0,
        }
    }

    /// The conflict policy in effect.
    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// The root node. It never carries a symbol.
    pub fn root(&self) -> &TrieNode<S> {
        &self.root
    }

    /// Number of labeled nodes.
    pub fn len(&self) -> usize {
        self.symbols
    }

    /// True if no codeword has been inserted.
    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    /// Total node count, root included.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Symbol stored exactly at `codeword`, if any.
    pub fn get(&self, codeword: &[u8]) -> Option<&S> {
        let mut node = &self.root;
        for &bit in codeword {
            node = node.child(bit)?;
        }
        node.symbol()
    }
}

impl<S: PartialEq> PrefixCodeTrie<S> {
    /// Insert `symbol` at the path spelled by `codeword`.
    ///
    /// Missing nodes along the path are created empty. A rejected insertion
    /// leaves the trie untouched.
    ///
    /// # Errors
    /// - `Error::InvalidCodeword` if `codeword` is empty.
    /// - `Error::InvalidBit` if a bit is not 0 or 1.
    /// - `Error::AmbiguousCodebook` if the codebook would stop being
    ///   prefix-free and the policy is `Reject`.
    pub fn insert(&mut self, codeword: &[u8], symbol: S) -> Result<()> {
        validate_codeword(codeword)?;

        if let Some(conflict) = self.find_conflict(codeword, &symbol) {
            match self.policy {
                ConflictPolicy::Reject => {
                    return Err(Error::AmbiguousCodebook {
                        codeword: codeword.to_vec(),
                        conflict,
                    });
                }
                ConflictPolicy::Overwrite => {
                    warn!(?codeword, %conflict, "ambiguous codebook, inserting anyway");
                }
            }
        }

        let mut node = &mut self.root;
        for &bit in codeword {
            node = node.children[bit as usize]
                .get_or_insert_with(|| Box::new(TrieNode::empty()))
                .as_mut();
        }
        if node.symbol.replace(symbol).is_none() {
            self.symbols += 1;
        }
        Ok(())
    }

    fn find_conflict(&self, codeword: &[u8], symbol: &S) -> Option<Conflict> {
        let last = codeword.len() - 1;
        let mut node = &self.root;
        for (i, &bit) in codeword.iter().enumerate() {
            // Off the existing paths: everything below is new.
            node = node.child(bit)?;
            if i < last && node.symbol.is_some() {
                return Some(Conflict::ExtendsExisting);
            }
        }
        match &node.symbol {
            Some(existing) if existing != symbol => Some(Conflict::Relabel),
            Some(_) => None,
            None if !node.is_leaf() => Some(Conflict::PrefixOfExisting),
            None => None,
        }
    }
}

impl<S: Clone> PrefixCodeTrie<S> {
    /// Decode the first `bit_count` bits of `buffer` (MSB first per byte).
    ///
    /// Symbols come back in bitstream order. A partial codeword left over at
    /// the end, such as padding in the last byte, is dropped.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `bit_count > 8 * buffer.len()`.
    pub fn decode(&self, buffer: &[u8], bit_count: usize) -> Result<Vec<S>> {
        let bits = extract_bits(buffer, bit_count)?;
        self.decode_bits(&bits)
    }

    /// Decode an unpacked bit sequence.
    ///
    /// # Errors
    /// Returns `Error::InvalidBit` if a value is not 0 or 1.
    pub fn decode_bits(&self, bits: &[u8]) -> Result<Vec<S>> {
        let mut out = Vec::new();
        let mut curr = &self.root;
        let mut resyncs = 0usize;
        let mut skipped = 0usize;

        for (position, &bit) in bits.iter().enumerate() {
            if bit > 1 {
                return Err(Error::InvalidBit { position, bit });
            }

            let next = match curr.child(bit) {
                Some(next) => next,
                None => {
                    if !std::ptr::eq(curr, &self.root) {
                        resyncs += 1;
                        trace!(position, "no branch, restarting from root");
                        curr = &self.root;
                    }
                    match curr.child(bit) {
                        Some(next) => next,
                        None => {
                            skipped += 1;
                            trace!(position, bit, "root has no branch, skipping bit");
                            continue;
                        }
                    }
                }
            };

            match &next.symbol {
                Some(symbol) => {
                    out.push(symbol.clone());
                    curr = &self.root;
                }
                None => curr = next,
            }
        }

        debug!(
            bits = bits.len(),
            symbols = out.len(),
            resyncs,
            skipped,
            "decoded bitstream"
        );
        Ok(out)
    }
}

impl<S: Clone + AsRef<str>> PrefixCodeTrie<S> {
    /// Decode and concatenate the labels into one string.
    pub fn decode_to_string(&self, buffer: &[u8], bit_count: usize) -> Result<String> {
        Ok(self
            .decode(buffer, bit_count)?
            .iter()
            .map(AsRef::as_ref)
            .collect())
    }
}

impl<S> Default for PrefixCodeTrie<S> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_codeword(codeword: &[u8]) -> Result<()> {
    if codeword.is_empty() {
        return Err(Error::InvalidCodeword);
    }
    if let Some((position, &bit)) = codeword.iter().enumerate().find(|&(_, &b)| b > 1) {
        return Err(Error::InvalidBit { position, bit });
    }
    Ok(())
}
