use prefixcode::{extract_bits, Codebook, ConflictPolicy, Error, PrefixCodeTrie};
use proptest::prelude::*;
use proptest::sample::Index;

/// Grow a complete prefix code by repeatedly splitting a leaf into `leaf0`
/// and `leaf1`.
fn split_code(splits: &[Index]) -> Vec<Vec<u8>> {
    let mut leaves: Vec<Vec<u8>> = vec![Vec::new()];
    for idx in splits {
        let leaf = leaves.swap_remove(idx.index(leaves.len()));
        let mut zero = leaf.clone();
        zero.push(0);
        let mut one = leaf;
        one.push(1);
        leaves.push(zero);
        leaves.push(one);
    }
    leaves
}

/// `(symbol, codeword)` pairs of a prefix-free code, possibly incomplete.
fn prefix_code() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    (
        prop::collection::vec(any::<Index>(), 1..16),
        prop::collection::vec(any::<bool>(), 17),
    )
        .prop_map(|(splits, keep)| {
            let code = split_code(&splits);
            let mut entries: Vec<(String, Vec<u8>)> = code
                .into_iter()
                .enumerate()
                .filter(|(i, _)| *i == 0 || keep[*i])
                .map(|(i, c)| (format!("s{i}"), c))
                .collect();
            entries.sort();
            entries
        })
}

fn build(entries: &[(String, Vec<u8>)]) -> PrefixCodeTrie {
    let mut trie = PrefixCodeTrie::new();
    for (symbol, codeword) in entries {
        trie.insert(codeword, symbol.clone()).unwrap();
    }
    trie
}

proptest! {
    #[test]
    fn prop_roundtrip(
        entries in prefix_code(),
        picks in prop::collection::vec(any::<Index>(), 0..64),
    ) {
        let book = Codebook::from_pairs(entries.iter().cloned()).unwrap();
        let message: Vec<String> = picks
            .iter()
            .map(|i| entries[i.index(entries.len())].0.clone())
            .collect();

        let (bytes, n) = book.encode(&message).unwrap();
        let trie = book.build_trie(ConflictPolicy::Reject).unwrap();
        prop_assert_eq!(trie.decode(&bytes, n).unwrap(), message);
    }

    #[test]
    fn prop_truncation_keeps_whole_codewords(
        entries in prefix_code(),
        picks in prop::collection::vec(any::<Index>(), 1..32),
        cut in any::<Index>(),
    ) {
        let book = Codebook::from_pairs(entries.iter().cloned()).unwrap();
        let message: Vec<String> = picks
            .iter()
            .map(|i| entries[i.index(entries.len())].0.clone())
            .collect();
        let (bytes, n) = book.encode(&message).unwrap();
        let cut = cut.index(n + 1);

        let mut expected = Vec::new();
        let mut end = 0;
        for symbol in &message {
            end += book.get(symbol).unwrap().len();
            if end > cut {
                break;
            }
            expected.push(symbol.clone());
        }

        let trie = build(&entries);
        prop_assert_eq!(trie.decode(&bytes, cut).unwrap(), expected);
    }

    #[test]
    fn prop_insertion_order_is_irrelevant(
        (entries, shuffled) in prefix_code()
            .prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle())),
        bits in prop::collection::vec(0u8..2, 0..128),
    ) {
        let a = build(&entries);
        let b = build(&shuffled);
        prop_assert_eq!(a.node_count(), b.node_count());
        prop_assert_eq!(a.decode_bits(&bits).unwrap(), b.decode_bits(&bits).unwrap());
    }

    #[test]
    fn prop_arbitrary_bits_always_decode(
        entries in prefix_code(),
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        extra in 0usize..16,
    ) {
        let trie = build(&entries);
        let available = bytes.len() * 8;
        let out = trie.decode(&bytes, available).unwrap();
        prop_assert!(out.len() <= available);

        let too_many = available + 1 + extra;
        let is_out_of_range = matches!(
            trie.decode(&bytes, too_many),
            Err(Error::OutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn prop_extract_is_prefix_of_full(
        bytes in prop::collection::vec(any::<u8>(), 1..16),
        cut in any::<Index>(),
    ) {
        let full = extract_bits(&bytes, bytes.len() * 8).unwrap();
        let cut = cut.index(full.len() + 1);
        prop_assert_eq!(extract_bits(&bytes, cut).unwrap(), full[..cut].to_vec());
    }
}

#[test]
fn test_sample_codebook_scenario() {
    let book = Codebook::from_pairs(
        [
            ("x1", vec![0]),
            ("x2", vec![1, 0, 0]),
            ("x3", vec![1, 0, 1]),
            ("x4", vec![1, 1]),
        ]
        .map(|(s, c)| (s.to_string(), c)),
    )
    .unwrap();
    let trie = book.build_trie(ConflictPolicy::Reject).unwrap();

    let bits = extract_bits(&[0xD2, 0x9F, 0x20], 21).unwrap();
    assert_eq!(trie.decode_bits(&bits).unwrap(), trie.decode(&[0xD2, 0x9F, 0x20], 21).unwrap());
    assert_eq!(
        trie.decode_to_string(&[0xD2, 0x9F, 0x20], 21).unwrap(),
        "x4x1x2x3x1x1x4x4x2x2"
    );
}

#[test]
fn test_shared_trie_across_threads() {
    let book = Codebook::from_pairs(
        [("a", vec![0]), ("b", vec![1, 0]), ("c", vec![1, 1])].map(|(s, c)| (s.to_string(), c)),
    )
    .unwrap();
    let trie = std::sync::Arc::new(book.build_trie(ConflictPolicy::Reject).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let trie = std::sync::Arc::clone(&trie);
            std::thread::spawn(move || trie.decode(&[0b0101_1000], 5).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), vec!["a", "b", "c"]);
    }
}
