#![no_main]
use libfuzzer_sys::fuzz_target;
use prefixcode::{Codebook, ConflictPolicy};

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (message_bytes, noise) = data;

    // Fixed complete code over 4 symbols.
    let mut book = Codebook::new();
    book.insert(0u8, vec![0]).unwrap();
    book.insert(1u8, vec![1, 0, 0]).unwrap();
    book.insert(2u8, vec![1, 0, 1]).unwrap();
    book.insert(3u8, vec![1, 1]).unwrap();
    let trie = book.build_trie(ConflictPolicy::Reject).unwrap();

    let message: Vec<u8> = message_bytes.iter().map(|b| b % 4).collect();
    let (bytes, n) = book.encode(&message).unwrap();
    assert_eq!(trie.decode(&bytes, n).unwrap(), message);

    // Arbitrary input must decode without error and never yield more
    // symbols than bits.
    let out = trie.decode(&noise, noise.len() * 8).unwrap();
    assert!(out.len() <= noise.len() * 8);
});
