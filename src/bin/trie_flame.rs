use prefixcode::{parse_codeword, Codebook, ConflictPolicy};

fn main() {
    let code = [("x1", "0"), ("x2", "100"), ("x3", "101"), ("x4", "11")];
    let mut book = Codebook::new();
    for (symbol, bits) in code {
        book.insert(symbol.to_string(), parse_codeword(bits).unwrap())
            .unwrap();
    }

    let message = (0..10000)
        .map(|i| code[i % code.len()].0.to_string())
        .collect::<Vec<_>>();
    let (bytes, n) = book.encode(&message).unwrap();
    let trie = book.build_trie(ConflictPolicy::Reject).unwrap();

    for _ in 0..1000 {
        let out = trie.decode(&bytes, n).unwrap();
        assert_eq!(out.len(), message.len());
    }
}
