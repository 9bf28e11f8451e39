//! Kroki payload codec.
//!
//! Kroki addresses a diagram by a GET URL whose last segment is the diagram
//! source, zlib-compressed and URL-safe base64 encoded. This crate converts
//! between source text and that payload.
//!
//! ```
//! let payload = kroki_payload::encode("digraph G {Hello->World}").unwrap();
//! let url = format!("https://kroki.io/graphviz/svg/{payload}");
//!
//! assert_eq!(kroki_payload::decode(&url).unwrap(), "digraph G {Hello->World}");
//! ```

mod decode;
mod encode;
mod error;

pub use decode::{decode, decode_bytes};
pub use encode::{encode, encode_bytes};
pub use error::PayloadError;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn large_source(lines: usize) -> String {
        use std::fmt::Write;

        let mut source = String::from("digraph G {\n");
        for i in 0..lines {
            let _ = writeln!(
                source,
                "  node{i} -> node{} [label=\"edge {i} \u{2192} {}\"];",
                (i * 7919) % 1000,
                i % 13
            );
        }
        source.push_str("}\n");
        source
    }

    #[test]
    fn test_round_trip() {
        let sources = [
            "",
            "A",
            "digraph G {Hello->World}",
            "@startuml\nAlice -> Bob: Authentication Request\nBob --> Alice: Authentication Response\n@enduml\n",
            "graph TD\n  A[\u{65e5}\u{672c}\u{8a9e}] --> B[\u{00e9}t\u{00e9}]\n",
            "  leading and trailing whitespace  \n\n",
        ];

        for source in sources {
            let payload = encode(source).unwrap();
            assert_eq!(decode(&payload).unwrap(), source);
        }
    }

    #[test]
    fn test_round_trip_multi_megabyte() {
        let source = large_source(80_000);
        assert!(source.len() > 3 * 1024 * 1024);

        let payload = encode(&source).unwrap();
        assert!(payload.len() < source.len());
        assert_eq!(decode(&payload).unwrap(), source);
    }

    #[test]
    fn test_url_and_bare_payload_decode_identically() {
        let payload = encode("sequenceDiagram\n  A->>B: hi\n").unwrap();
        let url = format!("https://kroki.io/mermaid/svg/{payload}");

        assert_eq!(decode(&url).unwrap(), decode(&payload).unwrap());
    }

    #[test]
    fn test_round_trip_bytes() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let payload = encode_bytes(&data).unwrap();
        assert_eq!(decode_bytes(&payload).unwrap(), data);
    }
}
