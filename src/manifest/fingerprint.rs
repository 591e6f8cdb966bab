//! Content fingerprint of a serialized manifest body.

use md5::{Digest, Md5};

/// MD5 of `bytes` as 32 lowercase hex characters.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_known_digest() {
        assert_eq!(fingerprint(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn known_content_digest() {
        assert_eq!(fingerprint(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn digest_is_32_lowercase_hex() {
        let digest = fingerprint(br#"{"publicPath":"/static/","assets":{}}"#);
        assert_eq!(digest.len(), 32);
        assert!(
            digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
