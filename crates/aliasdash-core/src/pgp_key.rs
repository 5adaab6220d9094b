//! PGP public key file acceptance
//!
//! Dropped or imported key files are accepted by MIME type or extension and
//! truncated before they are placed in the key field.

/// Maximum number of bytes read from a key file.
pub const MAX_KEY_BYTES: usize = 10 * 1024;

const KEY_EXTENSIONS: [&str; 4] = [".asc", ".pub", ".pgp", ".key"];

/// Whether a file looks like a public key.
pub fn is_pgp_key_file(file_name: &str, mime_type: Option<&str>) -> bool {
    mime_type == Some("text/plain") || KEY_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Leading [`MAX_KEY_BYTES`] of a key file, decoded lossily.
pub fn key_prefix(contents: &[u8]) -> String {
    let end = contents.len().min(MAX_KEY_BYTES);
    String::from_utf8_lossy(&contents[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance() {
        assert!(is_pgp_key_file("me.asc", None));
        assert!(is_pgp_key_file("notes", Some("text/plain")));
        assert!(!is_pgp_key_file("photo.png", Some("image/png")));
    }

    #[test]
    fn test_truncation() {
        let big = vec![b'a'; MAX_KEY_BYTES + 10];
        assert_eq!(key_prefix(&big).len(), MAX_KEY_BYTES);
        assert_eq!(key_prefix(b"abc"), "abc");
    }
}
