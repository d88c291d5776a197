use sha2::{Digest, Sha256};

/// Bytes of digest kept in cache-busting file names.
const HASH_BYTES: usize = 4;

/// Short lowercase hex content hash used in emitted file names.
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest[..HASH_BYTES]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
