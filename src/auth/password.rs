use sha2::{Digest, Sha512};

/// Digests a plaintext password to the stored form: SHA-512 over the raw
/// bytes, lowercase hex. Deterministic and unsalted — this matches what the
/// existing rows hold, so it cannot change without a migration. Swapping in a
/// salted, memory-hard scheme only has to replace these two functions.
pub fn hash_password(plain: &str) -> String {
    let digest = Sha512::digest(plain.as_bytes());
    hex::encode(digest)
}

pub fn verify_password(plain: &str, stored: &str) -> bool {
    hash_password(plain) == stored
}
