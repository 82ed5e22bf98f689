//! Cryptographic helpers

use rand::RngCore;
use rand::rngs::OsRng;

/// Generate `len` cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
