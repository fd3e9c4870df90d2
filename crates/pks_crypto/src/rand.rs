//! CSPRNG helpers.

use rand::RngCore;

/// `len` bytes from the OS CSPRNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Hex of 32 random bytes — the format of client and device ids.
pub fn random_hex32() -> String {
    hex::encode(random_bytes(32))
}

/// A fresh 32-byte master seed.
pub fn random_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut seed);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_hex32_is_64_nibbles() {
        let id = random_hex32();
        assert_eq!(id.len(), 64);
        assert!(id.bytes().all(|b| b.is_ascii_hexdigit()));
    }
}
