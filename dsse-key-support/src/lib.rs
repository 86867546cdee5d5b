#[macro_use]
extern crate log;

use sha2::{Digest, Sha256};

#[cfg(feature = "ed25519")]
pub mod ed25519;
#[cfg(feature = "rsa_support")]
pub mod rsa;

/// Derive a keyid from the canonical public key bytes of a key: the lowercase
/// hex SHA-256 digest of those bytes.
pub fn keyid_from_public_key(public_key: &[u8]) -> String {
    format!("{:x}", Sha256::digest(public_key))
}
