//! Dead Simple Signing Envelopes.
//!
//! An [`Envelope`] binds an opaque payload to a declared payload type and a
//! list of detached signatures. Signatures are always computed over the
//! pre-authentication encoding ([`pae`]) of the type and payload, never over
//! the raw payload, so a signature made for one payload type cannot be
//! replayed against another.
//!
//! The cryptography itself lives behind the [`crypto::Signer`] and
//! [`crypto::Key`] traits; see the `dsse-key-support` crate for Ed25519 and
//! RSA implementations.
//!
//! ```
//! use dsse::{EnvelopeBuilder, Key, KeyError, Signature, Signer};
//!
//! // A toy scheme: the "signature" is a keyed checksum of the message
//! struct Checksum {
//!     keyid: &'static str,
//!     secret: u8,
//! }
//!
//! impl Checksum {
//!     fn digest(&self, message: &[u8]) -> Vec<u8> {
//!         vec![message.iter().fold(self.secret, |acc, byte| acc.wrapping_add(*byte))]
//!     }
//! }
//!
//! impl Signer for Checksum {
//!     fn sign(&self, message: &[u8]) -> anyhow::Result<Signature> {
//!         Ok(Signature::new(self.keyid, self.digest(message)))
//!     }
//! }
//!
//! impl Key for Checksum {
//!     fn keyid(&self) -> &str {
//!         self.keyid
//!     }
//!
//!     fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
//!         match signature.sig == self.digest(message) {
//!             true => Ok(()),
//!             false => Err(KeyError::invalid(self.keyid)),
//!         }
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let alice = Checksum { keyid: "alice", secret: 7 };
//! let bob = Checksum { keyid: "bob", secret: 42 };
//!
//! let mut envelope = EnvelopeBuilder::default()
//!     .with_payload_type("application/vnd.in-toto+json")
//!     .with_json_payload(&serde_json::json!({ "_type": "statement" }))
//!     .build()?;
//!
//! envelope.sign(&alice)?;
//! envelope.sign(&bob)?;
//!
//! let keys = [&alice, &bob];
//! let accepted = envelope.verify(&keys, 2)?;
//! assert_eq!(accepted.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod serde;

pub use builder::EnvelopeBuilder;
pub use crypto::{Key, KeyError, Signature, Signer};
pub use envelope::{pae, Envelope, PAE_PREFIX};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
