use std::{rc::Rc, sync::Arc};

use thiserror::Error;

use super::Signature;

/// Ways in which a [`Key`] can refuse a signature
#[derive(Error, Debug)]
pub enum KeyError {
    /// The signature does not match the message under this key
    #[error("Failed to verify signature by {keyid}")]
    SignatureInvalid {
        /// Identifier of the key that rejected the signature
        keyid: String,
    },
    /// The key could not run verification at all (unsupported scheme,
    /// unusable key material, unreachable backend, ...)
    #[error("Unknown failure to verify signature by {keyid}: {source}")]
    Failure {
        /// Identifier of the key that failed
        keyid: String,
        /// Whatever the backend reported
        #[source]
        source: anyhow::Error,
    },
}

impl KeyError {
    /// Convenience constructor for a plain mismatch
    pub fn invalid(keyid: &str) -> Self {
        KeyError::SignatureInvalid {
            keyid: keyid.into(),
        }
    }

    /// Convenience constructor for a backend failure
    pub fn failure(keyid: &str, source: impl Into<anyhow::Error>) -> Self {
        KeyError::Failure {
            keyid: keyid.into(),
            source: source.into(),
        }
    }
}

/// This trait must be implemented by a struct that encapsulates the public
/// portion of a keypair. It is the minimum capability required to check a
/// signature found in an envelope.
pub trait Key {
    /// Identifier that signatures produced by the matching private key carry.
    /// Envelope verification pairs signatures with keys by exact equality on
    /// this value.
    fn keyid(&self) -> &str;

    /// Verify the alleged signature over `message` against this key.
    ///
    /// A signature that simply does not match must be reported as
    /// [`KeyError::SignatureInvalid`]; [`KeyError::Failure`] is reserved for
    /// cases where no verdict could be reached.
    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError>;
}

impl<K> Key for &K
where
    K: Key + ?Sized,
{
    fn keyid(&self) -> &str {
        (**self).keyid()
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        (**self).verify_signature(signature, message)
    }
}

impl<K> Key for Box<K>
where
    K: Key + ?Sized,
{
    fn keyid(&self) -> &str {
        (**self).keyid()
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        (**self).verify_signature(signature, message)
    }
}

impl<K> Key for Rc<K>
where
    K: Key + ?Sized,
{
    fn keyid(&self) -> &str {
        (**self).keyid()
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        (**self).verify_signature(signature, message)
    }
}

impl<K> Key for Arc<K>
where
    K: Key + ?Sized,
{
    fn keyid(&self) -> &str {
        (**self).keyid()
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        (**self).verify_signature(signature, message)
    }
}
