use anyhow::{anyhow, Result};
use dsse::{Key, KeyError, Signature, Signer};
use ed25519_zebra::{
    Signature as Ed25519Signature, SigningKey as Ed25519PrivateKey,
    VerificationKey as Ed25519PublicKey,
};

use crate::keyid_from_public_key;

pub const ED25519_SCHEME: &str = "ed25519";

/// Reconstruct a verify-only key from 32 raw public key bytes
pub fn bytes_to_ed25519_key(bytes: &[u8]) -> Result<Ed25519KeyMaterial> {
    let public_key = Ed25519PublicKey::try_from(bytes)?;
    Ok(Ed25519KeyMaterial::new(public_key, None))
}

pub struct Ed25519KeyMaterial {
    keyid: String,
    public_key: Ed25519PublicKey,
    private_key: Option<Ed25519PrivateKey>,
}

impl Ed25519KeyMaterial {
    /// The keyid defaults to [`keyid_from_public_key`] of the public key
    pub fn new(public_key: Ed25519PublicKey, private_key: Option<Ed25519PrivateKey>) -> Self {
        Ed25519KeyMaterial {
            keyid: keyid_from_public_key(public_key.as_ref()),
            public_key,
            private_key,
        }
    }

    pub fn from_private_key(private_key: Ed25519PrivateKey) -> Self {
        Ed25519KeyMaterial::new(Ed25519PublicKey::from(&private_key), Some(private_key))
    }

    /// Use a caller chosen keyid instead of the derived one
    pub fn with_keyid(mut self, keyid: &str) -> Self {
        self.keyid = keyid.into();
        self
    }

    /// A copy of this key without its private half
    pub fn public_key_material(&self) -> Self {
        Ed25519KeyMaterial {
            keyid: self.keyid.clone(),
            public_key: self.public_key,
            private_key: None,
        }
    }

    pub fn public_key_bytes(&self) -> &[u8] {
        self.public_key.as_ref()
    }
}

impl Signer for Ed25519KeyMaterial {
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        match &self.private_key {
            Some(private_key) => {
                let bytes: [u8; 64] = private_key.sign(message).into();
                Ok(Signature::new(self.keyid.clone(), bytes.to_vec()))
            }
            None => Err(anyhow!("No private key; cannot sign data")),
        }
    }
}

impl Key for Ed25519KeyMaterial {
    fn keyid(&self) -> &str {
        &self.keyid
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        let signature = match Ed25519Signature::try_from(signature.sig.as_slice()) {
            Ok(signature) => signature,
            Err(error) => {
                debug!("Malformed {} signature for {}: {}", ED25519_SCHEME, self.keyid, error);
                return Err(KeyError::invalid(&self.keyid));
            }
        };

        self.public_key
            .verify(&signature, message)
            .map_err(|_| KeyError::invalid(&self.keyid))
    }
}
