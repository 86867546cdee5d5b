use anyhow::{anyhow, Result};
use dsse::{Key, KeyError, Signature, Signer};
use rsa::{
    pkcs1::{FromRsaPublicKey, ToRsaPublicKey},
    Hash, PaddingScheme, PublicKey, RsaPrivateKey, RsaPublicKey,
};
use sha2::{Digest, Sha256};

use crate::keyid_from_public_key;

pub const RSA_SCHEME: &str = "rsa-pkcs1v15-sha256";

/// Reconstruct a verify-only key from a PKCS#1 DER encoded public key
pub fn bytes_to_rsa_key(bytes: &[u8]) -> Result<RsaKeyMaterial> {
    let public_key = RsaPublicKey::from_pkcs1_der(bytes)?;
    RsaKeyMaterial::new(public_key, None)
}

fn padding() -> PaddingScheme {
    PaddingScheme::PKCS1v15Sign {
        hash: Some(Hash::SHA2_256),
    }
}

#[derive(Clone)]
pub struct RsaKeyMaterial {
    keyid: String,
    public_key: RsaPublicKey,
    private_key: Option<RsaPrivateKey>,
}

impl RsaKeyMaterial {
    /// The keyid defaults to [`keyid_from_public_key`] of the PKCS#1 DER
    /// encoding of the public key
    pub fn new(public_key: RsaPublicKey, private_key: Option<RsaPrivateKey>) -> Result<Self> {
        let document = public_key.to_pkcs1_der()?;

        Ok(RsaKeyMaterial {
            keyid: keyid_from_public_key(document.as_der()),
            public_key,
            private_key,
        })
    }

    pub fn from_private_key(private_key: RsaPrivateKey) -> Result<Self> {
        RsaKeyMaterial::new(RsaPublicKey::from(&private_key), Some(private_key))
    }

    /// Use a caller chosen keyid instead of the derived one
    pub fn with_keyid(mut self, keyid: &str) -> Self {
        self.keyid = keyid.into();
        self
    }

    /// A copy of this key without its private half
    pub fn public_key_material(&self) -> Self {
        RsaKeyMaterial {
            keyid: self.keyid.clone(),
            public_key: self.public_key.clone(),
            private_key: None,
        }
    }

    /// PKCS#1 DER encoding of the public key
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.public_key.to_pkcs1_der()?.as_der().to_vec())
    }
}

impl Signer for RsaKeyMaterial {
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        let hashed = Sha256::digest(message);

        match &self.private_key {
            Some(private_key) => {
                let signature = private_key.sign(padding(), hashed.as_ref())?;
                info!("Signed with {} key {}", RSA_SCHEME, self.keyid);
                Ok(Signature::new(self.keyid.clone(), signature))
            }
            None => Err(anyhow!("No private key; cannot sign data")),
        }
    }
}

impl Key for RsaKeyMaterial {
    fn keyid(&self) -> &str {
        &self.keyid
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        let hashed = Sha256::digest(message);

        self.public_key
            .verify(padding(), hashed.as_ref(), &signature.sig)
            .map_err(|error| {
                debug!("{} key {} rejected signature: {}", RSA_SCHEME, self.keyid, error);
                KeyError::invalid(&self.keyid)
            })
    }
}
