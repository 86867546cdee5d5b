use std::fmt;

use ed25519_zebra::{
    Signature as Ed25519Signature, SigningKey as Ed25519PrivateKey,
    VerificationKey as Ed25519PublicKey,
};

use crate::crypto::{Key, KeyError, Signature, Signer};

pub const ALICE_SEED: [u8; 32] = [0xa1; 32];
pub const BOB_SEED: [u8; 32] = [0xb0; 32];
pub const CAROL_SEED: [u8; 32] = [0xca; 32];
pub const MALLORY_SEED: [u8; 32] = [0x66; 32];

/// An Ed25519 keypair that can both sign and verify, labelled with an
/// arbitrary keyid
pub struct TestKey {
    keyid: String,
    private_key: Ed25519PrivateKey,
    public_key: Ed25519PublicKey,
}

impl TestKey {
    pub fn new(keyid: &str, seed: [u8; 32]) -> Self {
        let private_key = Ed25519PrivateKey::from(seed);
        let public_key = Ed25519PublicKey::from(&private_key);

        TestKey {
            keyid: keyid.into(),
            private_key,
            public_key,
        }
    }
}

impl fmt::Debug for TestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestKey").field("keyid", &self.keyid).finish()
    }
}

impl Signer for TestKey {
    fn sign(&self, message: &[u8]) -> anyhow::Result<Signature> {
        let bytes: [u8; 64] = self.private_key.sign(message).into();
        Ok(Signature::new(self.keyid.clone(), bytes.to_vec()))
    }
}

impl Key for TestKey {
    fn keyid(&self) -> &str {
        &self.keyid
    }

    fn verify_signature(&self, signature: &Signature, message: &[u8]) -> Result<(), KeyError> {
        let signature = Ed25519Signature::try_from(signature.sig.as_slice())
            .map_err(|_| KeyError::invalid(&self.keyid))?;

        self.public_key
            .verify(&signature, message)
            .map_err(|_| KeyError::invalid(&self.keyid))
    }
}

pub struct Identities {
    pub alice: TestKey,
    pub bob: TestKey,
    pub carol: TestKey,
    pub mallory: TestKey,

    /// Mallory's key material presented under Alice's keyid
    pub mallory_as_alice: TestKey,
}

impl Identities {
    pub fn new() -> Self {
        Identities {
            alice: TestKey::new("alice", ALICE_SEED),
            bob: TestKey::new("bob", BOB_SEED),
            carol: TestKey::new("carol", CAROL_SEED),
            mallory: TestKey::new("mallory", MALLORY_SEED),
            mallory_as_alice: TestKey::new("alice", MALLORY_SEED),
        }
    }
}
