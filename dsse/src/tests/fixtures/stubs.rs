use std::cell::Cell;

use anyhow::anyhow;

use crate::crypto::{Key, KeyError, Signature, Signer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
    Break,
}

/// A key that hands out a fixed verdict and records how often it was asked
pub struct CountingKey {
    keyid: String,
    verdict: Verdict,
    calls: Cell<usize>,
}

impl CountingKey {
    pub fn new(keyid: &str, verdict: Verdict) -> Self {
        CountingKey {
            keyid: keyid.into(),
            verdict,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Key for CountingKey {
    fn keyid(&self) -> &str {
        &self.keyid
    }

    fn verify_signature(&self, _signature: &Signature, _message: &[u8]) -> Result<(), KeyError> {
        self.calls.set(self.calls.get() + 1);

        match self.verdict {
            Verdict::Accept => Ok(()),
            Verdict::Reject => Err(KeyError::invalid(&self.keyid)),
            Verdict::Break => Err(KeyError::failure(&self.keyid, anyhow!("HSM unreachable"))),
        }
    }
}

/// Produces a signature carrying the given keyid whose value is meaningless
pub struct StubSigner(pub &'static str);

impl Signer for StubSigner {
    fn sign(&self, message: &[u8]) -> anyhow::Result<Signature> {
        Ok(Signature::new(self.0, message.len().to_be_bytes().to_vec()))
    }
}

pub struct FailingSigner;

impl Signer for FailingSigner {
    fn sign(&self, _message: &[u8]) -> anyhow::Result<Signature> {
        Err(anyhow!("No private key; cannot sign data"))
    }
}
