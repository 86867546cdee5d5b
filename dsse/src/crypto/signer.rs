use std::{rc::Rc, sync::Arc};

use anyhow::Result;

use super::Signature;

/// This trait must be implemented by a struct that holds (or can reach) the
/// private half of a keypair. It is the minimum capability required to add a
/// signature to an envelope.
///
/// Implementations receive the pre-authentication encoding of the envelope,
/// never the bare payload, and return a [`Signature`] whose `keyid` names the
/// public key that will later verify it.
pub trait Signer {
    /// Sign some data with this key
    fn sign(&self, message: &[u8]) -> Result<Signature>;
}

impl<S> Signer for &S
where
    S: Signer + ?Sized,
{
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        (**self).sign(message)
    }
}

impl<S> Signer for Box<S>
where
    S: Signer + ?Sized,
{
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        (**self).sign(message)
    }
}

impl<S> Signer for Rc<S>
where
    S: Signer + ?Sized,
{
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        (**self).sign(message)
    }
}

impl<S> Signer for Arc<S>
where
    S: Signer + ?Sized,
{
    fn sign(&self, message: &[u8]) -> Result<Signature> {
        (**self).sign(message)
    }
}
