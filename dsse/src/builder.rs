use log::warn;
use serde::Serialize;

use crate::{
    crypto::{Signature, Signer},
    envelope::Envelope,
    error::{Error, Result},
};

/// A builder API for envelopes
#[derive(Clone, Debug, Default)]
pub struct EnvelopeBuilder {
    payload: Option<Vec<u8>>,
    payload_type: Option<String>,
    signatures: Vec<Signature>,
    payload_error: Option<String>,
}

impl EnvelopeBuilder {
    /// The content type tag that signers commit to alongside the payload.
    pub fn with_payload_type(mut self, payload_type: &str) -> Self {
        self.payload_type = Some(String::from(payload_type));
        self
    }

    /// Use these exact bytes as the payload.
    pub fn with_payload(mut self, payload: &[u8]) -> Self {
        self.payload = Some(payload.to_vec());
        self.payload_error = None;
        self
    }

    /// Serialize a value to JSON and use that as the payload.
    pub fn with_json_payload<T: Serialize>(mut self, payload: &T) -> Self {
        match serde_json::to_vec(payload) {
            Ok(bytes) => {
                self.payload = Some(bytes);
                self.payload_error = None;
            }
            Err(error) => {
                warn!("Could not serialize envelope payload: {}", error);
                self.payload = None;
                self.payload_error = Some(error.to_string());
            }
        }
        self
    }

    /// Carry over a signature that was produced elsewhere. It is kept as is
    /// and only checked when the envelope is verified.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn build(self) -> Result<Envelope> {
        match self.payload_type {
            Some(payload_type) => match self.payload {
                Some(payload) => Ok(Envelope::new(payload, payload_type, self.signatures)),
                None => match self.payload_error {
                    Some(error) => Err(Error::invalid_argument(format!(
                        "Payload could not be serialized: {error}"
                    ))),
                    None => Err(Error::invalid_argument("Missing payload")),
                },
            },
            None => Err(Error::invalid_argument("Missing payload type")),
        }
    }

    /// Build the envelope and sign it once with each of the given signers, in
    /// order.
    pub fn build_signed<S>(self, signers: &[S]) -> anyhow::Result<Envelope>
    where
        S: Signer,
    {
        let mut envelope = self.build()?;

        for signer in signers {
            envelope.sign(signer)?;
        }

        Ok(envelope)
    }
}
