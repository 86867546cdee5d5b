use std::{collections::BTreeMap, convert::TryFrom, str::FromStr};

use anyhow::Result as AnyResult;
use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::{
    crypto::{Key, KeyError, Signature, Signer},
    error::{Error, Result},
    serde::{b64_decode, b64_encode, JsonDeserializer, PayloadDeserializer},
};

pub const PAE_PREFIX: &[u8] = b"DSSEv1";

pub const PAYLOAD_FIELD: &str = "payload";
pub const PAYLOAD_TYPE_FIELD: &str = "payloadType";
pub const SIGNATURES_FIELD: &str = "signatures";

/// Pre-authentication encoding of a payload and its type:
///
/// `"DSSEv1" SP len(type) SP type SP len(payload) SP payload`
///
/// Lengths are the decimal ASCII byte lengths of the UTF-8 type and the raw
/// payload. Nothing follows the payload.
pub fn pae(payload_type: &str, payload: &[u8]) -> Vec<u8> {
    let type_length = payload_type.len().to_string();
    let payload_length = payload.len().to_string();

    let mut encoded = Vec::with_capacity(
        PAE_PREFIX.len()
            + type_length.len()
            + payload_type.len()
            + payload_length.len()
            + payload.len()
            + 4,
    );

    encoded.extend_from_slice(PAE_PREFIX);
    encoded.push(b' ');
    encoded.extend_from_slice(type_length.as_bytes());
    encoded.push(b' ');
    encoded.extend_from_slice(payload_type.as_bytes());
    encoded.push(b' ');
    encoded.extend_from_slice(payload_length.as_bytes());
    encoded.push(b' ');
    encoded.extend_from_slice(payload);

    encoded
}

/// A payload, the type it declares, and the signatures made over both
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    payload: Vec<u8>,
    payload_type: String,
    signatures: Vec<Signature>,
}

impl Envelope {
    pub fn new(
        payload: Vec<u8>,
        payload_type: impl Into<String>,
        signatures: Vec<Signature>,
    ) -> Self {
        Envelope {
            payload,
            payload_type: payload_type.into(),
            signatures,
        }
    }

    /// Construct an envelope from its JSON wire representation
    pub fn from_wire(data: &Value) -> Result<Self> {
        if !data.is_object() {
            return Err(Error::format("envelope is not an object"));
        }

        let payload = match required_field(data, PAYLOAD_FIELD)? {
            Value::String(encoded) => b64_decode(encoded)?,
            _ => return Err(Error::format(format!("\"{PAYLOAD_FIELD}\" is not a string"))),
        };

        let payload_type = match required_field(data, PAYLOAD_TYPE_FIELD)? {
            Value::String(payload_type) => payload_type.clone(),
            _ => {
                return Err(Error::format(format!(
                    "\"{PAYLOAD_TYPE_FIELD}\" is not a string"
                )))
            }
        };

        let records = match required_field(data, SIGNATURES_FIELD)? {
            Value::Array(records) => records,
            _ => {
                return Err(Error::format(format!(
                    "\"{SIGNATURES_FIELD}\" is not an array"
                )))
            }
        };

        // The whole list is checked before any single record is parsed
        for (index, record) in records.iter().enumerate() {
            Signature::check_wire_shape(record)
                .map_err(|problem| Error::format(format!("signature {index}: {problem}")))?;
        }

        let signatures = records
            .iter()
            .map(Signature::from_wire)
            .collect::<Result<Vec<_>>>()?;

        Ok(Envelope::new(payload, payload_type, signatures))
    }

    /// The JSON wire representation of this envelope
    pub fn to_wire(&self) -> Value {
        let mut object = Map::new();

        object.insert(PAYLOAD_FIELD.into(), Value::String(b64_encode(&self.payload)));
        object.insert(
            PAYLOAD_TYPE_FIELD.into(),
            Value::String(self.payload_type.clone()),
        );
        object.insert(
            SIGNATURES_FIELD.into(),
            Value::Array(self.signatures.iter().map(Signature::to_wire).collect()),
        );

        Value::Object(object)
    }

    /// Produce the compact JSON text form of the envelope
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    /// Pre-authentication encoding of this envelope's type and payload
    pub fn pae(&self) -> Vec<u8> {
        pae(&self.payload_type, &self.payload)
    }

    /// Sign the envelope and keep the resulting signature. Signing twice with
    /// the same signer yields two signatures.
    pub fn sign<S>(&mut self, signer: &S) -> AnyResult<Signature>
    where
        S: Signer + ?Sized,
    {
        let signature = signer.sign(&self.pae())?;

        debug!("Appending signature by {}", signature.keyid);
        self.signatures.push(signature.clone());

        Ok(signature)
    }

    /// Verify that at least `threshold` distinct keys produced a valid
    /// signature over this envelope.
    ///
    /// Signatures are paired with keys by exact keyid. For each signature the
    /// first matching key that verifies it is credited and no further keys
    /// are tried; a key that rejects the signature is skipped in favour of
    /// the next one with the same keyid. Scanning stops as soon as the
    /// threshold is met.
    ///
    /// Returns the accepted keys by keyid.
    pub fn verify<'k, K>(
        &self,
        keys: &'k [K],
        threshold: usize,
    ) -> Result<BTreeMap<String, &'k K>>
    where
        K: Key,
    {
        if threshold == 0 {
            return Err(Error::invalid_argument("Threshold must be greater than 0"));
        }

        if keys.len() < threshold {
            return Err(Error::invalid_argument(format!(
                "Number of keys ({}) can't be less than threshold ({threshold})",
                keys.len()
            )));
        }

        let pae = self.pae();
        let mut accepted_keys = BTreeMap::new();

        for signature in &self.signatures {
            for key in keys {
                if key.keyid() != signature.keyid {
                    continue;
                }

                match key.verify_signature(signature, &pae) {
                    Ok(()) => {
                        accepted_keys.insert(key.keyid().to_string(), key);
                        break;
                    }
                    Err(KeyError::SignatureInvalid { keyid }) => {
                        debug!("Skipping signature that {keyid} did not verify");
                    }
                    Err(error) => {
                        warn!("Key could not verify signature: {error}");
                        return Err(error.into());
                    }
                }
            }

            if accepted_keys.len() >= threshold {
                debug!("Threshold of {threshold} reached");
                break;
            }
        }

        if accepted_keys.len() < threshold {
            warn!(
                "Only {} of {threshold} required keys verified the envelope",
                accepted_keys.len()
            );
            return Err(Error::VerificationFailed {
                accepted: accepted_keys.len(),
                threshold,
            });
        }

        info!(
            "Envelope verified by {} key(s) with threshold {threshold}",
            accepted_keys.len()
        );

        Ok(accepted_keys)
    }

    /// Parse the payload as JSON into `T`
    pub fn deserialize_payload<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.deserialize_payload_with::<T, _>(&JsonDeserializer::<T>::default())
    }

    /// Parse the payload with a caller supplied deserializer; its errors are
    /// returned as is
    pub fn deserialize_payload_with<T, D>(
        &self,
        deserializer: &D,
    ) -> std::result::Result<T, D::Error>
    where
        D: PayloadDeserializer<T> + ?Sized,
    {
        deserializer.deserialize(&self.payload)
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_type(&self) -> &str {
        &self.payload_type
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }
}

fn required_field<'a>(data: &'a Value, field: &'static str) -> Result<&'a Value> {
    data.get(field).ok_or(Error::MissingField { field })
}

impl TryFrom<&Value> for Envelope {
    type Error = Error;

    fn try_from(data: &Value) -> Result<Self> {
        Envelope::from_wire(data)
    }
}

impl From<&Envelope> for Value {
    fn from(envelope: &Envelope) -> Self {
        envelope.to_wire()
    }
}

/// Deserialize a JSON envelope string reference into an envelope
impl<'a> TryFrom<&'a str> for Envelope {
    type Error = Error;

    fn try_from(envelope: &str) -> Result<Self> {
        Envelope::from_str(envelope)
    }
}

/// Deserialize a JSON envelope string into an envelope
impl TryFrom<String> for Envelope {
    type Error = Error;

    fn try_from(envelope: String) -> Result<Self> {
        Envelope::from_str(envelope.as_str())
    }
}

impl FromStr for Envelope {
    type Err = Error;

    fn from_str(envelope: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(envelope)?;
        Envelope::from_wire(&data)
    }
}
