use std::marker::PhantomData;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serializer};

use crate::error::Error;

/// Encode bytes with the standard (padded) base64 alphabet used on the wire
pub fn b64_encode<T: AsRef<[u8]>>(bytes: T) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard (padded) base64 as found on the wire
pub fn b64_decode<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}

/// Field helper to carry raw bytes as a standard base64 string, for use with
/// `#[serde(with = "dsse::serde::base64_standard")]`
pub mod base64_standard {
    use super::*;

    pub fn serialize<T, S>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&b64_encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        b64_decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// A capability that turns raw payload bytes into a structured value of type
/// `T`. Errors are handed back to the caller untouched.
pub trait PayloadDeserializer<T> {
    type Error;

    fn deserialize(&self, payload: &[u8]) -> Result<T, Self::Error>;
}

/// The default payload deserializer: the payload is parsed as JSON into any
/// `serde` deserializable type
pub struct JsonDeserializer<T>(PhantomData<fn() -> T>);

impl<T> Default for JsonDeserializer<T> {
    fn default() -> Self {
        JsonDeserializer(PhantomData)
    }
}

impl<T> PayloadDeserializer<T> for JsonDeserializer<T>
where
    T: DeserializeOwned,
{
    type Error = Error;

    fn deserialize(&self, payload: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(payload).map_err(Error::Deserialization)
    }
}

impl<T, F, E> PayloadDeserializer<T> for F
where
    F: Fn(&[u8]) -> Result<T, E>,
{
    type Error = E;

    fn deserialize(&self, payload: &[u8]) -> Result<T, Self::Error> {
        self(payload)
    }
}
