use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    serde::{b64_decode, b64_encode},
};

pub const KEYID_FIELD: &str = "keyid";
pub const SIG_FIELD: &str = "sig";

/// A detached signature and the keyid of the key that is expected to verify
/// it. Any additional fields found on the wire are carried along untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub keyid: String,
    #[serde(with = "crate::serde::base64_standard")]
    pub sig: Vec<u8>,
    #[serde(flatten)]
    pub unrecognized_fields: BTreeMap<String, Value>,
}

impl Signature {
    pub fn new(keyid: impl Into<String>, sig: Vec<u8>) -> Self {
        Signature {
            keyid: keyid.into(),
            sig,
            unrecognized_fields: BTreeMap::new(),
        }
    }

    /// Check that a wire record has the shape of a signature: an object with a
    /// string `keyid` and a string `sig` holding valid base64
    pub fn check_wire_shape(record: &Value) -> std::result::Result<(), String> {
        let object = record
            .as_object()
            .ok_or_else(|| "signature record is not an object".to_string())?;

        match object.get(KEYID_FIELD) {
            Some(Value::String(_)) => (),
            Some(_) => return Err(format!("\"{KEYID_FIELD}\" is not a string")),
            None => return Err(format!("\"{KEYID_FIELD}\" is missing")),
        };

        match object.get(SIG_FIELD) {
            Some(Value::String(sig)) => {
                b64_decode(sig)
                    .map_err(|error| format!("\"{SIG_FIELD}\" is not base64: {error}"))?;
            }
            Some(_) => return Err(format!("\"{SIG_FIELD}\" is not a string")),
            None => return Err(format!("\"{SIG_FIELD}\" is missing")),
        };

        Ok(())
    }

    /// Parse a wire record that already passed [`Signature::check_wire_shape`]
    pub fn from_wire(record: &Value) -> Result<Self> {
        Signature::check_wire_shape(record).map_err(Error::format)?;
        Ok(serde_json::from_value(record.clone())?)
    }

    pub fn to_wire(&self) -> Value {
        let mut object = Map::new();

        object.insert(KEYID_FIELD.into(), Value::String(self.keyid.clone()));
        object.insert(SIG_FIELD.into(), Value::String(b64_encode(&self.sig)));

        for (name, value) in &self.unrecognized_fields {
            object
                .entry(name.as_str())
                .or_insert_with(|| value.clone());
        }

        Value::Object(object)
    }
}
