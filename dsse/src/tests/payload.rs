use serde::{Deserialize, Serialize};

use crate::{envelope::Envelope, error::Error, serde::PayloadDeserializer};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Statement {
    #[serde(rename = "_type")]
    kind: String,
    subject: Vec<String>,
}

#[test]
fn it_deserializes_a_json_payload() {
    let envelope = Envelope::new(
        br#"{"_type":"link","subject":["a.tar.gz"]}"#.to_vec(),
        "application/vnd.in-toto+json",
        vec![],
    );

    let statement: Statement = envelope.deserialize_payload().unwrap();

    assert_eq!(
        statement,
        Statement {
            kind: "link".into(),
            subject: vec!["a.tar.gz".into()],
        }
    );
}

#[test]
fn it_fails_when_the_payload_does_not_fit_the_shape() {
    let envelope = Envelope::new(br#"{"_type":"link"}"#.to_vec(), "application/json", vec![]);

    let result = envelope.deserialize_payload::<Statement>();
    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[test]
fn it_fails_when_the_payload_is_not_json() {
    let envelope = Envelope::new(vec![0xff, 0x00], "application/octet-stream", vec![]);

    let result = envelope.deserialize_payload::<serde_json::Value>();
    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[derive(Debug, PartialEq)]
struct NotUtf8;

struct Utf8Deserializer;

impl PayloadDeserializer<String> for Utf8Deserializer {
    type Error = NotUtf8;

    fn deserialize(&self, payload: &[u8]) -> Result<String, Self::Error> {
        String::from_utf8(payload.to_vec()).map_err(|_| NotUtf8)
    }
}

#[test]
fn it_hands_back_custom_deserializer_errors_unchanged() {
    let valid = Envelope::new(b"hello".to_vec(), "text/plain", vec![]);
    let invalid = Envelope::new(vec![0xff], "text/plain", vec![]);

    assert_eq!(
        valid.deserialize_payload_with::<String, _>(&Utf8Deserializer),
        Ok("hello".to_string())
    );
    assert_eq!(invalid.deserialize_payload_with::<String, _>(&Utf8Deserializer), Err(NotUtf8));
}

#[test]
fn it_accepts_closures_as_deserializers() {
    let envelope = Envelope::new(b"3,4".to_vec(), "text/csv", vec![]);

    let parse = |payload: &[u8]| -> Result<Vec<u8>, String> {
        Ok(payload.iter().copied().filter(|byte| *byte != b',').collect())
    };

    assert_eq!(
        envelope.deserialize_payload_with::<Vec<u8>, _>(&parse),
        Ok(vec![b'3', b'4'])
    );
}
