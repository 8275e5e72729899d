//! Base64 encoding for image payloads inside JSON drafts.
//!
//! Browser-made drafts store images as `data:` URLs, so the prefix is
//! accepted and stripped on the way in.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serializer, de};

pub fn serialize<S>(data: &Bytes, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(data))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    decode(&encoded).map_err(de::Error::custom)
}

pub(crate) fn decode(encoded: &str) -> std::result::Result<Bytes, base64::DecodeError> {
    let body = match encoded.split_once(";base64,") {
        Some((prefix, body)) if prefix.starts_with("data:") => body,
        _ => encoded,
    };
    STANDARD.decode(body.trim()).map(Bytes::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_and_data_url() {
        assert_eq!(decode("aGk=").unwrap(), Bytes::from_static(b"hi"));
        assert_eq!(
            decode("data:image/png;base64,aGk=").unwrap(),
            Bytes::from_static(b"hi")
        );
    }
}
