//! CBOR serialization for persisted DAO state.
//!
//! - CBOR via `ciborium` (NOT JSON): compact, binary-safe
//! - Deterministic output for identical state
//! - Schema evolution through `#[serde(default)]` on added fields

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// CBOR encoding failed.
    #[error("CBOR encoding failed: {0}")]
    Encode(String),

    /// CBOR decoding failed.
    #[error("CBOR decoding failed: {0}")]
    Decode(String),
}

/// Serialize to CBOR bytes.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes)
        .map_err(|e| SerializationError::Encode(format!("{:?}", e)))?;
    Ok(bytes)
}

/// Deserialize from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    ciborium::from_reader(bytes).map_err(|e| SerializationError::Decode(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{NodeAddress, SettingsStore};
    use serde::Deserialize;

    #[test]
    fn test_settings_store_deterministic() {
        let store = SettingsStore::genesis();
        let bytes1 = to_cbor(&store).unwrap();
        let bytes2 = to_cbor(&store).unwrap();
        assert_eq!(bytes1, bytes2);

        let recovered: SettingsStore = from_cbor(&bytes1).unwrap();
        assert_eq!(recovered, store);
    }

    #[test]
    fn test_added_fields_default_on_old_data() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct V1 {
            owner: NodeAddress,
        }

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct V2 {
            owner: NodeAddress,
            #[serde(default)]
            audit_log: Vec<String>,
        }

        let v1 = V1 {
            owner: NodeAddress::new([3; 20]),
        };
        let bytes = to_cbor(&v1).unwrap();

        let v2: V2 = from_cbor(&bytes).unwrap();
        assert_eq!(v2.owner, v1.owner);
        assert!(v2.audit_log.is_empty());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: Result<SettingsStore, _> = from_cbor(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(SerializationError::Decode(_))));
    }
}
