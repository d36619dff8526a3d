//! # Wire Decoding
//!
//! JSON submission -> `CandidateUpdate`. Key and signature are hex strings;
//! their decoded lengths are left for the verifier. Server-assigned fields
//! (`id`, `timestamp`) are ignored if a client sends them.

use serde::Deserialize;
use shared_types::{CandidateUpdate, IngestError};

const INVALID_PAYLOAD: &str = "Invalid request payload";

#[derive(Deserialize)]
struct WireUpdate {
    body: String,
    #[serde(default)]
    link: Option<String>,
    pubkey: String,
    signature: String,
}

/// Decode one submission.
pub fn decode_candidate(raw: &[u8]) -> Result<CandidateUpdate, IngestError> {
    let wire: WireUpdate =
        serde_json::from_slice(raw).map_err(|_| IngestError::bad_format(INVALID_PAYLOAD))?;
    let pubkey = hex::decode(&wire.pubkey).map_err(|_| IngestError::bad_format(INVALID_PAYLOAD))?;
    let signature =
        hex::decode(&wire.signature).map_err(|_| IngestError::bad_format(INVALID_PAYLOAD))?;

    Ok(CandidateUpdate {
        body: wire.body,
        link: wire.link,
        pubkey,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ErrorKind;

    #[test]
    fn test_decode_minimal() {
        let raw = format!(
            r#"{{"body":"hi","pubkey":"{}","signature":"{}"}}"#,
            "ab".repeat(32),
            "cd".repeat(64)
        );
        let candidate = decode_candidate(raw.as_bytes()).unwrap();
        assert_eq!(candidate.body, "hi");
        assert_eq!(candidate.link, None);
        assert_eq!(candidate.pubkey, vec![0xAB; 32]);
        assert_eq!(candidate.signature, vec![0xCD; 64]);
    }

    #[test]
    fn test_server_fields_ignored() {
        let raw = format!(
            r#"{{"id":99,"timestamp":5,"body":"hi","link":"l","pubkey":"{}","signature":"{}"}}"#,
            "ab".repeat(32),
            "cd".repeat(64)
        );
        let candidate = decode_candidate(raw.as_bytes()).unwrap();
        assert_eq!(candidate.link.as_deref(), Some("l"));
    }

    #[test]
    fn test_wrong_lengths_pass_decoding() {
        let raw = r#"{"body":"hi","pubkey":"abcd","signature":"00"}"#;
        let candidate = decode_candidate(raw.as_bytes()).unwrap();
        assert_eq!(candidate.pubkey.len(), 2);
    }

    #[test]
    fn test_malformed_inputs_are_bad_format() {
        for raw in [
            "not json",
            r#"{"pubkey":"ab","signature":"cd"}"#,
            r#"{"body":"hi","pubkey":"zz","signature":"cd"}"#,
            r#"{"body":"hi","pubkey":"ab","signature":"abc"}"#,
            r#"{"body":1,"pubkey":"ab","signature":"cd"}"#,
        ] {
            let err = decode_candidate(raw.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadFormat, "input: {raw}");
        }
    }
}
