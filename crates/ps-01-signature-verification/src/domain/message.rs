//! # Signed Message Layout

use shared_types::PublicKey;

/// The exact bytes a client signs: `pubkey || body || link`.
///
/// Link bytes are omitted entirely when the link is absent or empty.
pub fn signed_message(pubkey: &PublicKey, body: &str, link: Option<&str>) -> Vec<u8> {
    let link = link.unwrap_or("");
    let mut message = Vec::with_capacity(pubkey.as_bytes().len() + body.len() + link.len());
    message.extend_from_slice(pubkey.as_bytes());
    message.extend_from_slice(body.as_bytes());
    message.extend_from_slice(link.as_bytes());
    message
}
