//! Signed one-shot flash messages
//!
//! A form submission that fails early (empty input, missing artifacts)
//! redirects back to the form. The message to show after the redirect
//! travels in a cookie whose value is
//!
//! ```text
//! base64url(JSON messages) "." base64url(HMAC-SHA256(secret, payload))
//! ```
//!
//! # Pure Functions
//!
//! No HTTP framework dependencies. Cookie handling lives in the web crate.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying flash messages
pub const FLASH_COOKIE: &str = "jobscreen_flash";

/// Severity of a flash message, used as its CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Warning,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Warning => "warning",
            FlashLevel::Error => "error",
        }
    }
}

/// A single user-visible message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

fn mac(payload: &str, secret: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    Some(mac)
}

/// HMAC-SHA256 tag of `payload`, base64url without padding
fn sign(payload: &str, secret: &str) -> Option<String> {
    mac(payload, secret).map(|m| URL_SAFE_NO_PAD.encode(m.finalize().into_bytes()))
}

/// Constant-time check of `signature` against the tag of `payload`
fn verify(payload: &str, signature: &str, secret: &str) -> bool {
    match URL_SAFE_NO_PAD.decode(signature) {
        Ok(tag) => mac(payload, secret).is_some_and(|m| m.verify_slice(&tag).is_ok()),
        Err(_) => false,
    }
}

/// Encode messages into a signed cookie value
///
/// # Examples
///
/// ```
/// use jobscreen_common::flash::{decode_flash, encode_flash, FlashMessage};
///
/// let value = encode_flash(&[FlashMessage::warning("hi")], "secret");
/// let decoded = decode_flash(&value, "secret").unwrap();
/// assert_eq!(decoded[0].text, "hi");
/// ```
pub fn encode_flash(messages: &[FlashMessage], secret: &str) -> String {
    // Vec<FlashMessage> of plain strings always serializes
    let json = serde_json::to_vec(messages).unwrap_or_default();
    let payload = URL_SAFE_NO_PAD.encode(json);
    let signature = sign(&payload, secret).unwrap_or_default();
    format!("{}.{}", payload, signature)
}

/// Decode a cookie value produced by [`encode_flash`]
///
/// Returns `None` when the signature does not match or the payload is
/// malformed. A tampered cookie is dropped, never reported.
pub fn decode_flash(value: &str, secret: &str) -> Option<Vec<FlashMessage>> {
    let (payload, signature) = value.rsplit_once('.')?;
    if !verify(payload, signature, secret) {
        tracing::debug!("Discarding flash cookie with invalid signature");
        return None;
    }

    let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_hmac_sha256() {
        // RFC 4231 test case 2
        let tag = sign("what do ya want for nothing?", "Jefe");
        assert_eq!(
            URL_SAFE_NO_PAD.decode(tag.unwrap()).unwrap(),
            [
                0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08,
                0x95, 0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec,
                0x58, 0xb9, 0x64, 0xec, 0x38, 0x43,
            ]
        );
    }

    #[test]
    fn test_truncated_or_undecodable_signature_rejected() {
        let value = encode_flash(&[FlashMessage::warning("x")], "s");
        let (payload, signature) = value.rsplit_once('.').unwrap();
        let truncated = format!("{}.{}", payload, &signature[..signature.len() - 2]);
        assert!(decode_flash(&truncated, "s").is_none());
        let not_base64 = format!("{}.{}", payload, "!!!");
        assert!(decode_flash(&not_base64, "s").is_none());
    }

    #[test]
    fn test_plain_sha256_signature_rejected() {
        use sha2::Digest;
        let payload = URL_SAFE_NO_PAD.encode(br#"[{"level":"warning","text":"x"}]"#);
        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        hasher.update(b"s");
        let forged = format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(hasher.finalize()));
        assert!(decode_flash(&forged, "s").is_none());
    }

    #[test]
    fn test_decode_preserves_order_and_level() {
        let messages = vec![
            FlashMessage::warning("Please paste a job description or provide a job link."),
            FlashMessage::error("Model not found at model/model.json"),
        ];
        let value = encode_flash(&messages, "dev-secret");
        assert_eq!(decode_flash(&value, "dev-secret"), Some(messages));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let value = encode_flash(&[FlashMessage::warning("x")], "one");
        assert!(decode_flash(&value, "two").is_none());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let value = encode_flash(&[FlashMessage::warning("x")], "s");
        let forged_payload = URL_SAFE_NO_PAD.encode(br#"[{"level":"error","text":"forged"}]"#);
        let (_, signature) = value.rsplit_once('.').unwrap();
        let forged = format!("{}.{}", forged_payload, signature);
        assert!(decode_flash(&forged, "s").is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(decode_flash("", "s").is_none());
        assert!(decode_flash("no-dot-here", "s").is_none());
        let bad_json = URL_SAFE_NO_PAD.encode(b"not json");
        let value = format!("{}.{}", bad_json, sign(&bad_json, "s").unwrap());
        assert!(decode_flash(&value, "s").is_none());
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(FlashLevel::Warning.as_str(), "warning");
        assert_eq!(FlashLevel::Error.as_str(), "error");
    }
}
