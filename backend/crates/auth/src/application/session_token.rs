//! Session Token
//!
//! The opaque handle handed to clients: `<session-uuid>.<hmac-signature>`.
//! The signature rejects forged or tampered handles before any store
//! lookup; resolution still requires the server-side session entry, so this
//! is not stateless token auth.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Issue a signed handle for a session ID
pub fn issue(session_id: Uuid, secret: &[u8]) -> String {
    let session_id = session_id.to_string();

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a handle and extract the session ID
///
/// Returns `None` for any malformed, forged or tampered handle.
pub fn parse(token: &str, secret: &[u8]) -> Option<Uuid> {
    let (session_id, signature_b64) = token.split_once('.')?;

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    mac.verify_slice(&signature).ok()?;

    session_id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_issue_parse_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = issue(session_id, SECRET);
        assert_eq!(parse(&token, SECRET), Some(session_id));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue(Uuid::new_v4(), SECRET);

        // Flip the session id portion
        let other = Uuid::new_v4();
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", other, sig);
        assert_eq!(parse(&forged, SECRET), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let session_id = Uuid::new_v4();
        let token = issue(session_id, SECRET);
        assert_eq!(parse(&token, b"another-secret-another-secret-xx"), None);
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(parse("", SECRET), None);
        assert_eq!(parse("no-dot-here", SECRET), None);
        assert_eq!(parse("a.b.c", SECRET), None);
        assert_eq!(parse("not-a-uuid.!!!", SECRET), None);
    }
}
