//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate a random 32-byte secret
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Encode bytes as URL-safe base64 without padding (cookie-safe)
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe base64 without padding
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

/// HMAC-SHA256 signature of `data`, URL-safe base64 encoded
pub fn sign(secret: &[u8; 32], data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(data);
    to_base64url(&mac.finalize().into_bytes())
}

/// Verify a signature produced by [`sign`] in constant time
pub fn verify_signature(secret: &[u8; 32], data: &[u8], signature_b64: &str) -> bool {
    let Ok(signature) = from_base64url(signature_b64) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(data);
    mac.verify_slice(&signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret() {
        let secret = random_secret();
        assert!(secret.iter().any(|&b| b != 0));
        assert_ne!(secret, random_secret());
    }

    #[test]
    fn test_base64url_is_cookie_safe() {
        let encoded = to_base64url(&[0xfb, 0xff, 0xfe]);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
        assert_eq!(from_base64url(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe]);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = [42u8; 32];
        let sig = sign(&key, b"session-id");
        assert!(verify_signature(&key, b"session-id", &sig));
        assert!(!verify_signature(&key, b"other-id", &sig));
        assert!(!verify_signature(&[43u8; 32], b"session-id", &sig));
        assert!(!verify_signature(&key, b"session-id", "not base64!"));
    }
}
