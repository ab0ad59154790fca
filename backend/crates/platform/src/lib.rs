//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the record service:
//! - Cryptographic utilities (random tokens, HMAC signing, Base64)
//! - Password hashing and verification (Argon2id)
//! - Cookie handling and one-shot flash messages
//! - Minimal HTML page shell for the browser surface

pub mod cookie;
pub mod crypto;
pub mod flash;
pub mod html;
pub mod password;
