//! One-shot flash messages
//!
//! A flash travels in its own cookie as `<level>.<base64url text>`. The page
//! that displays it also expires the cookie.

use axum::http::HeaderMap;

use crate::cookie::{CookieConfig, extract_cookie};
use crate::crypto::{from_base64url, to_base64url};

pub const FLASH_COOKIE_NAME: &str = "flash";

/// Flash severity, mirrored as a CSS class in rendered pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "success" => Some(FlashLevel::Success),
            "danger" => Some(FlashLevel::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        format!(
            "{}.{}",
            self.level.as_str(),
            to_base64url(self.message.as_bytes())
        )
    }

    fn decode(value: &str) -> Option<Self> {
        let (level, text) = value.split_once('.')?;
        let level = FlashLevel::from_code(level)?;
        let message = String::from_utf8(from_base64url(text).ok()?).ok()?;
        Some(Self { level, message })
    }

    /// Set-Cookie value carrying this flash to the next page
    pub fn to_set_cookie(&self, secure: bool) -> String {
        flash_cookie_config(secure).build_set_cookie(&self.encode())
    }

    /// Read the pending flash, if any. Malformed cookies are ignored.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        extract_cookie(headers, FLASH_COOKIE_NAME).and_then(|v| Self::decode(&v))
    }
}

/// Set-Cookie value that consumes the pending flash
pub fn clear_flash_cookie(secure: bool) -> String {
    flash_cookie_config(secure).build_delete_cookie()
}

fn flash_cookie_config(secure: bool) -> CookieConfig {
    CookieConfig {
        name: FLASH_COOKIE_NAME.to_string(),
        secure,
        max_age_secs: Some(60),
        ..CookieConfig::default()
    }
}
