//! Records configuration

use std::time::Duration;

use crate::domain::listing::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone)]
pub struct RecordsConfig {
    /// Rows per browser listing page
    pub page_size: u32,
    /// Upper bound on a single store call
    pub store_timeout: Duration,
    /// Secure attribute on flash cookies
    pub cookie_secure: bool,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            store_timeout: Duration::from_secs(5),
            cookie_secure: true,
        }
    }
}

impl RecordsConfig {
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }
}
