// Rust guideline compliant 2026-08-02

//! Demo adapter for the `LinkShortener` port.
//!
//! Returns the URL unchanged and always succeeds. `ShortenError::Failed` is
//! unreachable in this demo adapter; the fallback path is exercised with
//! failing mocks in the `messages` crate tests.

use domain::{LinkShortener, ShortenError};

/// `LinkShortener` adapter that passes the URL through untouched.
#[derive(Debug)]
pub struct IdentityShortener;

impl IdentityShortener {
    /// Create a new identity shortener.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentityShortener {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkShortener for IdentityShortener {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        tracing::debug!("identity_shortener.pass_through: len={}", url.len());
        Ok(url.to_owned())
    }
}
