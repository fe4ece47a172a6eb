//! Vendor account credentials
//!
//! Built once at process start and passed by reference into the gateway;
//! read-only afterwards, so no synchronization is required.

use std::fmt;

use crate::error::{GatewayError, GatewayResult};

/// Vendor account identifier + secret key
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub ukey: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, ukey: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ukey: ukey.into(),
        }
    }

    /// Load from `CLOUDPRINT_USER` / `CLOUDPRINT_UKEY`
    pub fn from_env() -> GatewayResult<Self> {
        let user = std::env::var("CLOUDPRINT_USER")
            .map_err(|_| GatewayError::Config("CLOUDPRINT_USER not set".into()))?;
        let ukey = std::env::var("CLOUDPRINT_UKEY")
            .map_err(|_| GatewayError::Config("CLOUDPRINT_UKEY not set".into()))?;
        Ok(Self { user, ukey })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("ukey", &"<redacted>")
            .finish()
    }
}
