/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Signing configuration loaded from environment variables.

use std::env;

use crate::service::DEFAULT_EXPIRE_SECS;

/// Application id, secret and default token lifetime.
#[derive(Clone)]
pub struct Config {
    /// Application id the secret belongs to.
    pub sdkappid: u32,
    /// Shared secret used to sign tokens (HMAC-SHA256).
    pub secret_key: String,
    /// Token lifetime in seconds when none is given (default: 180 days).
    pub default_expire_secs: i64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("sdkappid", &self.sdkappid)
            .field("secret_key", &"[REDACTED]")
            .field("default_expire_secs", &self.default_expire_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `USERSIG_SDKAPPID`
    /// - `USERSIG_SECRET_KEY`
    ///
    /// # Optional
    /// - `USERSIG_DEFAULT_EXPIRE_SECS` (default: `"15552000"`)
    pub fn from_env() -> Result<Self, String> {
        let sdkappid = env::var("USERSIG_SDKAPPID")
            .map_err(|_| "USERSIG_SDKAPPID environment variable is required")?
            .parse::<u32>()
            .map_err(|_| "USERSIG_SDKAPPID must be a valid 32-bit unsigned integer")?;
        let secret_key = env::var("USERSIG_SECRET_KEY")
            .map_err(|_| "USERSIG_SECRET_KEY environment variable is required")?;
        let default_expire_secs = Self::default_expire_from_env()?;

        Ok(Self {
            sdkappid,
            secret_key,
            default_expire_secs,
        })
    }

    /// `USERSIG_DEFAULT_EXPIRE_SECS`, or [`DEFAULT_EXPIRE_SECS`] when unset or empty.
    pub fn default_expire_from_env() -> Result<i64, String> {
        let expire = env::var("USERSIG_DEFAULT_EXPIRE_SECS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i64>())
            .transpose()
            .map_err(|_| "USERSIG_DEFAULT_EXPIRE_SECS must be a valid integer")?
            .unwrap_or(DEFAULT_EXPIRE_SECS);
        Ok(expire)
    }
}
