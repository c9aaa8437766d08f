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

//! Error type shared by issuance and verification.

use thiserror::Error;

/// Every way issuing or verifying a UserSig can fail.
///
/// Only [`TokenError::Encoding`] comes out of issuance; the rest are
/// verification outcomes. None of them are worth retrying with the same
/// input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// JSON serialization, compression or a length prefix overflowed while issuing.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The wire string is not valid URL-safe base64, zlib or a JSON object.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// `TLS.identifier` does not match the identifier being checked.
    #[error("identifier '{token_identifier}' doesn't match '{expected_identifier}'")]
    IdentityMismatch {
        token_identifier: String,
        expected_identifier: String,
    },

    /// `TLS.sdkappid` does not belong to the verifying application.
    #[error("sdkappid {token_sdkappid} doesn't match {expected_sdkappid}")]
    ApplicationMismatch {
        token_sdkappid: u64,
        expected_sdkappid: u32,
    },

    /// `TLS.sig` is absent or empty.
    #[error("sig field is missing")]
    SignatureMissing,

    /// `now > TLS.time + TLS.expire`.
    #[error("sig expired (issued at {issued_at}, valid for {expire}s)")]
    Expired { issued_at: i64, expire: i64 },

    /// The recomputed HMAC does not match `TLS.sig`.
    #[error("verify failed")]
    SignatureInvalid { issued_at: i64, expire: i64 },
}

impl TokenError {
    /// Issuance timestamp carried by the rejected token, when it got far
    /// enough to read one.
    pub fn issued_at(&self) -> Option<i64> {
        match self {
            TokenError::Expired { issued_at, .. }
            | TokenError::SignatureInvalid { issued_at, .. } => Some(*issued_at),
            _ => None,
        }
    }

    /// Validity window carried by the rejected token, when available.
    pub fn expire(&self) -> Option<i64> {
        match self {
            TokenError::Expired { expire, .. } | TokenError::SignatureInvalid { expire, .. } => {
                Some(*expire)
            }
            _ => None,
        }
    }
}
