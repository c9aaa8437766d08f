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

//! UserSig token envelope.
//!
//! The envelope is the JSON object that travels (zlib-compressed and
//! URL-safe base64 encoded) as the wire token. Field names keep the `TLS.`
//! prefix so that tokens stay interoperable with existing verifiers.

use serde::{Deserialize, Serialize};

/// JSON payload of a UserSig token.
///
/// Fields serialize in declaration order, which is the order existing
/// issuers emit them in.
///
/// # Example payload
///
/// ```json
/// {
///   "TLS.ver": "2.0",
///   "TLS.identifier": "alice",
///   "TLS.sdkappid": 1400000000,
///   "TLS.expire": 86400,
///   "TLS.time": 1707004800,
///   "TLS.userbuf": "AAAFYWxpY2VTclqA...",
///   "TLS.sig": "c2lnbmF0dXJl..."
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenEnvelope {
    /// Envelope format version. Always [`TokenEnvelope::VERSION`].
    #[serde(rename = "TLS.ver")]
    pub ver: String,

    /// User account the token was issued for.
    #[serde(rename = "TLS.identifier")]
    pub identifier: String,

    /// Application id whose secret signed the token.
    #[serde(rename = "TLS.sdkappid")]
    pub sdkappid: u32,

    /// Validity window in seconds, counted from `time`.
    #[serde(rename = "TLS.expire")]
    pub expire: i64,

    /// Issuance timestamp (Unix seconds).
    #[serde(rename = "TLS.time")]
    pub time: i64,

    /// Base64 (standard alphabet) permission block, absent for plain UserSigs.
    #[serde(
        rename = "TLS.userbuf",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub userbuf: Option<String>,

    /// Base64 HMAC-SHA256 over the signing string.
    #[serde(rename = "TLS.sig")]
    pub sig: String,
}

impl TokenEnvelope {
    /// The only envelope version produced by this crate.
    pub const VERSION: &'static str = "2.0";

    /// Unix timestamp after which the token is no longer live.
    pub fn expires_at(&self) -> i64 {
        self.time.saturating_add(self.expire)
    }
}
