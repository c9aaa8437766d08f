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

//! Token envelope codec.
//!
//! Issuing: sign the fields, serialize the [`TokenEnvelope`] to compact JSON,
//! zlib-compress it and encode it with the URL-safe base64 variant.
//!
//! Verifying runs the inverse and then checks, in order:
//! 1. `TLS.identifier` matches the identifier being checked
//! 2. `TLS.sdkappid` matches the verifying application
//! 3. `TLS.sig` is present
//! 4. the token is still live (`now <= TLS.time + TLS.expire`)
//! 5. the HMAC over the parsed fields matches `TLS.sig`

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{Map, Value};
use videocall_usersig_types::TokenEnvelope;

use crate::error::TokenError;
use crate::service::SigningContext;
use crate::signing::{sign, signing_string, verify_signature};
use crate::user_buf::PermissionBlock;
use crate::wire::{base64_url_decode, base64_url_encode, compress, decompress};

/// What a successfully verified token tells the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identifier: String,
    pub sdkappid: u32,
    /// Issuance timestamp (Unix seconds).
    pub issued_at: i64,
    /// Validity window in seconds.
    pub expire: i64,
    /// Raw permission block, uninterpreted. `None` for plain UserSigs.
    pub user_buf: Option<Vec<u8>>,
}

impl VerifiedToken {
    pub fn expires_at(&self) -> i64 {
        self.issued_at.saturating_add(self.expire)
    }

    /// Decode the carried permission block, if there is one.
    pub fn permission_block(&self) -> Result<Option<PermissionBlock>, TokenError> {
        self.user_buf
            .as_deref()
            .map(PermissionBlock::decode)
            .transpose()
    }
}

/// Build and sign the envelope for a token issued at `now`.
pub fn build_envelope(
    ctx: &SigningContext,
    identifier: &str,
    expire: i64,
    user_buf: Option<&[u8]>,
    now: i64,
) -> TokenEnvelope {
    let userbuf = user_buf.map(|bytes| STANDARD.encode(bytes));
    let content = signing_string(
        identifier,
        u64::from(ctx.sdkappid()),
        now,
        expire,
        userbuf.as_deref(),
    );

    TokenEnvelope {
        ver: TokenEnvelope::VERSION.to_string(),
        identifier: identifier.to_string(),
        sdkappid: ctx.sdkappid(),
        expire,
        time: now,
        userbuf,
        sig: sign(ctx.secret_key(), &content),
    }
}

/// Serialize, compress and URL-safe encode an envelope.
pub fn encode_envelope(envelope: &TokenEnvelope) -> Result<String, TokenError> {
    let json = serde_json::to_vec(envelope).map_err(|e| {
        tracing::error!("Failed to serialize token envelope: {e}");
        TokenError::Encoding(format!("json_encode error: {e}"))
    })?;
    let compressed = compress(&json)?;
    Ok(base64_url_encode(&compressed))
}

/// Issue a wire token for `identifier`, optionally carrying a permission block.
pub fn issue(
    ctx: &SigningContext,
    identifier: &str,
    expire: i64,
    user_buf: Option<&[u8]>,
    now: i64,
) -> Result<String, TokenError> {
    encode_envelope(&build_envelope(ctx, identifier, expire, user_buf, now))
}

/// Verify a wire token against `identifier` at time `now`.
pub fn verify(
    ctx: &SigningContext,
    token: &str,
    identifier: &str,
    now: i64,
) -> Result<VerifiedToken, TokenError> {
    verify_inner(ctx, token, identifier, now).inspect_err(|e| {
        tracing::debug!(
            sdkappid = ctx.sdkappid(),
            identifier,
            "Rejected UserSig: {e}"
        );
    })
}

fn verify_inner(
    ctx: &SigningContext,
    token: &str,
    identifier: &str,
    now: i64,
) -> Result<VerifiedToken, TokenError> {
    let compressed = base64_url_decode(token)?;
    let json = decompress(&compressed)?;
    let received = ReceivedEnvelope::parse(&json)?;

    let token_identifier = required(received.identifier, "TLS.identifier")?;
    if token_identifier != identifier {
        return Err(TokenError::IdentityMismatch {
            token_identifier,
            expected_identifier: identifier.to_string(),
        });
    }

    let token_sdkappid = required(received.sdkappid, "TLS.sdkappid")?;
    if token_sdkappid != u64::from(ctx.sdkappid()) {
        return Err(TokenError::ApplicationMismatch {
            token_sdkappid,
            expected_sdkappid: ctx.sdkappid(),
        });
    }

    let sig = received
        .sig
        .filter(|sig| !sig.is_empty())
        .ok_or(TokenError::SignatureMissing)?;

    let issued_at = required(received.time, "TLS.time")?;
    let expire = required(received.expire, "TLS.expire")?;
    if now > issued_at.saturating_add(expire) {
        return Err(TokenError::Expired { issued_at, expire });
    }

    let user_buf = received
        .userbuf
        .as_deref()
        .map(|encoded| STANDARD.decode(encoded))
        .transpose()
        .map_err(|e| TokenError::Malformed(format!("TLS.userbuf is not base64: {e}")))?;

    let content = signing_string(
        &token_identifier,
        token_sdkappid,
        issued_at,
        expire,
        received.userbuf.as_deref(),
    );
    if !verify_signature(ctx.secret_key(), &content, &sig) {
        return Err(TokenError::SignatureInvalid { issued_at, expire });
    }

    Ok(VerifiedToken {
        identifier: token_identifier,
        sdkappid: ctx.sdkappid(),
        issued_at,
        expire,
        user_buf,
    })
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, TokenError> {
    field.ok_or_else(|| TokenError::Malformed(format!("{name} field is missing")))
}

/// Envelope as received; every field may be absent until it is checked.
#[derive(Debug, Deserialize)]
struct ReceivedEnvelope {
    #[serde(rename = "TLS.identifier", default)]
    identifier: Option<String>,
    #[serde(rename = "TLS.sdkappid", default)]
    sdkappid: Option<u64>,
    #[serde(rename = "TLS.expire", default)]
    expire: Option<i64>,
    #[serde(rename = "TLS.time", default)]
    time: Option<i64>,
    #[serde(rename = "TLS.userbuf", default)]
    userbuf: Option<String>,
    #[serde(rename = "TLS.sig", default)]
    sig: Option<String>,
}

impl ReceivedEnvelope {
    fn parse(json: &[u8]) -> Result<Self, TokenError> {
        let object: Map<String, Value> = serde_json::from_slice(json)
            .map_err(|e| TokenError::Malformed(format!("json_decode error: {e}")))?;
        serde_json::from_value(Value::Object(object))
            .map_err(|e| TokenError::Malformed(format!("unexpected field type: {e}")))
    }
}
