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

//! Canonical signing string and its HMAC-SHA256 signature.
//!
//! Issuer and verifier must build byte-identical signing strings, so the
//! field order and the omission of an absent `TLS.userbuf` line are fixed.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Build the newline-terminated `TLS.<field>:<value>` lines that get signed.
///
/// `user_buf` is the base64 permission block; `None` drops the line entirely.
pub fn signing_string(
    identifier: &str,
    sdkappid: u64,
    time: i64,
    expire: i64,
    user_buf: Option<&str>,
) -> String {
    let mut content = format!(
        "TLS.identifier:{identifier}\n\
         TLS.sdkappid:{sdkappid}\n\
         TLS.time:{time}\n\
         TLS.expire:{expire}\n"
    );
    if let Some(user_buf) = user_buf {
        content.push_str("TLS.userbuf:");
        content.push_str(user_buf);
        content.push('\n');
    }
    content
}

fn mac(secret: &[u8], content: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(content.as_bytes());
    mac
}

/// HMAC-SHA256 of `content` keyed by `secret`, base64 encoded (standard alphabet).
pub fn sign(secret: &[u8], content: &str) -> String {
    STANDARD.encode(mac(secret, content).finalize().into_bytes())
}

/// Check `signature` against `content` in constant time.
///
/// A signature that is not valid base64 simply fails to verify.
pub fn verify_signature(secret: &[u8], content: &str, signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature) else {
        return false;
    };
    mac(secret, content).verify_slice(&expected).is_ok()
}
