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

//! Transport encoding: zlib compression plus a URL-safe base64 variant.
//!
//! The variant is ordinary padded base64 with `+` → `*`, `/` → `-` and
//! `=` → `_`. Padding is transformed, never stripped.

use std::io::{Read, Write};

use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::TokenError;

/// Upper bound on the decompressed token JSON.
pub const MAX_TOKEN_JSON_BYTES: usize = 64 * 1024;

/// Map a standard base64 character onto the URL-safe alphabet.
pub fn to_url_safe(c: char) -> char {
    match c {
        '+' => '*',
        '/' => '-',
        '=' => '_',
        other => other,
    }
}

/// Inverse of [`to_url_safe`].
pub fn from_url_safe(c: char) -> char {
    match c {
        '*' => '+',
        '-' => '/',
        '_' => '=',
        other => other,
    }
}

pub fn base64_url_encode(data: &[u8]) -> String {
    STANDARD.encode(data).chars().map(to_url_safe).collect()
}

pub fn base64_url_decode(encoded: &str) -> Result<Vec<u8>, TokenError> {
    let standard: String = encoded.chars().map(from_url_safe).collect();
    STANDARD
        .decode(standard)
        .map_err(|e| TokenError::Malformed(format!("base64_url_decode error: {e}")))
}

/// zlib-compress (default level, zlib header and adler32 trailer).
pub fn compress(data: &[u8]) -> Result<Vec<u8>, TokenError> {
    let to_error = |e: std::io::Error| {
        tracing::error!("zlib compression failed: {e}");
        TokenError::Encoding(format!("zlib compress error: {e}"))
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(to_error)?;
    encoder.finish().map_err(to_error)
}

/// zlib-decompress, refusing output larger than [`MAX_TOKEN_JSON_BYTES`].
///
/// `data` must be exactly one zlib stream; bytes after the adler32 trailer
/// are rejected.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, TokenError> {
    let limit = MAX_TOKEN_JSON_BYTES as u64 + 1;
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    (&mut decoder)
        .take(limit)
        .read_to_end(&mut decompressed)
        .map_err(|e| TokenError::Malformed(format!("zlib uncompress error: {e}")))?;

    if decompressed.len() > MAX_TOKEN_JSON_BYTES {
        return Err(TokenError::Malformed(format!(
            "decompressed token exceeds {MAX_TOKEN_JSON_BYTES} bytes"
        )));
    }
    if decoder.total_in() != data.len() as u64 {
        return Err(TokenError::Malformed(
            "trailing data after zlib stream".to_string(),
        ));
    }
    Ok(decompressed)
}
