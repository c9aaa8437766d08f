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

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::DateTime;
use usersig::cli_args::Verify;
use usersig::{Clock, TlsSigApi, VerifiedToken};

pub fn verify<C: Clock>(api: &TlsSigApi<C>, args: Verify) -> anyhow::Result<()> {
    let verified = api
        .verify(&args.token, &args.identifier)
        .with_context(|| format!("token rejected for '{}'", args.identifier))?;

    println!("identifier:  {}", verified.identifier);
    println!("sdkappid:    {}", verified.sdkappid);
    println!("issued at:   {}", format_timestamp(verified.issued_at));
    println!("expires at:  {}", format_timestamp(verified.expires_at()));

    for line in permission_lines(&verified) {
        println!("{line}");
    }
    Ok(())
}

/// Describe the carried block. Bytes that are not a permission block were
/// still covered by the signature, so they are shown raw instead of failing.
fn permission_lines(verified: &VerifiedToken) -> Vec<String> {
    match verified.permission_block() {
        Ok(Some(block)) => vec![
            format!("room:        {}", block.room),
            format!("privileges:  {}", block.privilege_map),
            format!("block until: {}", format_timestamp(i64::from(block.expire_at))),
        ],
        Ok(None) => vec!["room:        any (no permission block)".to_string()],
        Err(e) => {
            tracing::debug!("userbuf is not a permission block: {e}");
            let raw = verified.user_buf.as_deref().unwrap_or_default();
            vec![format!("userbuf:     {} (opaque)", STANDARD.encode(raw))]
        }
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
