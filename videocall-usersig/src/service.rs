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

//! Credential service: the issue / verify entry points.
//!
//! A [`TlsSigApi`] owns the application id and shared secret. It holds no
//! mutable state, so one instance can be shared across threads.

use std::fmt;

use videocall_usersig_types::{PrivilegeMap, RoomId};

use crate::clock::{Clock, SystemClock};
use crate::codec::{self, VerifiedToken};
use crate::config::Config;
use crate::error::TokenError;
use crate::user_buf::{expiry_timestamp, PermissionBlock};

/// Default UserSig lifetime: 180 days.
pub const DEFAULT_EXPIRE_SECS: i64 = 86400 * 180;

/// Application id and secret used to sign and verify tokens.
#[derive(Clone)]
pub struct SigningContext {
    sdkappid: u32,
    secret_key: Vec<u8>,
}

impl SigningContext {
    /// An empty secret is accepted; choosing a real one is the caller's job.
    pub fn new(sdkappid: u32, secret_key: impl AsRef<[u8]>) -> Self {
        Self {
            sdkappid,
            secret_key: secret_key.as_ref().to_vec(),
        }
    }

    pub fn sdkappid(&self) -> u32 {
        self.sdkappid
    }

    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("sdkappid", &self.sdkappid)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Issues UserSig / PrivateMapKey tokens and verifies them.
#[derive(Debug, Clone)]
pub struct TlsSigApi<C = SystemClock> {
    ctx: SigningContext,
    clock: C,
}

impl TlsSigApi<SystemClock> {
    pub fn new(sdkappid: u32, secret_key: impl AsRef<[u8]>) -> Self {
        Self::with_clock(sdkappid, secret_key, SystemClock)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sdkappid, &config.secret_key)
    }
}

impl<C: Clock> TlsSigApi<C> {
    pub fn with_clock(sdkappid: u32, secret_key: impl AsRef<[u8]>, clock: C) -> Self {
        Self {
            ctx: SigningContext::new(sdkappid, secret_key),
            clock,
        }
    }

    pub fn context(&self) -> &SigningContext {
        &self.ctx
    }

    /// Issue a plain UserSig: access to the service, no room restrictions.
    ///
    /// `expire` is the lifetime in seconds, e.g. `86400` for one day.
    pub fn gen_user_sig(&self, identifier: &str, expire: i64) -> Result<String, TokenError> {
        self.issue(identifier, expire, None)
    }

    /// Issue a PrivateMapKey restricting `identifier` to numeric room `room_id`.
    pub fn gen_private_map_key(
        &self,
        identifier: &str,
        expire: i64,
        room_id: u32,
        privilege_map: PrivilegeMap,
    ) -> Result<String, TokenError> {
        self.issue_for_room(identifier, expire, RoomId::Numeric(room_id), privilege_map)
    }

    /// Issue a PrivateMapKey restricting `identifier` to string room `room_str`.
    ///
    /// An empty `room_str` degrades to numeric room `0`.
    pub fn gen_private_map_key_with_string_room_id(
        &self,
        identifier: &str,
        expire: i64,
        room_str: &str,
        privilege_map: PrivilegeMap,
    ) -> Result<String, TokenError> {
        self.issue_for_room(
            identifier,
            expire,
            RoomId::from_parts(0, room_str),
            privilege_map,
        )
    }

    /// Issue a PrivateMapKey for any room form.
    pub fn issue_for_room(
        &self,
        identifier: &str,
        expire: i64,
        room: RoomId,
        privilege_map: PrivilegeMap,
    ) -> Result<String, TokenError> {
        let now = self.clock.now();
        let block = PermissionBlock::new(
            identifier,
            self.ctx.sdkappid(),
            room,
            expiry_timestamp(now, expire),
            privilege_map,
        );
        let user_buf = block.encode()?;
        self.issue_at(identifier, expire, Some(user_buf.as_slice()), now)
    }

    /// Issue a token carrying `user_buf` verbatim, or no permission block at all.
    pub fn issue(
        &self,
        identifier: &str,
        expire: i64,
        user_buf: Option<&[u8]>,
    ) -> Result<String, TokenError> {
        self.issue_at(identifier, expire, user_buf, self.clock.now())
    }

    fn issue_at(
        &self,
        identifier: &str,
        expire: i64,
        user_buf: Option<&[u8]>,
        now: i64,
    ) -> Result<String, TokenError> {
        let token = codec::issue(&self.ctx, identifier, expire, user_buf, now)?;
        tracing::debug!(
            sdkappid = self.ctx.sdkappid(),
            identifier,
            expire,
            with_user_buf = user_buf.is_some(),
            "Issued UserSig"
        );
        Ok(token)
    }

    /// Verify `token` for `identifier` against the current time.
    ///
    /// On success the raw permission block (if any) is returned untouched;
    /// see [`VerifiedToken::permission_block`] to decode it.
    pub fn verify(&self, token: &str, identifier: &str) -> Result<VerifiedToken, TokenError> {
        codec::verify(&self.ctx, token, identifier, self.clock.now())
    }
}
