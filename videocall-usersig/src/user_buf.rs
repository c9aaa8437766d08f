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

//! PrivateMapKey permission block ("userbuf").
//!
//! Binary layout, all integers big-endian:
//!
//! ```text
//! version:u8 | account_len:u16 | account | sdkappid:u32 | room_id:u32
//!   | expire_at:u32 | privilege_map:u32 | account_type:u32
//!   [ | room_str_len:u16 | room_str ]   (version 1 only)
//! ```
//!
//! The verifier never looks inside the block; it hands the raw bytes to
//! whoever enforces room privileges. [`PermissionBlock::decode`] exists for
//! that collaborator.

use videocall_usersig_types::{PrivilegeMap, RoomId};

use crate::error::TokenError;

/// Bytes before the account plus the five fixed u32 fields.
const FIXED_LEN: usize = 1 + 2 + 4 * 5;

/// Room-scoped privileges bound into a PrivateMapKey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionBlock {
    pub account: String,
    pub sdkappid: u32,
    pub room: RoomId,
    /// Absolute expiry of the privileges (Unix seconds, 32-bit).
    pub expire_at: u32,
    pub privilege_map: PrivilegeMap,
    /// Reserved, always 0 for issued blocks.
    pub account_type: u32,
}

impl PermissionBlock {
    pub const VERSION_NUMERIC_ROOM: u8 = 0;
    pub const VERSION_STRING_ROOM: u8 = 1;

    pub fn new(
        account: &str,
        sdkappid: u32,
        room: RoomId,
        expire_at: u32,
        privilege_map: PrivilegeMap,
    ) -> Self {
        Self {
            account: account.to_string(),
            sdkappid,
            room,
            expire_at,
            privilege_map,
            account_type: 0,
        }
    }

    pub fn with_account_type(mut self, account_type: u32) -> Self {
        self.account_type = account_type;
        self
    }

    pub fn format_version(&self) -> u8 {
        if self.room.name().is_some() {
            Self::VERSION_STRING_ROOM
        } else {
            Self::VERSION_NUMERIC_ROOM
        }
    }

    /// Pack the block into its wire layout.
    ///
    /// Fails only when the account or room string does not fit a u16 length prefix.
    pub fn encode(&self) -> Result<Vec<u8>, TokenError> {
        let account = self.account.as_bytes();
        let room_name = self.room.name().map(str::as_bytes);

        let mut buf =
            Vec::with_capacity(FIXED_LEN + account.len() + room_name.map_or(0, |r| 2 + r.len()));
        buf.push(self.format_version());
        put_len_prefixed(&mut buf, "account", account)?;
        buf.extend_from_slice(&self.sdkappid.to_be_bytes());
        buf.extend_from_slice(&self.room.numeric().to_be_bytes());
        buf.extend_from_slice(&self.expire_at.to_be_bytes());
        buf.extend_from_slice(&self.privilege_map.bits().to_be_bytes());
        buf.extend_from_slice(&self.account_type.to_be_bytes());
        if let Some(room_name) = room_name {
            put_len_prefixed(&mut buf, "room string", room_name)?;
        }

        Ok(buf)
    }

    /// Unpack a block produced by [`PermissionBlock::encode`] or any other issuer.
    pub fn decode(data: &[u8]) -> Result<Self, TokenError> {
        let mut reader = Reader(data);

        let version = reader.u8()?;
        if version != Self::VERSION_NUMERIC_ROOM && version != Self::VERSION_STRING_ROOM {
            return Err(TokenError::Malformed(format!(
                "unsupported permission block version {version}"
            )));
        }
        let account = reader.string()?;
        let sdkappid = reader.u32()?;
        let room_id = reader.u32()?;
        let expire_at = reader.u32()?;
        let privilege_map = PrivilegeMap::from_bits(reader.u32()?);
        let account_type = reader.u32()?;
        let room = if version == Self::VERSION_STRING_ROOM {
            RoomId::Named(reader.string()?)
        } else {
            RoomId::Numeric(room_id)
        };

        if !reader.0.is_empty() {
            return Err(TokenError::Malformed(format!(
                "{} trailing bytes after permission block",
                reader.0.len()
            )));
        }

        Ok(Self {
            account,
            sdkappid,
            room,
            expire_at,
            privilege_map,
            account_type,
        })
    }
}

/// Absolute expiry written into a block issued at `now` for `validity_secs`.
///
/// The field is 32 bits wide on the wire; larger values wrap.
pub fn expiry_timestamp(now: i64, validity_secs: i64) -> u32 {
    now.wrapping_add(validity_secs) as u32
}

fn put_len_prefixed(buf: &mut Vec<u8>, field: &str, bytes: &[u8]) -> Result<(), TokenError> {
    let len = u16::try_from(bytes.len()).map_err(|_| {
        tracing::error!("{field} of {} bytes overflows the u16 length prefix", bytes.len());
        TokenError::Encoding(format!(
            "{field} is {} bytes, at most {} allowed",
            bytes.len(),
            u16::MAX
        ))
    })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

struct Reader<'a>(&'a [u8]);

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], TokenError> {
        if self.0.len() < n {
            return Err(TokenError::Malformed(format!(
                "permission block truncated: need {n} bytes, have {}",
                self.0.len()
            )));
        }
        let (head, tail) = self.0.split_at(n);
        self.0 = tail;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8, TokenError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, TokenError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, TokenError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn string(&mut self) -> Result<String, TokenError> {
        let len = usize::from(self.u16()?);
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| TokenError::Malformed(format!("permission block string: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDKAPPID: u32 = 1400000000;

    #[test]
    fn numeric_room_layout_is_exact() {
        let block = PermissionBlock::new(
            "alice",
            SDKAPPID,
            RoomId::Numeric(1234),
            1_700_000_300,
            PrivilegeMap::ALL,
        );
        let bytes = block.encode().unwrap();

        let mut expected = vec![0u8, 0, 5];
        expected.extend_from_slice(b"alice");
        expected.extend_from_slice(&SDKAPPID.to_be_bytes());
        expected.extend_from_slice(&1234u32.to_be_bytes());
        expected.extend_from_slice(&1_700_000_300u32.to_be_bytes());
        expected.extend_from_slice(&[0, 0, 0, 0xFF]);
        expected.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), FIXED_LEN + 5);
    }

    #[test]
    fn string_room_uses_version_one_and_appends_room() {
        let block = PermissionBlock::new(
            "alice",
            SDKAPPID,
            RoomId::Named("standup".to_string()),
            1_700_000_300,
            PrivilegeMap::from_bits(42),
        );
        let bytes = block.encode().unwrap();

        assert_eq!(bytes[0], PermissionBlock::VERSION_STRING_ROOM);
        assert_eq!(bytes.len(), FIXED_LEN + 5 + 2 + 7);
        // numeric room id slot is zeroed
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(&bytes[FIXED_LEN + 5..FIXED_LEN + 7], &[0, 7]);
        assert_eq!(&bytes[FIXED_LEN + 7..], b"standup");
    }

    #[test]
    fn numeric_room_omits_room_string_field() {
        let block = PermissionBlock::new("bob", SDKAPPID, RoomId::Numeric(7), 0, PrivilegeMap::NONE);
        let bytes = block.encode().unwrap();
        assert_eq!(bytes[0], PermissionBlock::VERSION_NUMERIC_ROOM);
        assert_eq!(bytes.len(), FIXED_LEN + 3);
    }

    #[test]
    fn empty_room_name_falls_back_to_version_zero() {
        let block = PermissionBlock::new(
            "bob",
            SDKAPPID,
            RoomId::Named(String::new()),
            0,
            PrivilegeMap::NONE,
        );
        assert_eq!(block.format_version(), PermissionBlock::VERSION_NUMERIC_ROOM);
        assert_eq!(block.encode().unwrap().len(), FIXED_LEN + 3);
    }

    #[test]
    fn oversized_account_is_an_encoding_error() {
        let account = "a".repeat(usize::from(u16::MAX) + 1);
        let block = PermissionBlock::new(&account, SDKAPPID, RoomId::Numeric(1), 0, PrivilegeMap::ALL);
        assert!(matches!(block.encode(), Err(TokenError::Encoding(_))));
    }

    #[test]
    fn oversized_room_string_is_an_encoding_error() {
        let room = RoomId::Named("r".repeat(70_000));
        let block = PermissionBlock::new("alice", SDKAPPID, room, 0, PrivilegeMap::ALL);
        assert!(matches!(block.encode(), Err(TokenError::Encoding(_))));
    }

    #[test]
    fn max_length_account_still_encodes() {
        let account = "a".repeat(usize::from(u16::MAX));
        let block = PermissionBlock::new(&account, SDKAPPID, RoomId::Numeric(1), 0, PrivilegeMap::ALL);
        assert_eq!(block.encode().unwrap().len(), FIXED_LEN + usize::from(u16::MAX));
    }

    #[test]
    fn decode_recovers_every_field() {
        let block = PermissionBlock::new(
            "alice",
            SDKAPPID,
            RoomId::Named("standup".to_string()),
            1_700_000_300,
            PrivilegeMap::from_bits(42),
        )
        .with_account_type(3);

        let decoded = PermissionBlock::decode(&block.encode().unwrap()).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(
            decoded.privilege_map,
            PrivilegeMap::ENTER_ROOM | PrivilegeMap::RECV_AUDIO | PrivilegeMap::RECV_VIDEO
        );
    }

    #[test]
    fn decode_all_privileges() {
        let block = PermissionBlock::new("a", SDKAPPID, RoomId::Numeric(9), 1, PrivilegeMap::from_bits(255));
        let decoded = PermissionBlock::decode(&block.encode().unwrap()).unwrap();
        assert_eq!(decoded.privilege_map.names().count(), 8);
        assert_eq!(decoded.room, RoomId::Numeric(9));
    }

    #[test]
    fn decode_rejects_truncated_and_trailing_input() {
        let bytes = PermissionBlock::new("alice", SDKAPPID, RoomId::Numeric(1), 0, PrivilegeMap::ALL)
            .encode()
            .unwrap();

        assert!(matches!(
            PermissionBlock::decode(&bytes[..bytes.len() - 1]),
            Err(TokenError::Malformed(_))
        ));

        let mut padded = bytes.clone();
        padded.push(0);
        assert!(matches!(
            PermissionBlock::decode(&padded),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let mut bytes = PermissionBlock::new("alice", SDKAPPID, RoomId::Numeric(1), 0, PrivilegeMap::ALL)
            .encode()
            .unwrap();
        bytes[0] = 2;
        assert!(matches!(
            PermissionBlock::decode(&bytes),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn expiry_is_now_plus_window() {
        assert_eq!(expiry_timestamp(1_700_000_000, 300), 1_700_000_300);
    }
}
