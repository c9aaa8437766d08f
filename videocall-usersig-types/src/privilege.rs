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

//! Room privilege bitmap carried in a PrivateMapKey permission block.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Room-level privileges, one bit per feature.
///
/// | bit | value | privilege                   |
/// |-----|-------|-----------------------------|
/// | 0   | 1     | create room                 |
/// | 1   | 2     | enter room                  |
/// | 2   | 4     | send audio                  |
/// | 3   | 8     | receive audio               |
/// | 4   | 16    | send video                  |
/// | 5   | 32    | receive video               |
/// | 6   | 64    | send screen share (substream) |
/// | 7   | 128   | receive screen share (substream) |
///
/// `255` grants everything in the room; `42` grants only entering the room
/// and receiving audio/video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivilegeMap(u32);

impl PrivilegeMap {
    pub const NONE: Self = Self(0);
    pub const CREATE_ROOM: Self = Self(1 << 0);
    pub const ENTER_ROOM: Self = Self(1 << 1);
    pub const SEND_AUDIO: Self = Self(1 << 2);
    pub const RECV_AUDIO: Self = Self(1 << 3);
    pub const SEND_VIDEO: Self = Self(1 << 4);
    pub const RECV_VIDEO: Self = Self(1 << 5);
    pub const SEND_SUB_VIDEO: Self = Self(1 << 6);
    pub const RECV_SUB_VIDEO: Self = Self(1 << 7);
    pub const ALL: Self = Self(0xFF);

    const NAMED: [(Self, &'static str); 8] = [
        (Self::CREATE_ROOM, "create_room"),
        (Self::ENTER_ROOM, "enter_room"),
        (Self::SEND_AUDIO, "send_audio"),
        (Self::RECV_AUDIO, "recv_audio"),
        (Self::SEND_VIDEO, "send_video"),
        (Self::RECV_VIDEO, "recv_video"),
        (Self::SEND_SUB_VIDEO, "send_sub_video"),
        (Self::RECV_SUB_VIDEO, "recv_sub_video"),
    ];

    /// Wrap raw bits. Bits above 7 are kept as-is; they are reserved on the wire.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of the known privileges that are set, lowest bit first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl From<u32> for PrivilegeMap {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for PrivilegeMap {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for PrivilegeMap {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for PrivilegeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010b} [", self.0)?;
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, "]")
    }
}
