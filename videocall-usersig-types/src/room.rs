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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room a permission block is scoped to.
///
/// Rooms are addressed either by a 32-bit number or by a string. A string
/// room switches the permission block to format version 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomId {
    Numeric(u32),
    Named(String),
}

impl RoomId {
    /// Pick the room form the same way issuers always have: a non-empty
    /// string wins, otherwise the number is used.
    pub fn from_parts(numeric: u32, name: &str) -> Self {
        if name.is_empty() {
            RoomId::Numeric(numeric)
        } else {
            RoomId::Named(name.to_string())
        }
    }

    /// Numeric id as written on the wire; `0` for string rooms.
    pub fn numeric(&self) -> u32 {
        match self {
            RoomId::Numeric(id) => *id,
            RoomId::Named(_) => 0,
        }
    }

    /// String id as written on the wire, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            RoomId::Named(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomId::Numeric(id) => write!(f, "{id}"),
            RoomId::Named(name) => write!(f, "{name}"),
        }
    }
}
