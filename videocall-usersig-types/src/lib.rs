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

//! Shared wire types for videocall.rs UserSig credentials.
//!
//! This crate defines the contract between the service that issues
//! UserSig / PrivateMapKey tokens and every party that verifies them or
//! enforces the room privileges they carry.
//! Framework-agnostic: no crypto, no compression.

pub mod privilege;
pub mod room;
pub mod token;

pub use privilege::PrivilegeMap;
pub use room::RoomId;
pub use token::TokenEnvelope;
