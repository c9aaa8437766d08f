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

//! UserSig / PrivateMapKey credentials for videocall.rs.
//!
//! A UserSig authorizes an identifier to use the media service; a
//! PrivateMapKey additionally binds a permission block that restricts the
//! identifier to one room and a set of room privileges. Both are verified
//! statelessly by anyone holding the application id and shared secret.
//!
//! # Example
//!
//! ```
//! use usersig::{PrivilegeMap, TlsSigApi};
//!
//! let api = TlsSigApi::new(1400000000, "shared-secret");
//! let token = api
//!     .gen_private_map_key("alice", 300, 1234, PrivilegeMap::ENTER_ROOM | PrivilegeMap::RECV_AUDIO)
//!     .unwrap();
//!
//! let verified = api.verify(&token, "alice").unwrap();
//! let block = verified.permission_block().unwrap().unwrap();
//! assert!(block.privilege_map.contains(PrivilegeMap::ENTER_ROOM));
//! ```

pub mod cli_args;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod service;
pub mod signing;
pub mod user_buf;
pub mod wire;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::VerifiedToken;
pub use error::TokenError;
pub use service::{SigningContext, TlsSigApi, DEFAULT_EXPIRE_SECS};
pub use user_buf::PermissionBlock;
pub use videocall_usersig_types;
pub use videocall_usersig_types::{PrivilegeMap, RoomId, TokenEnvelope};
