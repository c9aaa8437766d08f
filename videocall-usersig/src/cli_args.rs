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

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config::Config;

/// UserSig CLI
///
/// Issues and verifies UserSig / PrivateMapKey credentials for videocall.rs.
///
/// The application id and secret are read from `USERSIG_SDKAPPID` and
/// `USERSIG_SECRET_KEY` unless given on the command line.
#[derive(Parser, Debug)]
#[clap(name = "usersig")]
pub struct Opt {
    /// Application id the secret belongs to.
    #[clap(long = "sdkappid", global = true)]
    pub sdkappid: Option<u32>,

    /// Shared signing secret. Prefer the environment variable outside of testing.
    #[clap(long = "secret-key", global = true)]
    pub secret_key: Option<String>,

    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Issue a plain UserSig.
    GenUserSig(GenUserSig),

    /// Issue a PrivateMapKey scoped to one room.
    GenPrivateMapKey(GenPrivateMapKey),

    /// Verify a token and print what it grants.
    Verify(Verify),
}

#[derive(Args, Debug, Clone)]
pub struct GenUserSig {
    #[clap(long = "identifier")]
    pub identifier: String,

    /// Lifetime in seconds. Defaults to `USERSIG_DEFAULT_EXPIRE_SECS` or 180 days.
    #[clap(long = "expire")]
    pub expire: Option<i64>,
}

#[derive(Args, Debug, Clone)]
#[clap(group = ArgGroup::new("room").required(true))]
pub struct GenPrivateMapKey {
    #[clap(long = "identifier")]
    pub identifier: String,

    /// Lifetime in seconds, for both the token and the permission block.
    #[clap(long = "expire")]
    pub expire: Option<i64>,

    /// Numeric room id.
    #[clap(long = "room-id", group = "room")]
    pub room_id: Option<u32>,

    /// String room id.
    #[clap(long = "room-str", group = "room")]
    pub room_str: Option<String>,

    /// Privilege bits:
    ///   1 create room, 2 enter room, 4 send audio, 8 receive audio,
    ///   16 send video, 32 receive video, 64 send screen share,
    ///   128 receive screen share.
    ///
    /// 255 grants everything; 42 grants entering and receiving audio/video.
    #[clap(long = "privilege-map", default_value = "255")]
    pub privilege_map: u32,
}

#[derive(Args, Debug, Clone)]
pub struct Verify {
    /// Identifier the token must have been issued for.
    #[clap(long = "identifier")]
    pub identifier: String,

    #[clap(long = "token")]
    pub token: String,
}

impl Opt {
    /// Environment configuration with command line overrides applied.
    pub fn config(&self) -> Result<Config, String> {
        let mut config = match (self.sdkappid, &self.secret_key) {
            (Some(sdkappid), Some(secret_key)) => Config {
                sdkappid,
                secret_key: secret_key.clone(),
                default_expire_secs: Config::default_expire_from_env()?,
            },
            _ => Config::from_env()?,
        };
        if let Some(sdkappid) = self.sdkappid {
            config.sdkappid = sdkappid;
        }
        if let Some(secret_key) = &self.secret_key {
            config.secret_key = secret_key.clone();
        }
        Ok(config)
    }
}
