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

use usersig::cli_args::{GenPrivateMapKey, GenUserSig};
use usersig::config::Config;
use usersig::{Clock, PrivilegeMap, RoomId, TlsSigApi};

pub fn gen_user_sig<C: Clock>(
    api: &TlsSigApi<C>,
    config: &Config,
    args: GenUserSig,
) -> anyhow::Result<()> {
    let expire = args.expire.unwrap_or(config.default_expire_secs);
    let token = api.gen_user_sig(&args.identifier, expire)?;
    println!("{token}");
    Ok(())
}

pub fn gen_private_map_key<C: Clock>(
    api: &TlsSigApi<C>,
    config: &Config,
    args: GenPrivateMapKey,
) -> anyhow::Result<()> {
    let expire = args.expire.unwrap_or(config.default_expire_secs);
    let room = RoomId::from_parts(
        args.room_id.unwrap_or(0),
        args.room_str.as_deref().unwrap_or(""),
    );
    let privilege_map = PrivilegeMap::from_bits(args.privilege_map);
    tracing::info!("Issuing PrivateMapKey for room {room} with privileges {privilege_map}");

    let token = api.issue_for_room(&args.identifier, expire, room, privilege_map)?;
    println!("{token}");
    Ok(())
}
