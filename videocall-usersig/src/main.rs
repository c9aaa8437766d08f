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

//! `usersig` command line entry point.

use clap::Parser;
use tracing::level_filters::LevelFilter;
use usersig::cli_args::{Mode, Opt};
use usersig::TlsSigApi;

mod modes;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();
    let config = opt.config().map_err(anyhow::Error::msg)?;
    let api = TlsSigApi::from_config(&config);

    match opt.mode {
        Mode::GenUserSig(args) => modes::issue::gen_user_sig(&api, &config, args)?,
        Mode::GenPrivateMapKey(args) => modes::issue::gen_private_map_key(&api, &config, args)?,
        Mode::Verify(args) => modes::verify::verify(&api, args)?,
    };

    Ok(())
}
