/*
* eos-install-app-helper launcher
* Copyright (C) 2023 The eos-install-app-helper authors
*
* This program is free software; you can redistribute it and/or modify
* it under the terms of the GNU General Public License as published by
* the Free Software Foundation; either version 2 of the License, or
* (at your option) any later version.
*
* This program is distributed in the hope that it will be useful,
* but WITHOUT ANY WARRANTY; without even the implied warranty of
* MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
* GNU General Public License for more details.
*
* You should have received a copy of the GNU General Public License along
* with this program; if not, write to the Free Software Foundation, Inc.,
* 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.
*/

use clap::Parser;
use eos_install_app_helper::args::LauncherArgs;
use eos_install_app_helper::config::Config;
use eos_install_app_helper::flatpak::Installation;
use eos_install_app_helper::launcher::Launcher;
use eos_install_app_helper::logging;
use eos_install_app_helper::session::DesktopSession;
use anyhow::Result;
use log::{debug, error};
use std::process;

fn main() {
    let args = LauncherArgs::parse();
    logging::setup("eos-install-app-helper", args.debug);

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &LauncherArgs) -> Result<()> {
    let config = Config::load(args.config.clone())?;
    let registry = Installation::new(&config.installation_path);
    let session = DesktopSession::new(&config)?;

    let outcome = Launcher::new(&registry, &session).run(args)?;
    debug!("{}: {}", args.app_id, outcome);
    Ok(())
}
