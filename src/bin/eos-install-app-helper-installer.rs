/*
* eos-install-app-helper installer
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
use eos_install_app_helper::args::InstallerArgs;
use eos_install_app_helper::installer;
use eos_install_app_helper::logging;
use eos_install_app_helper::stamp;
use anyhow::Result;
use log::{debug, error};
use std::process;

fn main() {
    let args = InstallerArgs::parse();
    logging::setup("eos-install-app-helper-installer", args.debug);

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &InstallerArgs) -> Result<()> {
    // Runs as root: never read --config here
    if args.create_stamp {
        return stamp::create_privileged(&args.app_id);
    }

    let outcome = installer::run(args)?;
    debug!("{}: {}", args.app_id, outcome);
    Ok(())
}
