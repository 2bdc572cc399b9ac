/*
* eos-install-app-helper library
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

use crate::arch;
use crate::args::InstallerArgs;
use crate::config::{self, Config};
use crate::flatpak::{self, Installation, Registry};
use crate::session::{DesktopSession, Session};
use crate::stamp::Stamp;
use anyhow::Result;
use strum_macros::Display;

/// How a run ended without an error. All of these exit with 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Outcome {
    #[strum(to_string = "installed")]
    Installed,
    #[strum(to_string = "already installed")]
    AlreadyInstalled,
    /// Initial setup with automatic installation switched off
    #[strum(to_string = "installation is disabled")]
    Disabled,
    /// Initial setup found a stamp from an earlier run
    #[strum(to_string = "installation was already attempted")]
    AlreadyAttempted,
}

/// Installer entry point: loads the config named on the command line and
/// runs against the system installation and the desktop session.
pub fn run(args: &InstallerArgs) -> Result<Outcome> {
    let config = Config::load(args.config.clone())?;
    let registry = Installation::new(&config.installation_path);
    let session = DesktopSession::new(&config)?;

    Installer::new(&registry, &session, &config).run(args)
}

pub struct Installer<'a, R: Registry, S: Session> {
    registry: &'a R,
    session: &'a S,
    config: &'a Config,
}

impl<'a, R: Registry, S: Session> Installer<'a, R, S> {
    pub fn new(registry: &'a R, session: &'a S, config: &'a Config) -> Self {
        Self {
            registry,
            session,
            config,
        }
    }

    pub fn run(&self, args: &InstallerArgs) -> Result<Outcome> {
        arch::check_required(&args.required_archs, arch::default_arch())?;

        let app_id = &args.app_id;
        let remote = args
            .remote
            .as_deref()
            .ok_or_else(|| anyhow!("No remote given for {}", app_id))?;

        if self.registry.is_installed(app_id) {
            info!("{} is already installed", app_id);
            return Ok(Outcome::AlreadyInstalled);
        }
        info!("Could not find flatpak for {}", app_id);

        if args.initial_setup {
            if let Some(skip) = self.initial_setup_gate(app_id)? {
                return Ok(skip);
            }
        }

        let branch = self.registry.default_branch(remote);
        let unique_id = flatpak::unique_id(app_id, remote, branch.as_deref());

        info!("Opening App Center for {}...", unique_id);
        self.session.open_software_center(&unique_id)?;
        if let Some(source) = &args.source_app_id {
            self.session.refine_source_app(source)?;
        }

        self.registry.wait_for_install(app_id)?;
        if !self.registry.is_installed(app_id) {
            bail!(
                "{} isn't installed - something went wrong in the software center",
                app_id
            );
        }
        info!("{} successfully installed", args.display_name());

        self.post_install(args)?;
        Ok(Outcome::Installed)
    }

    /// Returns the reason to skip, if any, after waiting for the network.
    fn initial_setup_gate(&self, app_id: &str) -> Result<Option<Outcome>> {
        if !config::auto_install_enabled(&self.config.auto_install_config(app_id)) {
            info!("{}: {}", app_id, Outcome::Disabled);
            return Ok(Some(Outcome::Disabled));
        }

        let stamp = Stamp::for_app(&self.config.stamp_dir, app_id)?;
        if stamp.exists() {
            info!(
                "{}: {} ({})",
                app_id,
                Outcome::AlreadyAttempted,
                stamp.path().display()
            );
            return Ok(Some(Outcome::AlreadyAttempted));
        }

        self.session.wait_for_network()?;
        Ok(None)
    }

    fn post_install(&self, args: &InstallerArgs) -> Result<()> {
        let script = self.config.post_install_script(&args.app_id);
        if script.is_file() {
            self.session.run_post_install(&script)?;
        } else {
            debug!("No post-install script at {}", script.display());
        }

        if args.initial_setup {
            self.session.write_stamp(&args.app_id)?;
        }

        if let Some(source) = &args.source_app_id {
            self.session.remove_icon(source)?;
        }
        Ok(())
    }
}
