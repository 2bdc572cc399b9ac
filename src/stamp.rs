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

use crate::config::Config;
use crate::flatpak::validate_app_id;
use anyhow::Result;
use nix::unistd::{geteuid, Uid};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Records that an automatic installation was already attempted for an app.
/// Only its existence matters; it is never updated or removed.
#[derive(Debug, Clone)]
pub struct Stamp {
    path: PathBuf,
}

impl Stamp {
    /// Fails for anything that is not a flatpak app ID, so the stamp
    /// always lands directly inside `dir`.
    pub fn for_app(dir: &Path, app_id: &str) -> Result<Self> {
        validate_app_id(app_id)?;
        Ok(Self {
            path: dir.join(app_id),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn create_as_root(&self) -> Result<()> {
        self.create_as(geteuid())
    }

    fn create_as(&self, euid: Uid) -> Result<()> {
        if !euid.is_root() {
            bail!("Creating {} requires root", self.path.display());
        }
        self.create()
    }

    pub fn create(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| anyhow!("Failed to create {}: {}", dir.display(), e))?;
        }

        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(_) => {
                info!("Created stamp file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Stamp file {} already exists", self.path.display());
                Ok(())
            }
            Err(e) => Err(anyhow!("Failed to create {}: {}", self.path.display(), e)),
        }
    }
}

/// The privileged half of the stamp step, run through pkexec.
///
/// Only the app ID comes from the caller. The stamp directory always comes
/// from the system config, never from a file the user points us at.
pub fn create_privileged(app_id: &str) -> Result<()> {
    let config = Config::load(None)?;
    Stamp::for_app(&config.stamp_dir, app_id)?.create_as_root()
}
