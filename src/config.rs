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

use anyhow::Result;
use ini::Ini;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/eos-install-app-helper/helper.yaml";
pub const INSTALLER_NAME: &str = "eos-install-app-helper-installer";

const AUTO_INSTALL_GROUP: &str = "Install";
const AUTO_INSTALL_KEY: &str = "AutomaticInstallEnabled";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all(deserialize = "kebab-case"), default, deny_unknown_fields)]
pub struct Config {
    /// Root of the flatpak system installation
    pub installation_path: PathBuf,
    pub stamp_dir: PathBuf,
    /// Holds one `<app-id>.conf` per app
    pub auto_install_dir: PathBuf,
    pub post_install_dir: PathBuf,
    /// Defaults to the installer next to the running binary
    pub installer_path: Option<PathBuf>,
    pub software_center: String,
}

impl Default for Config {
    fn default() -> Self {
        let installation_path = std::env::var_os("FLATPAK_SYSTEM_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/var/lib/flatpak"));

        Self {
            installation_path,
            stamp_dir: PathBuf::from("/var/lib/eos-install-app-helper"),
            auto_install_dir: PathBuf::from("/etc/eos-install-app-helper"),
            post_install_dir: PathBuf::from("/usr/share/eos-install-app-helper/post-install"),
            installer_path: None,
            software_center: "gnome-software".to_string(),
        }
    }
}

impl Config {
    /// A missing default config means defaults, a missing explicit one is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !explicit && !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config = std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::parse(&config).map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn parse(config: &str) -> Result<Self> {
        // An empty document deserialises to unit, not a map
        if config.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(config)?)
    }

    pub fn installer_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.installer_path {
            return Ok(path.clone());
        }
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent directory", exe.display()))?;
        Ok(dir.join(INSTALLER_NAME))
    }

    pub fn auto_install_config(&self, app_id: &str) -> PathBuf {
        self.auto_install_dir.join(format!("{}.conf", app_id))
    }

    pub fn post_install_script(&self, app_id: &str) -> PathBuf {
        self.post_install_dir.join(app_id)
    }
}

/// Key-file booleans
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn read_auto_install(conf: &Ini) -> Result<bool> {
    let value = conf
        .section(Some(AUTO_INSTALL_GROUP))
        .and_then(|s| s.get(AUTO_INSTALL_KEY))
        .ok_or_else(|| anyhow!("no {} key in [{}]", AUTO_INSTALL_KEY, AUTO_INSTALL_GROUP))?;

    parse_bool(value).ok_or_else(|| anyhow!("{}={} is not a boolean", AUTO_INSTALL_KEY, value))
}

/// Whether unattended installation is switched on. Any problem reading the
/// flag is logged and counts as disabled.
pub fn auto_install_enabled(path: &Path) -> bool {
    let conf = match Ini::load_from_file(path) {
        Ok(c) => c,
        Err(e) => {
            info!("Could not read {}: {}", path.display(), e);
            return false;
        }
    };

    match read_auto_install(&conf) {
        Ok(enabled) => enabled,
        Err(e) => {
            warn!("Invalid auto-install config {}: {}", path.display(), e);
            false
        }
    }
}
