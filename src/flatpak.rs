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

//! The flatpak system installation, read straight from its on-disk layout.
//! Installing, updating and removing apps stays with flatpak itself; this
//! module only answers questions about what is there.

use crate::events;
use anyhow::Result;
use ini::Ini;
use notify::{EventKind, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;

const DEFAULT_BRANCH_KEY: &str = "xa.default-branch";

/// Everything the helpers need to know about installed apps.
pub trait Registry {
    /// Lookup failures count as "not installed".
    fn is_installed(&self, app_id: &str) -> bool;

    /// The exported desktop file used to launch the app
    fn desktop_file(&self, app_id: &str) -> Option<PathBuf>;

    fn default_branch(&self, remote: &str) -> Option<String>;

    /// Blocks until a change to the installation shows `app_id` installed.
    fn wait_for_install(&self, app_id: &str) -> Result<()>;
}

pub struct Installation {
    path: PathBuf,
}

impl Installation {
    /// Nothing is touched until the first query
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Resolves the deploy directory the `current` link points at
    fn deploy_dir(&self, app_id: &str) -> Result<PathBuf> {
        validate_app_id(app_id)?;

        let current = self.path.join("app").join(app_id).join("current");
        let active = fs::canonicalize(current.join("active"))?;
        if !active.is_dir() {
            bail!("{} is not a directory", active.display());
        }
        Ok(active)
    }

    fn repo_config(&self) -> PathBuf {
        self.path.join("repo").join("config")
    }
}

/// App IDs end up in filesystem paths, some of them written as root.
/// Follows flatpak's rules: at least three dot-separated elements made of
/// `[A-Za-z0-9_-]`, none starting with a digit.
pub fn validate_app_id(app_id: &str) -> Result<()> {
    let elements: Vec<&str> = app_id.split('.').collect();
    let valid = app_id.len() <= 255
        && elements.len() >= 3
        && elements.iter().all(|e| {
            !e.is_empty()
                && !e.starts_with(|c: char| c.is_ascii_digit())
                && e.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });

    if !valid {
        bail!("Invalid app ID {:?}", app_id);
    }
    Ok(())
}

/// Matches `[remote "name"]` groups, quoted or not
fn is_remote_group(group: &str, remote: &str) -> bool {
    let name = match group.strip_prefix("remote ") {
        Some(rest) => rest.trim(),
        None => return false,
    };
    let name = name
        .strip_prefix('"')
        .and_then(|n| n.strip_suffix('"'))
        .unwrap_or(name);
    name == remote
}

fn default_branch_from(conf: &Ini, remote: &str) -> Result<Option<String>> {
    let props = conf
        .iter()
        .find_map(|(group, props)| match group {
            Some(g) if is_remote_group(g, remote) => Some(props),
            _ => None,
        })
        .ok_or_else(|| anyhow!("no such remote"))?;

    Ok(props
        .get(DEFAULT_BRANCH_KEY)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from))
}

impl Registry for Installation {
    fn is_installed(&self, app_id: &str) -> bool {
        match self.deploy_dir(app_id) {
            Ok(dir) => {
                debug!("{} is deployed at {}", app_id, dir.display());
                true
            }
            Err(e) => {
                info!("{} application is not installed ({})", app_id, e);
                false
            }
        }
    }

    fn desktop_file(&self, app_id: &str) -> Option<PathBuf> {
        let path = self
            .path
            .join("exports/share/applications")
            .join(format!("{}.desktop", app_id));
        path.is_file().then_some(path)
    }

    fn default_branch(&self, remote: &str) -> Option<String> {
        let path = self.repo_config();
        let branch = Ini::load_from_file(&path)
            .map_err(|e| anyhow!("{}: {}", path.display(), e))
            .and_then(|conf| default_branch_from(&conf, remote));

        match branch {
            Ok(b) => b,
            Err(e) => {
                warn!("Could not find flatpak remote {}: {}", remote, e);
                None
            }
        }
    }

    fn wait_for_install(&self, app_id: &str) -> Result<()> {
        let (tx, rx) = channel();
        let mut monitor = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) if !matches!(event.kind, EventKind::Access(_)) => {
                    // The receiver goes away once we have seen the install
                    let _ = tx.send(event);
                }
                Ok(_) => {}
                Err(e) => warn!("Installation monitor error: {}", e),
            }
        })?;
        monitor
            .watch(&self.path, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Could not monitor installation {}: {}", self.path.display(), e))?;

        // It may have landed before the monitor was in place
        if !self.is_installed(app_id) {
            debug!("Waiting for {} to be installed", app_id);
            events::wait_for(rx.iter(), |event| {
                trace!("Installation changed: {:?}", event);
                self.is_installed(app_id)
            })?;
        }

        drop(monitor);
        info!("{} has been installed", app_id);
        Ok(())
    }
}

/// The full ID the software center expects, pointing at the remote's
/// default branch. Falls back to the bare app ID.
pub fn unique_id(app_id: &str, remote: &str, default_branch: Option<&str>) -> String {
    match default_branch {
        Some(branch) => format!(
            "system/flatpak/{}/desktop/{}.desktop/{}",
            remote, app_id, branch
        ),
        None => app_id.to_string(),
    }
}
