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

//! Recording stand-ins for the installation and the desktop session.

use crate::flatpak::Registry;
use crate::session::Session;
use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct FakeRegistry {
    pub installed: Cell<bool>,
    /// Whether waiting ends with the app installed
    pub install_on_wait: bool,
    pub desktop_file: Option<PathBuf>,
    pub default_branch: Option<String>,
    pub waits: Cell<usize>,
    pub queries: Cell<usize>,
}

impl FakeRegistry {
    pub fn installed() -> Self {
        Self {
            installed: Cell::new(true),
            desktop_file: Some(PathBuf::from(
                "/var/lib/flatpak/exports/share/applications/com.example.App.desktop",
            )),
            ..Self::default()
        }
    }

    pub fn missing() -> Self {
        Self {
            install_on_wait: true,
            default_branch: Some("eos3".to_string()),
            ..Self::default()
        }
    }
}

impl Registry for FakeRegistry {
    fn is_installed(&self, _app_id: &str) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.installed.get()
    }

    fn desktop_file(&self, _app_id: &str) -> Option<PathBuf> {
        self.desktop_file.clone()
    }

    fn default_branch(&self, _remote: &str) -> Option<String> {
        self.default_branch.clone()
    }

    fn wait_for_install(&self, _app_id: &str) -> Result<()> {
        self.waits.set(self.waits.get() + 1);
        self.installed.set(self.install_on_wait);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSession {
    pub calls: RefCell<Vec<String>>,
    pub fail_launch: bool,
}

impl FakeSession {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl Session for FakeSession {
    fn launch(&self, desktop_file: &Path, params: &[String]) -> Result<()> {
        self.record(format!("launch {} {}", desktop_file.display(), params.join(" ")));
        if self.fail_launch {
            bail!("Could not launch {}", desktop_file.display());
        }
        Ok(())
    }

    fn spawn_installer(&self, args: &[String]) -> Result<()> {
        self.record(format!("installer {}", args.join(" ")));
        Ok(())
    }

    fn open_software_center(&self, unique_id: &str) -> Result<()> {
        self.record(format!("software-center {}", unique_id));
        Ok(())
    }

    fn refine_source_app(&self, source_app_id: &str) -> Result<()> {
        self.record(format!("refine {}", source_app_id));
        Ok(())
    }

    fn remove_icon(&self, source_app_id: &str) -> Result<()> {
        self.record(format!("remove-icon {}", source_app_id));
        Ok(())
    }

    fn wait_for_network(&self) -> Result<()> {
        self.record("network".to_string());
        Ok(())
    }

    fn run_post_install(&self, script: &Path) -> Result<()> {
        self.record(format!("post-install {}", script.display()));
        Ok(())
    }

    fn write_stamp(&self, app_id: &str) -> Result<()> {
        self.record(format!("stamp {}", app_id));
        Ok(())
    }
}
