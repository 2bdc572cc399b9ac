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

use clap::Parser;
use std::path::PathBuf;

/// Launch a flatpak app, or hand off to the installer if it is missing
#[derive(Parser, Debug, Clone)]
#[command(name = "eos-install-app-helper", version, about)]
pub struct LauncherArgs {
    /// Flatpak app ID
    #[arg(long)]
    pub app_id: String,

    /// Flatpak remote the app is installed from
    #[arg(long)]
    pub remote: String,

    /// Human readable app name
    #[arg(long)]
    pub app_name: Option<String>,

    /// App ID whose icon is superseded by this app
    #[arg(long)]
    pub source_app_id: Option<String>,

    /// Unattended first-run install
    #[arg(long)]
    pub initial_setup: bool,

    #[arg(long)]
    pub debug: bool,

    /// Only run on these flatpak architectures
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub required_archs: Vec<String>,

    /// Helper config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extra arguments passed to the app, after `--`
    #[arg(last = true)]
    pub params: Vec<String>,
}

/// Install a flatpak app through the software center
#[derive(Parser, Debug, Clone)]
#[command(name = "eos-install-app-helper-installer", version, about)]
pub struct InstallerArgs {
    /// Flatpak app ID
    #[arg(long)]
    pub app_id: String,

    /// Flatpak remote to install from
    #[arg(long, required_unless_present = "create_stamp")]
    pub remote: Option<String>,

    /// Human readable app name
    #[arg(long)]
    pub app_name: Option<String>,

    /// App ID whose icon is superseded by this app
    #[arg(long)]
    pub source_app_id: Option<String>,

    /// Unattended first-run install
    #[arg(long)]
    pub initial_setup: bool,

    #[arg(long)]
    pub debug: bool,

    /// Only run on these flatpak architectures
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub required_archs: Vec<String>,

    /// Helper config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    // Privileged half of the stamp step, run through pkexec
    #[arg(long, hide = true)]
    pub create_stamp: bool,
}

impl LauncherArgs {
    /// Arguments forwarded to the installer helper
    pub fn installer_args(&self) -> Vec<String> {
        let mut args = vec![
            "--app-id".to_string(),
            self.app_id.clone(),
            "--remote".to_string(),
            self.remote.clone(),
        ];
        if let Some(name) = &self.app_name {
            args.push("--app-name".into());
            args.push(name.clone());
        }
        if let Some(source) = &self.source_app_id {
            args.push("--source-app-id".into());
            args.push(source.clone());
        }
        if self.initial_setup {
            args.push("--initial-setup".into());
        }
        if self.debug {
            args.push("--debug".into());
        }
        if let Some(config) = &self.config {
            args.push("--config".into());
            args.push(config.to_string_lossy().into_owned());
        }
        args
    }

    pub fn display_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(&self.app_id)
    }
}

impl InstallerArgs {
    pub fn display_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(&self.app_id)
    }
}
