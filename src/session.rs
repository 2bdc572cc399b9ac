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
use crate::dbus::{network_manager, shell, software};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The desktop session and system services the helpers hand work off to.
/// Every error here is fatal for the helper.
pub trait Session {
    fn launch(&self, desktop_file: &Path, params: &[String]) -> Result<()>;

    /// Starts the installer helper and returns without waiting for it
    fn spawn_installer(&self, args: &[String]) -> Result<()>;

    fn open_software_center(&self, unique_id: &str) -> Result<()>;

    fn refine_source_app(&self, source_app_id: &str) -> Result<()>;

    fn remove_icon(&self, source_app_id: &str) -> Result<()>;

    fn wait_for_network(&self) -> Result<()>;

    fn run_post_install(&self, script: &Path) -> Result<()>;

    /// Creates the stamp for `app_id` as root
    fn write_stamp(&self, app_id: &str) -> Result<()>;
}

pub struct DesktopSession {
    installer: PathBuf,
    software_center: String,
}

impl DesktopSession {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            installer: config.installer_path()?,
            software_center: config.software_center.clone(),
        })
    }

    /// The elevated side reads only the system config, so nothing but the
    /// app ID is passed across.
    fn stamp_command(&self, app_id: &str) -> Command {
        let mut cmd = Command::new("pkexec");
        cmd.arg(&self.installer)
            .args(["--create-stamp", "--app-id", app_id]);
        cmd
    }

    fn spawn(what: &str, cmd: &mut Command) -> Result<()> {
        let child = cmd
            .spawn()
            .map_err(|e| anyhow!("Could not launch {}: {}", what, e))?;
        info!("Running {} with PID {}", what, child.id());
        Ok(())
    }

    fn run(what: &str, cmd: &mut Command) -> Result<()> {
        debug!("Running {:?}", cmd);
        let status = cmd
            .status()
            .map_err(|e| anyhow!("Could not launch {}: {}", what, e))?;
        if !status.success() {
            bail!("{} failed: {}", what, status);
        }
        Ok(())
    }
}

impl Session for DesktopSession {
    fn launch(&self, desktop_file: &Path, params: &[String]) -> Result<()> {
        info!("Launching {}", desktop_file.display());
        Self::run(
            &desktop_file.display().to_string(),
            Command::new("gio").arg("launch").arg(desktop_file).args(params),
        )
    }

    fn spawn_installer(&self, args: &[String]) -> Result<()> {
        Self::spawn(
            &self.installer.display().to_string(),
            Command::new(&self.installer).args(args),
        )
    }

    fn open_software_center(&self, unique_id: &str) -> Result<()> {
        Self::spawn(
            &self.software_center,
            Command::new(&self.software_center).arg(format!("--details={}", unique_id)),
        )
    }

    fn refine_source_app(&self, source_app_id: &str) -> Result<()> {
        software::refine(source_app_id)
    }

    fn remove_icon(&self, source_app_id: &str) -> Result<()> {
        shell::remove_icon(source_app_id)
    }

    fn wait_for_network(&self) -> Result<()> {
        network_manager::wait_for_network()
    }

    fn run_post_install(&self, script: &Path) -> Result<()> {
        info!("Running post-install script {}", script.display());
        Self::run(&script.display().to_string(), &mut Command::new(script))
    }

    fn write_stamp(&self, app_id: &str) -> Result<()> {
        Self::run("pkexec", &mut self.stamp_command(app_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn session(dir: &Path) -> DesktopSession {
        let config = Config {
            installer_path: Some(dir.join("installer")),
            ..Config::default()
        };
        DesktopSession::new(&config).unwrap()
    }

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("post-install");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn post_install_success() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let path = script(dir.path(), &format!("touch {}", marker.display()));

        session(dir.path()).run_post_install(&path).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn post_install_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(dir.path(), "exit 3");
        assert!(session(dir.path()).run_post_install(&path).is_err());
    }

    #[test]
    fn missing_installer_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = session(dir.path())
            .spawn_installer(&["--app-id".to_string(), "com.example.App".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("Could not launch"));
    }

    #[test]
    fn stamp_command_passes_only_app_id() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = session(dir.path()).stamp_command("com.example.App");

        assert_eq!(cmd.get_program(), "pkexec");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(
            args,
            vec![
                dir.path().join("installer").as_os_str(),
                OsStr::new("--create-stamp"),
                OsStr::new("--app-id"),
                OsStr::new("com.example.App"),
            ]
        );
    }
}
