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
use crate::args::LauncherArgs;
use crate::flatpak::Registry;
use crate::session::Session;
use anyhow::Result;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Outcome {
    Launched,
    InstallerStarted,
}

pub struct Launcher<'a, R: Registry, S: Session> {
    registry: &'a R,
    session: &'a S,
}

impl<'a, R: Registry, S: Session> Launcher<'a, R, S> {
    pub fn new(registry: &'a R, session: &'a S) -> Self {
        Self { registry, session }
    }

    pub fn run(&self, args: &LauncherArgs) -> Result<Outcome> {
        arch::check_required(&args.required_archs, arch::default_arch())?;

        let name = args.display_name();
        if self.registry.is_installed(&args.app_id) {
            info!("Flatpak for {} found. Launching...", name);
            let desktop_file = self
                .registry
                .desktop_file(&args.app_id)
                .ok_or_else(|| anyhow!("Could not find desktop file for {}", args.app_id))?;
            self.session.launch(&desktop_file, &args.params)?;
            return Ok(Outcome::Launched);
        }

        info!("Could not find flatpak for {}. Running installation helper...", name);
        self.session.spawn_installer(&args.installer_args())?;
        Ok(Outcome::InstallerStarted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRegistry, FakeSession};
    use clap::Parser;

    fn args(extra: &[&str]) -> LauncherArgs {
        let mut argv = vec![
            "eos-install-app-helper",
            "--app-id",
            "com.example.App",
            "--remote",
            "eos-apps",
        ];
        argv.extend_from_slice(extra);
        LauncherArgs::parse_from(argv)
    }

    #[test]
    fn installed_app_is_launched() {
        let registry = FakeRegistry::installed();
        let session = FakeSession::default();

        let outcome = Launcher::new(&registry, &session)
            .run(&args(&["--", "--incognito"]))
            .unwrap();

        assert_eq!(outcome, Outcome::Launched);
        assert_eq!(
            session.calls(),
            vec!["launch /var/lib/flatpak/exports/share/applications/com.example.App.desktop --incognito"]
        );
        assert_eq!(session.count("installer"), 0);
    }

    #[test]
    fn missing_desktop_file_is_fatal() {
        let registry = FakeRegistry {
            desktop_file: None,
            ..FakeRegistry::installed()
        };
        let session = FakeSession::default();

        let err = Launcher::new(&registry, &session).run(&args(&[])).unwrap_err();
        assert!(err.to_string().contains("Could not find desktop file"));
        assert!(session.calls().is_empty());
    }

    #[test]
    fn launch_failure_is_fatal() {
        let registry = FakeRegistry::installed();
        let session = FakeSession {
            fail_launch: true,
            ..FakeSession::default()
        };

        assert!(Launcher::new(&registry, &session).run(&args(&[])).is_err());
    }

    #[test]
    fn missing_app_starts_installer_once() {
        let registry = FakeRegistry::missing();
        let session = FakeSession::default();

        let outcome = Launcher::new(&registry, &session)
            .run(&args(&["--source-app-id", "eos-example"]))
            .unwrap();

        assert_eq!(outcome, Outcome::InstallerStarted);
        assert_eq!(
            session.calls(),
            vec!["installer --app-id com.example.App --remote eos-apps --source-app-id eos-example"]
        );
        assert_eq!(session.count("launch"), 0);
    }

    #[test]
    fn initial_setup_still_launches() {
        let registry = FakeRegistry::installed();
        let session = FakeSession::default();

        let outcome = Launcher::new(&registry, &session)
            .run(&args(&["--initial-setup"]))
            .unwrap();

        assert_eq!(outcome, Outcome::Launched);
        assert_eq!(session.count("launch"), 1);
        assert_eq!(session.count("installer"), 0);
    }

    #[test]
    fn initial_setup_forwarded_to_installer() {
        let registry = FakeRegistry::missing();
        let session = FakeSession::default();

        Launcher::new(&registry, &session)
            .run(&args(&["--initial-setup"]))
            .unwrap();

        assert_eq!(
            session.calls(),
            vec!["installer --app-id com.example.App --remote eos-apps --initial-setup"]
        );
    }

    #[test]
    fn unsupported_arch_fails_first() {
        let registry = FakeRegistry::installed();
        let session = FakeSession::default();

        let err = Launcher::new(&registry, &session)
            .run(&args(&["--required-archs", "not-an-arch"]))
            .unwrap_err();

        assert!(err.to_string().contains("unsupported architecture"));
        assert_eq!(registry.queries.get(), 0);
        assert!(session.calls().is_empty());
    }
}
