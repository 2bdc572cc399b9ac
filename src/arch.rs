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

/// Flatpak's name for the architecture we are running on
pub fn default_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86" => "i386",
        "arm" => "arm",
        "aarch64" => "aarch64",
        "x86_64" => "x86_64",
        other => other,
    }
}

/// Some apps are only available for certain architectures
pub fn check_required(required: &[String], current: &str) -> Result<()> {
    if required.is_empty() || required.iter().any(|a| a == current) {
        return Ok(());
    }

    bail!(
        "Found installation of unsupported architecture: {} (required: {})",
        current,
        required.join(", ")
    )
}
