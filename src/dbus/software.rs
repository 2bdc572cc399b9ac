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
use ::dbus::arg::{PropMap, Variant};
use std::time::Duration;

const SOFTWARE_SERVICE: &str = "org.gnome.Software";
const SOFTWARE_PATH: &str = "/org/gnome/Software";

/// Ensure the source app is refined in the software center.
///
/// Going straight to the details page of the new app does not refine the
/// others, and the superseded app has to be refined for its icon to be
/// swapped.
pub fn refine(source_app_id: &str) -> Result<()> {
    info!("Refining source app {}", source_app_id);

    let conn = super::session_connection()?;
    let proxy = conn.with_proxy(SOFTWARE_SERVICE, SOFTWARE_PATH, Duration::from_millis(5000));

    let target = Variant((format!("{}.desktop", source_app_id), "all".to_string()));
    let result: Result<(), ::dbus::Error> = proxy.method_call(
        "org.gtk.Actions",
        "Activate",
        ("refine".to_string(), vec![target], PropMap::new()),
    );

    result.map_err(|e| anyhow!("Failed to refine {}: {}", source_app_id, e))
}
