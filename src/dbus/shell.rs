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
use zbus::blocking::Connection;
use zbus::dbus_proxy;

/// App grid of the desktop shell, on the session bus
#[dbus_proxy(
    interface = "org.gnome.Shell.AppStore",
    default_service = "org.gnome.Shell",
    default_path = "/org/gnome/Shell"
)]
trait AppStore {
    fn remove_application(&self, id: &str) -> zbus::Result<()>;
}

pub fn remove_icon(app_id: &str) -> Result<()> {
    let desktop_id = format!("{}.desktop", app_id);
    info!("Removing {} from the desktop", desktop_id);

    let conn = Connection::session()?;
    let store = AppStoreProxyBlocking::new(&conn)?;
    store
        .remove_application(&desktop_id)
        .map_err(|e| anyhow!("Failed to remove {} from the desktop: {}", desktop_id, e))
}
