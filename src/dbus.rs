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
use ::dbus::blocking::Connection;

pub mod network_manager;
pub mod shell;
pub mod software;

pub(crate) fn session_connection() -> Result<Connection> {
    // Requires DBUS_SESSION_BUS_ADDRESS to be set
    match Connection::new_session() {
        Ok(c) => Ok(c),
        Err(e) => {
            bail!("Failed to connect to DBUS session bus, is DBUS_SESSION_BUS_ADDRESS set? {}", e);
        }
    }
}
