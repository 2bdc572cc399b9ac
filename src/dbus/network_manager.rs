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

use crate::events;
use anyhow::Result;
use strum_macros::{Display, FromRepr};
use zbus::blocking::Connection;
use zbus::dbus_proxy;

/// NMState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u32)]
pub enum NmState {
    Unknown = 0,
    Asleep = 10,
    Disconnected = 20,
    Disconnecting = 30,
    Connecting = 40,
    ConnectedLocal = 50,
    ConnectedSite = 60,
    ConnectedGlobal = 70,
}

impl NmState {
    pub fn from_raw(state: u32) -> Self {
        Self::from_repr(state).unwrap_or(Self::Unknown)
    }

    /// Only full connectivity is good enough to fetch apps
    pub fn is_online(self) -> bool {
        self == Self::ConnectedGlobal
    }
}

#[dbus_proxy(
    interface = "org.freedesktop.NetworkManager",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager"
)]
trait NetworkManager {
    #[dbus_proxy(property)]
    fn state(&self) -> zbus::Result<u32>;

    // Named apart from the `State` property, which already owns `receive_state_changed`
    #[dbus_proxy(signal, name = "StateChanged")]
    fn nm_state_changed(&self, state: u32) -> zbus::Result<()>;
}

/// Blocks until NetworkManager reports global connectivity.
pub fn wait_for_network() -> Result<()> {
    let conn = Connection::system()?;
    let nm = NetworkManagerProxyBlocking::new(&conn)?;

    // Subscribe before checking so a change in between is not lost
    let changes = nm.receive_nm_state_changed()?;
    let state = NmState::from_raw(nm.state()?);
    if state.is_online() {
        debug!("Network is already connected");
        return Ok(());
    }

    info!("Network state is {}, waiting for connectivity", state);
    let states = changes.filter_map(|signal| match signal.args() {
        Ok(args) => Some(NmState::from_raw(*args.state())),
        Err(e) => {
            warn!("Ignoring malformed StateChanged signal: {}", e);
            None
        }
    });
    events::wait_for(states, |state| {
        debug!("Network state changed to {}", state);
        state.is_online()
    })?;

    info!("Network is connected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_states() {
        assert_eq!(NmState::from_raw(70), NmState::ConnectedGlobal);
        assert_eq!(NmState::from_raw(60), NmState::ConnectedSite);
        assert_eq!(NmState::from_raw(42), NmState::Unknown);
    }

    #[test]
    fn only_global_is_online() {
        assert!(NmState::ConnectedGlobal.is_online());
        assert!(!NmState::ConnectedSite.is_online());
        assert!(!NmState::Connecting.is_online());
    }

    #[test]
    fn first_online_state_ends_wait() {
        let states = [20u32, 40, 60, 70, 20].into_iter().map(NmState::from_raw);
        let state = events::wait_for(states, |s| s.is_online()).unwrap();
        assert_eq!(state, NmState::ConnectedGlobal);
    }
}
