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

/// Blocks on an event source until the first event accepted by `done`.
///
/// Event sources are anything iterator-shaped: the receiving end of a
/// channel fed by a file watcher, or a D-Bus signal stream. The source is
/// consumed, so dropping it afterwards unsubscribes. A source that runs dry
/// before a match is an error since nothing else can wake us up.
pub fn wait_for<I, F>(source: I, mut done: F) -> Result<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> bool,
{
    for event in source {
        if done(&event) {
            return Ok(event);
        }
        trace!("Ignoring event");
    }

    Err(anyhow!("Event source closed before the expected event arrived"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn returns_first_match() {
        let (tx, rx) = channel();
        for i in [1, 5, 70, 80] {
            tx.send(i).unwrap();
        }
        assert_eq!(wait_for(rx.iter(), |s| *s >= 70).unwrap(), 70);
        // Later events are left alone
        assert_eq!(rx.try_recv().unwrap(), 80);
    }

    #[test]
    fn closed_source_is_error() {
        let (tx, rx) = channel::<u32>();
        tx.send(1).unwrap();
        drop(tx);
        assert!(wait_for(rx.iter(), |s| *s == 2).is_err());
    }
}
