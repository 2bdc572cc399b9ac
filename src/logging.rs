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

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use systemd_journal_logger::JournalLog;

/// Sends every record to the console and, when reachable, the journal.
struct HelperLogger {
    console: env_logger::Logger,
    journal: Option<JournalLog>,
}

impl Log for HelperLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.console.log(record);
        if let Some(journal) = &self.journal {
            journal.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(journal) = &self.journal {
            journal.flush();
        }
    }
}

pub fn level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the process-wide logger. Called once, first thing in main.
pub fn setup(identifier: &str, debug: bool) {
    let level = level(debug);

    let console = env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());

            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%F %T%.3f"),
                style.value(record.level()),
                record.args()
            )
        })
        .build();

    let (journal, journal_err) = match JournalLog::new() {
        Ok(j) => (Some(j.with_syslog_identifier(identifier.to_string())), None),
        Err(e) => (None, Some(e)),
    };

    let logger = HelperLogger { console, journal };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }

    if let Some(e) = journal_err {
        warn!("Not logging to the journal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_level() {
        assert_eq!(level(false), LevelFilter::Info);
        assert_eq!(level(true), LevelFilter::Debug);
    }
}
