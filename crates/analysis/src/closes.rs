// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Trade-close log lookup.
//!
//! Engines often emit a free-text close log alongside the structured fills
//! export. Its timestamps are authoritative for reporting, so when a close
//! order appears in the log, the logged timestamp takes precedence over the
//! fill's own time. The log is an optional collaborator input: a missing or
//! unreadable file degrades to an empty lookup.

use std::{fs, path::Path, sync::LazyLock};

use ahash::AHashMap;
use regex::Regex;
use rust_decimal::Decimal;
use tradeaudit_core::parsing::parse_decimal;

static CLOSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ts>\S+)\s+CLOSED\s+(?P<order>[A-Z0-9\-]+)\s+[^=]+size=(?P<size>[-0-9.]+)\s+pnl=(?P<pnl>[-0-9.eE]+)",
    )
    .expect("valid close-line pattern")
});

/// One parsed close-log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseLogEntry {
    /// Timestamp token exactly as logged.
    pub timestamp: String,
    /// Engine-reported P&L for the close.
    pub pnl: Decimal,
}

/// An order-keyed index over a free-text trade-close log.
#[derive(Clone, Debug, Default)]
pub struct CloseLog {
    entries: AHashMap<String, CloseLogEntry>,
}

impl CloseLog {
    /// Loads and indexes the close log at the given path.
    ///
    /// Lines that do not match the close pattern are ignored. When the same
    /// order is closed more than once, the last line wins. A missing or
    /// unreadable file yields an empty log.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::from_text(&content)
    }

    /// Indexes the given close-log text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut entries = AHashMap::new();
        for line in text.lines() {
            let Some(caps) = CLOSE_LINE.captures(line.trim()) else {
                continue;
            };
            let Some(pnl) = parse_decimal(&caps["pnl"]) else {
                continue;
            };
            entries.insert(
                normalize_order_id(&caps["order"]),
                CloseLogEntry {
                    timestamp: caps["ts"].to_string(),
                    pnl,
                },
            );
        }
        Self { entries }
    }

    /// Returns the logged close entry for the given order, if any.
    #[must_use]
    pub fn get(&self, order_id: &str) -> Option<&CloseLogEntry> {
        self.entries.get(&normalize_order_id(order_id))
    }

    /// Returns the number of indexed close entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalizes an order identifier for log lookup: strips a single leading
/// `T-` tag and lowercases the remainder.
fn normalize_order_id(raw: &str) -> String {
    raw.strip_prefix("T-").unwrap_or(raw).to_lowercase()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
