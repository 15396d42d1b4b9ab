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

//! Fill ingestion from heterogeneous CSV order logs.
//!
//! Upstream order logs come from multiple venues with no single schema, so
//! each logical field is resolved against a prioritized list of column
//! aliases, once per file. Rows that cannot yield a vetted fill are dropped
//! silently; only a missing or unreadable source is an error.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use ahash::AHashMap;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use tradeaudit_core::{
    datetime::parse_epoch_ms,
    parsing::{decimal_or_zero, parse_decimal},
};
use tradeaudit_model::{Fill, OrderSide};
use ustr::Ustr;

use crate::error::IngestError;

/// Column aliases for the phase/marker field.
pub const PHASE_COLUMNS: &[&str] = &["phase", "event", "status", "type"];

/// Column aliases for the instrument symbol.
pub const SYMBOL_COLUMNS: &[&str] = &["symbol", "instrument", "ticker"];

/// Column aliases for the order side.
pub const SIDE_COLUMNS: &[&str] = &["side", "direction"];

/// Column aliases for the order identifier.
pub const ORDER_ID_COLUMNS: &[&str] =
    &["orderId", "order_id", "client_order_id", "broker_order_id"];

/// Column aliases for the execution price, in priority order.
pub const PRICE_COLUMNS: &[&str] = &[
    "execPrice",
    "price_filled",
    "price",
    "fill_price",
    "executionPrice",
    "fillPrice",
    "executed_price",
];

/// Column aliases for the filled volume, in priority order.
pub const VOLUME_COLUMNS: &[&str] = &[
    "filledSize",
    "size_filled",
    "size",
    "volume",
    "requestedVolume",
    "quantity",
    "theoretical_units",
    "theoretical_lots",
    "requested_lots",
];

/// Column aliases for a numeric epoch time field.
pub const EPOCH_COLUMNS: &[&str] = &[
    "epoch_ms",
    "timestamp_ms",
    "fill_epoch_ms",
    "event_epoch_ms",
    "time_ms",
    "epoch",
];

/// Column aliases for an ISO text time field.
pub const ISO_COLUMNS: &[&str] = &[
    "timestamp_iso",
    "fill_time",
    "fill_timestamp",
    "event_time",
    "timestamp",
];

/// Column aliases for per-fill commission.
pub const COMMISSION_COLUMNS: &[&str] = &["commission", "fee", "brokerage_fee"];

/// Column aliases for per-fill spread cost.
pub const SPREAD_COLUMNS: &[&str] = &["spread_cost", "spread", "bid_ask_spread_cost"];

/// Column aliases for per-fill slippage in pips.
pub const SLIPPAGE_COLUMNS: &[&str] = &["slippage_pips", "slippage", "price_slippage_pips"];

// Exact column names probed when the resolved price column yields no value
// for a particular row.
const PRICE_FALLBACK_COLUMNS: &[&str] =
    &["execPrice", "price_filled", "fill_price", "price", "intendedPrice"];

// Exact column names probed when neither resolved time column yields a value.
const TIME_FALLBACK_COLUMNS: &[&str] = &["timestamp_iso", "fill_time", "timestamp"];

/// Resolved header indices for each logical fill field.
///
/// Resolution runs once per file, never per row: for each field the first
/// exact case-insensitive header match among the aliases wins, then the first
/// header containing an alias as a substring.
#[derive(Debug)]
pub struct ColumnMap {
    phase: Option<usize>,
    symbol: Option<usize>,
    side: Option<usize>,
    order_id: Option<usize>,
    price: Option<usize>,
    volume: Option<usize>,
    epoch: Option<usize>,
    iso: Option<usize>,
    commission: Option<usize>,
    spread: Option<usize>,
    slippage: Option<usize>,
    by_name: AHashMap<String, usize>,
}

impl ColumnMap {
    /// Resolves the column map from the given CSV headers.
    #[must_use]
    pub fn resolve(headers: &StringRecord) -> Self {
        let by_name = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();
        Self {
            phase: pick_column(headers, PHASE_COLUMNS),
            symbol: pick_column(headers, SYMBOL_COLUMNS),
            side: pick_column(headers, SIDE_COLUMNS),
            order_id: pick_column(headers, ORDER_ID_COLUMNS),
            price: pick_column(headers, PRICE_COLUMNS),
            volume: pick_column(headers, VOLUME_COLUMNS),
            epoch: pick_column(headers, EPOCH_COLUMNS),
            iso: pick_column(headers, ISO_COLUMNS),
            commission: pick_column(headers, COMMISSION_COLUMNS),
            spread: pick_column(headers, SPREAD_COLUMNS),
            slippage: pick_column(headers, SLIPPAGE_COLUMNS),
            by_name,
        }
    }

    fn value<'r>(&self, record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
        index.and_then(|i| record.get(i))
    }

    fn named<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|&i| record.get(i))
    }
}

/// Returns the index of the first header matching any of the candidate
/// aliases: exact case-insensitive matches take priority over substring
/// matches.
#[must_use]
pub fn pick_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        for (i, name) in headers.iter().enumerate() {
            if name.trim().eq_ignore_ascii_case(candidate) {
                return Some(i);
            }
        }
    }
    for (i, name) in headers.iter().enumerate() {
        let name = name.trim().to_lowercase();
        for candidate in candidates {
            if name.contains(&candidate.to_lowercase()) {
                return Some(i);
            }
        }
    }
    None
}

/// Reads fills from the orders CSV at the given path.
///
/// Rows whose marker column does not equal `fill_marker` (case-insensitive),
/// or that fail side, volume, price, or time admission, are skipped silently.
/// The returned fills are sorted ascending by event time with input order
/// preserved among ties.
///
/// # Errors
///
/// Returns [`IngestError::MissingInput`] if the file does not exist, or an
/// I/O or CSV error if it cannot be read.
pub fn read_fills(path: &Path, fill_marker: &str) -> Result<Vec<Fill>, IngestError> {
    if !path.exists() {
        return Err(IngestError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path)?;
    read_fills_from_reader(BufReader::new(file), fill_marker)
}

/// Reads fills from any CSV reader, applying the same admission rules as
/// [`read_fills`].
///
/// # Errors
///
/// Returns an error if the source is not structurally valid CSV.
pub fn read_fills_from_reader<R: Read>(
    reader: R,
    fill_marker: &str,
) -> Result<Vec<Fill>, IngestError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers);
    let marker = fill_marker.trim().to_uppercase();

    let mut fills: Vec<Fill> = Vec::new();
    let mut record = StringRecord::new();

    while csv_reader.read_record(&mut record)? {
        if columns.phase.is_some() {
            let phase = columns
                .value(&record, columns.phase)
                .unwrap_or_default()
                .trim()
                .to_uppercase();
            if phase != marker {
                continue;
            }
        }

        let Some(side) = columns
            .value(&record, columns.side)
            .and_then(OrderSide::from_raw)
        else {
            continue;
        };

        let symbol_raw = columns
            .value(&record, columns.symbol)
            .unwrap_or_default()
            .trim()
            .to_uppercase();
        let symbol = if symbol_raw.is_empty() {
            Ustr::from("UNKNOWN")
        } else {
            Ustr::from(&symbol_raw)
        };

        let Some(volume) = columns
            .value(&record, columns.volume)
            .and_then(parse_decimal)
            .filter(|v| *v > Decimal::ZERO)
        else {
            continue;
        };

        let mut price = columns.value(&record, columns.price).and_then(parse_decimal);
        if price.is_none() {
            for name in PRICE_FALLBACK_COLUMNS {
                price = columns.named(&record, name).and_then(parse_decimal);
                if price.is_some() {
                    break;
                }
            }
        }
        let Some(price) = price else {
            continue;
        };

        let mut epoch_ms = columns.value(&record, columns.epoch).and_then(parse_epoch_ms);
        if epoch_ms.is_none() {
            epoch_ms = columns.value(&record, columns.iso).and_then(parse_epoch_ms);
        }
        if epoch_ms.is_none() {
            for name in TIME_FALLBACK_COLUMNS {
                epoch_ms = columns.named(&record, name).and_then(parse_epoch_ms);
                if epoch_ms.is_some() {
                    break;
                }
            }
        }
        let Some(epoch_ms) = epoch_ms else {
            continue;
        };

        // Order ids are synthesized from the admission position so that
        // re-running over the same input reproduces identical output
        let order_id = columns
            .value(&record, columns.order_id)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| format!("fill_{}", fills.len() + 1), ToString::to_string);

        let commission = decimal_or_zero(columns.value(&record, columns.commission));
        let spread_cost = decimal_or_zero(columns.value(&record, columns.spread));
        let slippage_pips = decimal_or_zero(columns.value(&record, columns.slippage));

        fills.push(Fill::new(
            symbol,
            side,
            volume,
            price,
            epoch_ms,
            order_id,
            commission,
            spread_cost,
            slippage_pips,
        ));
    }

    // Stable sort keeps input order among equal timestamps, which keeps
    // downstream matching deterministic
    fills.sort_by_key(|f| f.epoch_ms);
    Ok(fills)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
