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

//! Maximum adverse/favorable excursion from OHLC bars.
//!
//! Excursions measure the worst and best unrealized price movement observed
//! over a position's lifetime, expressed in pips. A trade with no bar data
//! reports no excursion at all rather than zero — zero would falsely imply
//! the price never moved.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use tradeaudit_core::parsing::parse_decimal;
use tradeaudit_model::{Bar, OrderSide};
use ustr::Ustr;

/// The maximum adverse and favorable excursions of a position, in pips.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Excursion {
    /// Most adverse move against the position (zero or negative).
    pub mae_pips: Decimal,
    /// Most favorable move for the position (zero or positive).
    pub mfe_pips: Decimal,
}

/// Computes the maximum adverse/favorable excursion over the given bars for
/// a position opened at `open_price` on `side`, converted to pips with
/// `pip_size`.
///
/// Returns `None` when no bars are supplied.
#[must_use]
pub fn max_excursion(
    bars: &[Bar],
    open_price: Decimal,
    side: OrderSide,
    pip_size: Decimal,
) -> Option<Excursion> {
    if bars.is_empty() || pip_size <= Decimal::ZERO {
        return None;
    }

    let mut mae = Decimal::ZERO;
    let mut mfe = Decimal::ZERO;
    for bar in bars {
        let (adverse, favorable) = match side {
            OrderSide::Buy => (
                Decimal::ZERO.min(bar.low - open_price),
                Decimal::ZERO.max(bar.high - open_price),
            ),
            OrderSide::Sell => (
                Decimal::ZERO.min(open_price - bar.high),
                Decimal::ZERO.max(open_price - bar.low),
            ),
        };
        mae = mae.min(adverse);
        mfe = mfe.max(favorable);
    }

    Some(Excursion {
        mae_pips: mae / pip_size,
        mfe_pips: mfe / pip_size,
    })
}

/// Loads the OHLC bars for `symbol` within `[start_ms, end_ms]` from
/// `<symbol lowercase>_bars.csv` under the given directory.
///
/// Bar data is an optional collaborator input: a missing file, unreadable
/// content, or malformed rows all degrade to fewer (or zero) bars, never an
/// error.
#[must_use]
pub fn load_bars(bars_dir: &Path, symbol: Ustr, start_ms: i64, end_ms: i64) -> Vec<Bar> {
    let path = bars_dir.join(format!("{}_bars.csv", symbol.as_str().to_lowercase()));
    if !path.exists() {
        return Vec::new();
    }
    let mut reader = match ReaderBuilder::new().flexible(true).from_path(&path) {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("Failed to open bars file {}: {e}", path.display());
            return Vec::new();
        }
    };
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            log::warn!("Failed to read bars header from {}: {e}", path.display());
            return Vec::new();
        }
    };
    let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
    let (Some(ts), Some(open), Some(high), Some(low), Some(close)) = (
        column("timestamp_ms"),
        column("open"),
        column("high"),
        column("low"),
        column("close"),
    ) else {
        log::warn!("Bars file {} is missing required columns", path.display());
        return Vec::new();
    };

    let mut bars = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(_) => continue, // malformed row, keep going
        }
        let Some(epoch_ms) = record.get(ts).and_then(|v| v.trim().parse::<i64>().ok()) else {
            continue;
        };
        if !(start_ms..=end_ms).contains(&epoch_ms) {
            continue;
        }
        let parse = |i: usize| record.get(i).and_then(parse_decimal);
        let (Some(open), Some(high), Some(low), Some(close)) =
            (parse(open), parse(high), parse(low), parse(close))
        else {
            continue;
        };
        bars.push(Bar {
            symbol,
            epoch_ms,
            open,
            high,
            low,
            close,
        });
    }
    bars
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
