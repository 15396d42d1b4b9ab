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

//! Final trade record assembly and output.
//!
//! Turns matched fill pairs into fully costed [`ClosedTrade`] records and
//! serializes them as the fixed 19-column reconstruction CSV. Quantization to
//! fixed-point text happens here and nowhere earlier.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Serialize;
use tradeaudit_core::{
    datetime::epoch_ms_to_iso,
    rounding::{quantize, quantize_f64},
};
use tradeaudit_model::{ClosedTrade, RunMetadata};

use crate::{
    closes::CloseLog,
    costing::{compute_costs, holding_minutes},
    error::ReportError,
    excursion::{load_bars, max_excursion},
    matcher::FillMatch,
};

/// The output CSV column set, in serialization order.
pub const OUTPUT_COLUMNS: [&str; 19] = [
    "timestamp",
    "order_id",
    "symbol",
    "position_side",
    "qty",
    "open_time",
    "close_time",
    "open_order_id",
    "close_order_id",
    "open_price",
    "close_price",
    "pnl_currency",
    "gross_pnl",
    "commission",
    "spread_cost",
    "slippage_cost",
    "holding_minutes",
    "mae_pips",
    "mfe_pips",
];

/// Builds fully costed [`ClosedTrade`] records from matched fill pairs.
///
/// The reporting timestamp prefers the close-log entry for the closing order
/// and falls back to the closing fill's own time. Excursions are computed
/// from bar data under `bars_dir` when present; trades without bars carry no
/// excursion.
#[must_use]
pub fn build_trades(
    matches: &[FillMatch],
    metadata: &RunMetadata,
    close_log: &CloseLog,
    bars_dir: Option<&Path>,
) -> Vec<ClosedTrade> {
    let mut trades = Vec::with_capacity(matches.len());

    for m in matches {
        let open_ms = m.open.epoch_ms;
        let close_ms = m.close.epoch_ms.max(open_ms);

        let timestamp = close_log
            .get(&m.close.order_id)
            .map_or_else(|| epoch_ms_to_iso(m.close.epoch_ms), |e| e.timestamp.clone());

        let costs = compute_costs(m, metadata);

        let excursion = bars_dir.and_then(|dir| {
            let bars = load_bars(dir, m.close.symbol, open_ms, close_ms);
            max_excursion(
                &bars,
                m.open.price,
                m.open.side,
                metadata.pip_size(&m.close.symbol),
            )
        });

        trades.push(ClosedTrade {
            timestamp,
            order_id: m.close.order_id.clone(),
            symbol: m.close.symbol,
            position_side: m.open.side.position_side(),
            qty: m.volume,
            open_time_ms: m.open.epoch_ms,
            close_time_ms: m.close.epoch_ms,
            open_order_id: m.open.order_id.clone(),
            close_order_id: m.close.order_id.clone(),
            open_price: m.open.price,
            close_price: m.close.price,
            gross_pnl: costs.gross_pnl,
            commission: costs.commission,
            spread_cost: costs.spread,
            slippage_cost: costs.slippage_cost,
            net_pnl: costs.net_pnl,
            holding_minutes: holding_minutes(m),
            mae_pips: excursion.map(|e| e.mae_pips),
            mfe_pips: excursion.map(|e| e.mfe_pips),
        });
    }

    trades
}

/// Writes the reconstruction CSV to the given path.
///
/// The header row is always written; zero trades produce a header-only file.
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the output location cannot be written.
pub fn write_csv(path: &Path, trades: &[ClosedTrade]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(OUTPUT_COLUMNS)?;

    for trade in trades {
        let pips = |value: Option<Decimal>| {
            value.map_or_else(|| "NaN".to_string(), |v| quantize(v, 4))
        };
        writer.write_record([
            trade.timestamp.clone(),
            trade.order_id.clone(),
            trade.symbol.to_string(),
            trade.position_side.to_string(),
            quantize(trade.qty, 8),
            epoch_ms_to_iso(trade.open_time_ms),
            epoch_ms_to_iso(trade.close_time_ms),
            trade.open_order_id.clone(),
            trade.close_order_id.clone(),
            quantize(trade.open_price, 8),
            quantize(trade.close_price, 8),
            quantize(trade.net_pnl, 2),
            quantize(trade.gross_pnl, 2),
            quantize(trade.commission, 2),
            quantize(trade.spread_cost, 2),
            quantize(trade.slippage_cost, 2),
            quantize_f64(trade.holding_minutes, 6),
            pips(trade.mae_pips),
            pips(trade.mfe_pips),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// A run-level summary of the reconstruction output.
#[derive(Clone, Debug, Serialize)]
pub struct ReconstructionSummary {
    /// Number of closed trades reconstructed.
    pub trades: usize,
    /// Sum of net P&L across all trades, in account currency.
    pub total_net_pnl: String,
}

impl ReconstructionSummary {
    /// Summarizes the given trades.
    #[must_use]
    pub fn from_trades(trades: &[ClosedTrade]) -> Self {
        let total: Decimal = trades.iter().map(|t| t.net_pnl).sum();
        Self {
            trades: trades.len(),
            total_net_pnl: quantize(total, 2),
        }
    }

    /// Writes the summary as pretty-printed JSON to the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be serialized or written.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tradeaudit_model::{Fill, OrderSide, PositionSide};
    use ustr::Ustr;

    use super::*;

    fn fill(side: OrderSide, price: Decimal, ms: i64, order_id: &str) -> Fill {
        Fill::new(
            Ustr::from("EURUSD"),
            side,
            dec!(1.0),
            price,
            ms,
            order_id.to_string(),
            dec!(0),
            dec!(0),
            dec!(0),
        )
    }

    fn round_trip_match() -> FillMatch {
        FillMatch {
            open: fill(OrderSide::Buy, dec!(1.0500), 1_700_000_000_000, "OPEN-1"),
            close: fill(OrderSide::Sell, dec!(1.0600), 1_700_000_060_000, "CLOSE-1"),
            volume: dec!(1.0),
        }
    }

    #[rstest]
    fn test_build_trades_round_trip() {
        let trades = build_trades(
            &[round_trip_match()],
            &RunMetadata::default(),
            &CloseLog::default(),
            None,
        );
        assert_eq!(trades.len(), 1);

        let trade = &trades[0];
        assert_eq!(trade.order_id, "CLOSE-1");
        assert_eq!(trade.open_order_id, "OPEN-1");
        assert_eq!(trade.position_side, PositionSide::Long);
        assert_eq!(trade.gross_pnl, dec!(0.0100));
        assert_eq!(trade.net_pnl, trade.gross_pnl);
        assert_eq!(trade.timestamp, epoch_ms_to_iso(1_700_000_060_000));
        assert_eq!(trade.mae_pips, None);
        assert_eq!(trade.mfe_pips, None);
    }

    #[rstest]
    fn test_close_log_timestamp_preferred() {
        let close_log = CloseLog::from_text(
            "2023-11-14T22:14:30Z CLOSED T-CLOSE-1 EURUSD size=1.0 pnl=1.00\n",
        );
        let trades = build_trades(
            &[round_trip_match()],
            &RunMetadata::default(),
            &close_log,
            None,
        );
        assert_eq!(trades[0].timestamp, "2023-11-14T22:14:30Z");
        // The close_time column stays on the fill's own clock
        assert_eq!(trades[0].close_time_ms, 1_700_000_060_000);
    }

    #[rstest]
    fn test_write_csv_columns_and_nan_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("closed_trades.csv");

        let trades = build_trades(
            &[round_trip_match()],
            &RunMetadata::default(),
            &CloseLog::default(),
            None,
        );
        write_csv(&path, &trades).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), OUTPUT_COLUMNS.join(","));

        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row.len(), 19);
        assert_eq!(row[2], "EURUSD");
        assert_eq!(row[3], "LONG");
        assert_eq!(row[4], "1.00000000");
        assert_eq!(row[9], "1.05000000");
        assert_eq!(row[11], "0.01"); // pnl_currency at 2 dp
        assert_eq!(row[16], "1.000000"); // holding minutes at 6 dp
        assert_eq!(row[17], "NaN");
        assert_eq!(row[18], "NaN");
    }

    #[rstest]
    fn test_write_csv_empty_is_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed_trades.csv");
        write_csv(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), OUTPUT_COLUMNS.join(","));
    }

    #[rstest]
    fn test_excursion_from_bars() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("eurusd_bars.csv"),
            "timestamp_ms,open,high,low,close\n\
             1700000030000,1.0500,1.0620,1.0480,1.0600\n",
        )
        .unwrap();

        let trades = build_trades(
            &[round_trip_match()],
            &RunMetadata::default(),
            &CloseLog::default(),
            Some(dir.path()),
        );
        assert_eq!(trades[0].mae_pips, Some(dec!(-20)));
        assert_eq!(trades[0].mfe_pips, Some(dec!(120)));
    }

    #[rstest]
    fn test_summary_totals() {
        let matches = vec![round_trip_match(), round_trip_match()];
        let trades = build_trades(
            &matches,
            &RunMetadata::default(),
            &CloseLog::default(),
            None,
        );
        let summary = ReconstructionSummary::from_trades(&trades);
        assert_eq!(summary.trades, 2);
        assert_eq!(summary.total_net_pnl, "0.02");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pnl_summary.json");
        summary.write_json(&path).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["trades"], 2);
        assert_eq!(parsed["total_net_pnl"], "0.02");
    }
}
