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

//! Command-line interface for the tradeaudit toolkit.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

pub mod opt;

use std::path::Path;

use tradeaudit_analysis::{
    closes::CloseLog,
    ingest::read_fills,
    matcher::FifoMatcher,
    report::{build_trades, write_csv, ReconstructionSummary},
};
use tradeaudit_model::RunMetadata;

use crate::opt::TradeauditCli;

/// Runs the reconstruction pipeline with the given options.
///
/// # Errors
///
/// Returns an error when the fills source is missing or the output cannot be
/// written. Zero ingested fills is not an error: a header-only CSV and an
/// empty summary are still produced.
pub fn run(opt: &TradeauditCli) -> anyhow::Result<()> {
    let metadata = opt
        .meta
        .as_deref()
        .map_or_else(RunMetadata::default, RunMetadata::load);

    let fills = read_fills(&opt.orders, &opt.fill_phase)?;
    if fills.is_empty() {
        log::warn!(
            "No fills found in {}; writing empty reconstruction",
            opt.orders.display()
        );
        write_output(&opt.out, &[])?;
        return Ok(());
    }
    log::info!("Ingested {} fills from {}", fills.len(), opt.orders.display());

    let mut matcher = FifoMatcher::default();
    let matches = matcher.match_fills(&fills);
    let residual = matcher.total_open_volume();
    if residual > rust_decimal::Decimal::ZERO {
        log::info!("Residual open inventory after matching: {residual}");
    }

    let close_log = opt.closes.as_deref().map_or_else(CloseLog::default, CloseLog::load);
    let trades = build_trades(&matches, &metadata, &close_log, opt.bars_dir.as_deref());
    let summary = write_output(&opt.out, &trades)?;

    log::info!(
        "Reconstructed {} closed trades -> {} (total P&L: {} currency units)",
        summary.trades,
        opt.out.display(),
        summary.total_net_pnl,
    );
    Ok(())
}

/// Writes the trades CSV and the run summary JSON next to it.
fn write_output(
    out: &Path,
    trades: &[tradeaudit_model::ClosedTrade],
) -> anyhow::Result<ReconstructionSummary> {
    write_csv(out, trades)?;
    let summary = ReconstructionSummary::from_trades(trades);
    summary.write_json(&out.with_file_name("pnl_summary.json"))?;
    Ok(summary)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
