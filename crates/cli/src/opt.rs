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

use std::path::PathBuf;

use clap::Parser;

/// Main CLI structure for parsing command-line arguments and options.
///
/// Reconstructs closed trades from an order fill export using FIFO inventory
/// matching and writes a fully costed per-trade CSV plus a run summary.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct TradeauditCli {
    /// Path to the order fills CSV export.
    #[arg(long)]
    pub orders: PathBuf,
    /// Path for the reconstructed closed-trades CSV output.
    #[arg(long)]
    pub out: PathBuf,
    /// Path to the run metadata JSON (point values and pip sizes per symbol).
    #[arg(long)]
    pub meta: Option<PathBuf>,
    /// Path to the trade-close log for authoritative close timestamps.
    #[arg(long)]
    pub closes: Option<PathBuf>,
    /// Directory holding per-symbol OHLC bar files for excursion analysis.
    #[arg(long)]
    pub bars_dir: Option<PathBuf>,
    /// Phase marker value identifying fill rows in the orders export.
    #[arg(long, default_value = "FILL")]
    pub fill_phase: String,
}
