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

//! Closed-trade reconstruction and P&L analysis for the tradeaudit toolkit.
//!
//! The `tradeaudit-analysis` crate implements the analytical core of the
//! post-run audit pipeline as a chain of pure transformations:
//!
//! - [`ingest`]: reads raw fill records from heterogeneous CSV schemas,
//!   resolving column aliases and normalizing sides, volumes, and times.
//! - [`matcher`]: symbol-isolated FIFO inventory matching with partial-fill
//!   splitting and hedging-flip semantics.
//! - [`costing`]: layered cost model combining gross price movement,
//!   commission, spread, and slippage-in-pips converted to currency.
//! - [`excursion`]: maximum adverse/favorable excursion from OHLC bars.
//! - [`closes`]: trade-close log lookup for reporting timestamps.
//! - [`report`]: final per-trade record assembly, CSV output, and run
//!   summary.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod closes;
pub mod costing;
pub mod error;
pub mod excursion;
pub mod ingest;
pub mod matcher;
pub mod report;
