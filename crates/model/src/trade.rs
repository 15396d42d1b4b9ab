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

//! A reconstructed closed trade.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::enums::PositionSide;

/// A fully costed closed trade reconstructed from an opening and a closing
/// fill.
///
/// Created once per matched pair by the reconstruction pipeline and immutable
/// thereafter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// The reporting timestamp (close-log entry when available, otherwise the
    /// closing fill time), ISO 8601.
    pub timestamp: String,
    /// The closing order identifier used as the trade identifier.
    pub order_id: String,
    /// The instrument identifier.
    pub symbol: Ustr,
    /// The side of the position that was closed.
    pub position_side: PositionSide,
    /// The matched volume.
    pub qty: Decimal,
    /// The opening fill time as Unix epoch milliseconds.
    pub open_time_ms: i64,
    /// The closing fill time as Unix epoch milliseconds.
    pub close_time_ms: i64,
    /// The opening order identifier.
    pub open_order_id: String,
    /// The closing order identifier.
    pub close_order_id: String,
    /// The opening execution price.
    pub open_price: Decimal,
    /// The closing execution price.
    pub close_price: Decimal,
    /// Gross price-movement P&L in account currency.
    pub gross_pnl: Decimal,
    /// Commission summed across both legs.
    pub commission: Decimal,
    /// Spread cost summed across both legs.
    pub spread_cost: Decimal,
    /// Slippage converted from pips to account currency.
    pub slippage_cost: Decimal,
    /// Net P&L after all costs.
    pub net_pnl: Decimal,
    /// Holding duration in minutes, clamped to be non-negative.
    pub holding_minutes: f64,
    /// Maximum adverse excursion in pips; `None` when no bar data was
    /// available (serialized as `NaN`, never zero).
    pub mae_pips: Option<Decimal>,
    /// Maximum favorable excursion in pips; `None` when no bar data was
    /// available.
    pub mfe_pips: Option<Decimal>,
}
