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

//! An executed order leg.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradeaudit_core::datetime::epoch_ms_to_iso;
use ustr::Ustr;

use crate::enums::OrderSide;

/// One executed order leg: a specific volume transacted at a specific price
/// and time.
///
/// Fills are produced by ingestion with strictly positive volume. The
/// `volume` field is decremented in place only while the fill sits in a
/// matcher inventory queue and is being partially consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// The instrument identifier (normalized uppercase).
    pub symbol: Ustr,
    /// The canonicalized order side.
    pub side: OrderSide,
    /// The executed volume (strictly positive at creation).
    pub volume: Decimal,
    /// The execution price.
    pub price: Decimal,
    /// The event time as Unix epoch milliseconds.
    pub epoch_ms: i64,
    /// The order identifier, synthesized as `fill_<n>` when absent upstream.
    pub order_id: String,
    /// Commission already attributed to this fill by the execution venue.
    pub commission: Decimal,
    /// Spread cost already attributed to this fill.
    pub spread_cost: Decimal,
    /// Execution slippage attributed to this fill, in pips.
    pub slippage_pips: Decimal,
}

impl Fill {
    /// Creates a new [`Fill`] instance.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Ustr,
        side: OrderSide,
        volume: Decimal,
        price: Decimal,
        epoch_ms: i64,
        order_id: String,
        commission: Decimal,
        spread_cost: Decimal,
        slippage_pips: Decimal,
    ) -> Self {
        debug_assert!(volume > Decimal::ZERO, "fill volume must be positive");
        Self {
            symbol,
            side,
            volume,
            price,
            epoch_ms,
            order_id,
            commission,
            spread_cost,
            slippage_pips,
        }
    }

    /// Returns a copy of this fill clipped to the given volume, keeping all
    /// other attributes (including per-leg costs) verbatim.
    #[must_use]
    pub fn with_volume(&self, volume: Decimal) -> Self {
        Self {
            volume,
            order_id: self.order_id.clone(),
            ..*self
        }
    }

    /// Returns the event time as an ISO 8601 string with millisecond
    /// precision.
    #[must_use]
    pub fn iso_timestamp(&self) -> String {
        epoch_ms_to_iso(self.epoch_ms)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
