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

//! Layered cost and P&L model for matched trades.
//!
//! Gross P&L comes from the signed price movement scaled by the symbol's
//! point value; commission and spread are per-leg attributions summed across
//! both legs of the match; slippage is converted from pips to currency via
//! the symbol's pip size. Each leg's commission and spread is summed into
//! every match it participates in, without pro-rating across partial
//! matches — the venue attributes these costs per fill, not per matched
//! slice.

use rust_decimal::Decimal;
use tradeaudit_core::datetime::MILLISECONDS_IN_MINUTE;
use tradeaudit_model::{OrderSide, RunMetadata};

use crate::matcher::FillMatch;

/// The cost breakdown of a single matched trade, at full decimal precision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TradeCosts {
    /// Gross price-movement P&L in account currency.
    pub gross_pnl: Decimal,
    /// Commission summed across both legs.
    pub commission: Decimal,
    /// Spread cost summed across both legs.
    pub spread: Decimal,
    /// Slippage converted from pips to account currency.
    pub slippage_cost: Decimal,
    /// Net P&L after all costs.
    pub net_pnl: Decimal,
}

/// Computes the full cost breakdown for the given matched trade.
///
/// `price_diff` is oriented to the position holder's perspective: for a
/// short position (SELL open leg) the sign is flipped, so a positive value
/// is always profit.
#[must_use]
pub fn compute_costs(m: &FillMatch, metadata: &RunMetadata) -> TradeCosts {
    let point_value = metadata.point_value(&m.close.symbol);

    let mut price_diff = m.close.price - m.open.price;
    if m.open.side == OrderSide::Sell {
        price_diff = -price_diff;
    }
    let gross_pnl = price_diff * point_value * m.volume;

    let commission = m.open.commission + m.close.commission;
    let spread = m.open.spread_cost + m.close.spread_cost;

    let pip_value = point_value * metadata.pip_size(&m.close.symbol);
    let slippage_cost = (m.open.slippage_pips + m.close.slippage_pips) * pip_value * m.volume;

    let net_pnl = gross_pnl - commission - spread - slippage_cost;

    TradeCosts {
        gross_pnl,
        commission,
        spread,
        slippage_cost,
        net_pnl,
    }
}

/// Returns the holding duration of the given match in minutes, clamped to
/// zero when a data anomaly places the close time before the open time.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn holding_minutes(m: &FillMatch) -> f64 {
    let close_ms = m.close.epoch_ms.max(m.open.epoch_ms);
    (close_ms - m.open.epoch_ms) as f64 / MILLISECONDS_IN_MINUTE as f64
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tradeaudit_model::Fill;
    use ustr::Ustr;

    use super::*;

    fn leg(
        side: OrderSide,
        price: Decimal,
        ms: i64,
        commission: Decimal,
        spread: Decimal,
        slippage: Decimal,
    ) -> Fill {
        Fill::new(
            Ustr::from("EURUSD"),
            side,
            dec!(1.0),
            price,
            ms,
            "X".to_string(),
            commission,
            spread,
            slippage,
        )
    }

    fn match_of(open: Fill, close: Fill, volume: Decimal) -> FillMatch {
        FillMatch { open, close, volume }
    }

    fn metadata_with_point_value(value: Decimal) -> RunMetadata {
        let mut metadata = RunMetadata::default();
        metadata
            .point_value_per_symbol
            .insert(Ustr::from("EURUSD"), value);
        metadata
    }

    #[rstest]
    fn test_long_gross_pnl() {
        let m = match_of(
            leg(OrderSide::Buy, dec!(1.0500), 0, dec!(0), dec!(0), dec!(0)),
            leg(OrderSide::Sell, dec!(1.0600), 60_000, dec!(0), dec!(0), dec!(0)),
            dec!(2.0),
        );
        let costs = compute_costs(&m, &metadata_with_point_value(dec!(10)));
        assert_eq!(costs.gross_pnl, dec!(0.2000)); // 0.0100 * 10 * 2.0
        assert_eq!(costs.net_pnl, costs.gross_pnl);
    }

    #[rstest]
    fn test_short_gross_pnl_sign_flipped() {
        // Short opened high, covered low is a profit
        let m = match_of(
            leg(OrderSide::Sell, dec!(1.0600), 0, dec!(0), dec!(0), dec!(0)),
            leg(OrderSide::Buy, dec!(1.0500), 60_000, dec!(0), dec!(0), dec!(0)),
            dec!(1.0),
        );
        let costs = compute_costs(&m, &metadata_with_point_value(dec!(1)));
        assert_eq!(costs.gross_pnl, dec!(0.0100));
    }

    #[rstest]
    fn test_costs_layered_into_net() {
        let m = match_of(
            leg(OrderSide::Buy, dec!(1.0500), 0, dec!(0.50), dec!(0.20), dec!(1.0)),
            leg(OrderSide::Sell, dec!(1.0600), 60_000, dec!(0.30), dec!(0.10), dec!(0.5)),
            dec!(1.0),
        );
        let costs = compute_costs(&m, &metadata_with_point_value(dec!(10)));

        assert_eq!(costs.gross_pnl, dec!(0.1000));
        assert_eq!(costs.commission, dec!(0.80));
        assert_eq!(costs.spread, dec!(0.30));
        // (1.0 + 0.5) pips * (10 * 0.0001) * 1.0
        assert_eq!(costs.slippage_cost, dec!(0.0015));
        assert_eq!(
            costs.net_pnl,
            dec!(0.1000) - dec!(0.80) - dec!(0.30) - dec!(0.0015)
        );
    }

    #[rstest]
    fn test_pip_size_override_changes_slippage() {
        let mut metadata = metadata_with_point_value(dec!(10));
        metadata
            .pip_size_per_symbol
            .insert(Ustr::from("EURUSD"), dec!(0.01));
        let m = match_of(
            leg(OrderSide::Buy, dec!(1.0500), 0, dec!(0), dec!(0), dec!(1.0)),
            leg(OrderSide::Sell, dec!(1.0500), 0, dec!(0), dec!(0), dec!(0)),
            dec!(1.0),
        );
        let costs = compute_costs(&m, &metadata);
        assert_eq!(costs.slippage_cost, dec!(0.10)); // 1 pip * (10 * 0.01)
    }

    #[rstest]
    fn test_default_point_value_fallback() {
        let m = match_of(
            leg(OrderSide::Buy, dec!(1.0500), 0, dec!(0), dec!(0), dec!(0)),
            leg(OrderSide::Sell, dec!(1.0510), 0, dec!(0), dec!(0), dec!(0)),
            dec!(1.0),
        );
        let costs = compute_costs(&m, &RunMetadata::default());
        assert_eq!(costs.gross_pnl, dec!(0.0010)); // point value 1.0
    }

    #[rstest]
    fn test_holding_minutes() {
        let m = match_of(
            leg(OrderSide::Buy, dec!(1.0), 0, dec!(0), dec!(0), dec!(0)),
            leg(OrderSide::Sell, dec!(1.0), 90_000, dec!(0), dec!(0), dec!(0)),
            dec!(1.0),
        );
        assert!((holding_minutes(&m) - 1.5).abs() < f64::EPSILON);
    }

    #[rstest]
    fn test_holding_minutes_clamped_non_negative() {
        // Close nominally precedes open; the clamp is defensive, not a check
        let m = match_of(
            leg(OrderSide::Buy, dec!(1.0), 120_000, dec!(0), dec!(0), dec!(0)),
            leg(OrderSide::Sell, dec!(1.0), 60_000, dec!(0), dec!(0), dec!(0)),
            dec!(1.0),
        );
        assert_eq!(holding_minutes(&m), 0.0);
    }
}
