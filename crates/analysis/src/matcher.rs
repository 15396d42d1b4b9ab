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

//! Symbol-isolated FIFO inventory matching.
//!
//! Fills are processed strictly in time order against per-symbol queues of
//! unmatched opposite-side inventory: the oldest opposing entry always closes
//! first, a large fill may drain several entries, and any volume left after
//! the opposing queue is exhausted opens new same-direction inventory within
//! the same event (the hedging flip). Symbols never cross-match.

use std::collections::VecDeque;

use ahash::AHashMap;
use rust_decimal::Decimal;
use tradeaudit_model::{Fill, OrderSide};
use ustr::Ustr;

/// The default residual-volume threshold below which an inventory entry is
/// considered fully consumed (`1e-12`).
pub const DEFAULT_VOLUME_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 12);

/// An opening and a closing fill paired by the matcher, both legs clipped to
/// the matched volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillMatch {
    /// The opening leg.
    pub open: Fill,
    /// The closing leg.
    pub close: Fill,
    /// The volume matched between the two legs.
    pub volume: Decimal,
}

/// Matches fills into closed trades using per-symbol FIFO inventory queues.
///
/// The matcher owns its queues exclusively for the duration of a run; the
/// only mutation is the in-place decrement of queued entry volumes as they
/// are partially consumed.
#[derive(Debug)]
pub struct FifoMatcher {
    epsilon: Decimal,
    longs: AHashMap<Ustr, VecDeque<Fill>>,
    shorts: AHashMap<Ustr, VecDeque<Fill>>,
}

impl Default for FifoMatcher {
    fn default() -> Self {
        Self::with_epsilon(DEFAULT_VOLUME_EPSILON)
    }
}

impl FifoMatcher {
    /// Creates a new [`FifoMatcher`] with the given residual-volume epsilon.
    ///
    /// Instruments with very small lot sizes may need a tighter threshold
    /// than [`DEFAULT_VOLUME_EPSILON`].
    #[must_use]
    pub fn with_epsilon(epsilon: Decimal) -> Self {
        Self {
            epsilon,
            longs: AHashMap::new(),
            shorts: AHashMap::new(),
        }
    }

    /// Processes the given time-ordered fills and returns the matched pairs
    /// in the order volume was consumed.
    pub fn match_fills(&mut self, fills: &[Fill]) -> Vec<FillMatch> {
        let mut matches = Vec::new();
        for fill in fills {
            self.process_fill(fill, &mut matches);
        }
        matches
    }

    /// Processes a single fill: closes opposing inventory oldest-first, then
    /// opens new same-direction inventory with any remainder.
    pub fn process_fill(&mut self, fill: &Fill, matches: &mut Vec<FillMatch>) {
        let opposing = match fill.side {
            OrderSide::Buy => self.shorts.entry(fill.symbol).or_default(),
            OrderSide::Sell => self.longs.entry(fill.symbol).or_default(),
        };

        let mut remaining = fill.volume;
        while remaining > self.epsilon {
            let Some(open) = opposing.front_mut() else {
                break;
            };
            let take = open.volume.min(remaining);
            matches.push(FillMatch {
                open: open.with_volume(take),
                close: fill.with_volume(take),
                volume: take,
            });
            open.volume -= take;
            remaining -= take;
            if open.volume <= self.epsilon {
                opposing.pop_front();
            }
        }

        if remaining > self.epsilon {
            let same_side = match fill.side {
                OrderSide::Buy => self.longs.entry(fill.symbol).or_default(),
                OrderSide::Sell => self.shorts.entry(fill.symbol).or_default(),
            };
            same_side.push_back(fill.with_volume(remaining));
        }
    }

    /// Returns the residual unmatched volume held for the given symbol on
    /// the given side.
    #[must_use]
    pub fn open_volume(&self, symbol: &Ustr, side: OrderSide) -> Decimal {
        let queues = match side {
            OrderSide::Buy => &self.longs,
            OrderSide::Sell => &self.shorts,
        };
        queues
            .get(symbol)
            .map(|queue| queue.iter().map(|f| f.volume).sum())
            .unwrap_or_default()
    }

    /// Returns the total residual unmatched volume across all symbols and
    /// sides.
    #[must_use]
    pub fn total_open_volume(&self) -> Decimal {
        self.longs
            .values()
            .chain(self.shorts.values())
            .flat_map(|queue| queue.iter().map(|f| f.volume))
            .sum()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn fill(symbol: &str, side: OrderSide, volume: Decimal, price: Decimal, ms: i64) -> Fill {
        Fill::new(
            Ustr::from(symbol),
            side,
            volume,
            price,
            ms,
            format!("fill_{ms}"),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }

    #[rstest]
    fn test_simple_round_trip() {
        let fills = vec![
            fill("EURUSD", OrderSide::Buy, dec!(1.0), dec!(1.0500), 1),
            fill("EURUSD", OrderSide::Sell, dec!(1.0), dec!(1.0600), 2),
        ];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&fills);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].volume, dec!(1.0));
        assert_eq!(matches[0].close.price - matches[0].open.price, dec!(0.0100));
        assert_eq!(matcher.total_open_volume(), Decimal::ZERO);
    }

    #[rstest]
    fn test_fifo_ordering_consumes_oldest_first() {
        let fills = vec![
            fill("EURUSD", OrderSide::Buy, dec!(0.5), dec!(1.0500), 1),
            fill("EURUSD", OrderSide::Buy, dec!(0.5), dec!(1.0510), 2),
            fill("EURUSD", OrderSide::Sell, dec!(0.3), dec!(1.0520), 3),
        ];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&fills);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].volume, dec!(0.3));
        // Volume must come from the oldest long, never the second
        assert_eq!(matches[0].open.order_id, "fill_1");
        assert_eq!(matcher.open_volume(&Ustr::from("EURUSD"), OrderSide::Buy), dec!(0.7));
    }

    #[rstest]
    fn test_partial_fill_drains_multiple_entries() {
        let fills = vec![
            fill("EURUSD", OrderSide::Buy, dec!(0.4), dec!(1.0500), 1),
            fill("EURUSD", OrderSide::Buy, dec!(0.4), dec!(1.0510), 2),
            fill("EURUSD", OrderSide::Sell, dec!(0.6), dec!(1.0520), 3),
        ];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&fills);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].open.order_id, "fill_1");
        assert_eq!(matches[0].volume, dec!(0.4));
        assert_eq!(matches[1].open.order_id, "fill_2");
        assert_eq!(matches[1].volume, dec!(0.2));
        assert_eq!(matcher.open_volume(&Ustr::from("EURUSD"), OrderSide::Buy), dec!(0.2));
    }

    #[rstest]
    fn test_hedging_flip() {
        let fills = vec![
            fill("EURUSD", OrderSide::Buy, dec!(1.0), dec!(1.0500), 1),
            fill("EURUSD", OrderSide::Sell, dec!(2.0), dec!(1.0510), 2),
            fill("EURUSD", OrderSide::Buy, dec!(1.0), dec!(1.0520), 3),
        ];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&fills);

        assert_eq!(matches.len(), 2);
        // First trade closes the original long at a profit
        assert_eq!(matches[0].open.side, OrderSide::Buy);
        assert_eq!(matches[0].volume, dec!(1.0));
        assert_eq!(matches[0].close.price - matches[0].open.price, dec!(0.0010));
        // Second trade closes the short opened by the SELL's excess volume
        assert_eq!(matches[1].open.side, OrderSide::Sell);
        assert_eq!(matches[1].open.price, dec!(1.0510));
        assert_eq!(matches[1].volume, dec!(1.0));
        assert_eq!(matcher.total_open_volume(), Decimal::ZERO);
    }

    #[rstest]
    fn test_symbol_isolation() {
        let interleaved = vec![
            fill("EURUSD", OrderSide::Buy, dec!(1.0), dec!(1.0500), 1),
            fill("GBPUSD", OrderSide::Buy, dec!(2.0), dec!(1.2500), 2),
            fill("EURUSD", OrderSide::Sell, dec!(1.0), dec!(1.0600), 3),
            fill("GBPUSD", OrderSide::Sell, dec!(2.0), dec!(1.2600), 4),
        ];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&interleaved);

        assert_eq!(matches.len(), 2);
        for m in &matches {
            assert_eq!(m.open.symbol, m.close.symbol);
        }

        // Matching each symbol's sub-stream independently yields the same trades
        for symbol in ["EURUSD", "GBPUSD"] {
            let sub: Vec<Fill> = interleaved
                .iter()
                .filter(|f| f.symbol.as_str() == symbol)
                .cloned()
                .collect();
            let sub_matches = FifoMatcher::default().match_fills(&sub);
            let joint: Vec<&FillMatch> = matches
                .iter()
                .filter(|m| m.open.symbol.as_str() == symbol)
                .collect();
            assert_eq!(sub_matches.len(), joint.len());
            for (a, b) in sub_matches.iter().zip(joint) {
                assert_eq!(a, b);
            }
        }
    }

    #[rstest]
    fn test_volume_conservation() {
        let fills = vec![
            fill("EURUSD", OrderSide::Buy, dec!(1.0), dec!(1.0500), 1),
            fill("EURUSD", OrderSide::Sell, dec!(0.3), dec!(1.0510), 2),
            fill("EURUSD", OrderSide::Sell, dec!(0.3), dec!(1.0520), 3),
        ];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&fills);

        let matched: Decimal = matches
            .iter()
            .filter(|m| m.open.order_id == "fill_1")
            .map(|m| m.volume)
            .sum();
        let residual = matcher.open_volume(&Ustr::from("EURUSD"), OrderSide::Buy);
        assert_eq!(matched, dec!(0.6));
        assert_eq!(residual, dec!(0.4));
        assert_eq!(matched + residual, dec!(1.0));
    }

    #[rstest]
    fn test_unmatched_inventory_is_not_an_error() {
        let fills = vec![fill("EURUSD", OrderSide::Buy, dec!(5.0), dec!(1.0500), 1)];
        let mut matcher = FifoMatcher::default();
        let matches = matcher.match_fills(&fills);

        assert!(matches.is_empty());
        assert_eq!(matcher.open_volume(&Ustr::from("EURUSD"), OrderSide::Buy), dec!(5.0));
    }

    #[rstest]
    fn test_epsilon_residual_evicted() {
        // A residual below epsilon must not linger as phantom inventory
        let fills = vec![
            fill("EURUSD", OrderSide::Buy, dec!(1.000000000000001), dec!(1.0500), 1),
            fill("EURUSD", OrderSide::Sell, dec!(1.0), dec!(1.0510), 2),
        ];
        let mut matcher = FifoMatcher::with_epsilon(dec!(0.000000000001));
        let matches = matcher.match_fills(&fills);
        assert_eq!(matches.len(), 1);
        assert_eq!(matcher.open_volume(&Ustr::from("EURUSD"), OrderSide::Buy), Decimal::ZERO);
    }
}
