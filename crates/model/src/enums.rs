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

//! Enumerations for the trading domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

/// The side of an executed order fill.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// The order is a BUY.
    Buy = 1,
    /// The order is a SELL.
    Sell = 2,
}

impl OrderSide {
    /// Canonicalizes a raw side value from a heterogeneous source.
    ///
    /// `LONG`/`OPEN_LONG` map to [`OrderSide::Buy`], `SHORT`/`OPEN_SHORT` to
    /// [`OrderSide::Sell`], and `BUY`/`SELL` pass through (all matched
    /// case-insensitively). Any other value yields `None`.
    #[must_use]
    pub fn from_raw(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "BUY" | "LONG" | "OPEN_LONG" => Some(Self::Buy),
            "SELL" | "SHORT" | "OPEN_SHORT" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Returns the position side opened by a fill on this order side.
    #[must_use]
    pub const fn position_side(&self) -> PositionSide {
        match self {
            Self::Buy => PositionSide::Long,
            Self::Sell => PositionSide::Short,
        }
    }

    /// Returns the opposite order side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// The market side of a reconstructed position.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    /// The position was opened by a BUY fill.
    Long = 1,
    /// The position was opened by a SELL fill.
    Short = 2,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("BUY", Some(OrderSide::Buy))]
    #[case("buy", Some(OrderSide::Buy))]
    #[case("LONG", Some(OrderSide::Buy))]
    #[case("OPEN_LONG", Some(OrderSide::Buy))]
    #[case("SELL", Some(OrderSide::Sell))]
    #[case("short", Some(OrderSide::Sell))]
    #[case("OPEN_SHORT", Some(OrderSide::Sell))]
    #[case(" sell ", Some(OrderSide::Sell))]
    #[case("HOLD", None)]
    #[case("", None)]
    fn test_order_side_from_raw(#[case] raw: &str, #[case] expected: Option<OrderSide>) {
        assert_eq!(OrderSide::from_raw(raw), expected);
    }

    #[rstest]
    fn test_position_side_mapping() {
        assert_eq!(OrderSide::Buy.position_side(), PositionSide::Long);
        assert_eq!(OrderSide::Sell.position_side(), PositionSide::Short);
    }

    #[rstest]
    fn test_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[rstest]
    fn test_display_screaming_snake() {
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(PositionSide::Short.to_string(), "SHORT");
    }
}
