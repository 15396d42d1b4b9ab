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

//! Serialization-time quantization.
//!
//! Internal arithmetic throughout the workspace stays at full decimal
//! precision; values are quantized to fixed-point text only when a record is
//! written out.

use rust_decimal::{Decimal, RoundingStrategy};

/// Quantizes the given value to fixed-point text with exactly `places`
/// fractional digits, rounding half-up (midpoint away from zero).
#[must_use]
pub fn quantize(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = places as usize)
}

/// Quantizes the given value to fixed-point text with exactly `places`
/// fractional digits, or the literal `NaN` for non-finite values.
#[must_use]
pub fn quantize_f64(value: f64, places: u32) -> String {
    if value.is_finite() {
        format!("{value:.prec$}", prec = places as usize)
    } else {
        "NaN".to_string()
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

    #[rstest]
    #[case(dec!(1.055), 2, "1.06")] // half-up, not banker's
    #[case(dec!(-1.055), 2, "-1.06")] // away from zero on the negative side
    #[case(dec!(1.0), 8, "1.00000000")]
    #[case(dec!(0.123456789), 8, "0.12345679")]
    #[case(dec!(42), 2, "42.00")]
    #[case(dec!(-0.005), 2, "-0.01")]
    fn test_quantize(#[case] value: Decimal, #[case] places: u32, #[case] expected: &str) {
        assert_eq!(quantize(value, places), expected);
    }

    #[rstest]
    #[case(1.5, 6, "1.500000")]
    #[case(0.0, 6, "0.000000")]
    #[case(f64::NAN, 4, "NaN")]
    #[case(f64::INFINITY, 4, "NaN")]
    fn test_quantize_f64(#[case] value: f64, #[case] places: u32, #[case] expected: &str) {
        assert_eq!(quantize_f64(value, places), expected);
    }
}
