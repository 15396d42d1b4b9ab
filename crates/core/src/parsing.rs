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

//! Core parsing functions.

use rust_decimal::Decimal;

/// Parses the given text into a [`Decimal`], returning `None` for empty or
/// non-numeric input. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<Decimal>().ok()
}

/// Parses the given optional text into a [`Decimal`], falling back to zero
/// for absent, empty, or non-numeric input.
#[must_use]
pub fn decimal_or_zero(text: Option<&str>) -> Decimal {
    text.and_then(parse_decimal).unwrap_or_default()
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
    #[case("1.0550", Some(dec!(1.0550)))]
    #[case(" -2.5 ", Some(dec!(-2.5)))]
    #[case("0", Some(dec!(0)))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("abc", None)]
    fn test_parse_decimal(#[case] text: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_decimal(text), expected);
    }

    #[rstest]
    fn test_decimal_or_zero() {
        assert_eq!(decimal_or_zero(Some("3.25")), dec!(3.25));
        assert_eq!(decimal_or_zero(Some("")), Decimal::ZERO);
        assert_eq!(decimal_or_zero(Some("junk")), Decimal::ZERO);
        assert_eq!(decimal_or_zero(None), Decimal::ZERO);
    }
}
