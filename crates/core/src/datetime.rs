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

//! Common data and time functions.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Number of milliseconds in one second.
pub const MILLISECONDS_IN_SECOND: i64 = 1_000;

/// Number of milliseconds in one minute.
pub const MILLISECONDS_IN_MINUTE: i64 = 60_000;

/// Epoch values at or above this magnitude are interpreted as milliseconds,
/// below it as seconds (10 billion seconds is November 2286).
const EPOCH_MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Parses the given text into a Unix epoch timestamp in milliseconds.
///
/// Accepts either a numeric epoch, auto-detecting seconds versus milliseconds
/// by magnitude (fractional seconds are rounded half-up to the millisecond),
/// or an ISO 8601 string with or without a UTC `Z` suffix. Naive timestamps
/// are interpreted as UTC.
///
/// Returns `None` when the text yields no parseable instant.
#[must_use]
pub fn parse_epoch_ms(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(num) = text.parse::<Decimal>() {
        let threshold = Decimal::from(EPOCH_MILLIS_THRESHOLD);
        let millis = if num > threshold { num } else { num * Decimal::from(MILLISECONDS_IN_SECOND) };
        return millis
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    // Naive ISO 8601 without offset, interpreted as UTC
    text.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Converts a Unix epoch timestamp in milliseconds to an ISO 8601 (RFC 3339)
/// string with millisecond precision and a `Z` suffix.
///
/// # Panics
///
/// Panics if `epoch_ms` is outside the range representable by [`DateTime`].
#[must_use]
pub fn epoch_ms_to_iso(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .expect("epoch milliseconds out of datetime range")
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1700000000000", 1_700_000_000_000)] // already milliseconds
    #[case("1700000000", 1_700_000_000_000)] // seconds, scaled up
    #[case("1700000000.5", 1_700_000_000_500)] // fractional seconds
    #[case(" 1700000000 ", 1_700_000_000_000)] // surrounding whitespace
    fn test_parse_epoch_ms_numeric(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(parse_epoch_ms(text), Some(expected));
    }

    #[rstest]
    #[case("2023-11-14T22:13:20Z", 1_700_000_000_000)]
    #[case("2023-11-14T22:13:20+00:00", 1_700_000_000_000)]
    #[case("2023-11-14T23:13:20+01:00", 1_700_000_000_000)]
    #[case("2023-11-14T22:13:20", 1_700_000_000_000)] // naive, treated as UTC
    #[case("2023-11-14T22:13:20.250Z", 1_700_000_000_250)]
    fn test_parse_epoch_ms_iso(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(parse_epoch_ms(text), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not-a-time")]
    #[case("2023-13-40T99:99:99Z")]
    fn test_parse_epoch_ms_invalid(#[case] text: &str) {
        assert_eq!(parse_epoch_ms(text), None);
    }

    #[rstest]
    fn test_epoch_ms_to_iso() {
        assert_eq!(epoch_ms_to_iso(1_700_000_000_000), "2023-11-14T22:13:20.000Z");
        assert_eq!(epoch_ms_to_iso(1_700_000_000_250), "2023-11-14T22:13:20.250Z");
    }

    #[rstest]
    fn test_epoch_round_trip() {
        let iso = epoch_ms_to_iso(1_700_000_000_123);
        assert_eq!(parse_epoch_ms(&iso), Some(1_700_000_000_123));
    }
}
