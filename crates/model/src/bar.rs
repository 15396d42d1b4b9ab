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

//! An OHLC price bar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ustr::Ustr;

/// An OHLC price bar for a symbol and time window, supplied externally and
/// used only for excursion analysis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// The instrument identifier.
    pub symbol: Ustr,
    /// The bar timestamp as Unix epoch milliseconds.
    pub epoch_ms: i64,
    /// The open price.
    pub open: Decimal,
    /// The high price.
    pub high: Decimal,
    /// The low price.
    pub low: Decimal,
    /// The close price.
    pub close: Decimal,
}
