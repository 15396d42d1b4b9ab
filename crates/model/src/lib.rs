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

//! Domain model for the tradeaudit toolkit.
//!
//! The `tradeaudit-model` crate defines the value types flowing through the
//! reconstruction pipeline:
//!
//! - [`enums::OrderSide`] and [`enums::PositionSide`] with canonicalization
//!   from heterogeneous raw side values.
//! - [`fill::Fill`], one executed order leg.
//! - [`bar::Bar`], an OHLC price bar used for excursion analysis.
//! - [`trade::ClosedTrade`], a fully costed reconstructed trade.
//! - [`metadata::RunMetadata`], per-run instrument configuration.
//!
//! All prices, volumes, and money amounts are exact decimals; rounding to
//! fixed-point text happens only at serialization.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bar;
pub mod enums;
pub mod fill;
pub mod metadata;
pub mod trade;

pub use bar::Bar;
pub use enums::{OrderSide, PositionSide};
pub use fill::Fill;
pub use metadata::RunMetadata;
pub use trade::ClosedTrade;
