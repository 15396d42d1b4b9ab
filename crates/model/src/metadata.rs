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

//! Per-run instrument configuration.

use std::{collections::HashMap, fs, path::Path};

use ahash::AHashMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use ustr::Ustr;

/// The fallback point value when a symbol has no configured entry.
pub const DEFAULT_POINT_VALUE: Decimal = Decimal::ONE;

/// The fallback pip size when a symbol has no configured entry (the common
/// 4-decimal FX convention).
pub const DEFAULT_PIP_SIZE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Per-run configuration mapping symbols to their currency conversion
/// parameters. Loaded once and read-only for the duration of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunMetadata {
    /// Currency value of one unit of price movement per unit of volume, per
    /// symbol.
    pub point_value_per_symbol: AHashMap<Ustr, Decimal>,
    /// Fallback point value for unconfigured symbols.
    pub default_point_value: Decimal,
    /// Pip size per symbol, for instruments not quoted with the 4-decimal
    /// convention.
    pub pip_size_per_symbol: AHashMap<Ustr, Decimal>,
    /// Fallback pip size for unconfigured symbols.
    pub default_pip_size: Decimal,
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            point_value_per_symbol: AHashMap::new(),
            default_point_value: DEFAULT_POINT_VALUE,
            pip_size_per_symbol: AHashMap::new(),
            default_pip_size: DEFAULT_PIP_SIZE,
        }
    }
}

impl RunMetadata {
    /// Loads run metadata from the given JSON file.
    ///
    /// The file carries `point_value_per_lot` and `pip_size_per_lot` maps of
    /// decimal values (string or numeric), plus `default_point_value` and
    /// `default_pip_size`. Unknown keys such as `mode` and `simulation` are
    /// ignored. A missing file yields the defaults silently; an unreadable or
    /// malformed file logs a warning and also falls back to the defaults —
    /// metadata failure is never fatal.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("Failed to parse run metadata from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> anyhow::Result<Self> {
        let raw: RawRunMetadata = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(Self {
            point_value_per_symbol: parse_decimal_map(&raw.point_value_per_lot)?,
            default_point_value: raw
                .default_point_value
                .as_ref()
                .map_or(Ok(DEFAULT_POINT_VALUE), parse_decimal_value)?,
            pip_size_per_symbol: parse_decimal_map(&raw.pip_size_per_lot)?,
            default_pip_size: raw
                .default_pip_size
                .as_ref()
                .map_or(Ok(DEFAULT_PIP_SIZE), parse_decimal_value)?,
        })
    }

    /// Returns the point value for the given symbol, falling back to the
    /// run-level default.
    #[must_use]
    pub fn point_value(&self, symbol: &Ustr) -> Decimal {
        self.point_value_per_symbol
            .get(symbol)
            .copied()
            .unwrap_or(self.default_point_value)
    }

    /// Returns the pip size for the given symbol, falling back to the
    /// run-level default.
    #[must_use]
    pub fn pip_size(&self, symbol: &Ustr) -> Decimal {
        self.pip_size_per_symbol
            .get(symbol)
            .copied()
            .unwrap_or(self.default_pip_size)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawRunMetadata {
    #[serde(default)]
    point_value_per_lot: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pip_size_per_lot: HashMap<String, serde_json::Value>,
    #[serde(default)]
    default_point_value: Option<serde_json::Value>,
    #[serde(default)]
    default_pip_size: Option<serde_json::Value>,
}

fn parse_decimal_map(
    raw: &HashMap<String, serde_json::Value>,
) -> anyhow::Result<AHashMap<Ustr, Decimal>> {
    let mut map = AHashMap::with_capacity(raw.len());
    for (symbol, value) in raw {
        map.insert(Ustr::from(&symbol.to_uppercase()), parse_decimal_value(value)?);
    }
    Ok(map)
}

fn parse_decimal_value(value: &serde_json::Value) -> anyhow::Result<Decimal> {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.trim()
        .parse::<Decimal>()
        .map_err(|e| anyhow::anyhow!("invalid decimal value '{text}': {e}"))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
