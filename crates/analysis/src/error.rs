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

//! Error types for the reconstruction pipeline.
//!
//! Only structural failures are errors: a missing fills source or an
//! unwritable output. Row-level defects, metadata parse failures, and missing
//! bar data are recovered inline (skip, default, or sentinel) per the error
//! taxonomy of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while ingesting the primary fills source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The primary fills source does not exist.
    #[error("fills source not found: {0}")]
    MissingInput(PathBuf),
    /// The fills source could not be read.
    #[error("failed to read fills source: {0}")]
    Io(#[from] std::io::Error),
    /// The fills source is not structurally valid CSV.
    #[error("failed to parse fills source: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised while writing reconstruction output.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output location could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    /// A record could not be serialized as CSV.
    #[error("failed to serialize output: {0}")]
    Csv(#[from] csv::Error),
    /// The run summary could not be serialized as JSON.
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}
