// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types for shell input validation.
//!
//! The ordering and payment core has no error paths: building a beverage is
//! total, and a declined charge is reported as `false`. Only raw text typed
//! at the menu or passed on the command line can be rejected.

use thiserror::Error;

/// Input validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing but whitespace was entered
    #[error("empty input")]
    EmptyInput,

    /// Input is not an integer
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// Choice lies outside the menu range
    #[error("choice {value} out of range ({min}-{max})")]
    OutOfRange { value: i64, min: u32, max: u32 },

    /// Currency code is not three ASCII letters
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Unknown locale name
    #[error("unknown locale: {0:?}")]
    UnknownLocale(String),
}
