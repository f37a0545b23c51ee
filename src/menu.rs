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

//! Menu numbering and choice validation.
//!
//! The shell shows numbered menus and reads a number back. This module owns
//! the numbering so the shell only has to print and re-prompt:
//!
//! | Menu | Range | Meaning |
//! |------|-------|---------|
//! | Drink | 1-4 | Espresso, Tea, Latte, Mocha |
//! | Add-on | 0-5 | done, Milk, Sugar, Whipped Cream, Caramel, Soy |
//! | Payment | 1-3 | PayPal, Stripe, Bank transfer |

use crate::beverage::{AddOn, BaseKind};
use crate::error::InputError;
use crate::payment::ProcessorKind;

/// Parses a menu choice and checks it lies within `min..=max`.
///
/// # Errors
///
/// - [`InputError::EmptyInput`] - Input is blank.
/// - [`InputError::NotANumber`] - Input is not an integer.
/// - [`InputError::OutOfRange`] - Integer lies outside the menu.
pub fn parse_choice(input: &str, min: u32, max: u32) -> Result<u32, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyInput);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    u32::try_from(value)
        .ok()
        .filter(|choice| (min..=max).contains(choice))
        .ok_or(InputError::OutOfRange { value, min, max })
}

/// Menu position (1-based) of a choice within `items`.
fn pick<T: Copy>(items: &[T], choice: u32) -> Option<T> {
    let index = usize::try_from(choice).ok()?.checked_sub(1)?;
    items.get(index).copied()
}

impl BaseKind {
    pub const MENU_MIN: u32 = 1;
    pub const MENU_MAX: u32 = BaseKind::ALL.len() as u32;

    /// Drink for a validated menu number.
    pub fn from_choice(choice: u32) -> Option<BaseKind> {
        pick(&BaseKind::ALL, choice)
    }
}

impl AddOn {
    /// Menu number that ends add-on selection.
    pub const MENU_DONE: u32 = 0;
    pub const MENU_MAX: u32 = AddOn::ALL.len() as u32;

    /// Add-on for a validated menu number; `None` for [`AddOn::MENU_DONE`].
    pub fn from_choice(choice: u32) -> Option<AddOn> {
        pick(&AddOn::ALL, choice)
    }
}

impl ProcessorKind {
    pub const MENU_MIN: u32 = 1;
    pub const MENU_MAX: u32 = ProcessorKind::ALL.len() as u32;

    pub fn from_choice(choice: u32) -> Option<ProcessorKind> {
        pick(&ProcessorKind::ALL, choice)
    }
}
