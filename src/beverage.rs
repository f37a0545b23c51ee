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

//! Beverages and stackable add-ons.
//!
//! A [`Beverage`] is a linear chain: one base drink at the bottom and any
//! number of add-ons wrapped around it, each owning the layer below.
//!
//! ```text
//!   Caramel ──owns──► Milk ──owns──► Latte
//!   (+130)            (+100)         (700)
//! ```
//!
//! Cost and description are computed by walking the chain from the head
//! down to the base, so adding a new add-on never touches the layers it
//! wraps. Walking, comparing and dropping never recurse, so chains of any
//! length are safe.
//!
//! # Example
//!
//! ```
//! use cafe_pos::{AddOn, Amount, BaseKind, Beverage};
//!
//! let drink = Beverage::new(BaseKind::Latte)
//!     .with(AddOn::Milk)
//!     .with(AddOn::Caramel);
//! assert_eq!(drink.description(), "Latte, Milk, Caramel");
//! assert_eq!(drink.cost(), Amount(930));
//! ```

use crate::base::Amount;
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::str::FromStr;
use tracing::debug;

/// Language used for menu labels and order descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Russian,
}

impl FromStr for Locale {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ru" | "russian" => Ok(Locale::Russian),
            _ => Err(InputError::UnknownLocale(s.to_string())),
        }
    }
}

/// A base drink: the terminal node of every chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BaseKind {
    Espresso,
    Tea,
    Latte,
    Mocha,
}

impl BaseKind {
    /// All base drinks in menu order.
    pub const ALL: [BaseKind; 4] = [
        BaseKind::Espresso,
        BaseKind::Tea,
        BaseKind::Latte,
        BaseKind::Mocha,
    ];

    pub fn price(self) -> Amount {
        match self {
            BaseKind::Espresso => Amount(500),
            BaseKind::Tea => Amount(300),
            BaseKind::Latte => Amount(700),
            BaseKind::Mocha => Amount(800),
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BaseKind::Espresso, Locale::English) => "Espresso",
            (BaseKind::Tea, Locale::English) => "Tea",
            (BaseKind::Latte, Locale::English) => "Latte",
            (BaseKind::Mocha, Locale::English) => "Mocha",
            (BaseKind::Espresso, Locale::Russian) => "Эспрессо",
            (BaseKind::Tea, Locale::Russian) => "Чай",
            (BaseKind::Latte, Locale::Russian) => "Латте",
            (BaseKind::Mocha, Locale::Russian) => "Мокка",
        }
    }
}

/// An add-on wrapped around a beverage for a fixed surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AddOn {
    Milk,
    Sugar,
    WhippedCream,
    Caramel,
    Soy,
}

impl AddOn {
    /// All add-ons in menu order.
    pub const ALL: [AddOn; 5] = [
        AddOn::Milk,
        AddOn::Sugar,
        AddOn::WhippedCream,
        AddOn::Caramel,
        AddOn::Soy,
    ];

    pub fn surcharge(self) -> Amount {
        match self {
            AddOn::Milk => Amount(100),
            AddOn::Sugar => Amount(20),
            AddOn::WhippedCream => Amount(150),
            AddOn::Caramel => Amount(130),
            AddOn::Soy => Amount(120),
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (AddOn::Milk, Locale::English) => "Milk",
            (AddOn::Sugar, Locale::English) => "Sugar",
            (AddOn::WhippedCream, Locale::English) => "Whipped Cream",
            (AddOn::Caramel, Locale::English) => "Caramel",
            (AddOn::Soy, Locale::English) => "Soy",
            (AddOn::Milk, Locale::Russian) => "молоко",
            (AddOn::Sugar, Locale::Russian) => "сахар",
            (AddOn::WhippedCream, Locale::Russian) => "взбитые сливки",
            (AddOn::Caramel, Locale::Russian) => "карамель",
            (AddOn::Soy, Locale::Russian) => "соя",
        }
    }
}

/// A priced, describable drink: either a bare base or an add-on wrapping
/// another beverage.
///
/// # Invariants
///
/// - Every `Decorated` node owns exactly one inner beverage; chains never
///   branch and never share nodes.
/// - Nodes are never modified after construction. Extending an order means
///   wrapping the current head with [`Beverage::with`].
/// - The same add-on may appear any number of times.
pub enum Beverage {
    Base(BaseKind),
    Decorated { add_on: AddOn, inner: Box<Beverage> },
}

impl Beverage {
    /// Starts a chain of length one.
    pub fn new(kind: BaseKind) -> Self {
        debug!(base = ?kind, "new beverage");
        Beverage::Base(kind)
    }

    /// Wraps this beverage in `add_on`, returning the new head.
    pub fn with(self, add_on: AddOn) -> Self {
        debug!(?add_on, "applying add-on");
        Beverage::Decorated {
            add_on,
            inner: Box::new(self),
        }
    }

    /// Base price plus every surcharge in the chain.
    pub fn cost(&self) -> Amount {
        let mut total = Amount::ZERO;
        let mut node = self;
        loop {
            match node {
                Beverage::Base(kind) => return total + kind.price(),
                Beverage::Decorated { add_on, inner } => {
                    total = total + add_on.surcharge();
                    node = inner.as_ref();
                }
            }
        }
    }

    /// Description in the default locale, e.g. `"Latte, Milk, Caramel"`.
    pub fn description(&self) -> String {
        self.description_in(Locale::default())
    }

    /// Base label followed by each add-on label in application order,
    /// separated by `", "`.
    pub fn description_in(&self, locale: Locale) -> String {
        let mut out = String::from(self.base().label(locale));
        for add_on in self.add_ons() {
            out.push_str(", ");
            out.push_str(add_on.label(locale));
        }
        out
    }

    /// The base drink at the bottom of the chain.
    pub fn base(&self) -> BaseKind {
        let mut node = self;
        loop {
            match node {
                Beverage::Base(kind) => return *kind,
                Beverage::Decorated { inner, .. } => node = inner.as_ref(),
            }
        }
    }

    /// Add-ons in the order they were applied (innermost first).
    pub fn add_ons(&self) -> Vec<AddOn> {
        let mut add_ons = Vec::new();
        let mut node = self;
        while let Beverage::Decorated { add_on, inner } = node {
            add_ons.push(*add_on);
            node = inner.as_ref();
        }
        add_ons.reverse();
        add_ons
    }

    /// Number of nodes in the chain, base included.
    pub fn depth(&self) -> usize {
        self.add_ons().len() + 1
    }
}

/// Detaches the layer below `node`, leaving a bare base in its place.
fn take_inner(node: &mut Beverage) -> Option<Beverage> {
    match node {
        Beverage::Base(_) => None,
        Beverage::Decorated { inner, .. } => Some(mem::replace(
            inner.as_mut(),
            Beverage::Base(BaseKind::Espresso),
        )),
    }
}

impl Drop for Beverage {
    fn drop(&mut self) {
        // Unlink one node at a time so each drop sees at most a bare base.
        let mut next = take_inner(self);
        while let Some(mut node) = next {
            next = take_inner(&mut node);
        }
    }
}

impl PartialEq for Beverage {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (a, b) {
                (Beverage::Base(x), Beverage::Base(y)) => return x == y,
                (
                    Beverage::Decorated {
                        add_on: x,
                        inner: inner_a,
                    },
                    Beverage::Decorated {
                        add_on: y,
                        inner: inner_b,
                    },
                ) => {
                    if x != y {
                        return false;
                    }
                    a = inner_a.as_ref();
                    b = inner_b.as_ref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Beverage {}

impl fmt::Debug for Beverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Beverage")
            .field("base", &self.base())
            .field("add_ons", &self.add_ons())
            .finish()
    }
}

impl fmt::Display for Beverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_prices_and_labels() {
        let expected = [
            (BaseKind::Espresso, 500, "Espresso"),
            (BaseKind::Tea, 300, "Tea"),
            (BaseKind::Latte, 700, "Latte"),
            (BaseKind::Mocha, 800, "Mocha"),
        ];
        for (kind, price, label) in expected {
            let drink = Beverage::new(kind);
            assert_eq!(drink.cost(), Amount(price));
            assert_eq!(drink.description(), label);
            assert_eq!(drink.depth(), 1);
            assert!(drink.add_ons().is_empty());
        }
    }

    #[test]
    fn surcharges() {
        assert_eq!(AddOn::Milk.surcharge(), Amount(100));
        assert_eq!(AddOn::Sugar.surcharge(), Amount(20));
        assert_eq!(AddOn::WhippedCream.surcharge(), Amount(150));
        assert_eq!(AddOn::Caramel.surcharge(), Amount(130));
        assert_eq!(AddOn::Soy.surcharge(), Amount(120));
    }

    #[test]
    fn wrapping_appends_to_description() {
        let drink = Beverage::new(BaseKind::Tea)
            .with(AddOn::Sugar)
            .with(AddOn::WhippedCream);
        assert_eq!(drink.description(), "Tea, Sugar, Whipped Cream");
        assert_eq!(drink.cost(), Amount(470));
        assert_eq!(drink.base(), BaseKind::Tea);
        assert_eq!(drink.add_ons(), vec![AddOn::Sugar, AddOn::WhippedCream]);
        assert_eq!(drink.depth(), 3);
    }

    #[test]
    fn russian_description() {
        let drink = Beverage::new(BaseKind::Latte)
            .with(AddOn::Milk)
            .with(AddOn::Caramel);
        assert_eq!(
            drink.description_in(Locale::Russian),
            "Латте, молоко, карамель"
        );
    }

    #[test]
    fn display_matches_description() {
        let drink = Beverage::new(BaseKind::Mocha).with(AddOn::Soy);
        assert_eq!(drink.to_string(), "Mocha, Soy");
    }

    #[test]
    fn equality_walks_whole_chain() {
        let a = Beverage::new(BaseKind::Latte).with(AddOn::Milk);
        assert_eq!(a, Beverage::new(BaseKind::Latte).with(AddOn::Milk));
        assert_ne!(a, Beverage::new(BaseKind::Latte).with(AddOn::Soy));
        assert_ne!(a, Beverage::new(BaseKind::Tea).with(AddOn::Milk));
        assert_ne!(a, Beverage::new(BaseKind::Latte));
    }

    #[test]
    fn debug_lists_base_and_add_ons() {
        let drink = Beverage::new(BaseKind::Tea).with(AddOn::Sugar);
        assert_eq!(
            format!("{drink:?}"),
            "Beverage { base: Tea, add_ons: [Sugar] }"
        );
    }

    #[test]
    fn take_inner_detaches_one_layer() {
        let mut drink = Beverage::new(BaseKind::Mocha).with(AddOn::Milk).with(AddOn::Soy);
        let inner = take_inner(&mut drink).unwrap();
        assert_eq!(inner, Beverage::new(BaseKind::Mocha).with(AddOn::Milk));
        assert_eq!(drink.depth(), 2);
        assert!(take_inner(&mut Beverage::new(BaseKind::Tea)).is_none());
    }

    #[test]
    fn locale_parse() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::English));
        assert_eq!("RU".parse::<Locale>(), Ok(Locale::Russian));
        assert_eq!(" russian ".parse::<Locale>(), Ok(Locale::Russian));
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(InputError::UnknownLocale("fr".to_string()))
        );
    }
}
