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

//! Order composition and checkout.
//!
//! An [`Order`] owns exactly one beverage chain for the length of a session.
//! It grows only by wrapping and is charged once at checkout, producing a
//! [`Receipt`] the shell can print or save.

use crate::base::Amount;
use crate::beverage::{AddOn, BaseKind, Beverage, Locale};
use crate::payment::{PaymentProcessor, ProcessorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Starts a new chain from a base drink.
pub fn create_base_beverage(kind: BaseKind) -> Beverage {
    Beverage::new(kind)
}

/// Wraps `current` in `add_on` and returns the new head. `current` is
/// consumed.
pub fn apply_add_on(current: Beverage, add_on: AddOn) -> Beverage {
    current.with(add_on)
}

/// Outcome of a charge as reported on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Accepted,
    Declined,
}

impl From<bool> for PaymentStatus {
    fn from(accepted: bool) -> Self {
        if accepted {
            PaymentStatus::Accepted
        } else {
            PaymentStatus::Declined
        }
    }
}

/// Result of checking out an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Receipt {
    pub description: String,
    pub total: Amount,
    pub processor: ProcessorKind,
    pub status: PaymentStatus,
}

impl Receipt {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Accepted
    }
}

/// A single café order.
#[derive(Debug)]
pub struct Order {
    beverage: Beverage,
    locale: Locale,
}

impl Order {
    pub fn new(kind: BaseKind) -> Self {
        Self::with_locale(kind, Locale::default())
    }

    /// Order whose receipt is described in `locale`.
    pub fn with_locale(kind: BaseKind, locale: Locale) -> Self {
        Self {
            beverage: create_base_beverage(kind),
            locale,
        }
    }

    pub fn add(self, add_on: AddOn) -> Self {
        Self {
            beverage: apply_add_on(self.beverage, add_on),
            locale: self.locale,
        }
    }

    pub fn beverage(&self) -> &Beverage {
        &self.beverage
    }

    pub fn description(&self) -> String {
        self.beverage.description_in(self.locale)
    }

    pub fn total(&self) -> Amount {
        self.beverage.cost()
    }

    /// Charges the order total through `processor`, exactly once.
    pub fn checkout(&self, processor: &dyn PaymentProcessor) -> Receipt {
        let total = self.total();
        debug!(%total, processor = ?processor.kind(), "checking out");
        let accepted = processor.charge(total);

        Receipt {
            description: self.description(),
            total,
            processor: processor.kind(),
            status: accepted.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every amount it is asked to charge.
    struct Recorder {
        accept: bool,
        charged: RefCell<Vec<Amount>>,
    }

    impl Recorder {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                charged: RefCell::new(Vec::new()),
            }
        }
    }

    impl PaymentProcessor for Recorder {
        fn kind(&self) -> ProcessorKind {
            ProcessorKind::Stripe
        }

        fn charge(&self, amount: Amount) -> bool {
            self.charged.borrow_mut().push(amount);
            self.accept
        }
    }

    #[test]
    fn free_functions_build_chain() {
        let drink = create_base_beverage(BaseKind::Espresso);
        let drink = apply_add_on(drink, AddOn::Milk);
        let drink = apply_add_on(drink, AddOn::Milk);
        assert_eq!(drink.description(), "Espresso, Milk, Milk");
        assert_eq!(drink.cost(), Amount(700));
    }

    #[test]
    fn checkout_charges_total_once() {
        let order = Order::new(BaseKind::Latte)
            .add(AddOn::Milk)
            .add(AddOn::Caramel);
        let processor = Recorder::new(true);

        let receipt = order.checkout(&processor);

        assert_eq!(*processor.charged.borrow(), vec![Amount(930)]);
        assert_eq!(
            receipt,
            Receipt {
                description: "Latte, Milk, Caramel".to_string(),
                total: Amount(930),
                processor: ProcessorKind::Stripe,
                status: PaymentStatus::Accepted,
            }
        );
        assert!(receipt.is_paid());
    }

    #[test]
    fn declined_checkout() {
        let order = Order::new(BaseKind::Tea);
        let receipt = order.checkout(&Recorder::new(false));
        assert_eq!(receipt.status, PaymentStatus::Declined);
        assert!(!receipt.is_paid());
        assert_eq!(receipt.total, Amount(300));
    }

    #[test]
    fn receipt_uses_order_locale() {
        let order = Order::with_locale(BaseKind::Mocha, Locale::Russian).add(AddOn::WhippedCream);
        let receipt = order.checkout(&Recorder::new(true));
        assert_eq!(receipt.description, "Мокка, взбитые сливки");
        assert_eq!(order.beverage().description(), "Mocha, Whipped Cream");
    }

    #[test]
    fn status_from_bool() {
        assert_eq!(PaymentStatus::from(true), PaymentStatus::Accepted);
        assert_eq!(PaymentStatus::from(false), PaymentStatus::Declined);
    }
}
