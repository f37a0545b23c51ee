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

//! # Café POS
//!
//! This library provides the ordering and payment core of a café point of
//! sale: drinks built from a base plus any number of stackable add-ons, and
//! payment backends with unrelated native APIs behind one charging contract.
//!
//! ## Core Components
//!
//! - [`Beverage`]: Base drink or add-on wrapping another beverage
//! - [`Order`]: One session's beverage chain, charged at checkout
//! - [`PaymentProcessor`]: Uniform charging contract
//! - [`StripeAdapter`] / [`BankTransferAdapter`]: Bridges from foreign payment APIs
//! - [`ChargeLog`]: Sink for charge confirmations
//! - [`parse_choice`]: Menu input validation for interactive shells
//!
//! ## Example
//!
//! ```
//! use cafe_pos::{
//!     AddOn, Amount, BaseKind, MemoryLog, Order, ProcessorKind, ProcessorOptions,
//!     create_processor,
//! };
//! use std::sync::Arc;
//!
//! let order = Order::new(BaseKind::Latte)
//!     .add(AddOn::Milk)
//!     .add(AddOn::Caramel);
//! assert_eq!(order.description(), "Latte, Milk, Caramel");
//! assert_eq!(order.total(), Amount(930));
//!
//! let log = Arc::new(MemoryLog::new());
//! let processor = create_processor(
//!     ProcessorKind::BankTransfer,
//!     ProcessorOptions::default(),
//!     log.clone(),
//! );
//! let receipt = order.checkout(processor.as_ref());
//! assert!(receipt.is_paid());
//! assert_eq!(log.len(), 1);
//! ```
//!
//! ## Threading
//!
//! Everything runs synchronously on the caller's thread. Beverage chains are
//! plain owned values and are released when the head goes out of scope.

mod base;
pub mod beverage;
pub mod charge_log;
pub mod error;
pub mod menu;
pub mod order;
pub mod payment;

pub use base::{Amount, Currency};
pub use beverage::{AddOn, BaseKind, Beverage, Locale};
pub use charge_log::{ChargeLog, ChargeRecord, MemoryLog, TracingLog, WriterLog};
pub use error::InputError;
pub use menu::parse_choice;
pub use order::{Order, PaymentStatus, Receipt, apply_add_on, create_base_beverage};
pub use payment::{
    BankApi, BankTransferAdapter, BankTransferService, PayPalProcessor, PaymentProcessor,
    ProcessorKind, ProcessorOptions, StripeAdapter, StripeApi, StripeService, create_processor,
};
