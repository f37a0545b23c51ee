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

//! Payment processors.
//!
//! Order code charges through a single [`PaymentProcessor`] contract. Each
//! backend behind it exposes its own native API:
//!
//! | Backend | Native call | Bridged by |
//! |---------|-------------|------------|
//! | PayPal | `charge(amount) -> bool` | implements the contract directly |
//! | Stripe | `make_transaction(total) -> bool` | [`StripeAdapter`] |
//! | Bank transfer | `send(amount, currency) -> String` | [`BankTransferAdapter`] |
//!
//! Adding a backend means writing one more adapter; callers never change.
//! A declined charge is `false`, never an error.

use crate::base::{Amount, Currency};
use crate::charge_log::{ChargeLog, ChargeRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Uniform charging contract.
pub trait PaymentProcessor {
    /// Which backend this processor charges through.
    fn kind(&self) -> ProcessorKind;

    /// Charges `amount`. Returns `true` if the backend accepted it.
    fn charge(&self, amount: Amount) -> bool;
}

/// Selectable payment backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ProcessorKind {
    PayPal,
    Stripe,
    BankTransfer,
}

impl ProcessorKind {
    /// All backends in menu order.
    pub const ALL: [ProcessorKind; 3] = [
        ProcessorKind::PayPal,
        ProcessorKind::Stripe,
        ProcessorKind::BankTransfer,
    ];
}

impl fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorKind::PayPal => f.write_str("PayPal"),
            ProcessorKind::Stripe => f.write_str("Stripe"),
            ProcessorKind::BankTransfer => f.write_str("Bank transfer"),
        }
    }
}

/// Construction options for [`create_processor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorOptions {
    /// Settlement currency for backends that take one. Defaults to `KZT`.
    pub currency: Option<Currency>,
}

/// Builds the processor for `kind`, wired to the simulated backend, with
/// confirmations going to `log`.
pub fn create_processor(
    kind: ProcessorKind,
    options: ProcessorOptions,
    log: Arc<dyn ChargeLog>,
) -> Box<dyn PaymentProcessor> {
    match kind {
        ProcessorKind::PayPal => Box::new(PayPalProcessor::new(log)),
        ProcessorKind::Stripe => Box::new(StripeAdapter::new(StripeService::new(log))),
        ProcessorKind::BankTransfer => Box::new(BankTransferAdapter::with_currency(
            BankTransferService::new(log),
            options.currency.unwrap_or_default(),
        )),
    }
}

fn trace_outcome(kind: ProcessorKind, amount: Amount, accepted: bool) {
    if accepted {
        info!(processor = ?kind, %amount, "charge accepted");
    } else {
        warn!(processor = ?kind, %amount, "charge declined");
    }
}

// === Direct ===

/// Simulated gateway that speaks the processor contract natively.
///
/// Accepts every amount, zero included.
pub struct PayPalProcessor {
    log: Arc<dyn ChargeLog>,
}

impl PayPalProcessor {
    pub fn new(log: Arc<dyn ChargeLog>) -> Self {
        Self { log }
    }
}

impl PaymentProcessor for PayPalProcessor {
    fn kind(&self) -> ProcessorKind {
        ProcessorKind::PayPal
    }

    fn charge(&self, amount: Amount) -> bool {
        self.log.record(&ChargeRecord {
            processor: ProcessorKind::PayPal,
            amount,
            currency: None,
        });
        trace_outcome(ProcessorKind::PayPal, amount, true);
        true
    }
}

// === Stripe ===

/// Native shape of the Stripe-style API.
pub trait StripeApi {
    fn make_transaction(&self, total_amount: Amount) -> bool;
}

/// Simulated Stripe backend; completes every transaction.
pub struct StripeService {
    log: Arc<dyn ChargeLog>,
}

impl StripeService {
    pub fn new(log: Arc<dyn ChargeLog>) -> Self {
        Self { log }
    }
}

impl StripeApi for StripeService {
    fn make_transaction(&self, total_amount: Amount) -> bool {
        self.log.record(&ChargeRecord {
            processor: ProcessorKind::Stripe,
            amount: total_amount,
            currency: None,
        });
        true
    }
}

/// Presents a [`StripeApi`] as a [`PaymentProcessor`].
///
/// The result of `make_transaction` is passed through unchanged.
pub struct StripeAdapter<S = StripeService> {
    stripe: S,
}

impl<S: StripeApi> StripeAdapter<S> {
    pub fn new(stripe: S) -> Self {
        Self { stripe }
    }

    /// The wrapped Stripe client.
    pub fn api(&self) -> &S {
        &self.stripe
    }
}

impl<S: StripeApi> PaymentProcessor for StripeAdapter<S> {
    fn kind(&self) -> ProcessorKind {
        ProcessorKind::Stripe
    }

    fn charge(&self, amount: Amount) -> bool {
        let accepted = self.stripe.make_transaction(amount);
        trace_outcome(ProcessorKind::Stripe, amount, accepted);
        accepted
    }
}

// === Bank transfer ===

/// Native shape of the bank transfer API. Returns a status string, `"OK"`
/// on success.
pub trait BankApi {
    fn send(&self, amount: Amount, currency: &str) -> String;
}

/// Simulated bank backend; every transfer is sent.
pub struct BankTransferService {
    log: Arc<dyn ChargeLog>,
}

impl BankTransferService {
    pub const STATUS_OK: &'static str = "OK";

    pub fn new(log: Arc<dyn ChargeLog>) -> Self {
        Self { log }
    }
}

impl BankApi for BankTransferService {
    fn send(&self, amount: Amount, currency: &str) -> String {
        let currency = match currency.parse() {
            Ok(code) => Some(code),
            Err(e) => {
                warn!(error = %e, "bank transfer confirmation without currency");
                None
            }
        };
        self.log.record(&ChargeRecord {
            processor: ProcessorKind::BankTransfer,
            amount,
            currency,
        });
        Self::STATUS_OK.to_string()
    }
}

/// Presents a [`BankApi`] as a [`PaymentProcessor`].
///
/// The currency is fixed at construction. A charge succeeds only when the
/// bank answers exactly `"OK"`; any other status, including `"ok"` or an
/// empty string, is a decline.
pub struct BankTransferAdapter<B = BankTransferService> {
    bank: B,
    currency: Currency,
}

impl<B: BankApi> BankTransferAdapter<B> {
    /// Adapter settling in the default currency (`KZT`).
    pub fn new(bank: B) -> Self {
        Self::with_currency(bank, Currency::default())
    }

    pub fn with_currency(bank: B, currency: Currency) -> Self {
        Self { bank, currency }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The wrapped bank client.
    pub fn api(&self) -> &B {
        &self.bank
    }
}

impl<B: BankApi> PaymentProcessor for BankTransferAdapter<B> {
    fn kind(&self) -> ProcessorKind {
        ProcessorKind::BankTransfer
    }

    fn charge(&self, amount: Amount) -> bool {
        let status = self.bank.send(amount, self.currency.as_str());
        let accepted = status == BankTransferService::STATUS_OK;
        if !accepted {
            warn!(%status, currency = %self.currency, "bank returned non-OK status");
        }
        trace_outcome(ProcessorKind::BankTransfer, amount, accepted);
        accepted
    }
}
