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

//! Payment processor and adapter integration tests.

use cafe_pos::{
    Amount, BankApi, BankTransferAdapter, ChargeLog, Currency, MemoryLog, PayPalProcessor,
    PaymentProcessor, ProcessorKind, ProcessorOptions, StripeAdapter, StripeApi,
    create_processor,
};
use std::cell::RefCell;
use std::sync::Arc;

/// Stripe-shaped stub answering with a fixed result.
struct FixedStripe {
    result: bool,
    calls: RefCell<Vec<Amount>>,
}

impl FixedStripe {
    fn new(result: bool) -> Self {
        Self {
            result,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl StripeApi for FixedStripe {
    fn make_transaction(&self, total_amount: Amount) -> bool {
        self.calls.borrow_mut().push(total_amount);
        self.result
    }
}

/// Bank-shaped stub answering with a fixed status.
struct FixedBank {
    status: &'static str,
    calls: RefCell<Vec<(Amount, String)>>,
}

impl FixedBank {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl BankApi for FixedBank {
    fn send(&self, amount: Amount, currency: &str) -> String {
        self.calls.borrow_mut().push((amount, currency.to_string()));
        self.status.to_string()
    }
}

fn usd() -> Currency {
    "USD".parse().unwrap()
}

#[test]
fn paypal_accepts_zero_and_large_amounts() {
    let log = Arc::new(MemoryLog::new());
    let processor = PayPalProcessor::new(log.clone());

    assert!(processor.charge(Amount(0)));
    assert!(processor.charge(Amount(u64::MAX)));
    assert_eq!(log.len(), 2);
}

#[test]
fn stripe_adapter_passes_result_through() {
    for result in [true, false] {
        let adapter = StripeAdapter::new(FixedStripe::new(result));
        assert_eq!(adapter.charge(Amount(930)), result);
        assert_eq!(*adapter.api().calls.borrow(), vec![Amount(930)]);
    }
}

#[test]
fn bank_adapter_sends_amount_and_currency() {
    let adapter = BankTransferAdapter::with_currency(FixedBank::new("OK"), usd());

    assert!(adapter.charge(Amount(930)));
    assert_eq!(
        *adapter.api().calls.borrow(),
        vec![(Amount(930), "USD".to_string())]
    );
}

#[test]
fn bank_adapter_defaults_to_kzt() {
    let adapter = BankTransferAdapter::new(FixedBank::new("OK"));

    assert!(adapter.charge(Amount(300)));
    assert_eq!(adapter.currency(), Currency::KZT);
    assert_eq!(adapter.api().calls.borrow()[0].1, "KZT");
}

#[test]
fn bank_adapter_only_exact_ok_succeeds() {
    for status in ["", "ok", "Ok", "OK ", " OK", "FAILED", "OKAY", "PENDING"] {
        let adapter = BankTransferAdapter::new(FixedBank::new(status));
        assert!(
            !adapter.charge(Amount(100)),
            "status {status:?} must be treated as a decline"
        );
    }
}

#[test]
fn processors_are_interchangeable() {
    let log = Arc::new(MemoryLog::new());
    let processors: Vec<Box<dyn PaymentProcessor>> = ProcessorKind::ALL
        .into_iter()
        .map(|kind| create_processor(kind, ProcessorOptions::default(), log.clone()))
        .collect();

    let kinds: Vec<_> = processors.iter().map(|p| p.kind()).collect();
    assert_eq!(kinds, ProcessorKind::ALL.to_vec());

    for processor in &processors {
        assert!(processor.charge(Amount(540)));
    }

    let records = log.records();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.amount == Amount(540)));
    assert_eq!(records[2].currency, Some(Currency::KZT));
}

#[test]
fn confirmation_lines_go_to_the_given_sink() {
    let log = Arc::new(MemoryLog::new());
    let sink: Arc<dyn ChargeLog> = log.clone();
    let processor = create_processor(
        ProcessorKind::BankTransfer,
        ProcessorOptions {
            currency: Some(usd()),
        },
        sink,
    );

    assert!(processor.charge(Amount(930)));
    assert_eq!(log.records()[0].to_string(), "[Bank] transfer of 930 USD sent");
}
