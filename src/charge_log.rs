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

//! Charge confirmation sinks.
//!
//! Every charge attempt that reaches a payment backend leaves one
//! [`ChargeRecord`] in a [`ChargeLog`]. Where the record ends up is up to the
//! caller: the tracing pipeline, an in-memory buffer, or any writer.

use crate::base::{Amount, Currency};
use crate::payment::ProcessorKind;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::{info, warn};

/// Confirmation emitted by a payment backend for one charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChargeRecord {
    pub processor: ProcessorKind,
    pub amount: Amount,
    /// Set only by backends that take a currency.
    pub currency: Option<Currency>,
}

impl fmt::Display for ChargeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.processor, self.currency) {
            (ProcessorKind::PayPal, _) => write!(f, "[PayPal] payment of {} accepted", self.amount),
            (ProcessorKind::Stripe, _) => {
                write!(f, "[Stripe] transaction of {} completed", self.amount)
            }
            (ProcessorKind::BankTransfer, Some(currency)) => {
                write!(f, "[Bank] transfer of {} {} sent", self.amount, currency)
            }
            (ProcessorKind::BankTransfer, None) => {
                write!(f, "[Bank] transfer of {} sent", self.amount)
            }
        }
    }
}

/// Destination for charge confirmations.
pub trait ChargeLog: Send + Sync {
    fn record(&self, record: &ChargeRecord);
}

/// Forwards records to `tracing` at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl ChargeLog for TracingLog {
    fn record(&self, record: &ChargeRecord) {
        info!(
            processor = ?record.processor,
            amount = %record.amount,
            currency = ?record.currency,
            "{record}"
        );
    }
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<ChargeRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    pub fn records(&self) -> Vec<ChargeRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl ChargeLog for MemoryLog {
    fn record(&self, record: &ChargeRecord) {
        self.records.lock().push(*record);
    }
}

/// Writes each record's display form as one line.
///
/// Write failures are reported through `tracing` and otherwise ignored: a
/// lost confirmation line never changes the outcome of a charge.
#[derive(Debug)]
pub struct WriterLog<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> ChargeLog for WriterLog<W> {
    fn record(&self, record: &ChargeRecord) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{record}").and_then(|()| writer.flush()) {
            warn!(error = %e, "failed to write charge confirmation");
        }
    }
}
