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

use cafe_pos::{
    AddOn, BaseKind, ChargeLog, Currency, Locale, Order, ProcessorKind, ProcessorOptions, Receipt,
    WriterLog, create_processor, parse_choice,
};
use clap::Parser;
use csv::Writer;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Café POS - Order a drink and pay for it
///
/// Walks through drink selection, add-ons and payment on the terminal.
#[derive(Parser, Debug)]
#[command(name = "cafe-pos")]
#[command(about = "An interactive café point of sale", long_about = None)]
struct Args {
    /// Settlement currency for bank transfers
    #[arg(long, value_name = "CODE", default_value = "KZT")]
    currency: Currency,

    /// Language for drink and add-on names (en, ru)
    #[arg(long, default_value = "en")]
    locale: Locale,

    /// Also write the receipt as CSV to this file
    #[arg(long, value_name = "FILE")]
    receipt: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Session settings resolved from the command line.
#[derive(Debug, Clone, Copy, Default)]
struct Settings {
    currency: Currency,
    locale: Locale,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings {
        currency: args.currency,
        locale: args.locale,
    };
    let log: Arc<dyn ChargeLog> = Arc::new(WriterLog::new(io::stdout()));

    let stdin = io::stdin();
    let receipt = match run_session(stdin.lock(), &mut io::stdout(), &settings, log) {
        Ok(Some(receipt)) => receipt,
        Ok(None) => {
            eprintln!("Input ended before the order was complete");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error during session: {}", e);
            process::exit(1);
        }
    };

    if let Some(path) = args.receipt {
        let file = match File::create(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error creating receipt file '{}': {}", path.display(), e);
                process::exit(1);
            }
        };
        if let Err(e) = write_receipt(&receipt, file) {
            eprintln!("Error writing receipt: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "cafe_pos=debug"
    } else {
        "cafe_pos=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Reads a menu number, re-prompting until it lies within `min..=max`.
///
/// Returns `None` once input is exhausted.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    min: u32,
    max: u32,
) -> io::Result<Option<u32>> {
    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_choice(&line, min, max) {
            Ok(choice) => return Ok(Some(choice)),
            Err(e) => {
                debug!(error = %e, "rejected menu input");
                writeln!(output, "Invalid input ({e}). Try again.")?;
            }
        }
    }
}

/// Runs one ordering session: drink, add-ons, payment.
///
/// Menus and results go to `output`; charge confirmations go to `log`.
/// Returns `None` if `input` ends before payment is chosen.
///
/// # Errors
///
/// Returns an I/O error if reading `input` or writing `output` fails.
fn run_session<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    settings: &Settings,
    log: Arc<dyn ChargeLog>,
) -> io::Result<Option<Receipt>> {
    let locale = settings.locale;
    writeln!(output, "==== Café ====")?;

    writeln!(output, "\nChoose a drink:")?;
    for (number, kind) in (1..).zip(BaseKind::ALL) {
        writeln!(output, "{number}) {} ({})", kind.label(locale), kind.price())?;
    }
    let prompt = format!("Your choice ({}-{}): ", BaseKind::MENU_MIN, BaseKind::MENU_MAX);
    let Some(choice) = ask(&mut input, output, &prompt, BaseKind::MENU_MIN, BaseKind::MENU_MAX)?
    else {
        return Ok(None);
    };
    let kind = BaseKind::from_choice(choice).expect("drink number was range-checked");
    let mut order = Order::with_locale(kind, locale);

    // Any number of add-ons, until "done".
    loop {
        writeln!(output, "\nAdd-ons:")?;
        for (number, add_on) in (1..).zip(AddOn::ALL) {
            writeln!(output, "{number}) {} (+{})", add_on.label(locale), add_on.surcharge())?;
        }
        writeln!(output, "{}) Done", AddOn::MENU_DONE)?;
        let prompt = format!("Choose ({}-{}): ", AddOn::MENU_DONE, AddOn::MENU_MAX);
        let Some(choice) = ask(&mut input, output, &prompt, AddOn::MENU_DONE, AddOn::MENU_MAX)?
        else {
            return Ok(None);
        };
        match AddOn::from_choice(choice) {
            Some(add_on) => order = order.add(add_on),
            None => break,
        }
    }

    writeln!(output, "\nYour order: {}", order.description())?;
    writeln!(output, "Total to pay: {}", order.total())?;

    writeln!(output, "\nPayment:")?;
    for (number, kind) in (1..).zip(ProcessorKind::ALL) {
        match kind {
            ProcessorKind::PayPal => writeln!(output, "{number}) {kind}")?,
            _ => writeln!(output, "{number}) {kind} (via adapter)")?,
        }
    }
    let prompt = format!(
        "Your choice ({}-{}): ",
        ProcessorKind::MENU_MIN,
        ProcessorKind::MENU_MAX
    );
    let Some(choice) = ask(
        &mut input,
        output,
        &prompt,
        ProcessorKind::MENU_MIN,
        ProcessorKind::MENU_MAX,
    )?
    else {
        return Ok(None);
    };
    let kind = ProcessorKind::from_choice(choice).expect("payment number was range-checked");

    let options = ProcessorOptions {
        currency: Some(settings.currency),
    };
    let processor = create_processor(kind, options, log);
    let receipt = order.checkout(processor.as_ref());

    if receipt.is_paid() {
        writeln!(output, "Status: success!")?;
    } else {
        writeln!(output, "Status: payment failed!")?;
    }
    writeln!(output, "\nThank you! See you soon :)")?;

    Ok(Some(receipt))
}

/// Write a receipt to a CSV writer
///
/// # CSV Format
///
/// Columns: `description, total, processor, status`
///
/// # Example
///
/// ```csv
/// description,total,processor,status
/// "Latte, Milk, Caramel",930,BankTransfer,accepted
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_receipt<W: Write>(receipt: &Receipt, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.serialize(receipt)?;
    wtr.flush()?;
    Ok(())
}
