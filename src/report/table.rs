//! Fixed-width console tables for processed batches.
//!
//! Column layout, right-aligned:
//!
//! ```text
//! Entity(10) AgreedFx(10) Currency(10) Instruction Date(19)
//! Settlement Date(18) Units(10) Price per unit(16) Amount in USD(15)
//! ```
//!
//! AgreedFx and USD amounts are shown with two decimals, rounded half-up.

use crate::core::direction::Flow;
use crate::core::instruction::Instruction;
use crate::processing::batch::ProcessedBatch;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Header date format for date-filtered sections (`dd/mm/YYYY`).
pub const HEADER_DATE_FORMAT: &str = "%d/%m/%Y";

const HEADERS: [&str; 8] = [
    "Entity",
    "AgreedFx",
    "Currency",
    "Instruction Date",
    "Settlement Date",
    "Units",
    "Price per unit",
    "Amount in USD",
];

/// Round to two decimals, midpoint away from zero, and always print two places.
pub fn two_decimals(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn row(cells: [&str; 8]) -> String {
    format!(
        "{:>10}{:>10}{:>10}{:>19}{:>18}{:>10}{:>16}{:>15}\n",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7]
    )
}

pub fn header_row() -> String {
    row(HEADERS)
}

pub fn instruction_row(instruction: &Instruction) -> String {
    let agreed_fx = two_decimals(instruction.agreed_fx());
    let currency = instruction.currency().to_string();
    let instruction_date = instruction.instruction_date().to_string();
    let settlement_date = instruction.settlement_date().to_string();
    let units = instruction.units().to_string();
    let price = instruction.price_per_unit().to_string();
    let amount = two_decimals(instruction.usd_amount());
    row([
        instruction.entity(),
        &agreed_fx,
        &currency,
        &instruction_date,
        &settlement_date,
        &units,
        &price,
        &amount,
    ])
}

/// A titled table of instructions, in the order given.
pub fn render_instructions<'a, I>(title: &str, instructions: I) -> String
where
    I: IntoIterator<Item = &'a Instruction>,
{
    let mut out = format!("\n{}:\n\n", title);
    out.push_str(&header_row());
    for instruction in instructions {
        out.push_str(&instruction_row(instruction));
    }
    out
}

/// Every instruction of `flow`, largest USD amount first.
pub fn render_ranking(batch: &ProcessedBatch, flow: Flow) -> String {
    render_instructions(
        &format!("{} INSTRUCTIONS", flow),
        batch.bucket(flow).ranked(),
    )
}

/// Instructions of `flow` settling on `date`, largest USD amount first.
pub fn render_on_date(batch: &ProcessedBatch, flow: Flow, date: NaiveDate) -> String {
    render_instructions(
        &format!(
            "{} INSTRUCTIONS ON {}",
            flow,
            date.format(HEADER_DATE_FORMAT)
        ),
        batch.bucket(flow).ranked().on_date(date),
    )
}

/// Accumulated USD amount per settlement date for `flow`, earliest first.
pub fn render_daily_totals(batch: &ProcessedBatch, flow: Flow) -> String {
    let mut out = format!("\n{} USD PER SETTLEMENT DATE:\n\n", flow);
    out.push_str(&format!("{:>18}{:>15}\n", "Settlement Date", "Amount in USD"));
    for (date, amount) in batch.bucket(flow).by_date() {
        out.push_str(&format!(
            "{:>18}{:>15}\n",
            date.to_string(),
            two_decimals(*amount)
        ));
    }
    out
}
