//! The demonstration batch: three buys and two sells across GBP, AED, SAR
//! and USD. Two sells settle on the same Sunday, a trading day for SAR but a
//! rest day for USD.

use crate::core::direction::Direction;
use crate::core::instruction::InstructionRecord;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn record(
    entity: &str,
    direction: Direction,
    currency: &str,
    instruction_date: Option<NaiveDate>,
    settlement_date: Option<NaiveDate>,
) -> InstructionRecord {
    InstructionRecord {
        entity: Some(entity.to_string()),
        direction: Some(direction),
        currency: Some(currency.into()),
        instruction_date,
        settlement_date,
        price_per_unit: Some(dec!(100)),
        ..InstructionRecord::default()
    }
}

/// Five sample instructions.
///
/// | Entity  | Dir  | Ccy | FX     | Units | Settles    |
/// |---------|------|-----|--------|-------|------------|
/// | Google  | BUY  | GBP | 1.11   | 9     | 2018-01-15 |
/// | Yahoo   | BUY  | AED | 19.001 | 2     | 2018-06-20 |
/// | Asus    | BUY  | GBP | 1.11   | 10    | 2018-01-15 |
/// | Lego    | SELL | SAR | 0.27   | 5     | 2018-06-10 |
/// | Verizon | SELL | USD | 1      | 3     | 2018-06-10 (Sun, moves to Mon 11th) |
pub fn sample_instructions() -> Vec<InstructionRecord> {
    vec![
        record("Google", Direction::Buy, "GBP", date(2018, 1, 10), date(2018, 1, 15))
            .with_agreed_fx(dec!(1.11))
            .with_units(9),
        record("Yahoo", Direction::Buy, "AED", date(2018, 1, 10), date(2018, 6, 20))
            .with_agreed_fx(dec!(19.001))
            .with_units(2),
        record("Asus", Direction::Buy, "GBP", date(2018, 3, 12), date(2018, 1, 15))
            .with_agreed_fx(dec!(1.11))
            .with_units(10),
        record("Lego", Direction::Sell, "SAR", date(2018, 3, 12), date(2018, 6, 10))
            .with_agreed_fx(dec!(0.27))
            .with_units(5),
        record("Verizon", Direction::Sell, "USD", date(2018, 5, 15), date(2018, 6, 10))
            .with_agreed_fx(dec!(1))
            .with_units(3),
    ]
}

/// The dates the sample report filters on.
pub fn sample_report_dates() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2018, 6, 10).unwrap_or_default(),
        NaiveDate::from_ymd_opt(2018, 1, 15).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::InstructionValidator;

    #[test]
    fn test_sample_is_complete() {
        let validator = InstructionValidator::new();
        let sample = sample_instructions();
        assert_eq!(sample.len(), 5);
        assert!(sample.iter().all(|r| validator.is_valid(r)));
    }
}
