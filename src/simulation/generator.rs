//! Random instruction batches for load tests and demos.

use crate::core::currency::CurrencyCode;
use crate::core::direction::Direction;
use crate::core::instruction::InstructionRecord;
use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random instruction batch.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of records to generate.
    pub count: usize,
    pub currencies: Vec<CurrencyCode>,
    pub entities: Vec<String>,
    /// First possible settlement date.
    pub start_date: NaiveDate,
    /// Settlement dates fall within `start_date .. start_date + window_days`.
    pub window_days: u64,
    pub max_units: i64,
    /// Share of records (0.0 to 1.0) generated with a required field left out.
    pub incomplete_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 100,
            currencies: ["USD", "GBP", "EUR", "JPY", "AED", "SAR"]
                .into_iter()
                .map(CurrencyCode::new)
                .collect(),
            entities: ["Google", "Yahoo", "Asus", "Lego", "Verizon", "Nikon", "Canon"]
                .into_iter()
                .map(String::from)
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            window_days: 60,
            max_units: 1_000,
            incomplete_ratio: 0.0,
        }
    }
}

/// Generate a random instruction batch using the thread-local RNG.
pub fn generate_random_batch(config: &GeneratorConfig) -> Vec<InstructionRecord> {
    generate_random_batch_with(&mut rand::thread_rng(), config)
}

/// Generate a random instruction batch from `rng`.
pub fn generate_random_batch_with<R: Rng>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Vec<InstructionRecord> {
    (0..config.count)
        .map(|_| {
            let record = random_record(rng, config);
            if rng.gen_bool(config.incomplete_ratio.clamp(0.0, 1.0)) {
                drop_required_field(rng, record)
            } else {
                record
            }
        })
        .collect()
}

fn random_record<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> InstructionRecord {
    let entity = pick(rng, &config.entities)
        .cloned()
        .unwrap_or_else(|| "ENTITY".to_string());
    let currency = pick(rng, &config.currencies)
        .cloned()
        .unwrap_or_else(|| CurrencyCode::new("USD"));
    let direction = if rng.gen_bool(0.5) {
        Direction::Buy
    } else {
        Direction::Sell
    };

    let settlement_offset = rng.gen_range(0..config.window_days.max(1));
    let lead_days = rng.gen_range(0..10);
    let settlement_date = config.start_date + Days::new(settlement_offset);
    let instruction_date = settlement_date - Days::new(lead_days);

    // fx in 0.0001..=50.0000, price in 0.01..=10000.00
    let agreed_fx = Decimal::new(rng.gen_range(1..=500_000), 4);
    let price_per_unit = Decimal::new(rng.gen_range(1..=1_000_000), 2);
    let units = rng.gen_range(1..=config.max_units.max(1));

    InstructionRecord::new()
        .with_entity(entity)
        .with_direction(direction)
        .with_agreed_fx(agreed_fx)
        .with_currency(currency)
        .with_instruction_date(instruction_date)
        .with_settlement_date(settlement_date)
        .with_units(units)
        .with_price_per_unit(price_per_unit)
}

fn drop_required_field<R: Rng>(rng: &mut R, mut record: InstructionRecord) -> InstructionRecord {
    match rng.gen_range(0..7) {
        0 => record.entity = None,
        1 => record.direction = None,
        2 => record.agreed_fx = None,
        3 => record.price_per_unit = None,
        4 => record.currency = None,
        5 => record.instruction_date = None,
        _ => record.settlement_date = None,
    }
    record
}

fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.gen_range(0..items.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::InstructionValidator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_requested_count() {
        let config = GeneratorConfig {
            count: 25,
            ..Default::default()
        };
        let batch = generate_random_batch(&config);
        assert_eq!(batch.len(), 25);
        let validator = InstructionValidator::new();
        assert!(batch.iter().all(|r| validator.is_valid(r)));
    }

    #[test]
    fn test_settlement_dates_within_window() {
        let config = GeneratorConfig::default();
        let end = config.start_date + Days::new(config.window_days);
        for record in generate_random_batch(&config) {
            let date = record.settlement_date.unwrap();
            assert!(date >= config.start_date && date < end);
            assert!(record.instruction_date.unwrap() <= date);
        }
    }

    #[test]
    fn test_incomplete_ratio_one_rejects_everything() {
        let config = GeneratorConfig {
            count: 20,
            incomplete_ratio: 1.0,
            ..Default::default()
        };
        let validator = InstructionValidator::new();
        let batch = generate_random_batch_with(&mut StdRng::seed_from_u64(7), &config);
        assert!(batch.iter().all(|r| !validator.is_valid(r)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = GeneratorConfig::default();
        let a = generate_random_batch_with(&mut StdRng::seed_from_u64(42), &config);
        let b = generate_random_batch_with(&mut StdRng::seed_from_u64(42), &config);
        assert_eq!(a, b);
    }
}
