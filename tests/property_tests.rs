use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement_engine::calendar::settlement::SettlementCalendar;
use settlement_engine::core::currency::CurrencyCode;
use settlement_engine::core::direction::{Direction, Flow};
use settlement_engine::core::instruction::{Instruction, InstructionRecord};
use settlement_engine::core::validation::InstructionValidator;
use settlement_engine::processing::batch::ProcessedBatch;
use settlement_engine::processing::observer::RecordingObserver;
use settlement_engine::processing::processor::InstructionProcessor;
use std::collections::BTreeMap;

/// Generate a currency from a pool covering both calendar regimes.
fn arb_currency() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(vec![
        CurrencyCode::new("USD"),
        CurrencyCode::new("GBP"),
        CurrencyCode::new("EUR"),
        CurrencyCode::new("JPY"),
        CurrencyCode::new("AED"),
        CurrencyCode::new("SAR"),
    ])
}

/// Generate a date within a few years of 2018.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    (0u64..2_000).prop_map(move |offset| start + Days::new(offset))
}

/// Generate a positive decimal with up to four decimal places.
fn arb_decimal() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64, 0u32..5).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![Direction::Buy, Direction::Sell])
}

/// Generate a complete instruction record.
fn arb_record() -> impl Strategy<Value = InstructionRecord> {
    (
        prop::sample::select(vec!["Google", "Yahoo", "Lego", "Nikon"]),
        arb_direction(),
        arb_decimal(),
        arb_currency(),
        arb_date(),
        -1_000i64..10_000i64,
        arb_decimal(),
    )
        .prop_map(|(entity, direction, fx, currency, date, units, price)| {
            InstructionRecord::new()
                .with_entity(entity)
                .with_direction(direction)
                .with_agreed_fx(fx)
                .with_currency(currency)
                .with_instruction_date(date)
                .with_settlement_date(date)
                .with_units(units)
                .with_price_per_unit(price)
        })
}

/// Generate a record with one required field removed.
fn arb_incomplete_record() -> impl Strategy<Value = InstructionRecord> {
    (arb_record(), 0usize..7).prop_map(|(mut record, field)| {
        match field {
            0 => record.entity = None,
            1 => record.direction = None,
            2 => record.agreed_fx = None,
            3 => record.price_per_unit = None,
            4 => record.currency = None,
            5 => record.instruction_date = None,
            _ => record.settlement_date = None,
        }
        record
    })
}

fn process(records: Vec<InstructionRecord>) -> ProcessedBatch {
    InstructionProcessor::new()
        .with_observer(RecordingObserver::new())
        .process(records)
}

proptest! {
    // ===================================================================
    // Adjusting an adjusted date changes nothing.
    // ===================================================================
    #[test]
    fn adjustment_is_idempotent(currency in arb_currency(), date in arb_date()) {
        let calendar = SettlementCalendar::default();
        let once = calendar.adjust(&currency, date);
        prop_assert_eq!(calendar.adjust(&currency, once), once);
    }

    // ===================================================================
    // Western weekends move to the next Monday; weekdays stay put.
    // ===================================================================
    #[test]
    fn western_regime_rule(date in arb_date()) {
        let calendar = SettlementCalendar::default();
        let adjusted = calendar.adjust(&CurrencyCode::new("GBP"), date);
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => {
                prop_assert_eq!(adjusted.weekday(), Weekday::Mon);
                prop_assert!(adjusted > date);
                prop_assert!(adjusted - date <= chrono::Duration::days(2));
            }
            _ => prop_assert_eq!(adjusted, date),
        }
    }

    // ===================================================================
    // AED/SAR Fridays and Saturdays move to the next Sunday.
    // ===================================================================
    #[test]
    fn middle_east_regime_rule(
        code in prop::sample::select(vec!["AED", "SAR"]),
        date in arb_date(),
    ) {
        let calendar = SettlementCalendar::default();
        let adjusted = calendar.adjust(&CurrencyCode::new(code), date);
        match date.weekday() {
            Weekday::Fri | Weekday::Sat => {
                prop_assert_eq!(adjusted.weekday(), Weekday::Sun);
                prop_assert!(adjusted > date);
                prop_assert!(adjusted - date <= chrono::Duration::days(2));
            }
            _ => prop_assert_eq!(adjusted, date),
        }
    }

    // ===================================================================
    // USD amount is exactly price × fx × units.
    // ===================================================================
    #[test]
    fn usd_amount_is_exact(record in arb_record()) {
        let instruction = InstructionValidator::new().validate(&record).unwrap();
        let expected = record.price_per_unit.unwrap()
            * record.agreed_fx.unwrap()
            * Decimal::from(record.units);
        prop_assert_eq!(instruction.usd_amount(), expected);
        prop_assert_eq!(instruction.usd_amount(), instruction.usd_amount());
    }

    // ===================================================================
    // Buckets are ranked by non-increasing USD amount.
    // ===================================================================
    #[test]
    fn buckets_are_ranked_descending(records in prop::collection::vec(arb_record(), 0..40)) {
        let batch = process(records);
        for flow in [Flow::Incoming, Flow::Outgoing] {
            let amounts: Vec<Decimal> = batch
                .bucket(flow)
                .ranked()
                .iter()
                .map(Instruction::usd_amount)
                .collect();
            for pair in amounts.windows(2) {
                prop_assert!(pair[0] >= pair[1], "{} ranked before {}", pair[0], pair[1]);
            }
        }
    }

    // ===================================================================
    // Per-date totals equal the sum over same-flow, same-date instructions,
    // and every instruction sits in the bucket matching its direction.
    // ===================================================================
    #[test]
    fn daily_totals_match_instructions(records in prop::collection::vec(arb_record(), 0..40)) {
        let count = records.len();
        let batch = process(records);
        prop_assert_eq!(batch.len(), count);

        for flow in [Flow::Incoming, Flow::Outgoing] {
            let mut expected: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
            for instruction in batch.bucket(flow).ranked() {
                prop_assert_eq!(instruction.flow(), flow);
                *expected.entry(instruction.settlement_date()).or_insert(Decimal::ZERO) +=
                    instruction.usd_amount();
            }
            prop_assert_eq!(&expected, batch.bucket(flow).by_date());
        }
    }

    // ===================================================================
    // Stored settlement dates are already adjusted.
    // ===================================================================
    #[test]
    fn stored_dates_are_business_days(records in prop::collection::vec(arb_record(), 0..40)) {
        let calendar = SettlementCalendar::default();
        let batch = process(records);
        for flow in [Flow::Incoming, Flow::Outgoing] {
            for instruction in batch.bucket(flow).ranked() {
                let regime = calendar.regime_for(instruction.currency());
                prop_assert!(!regime.is_rest_day(instruction.settlement_date()));
            }
        }
    }

    // ===================================================================
    // Incomplete records never reach a bucket or a date total.
    // ===================================================================
    #[test]
    fn incomplete_records_are_dropped(
        valid in prop::collection::vec(arb_record(), 0..20),
        invalid in prop::collection::vec(arb_incomplete_record(), 1..20),
    ) {
        let expected = process(valid.clone());

        let mut mixed = valid;
        mixed.extend(invalid);
        let batch = process(mixed);

        prop_assert_eq!(batch, expected);
    }

    // ===================================================================
    // Processing is deterministic.
    // ===================================================================
    #[test]
    fn processing_is_deterministic(records in prop::collection::vec(arb_record(), 0..40)) {
        prop_assert_eq!(process(records.clone()), process(records));
    }
}
