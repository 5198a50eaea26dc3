use crate::core::direction::Flow;
use crate::core::instruction::Instruction;
use crate::core::validation::ValidationError;
use crate::core::valuation::exact_sum;
use crate::processing::ranking::RankedInstructions;
use crate::report::table;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Accepted instructions of one flow direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettlementBucket {
    /// Instructions ranked by descending USD amount.
    ranked: RankedInstructions,
    /// Adjusted settlement date -> accumulated USD amount.
    by_date: BTreeMap<NaiveDate, Decimal>,
    #[serde(skip)]
    total: Decimal,
}

impl SettlementBucket {
    /// Store an instruction and add its amount to its settlement date total.
    ///
    /// Leaves the bucket untouched if either running total would stop
    /// being exact.
    pub(crate) fn add(
        &mut self,
        instruction: Instruction,
    ) -> Result<&Instruction, ValidationError> {
        let flow = instruction.flow();
        let date = instruction.settlement_date();
        let amount = instruction.usd_amount();
        let out_of_range = || ValidationError::TotalOutOfRange { flow, date };

        let on_date = exact_sum(self.amount_on(date), amount).ok_or_else(out_of_range)?;
        let total = exact_sum(self.total, amount).ok_or_else(out_of_range)?;

        self.by_date.insert(date, on_date);
        self.total = total;
        Ok(self.ranked.insert(instruction))
    }

    pub fn ranked(&self) -> &RankedInstructions {
        &self.ranked
    }

    pub fn by_date(&self) -> &BTreeMap<NaiveDate, Decimal> {
        &self.by_date
    }

    /// Accumulated USD amount settling on `date`, zero if none.
    pub fn amount_on(&self, date: NaiveDate) -> Decimal {
        self.by_date.get(&date).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Result of running a batch of instructions through the pipeline.
///
/// Sells land in the incoming bucket, buys in the outgoing bucket. Each
/// bucket keeps its instructions ranked by USD amount and accumulates USD
/// amounts per adjusted settlement date. Read-only once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessedBatch {
    incoming: SettlementBucket,
    outgoing: SettlementBucket,
}

impl ProcessedBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(
        &mut self,
        instruction: Instruction,
    ) -> Result<&Instruction, ValidationError> {
        match instruction.flow() {
            Flow::Incoming => self.incoming.add(instruction),
            Flow::Outgoing => self.outgoing.add(instruction),
        }
    }

    pub fn bucket(&self, flow: Flow) -> &SettlementBucket {
        match flow {
            Flow::Incoming => &self.incoming,
            Flow::Outgoing => &self.outgoing,
        }
    }

    pub fn incoming_ranked(&self) -> &RankedInstructions {
        self.incoming.ranked()
    }

    pub fn outgoing_ranked(&self) -> &RankedInstructions {
        self.outgoing.ranked()
    }

    pub fn incoming_by_date(&self) -> &BTreeMap<NaiveDate, Decimal> {
        self.incoming.by_date()
    }

    pub fn outgoing_by_date(&self) -> &BTreeMap<NaiveDate, Decimal> {
        self.outgoing.by_date()
    }

    /// Ranked instructions of `flow` settling on `date`.
    pub fn on_date(&self, flow: Flow, date: NaiveDate) -> Vec<&Instruction> {
        self.bucket(flow).ranked().on_date(date).collect()
    }

    pub fn total(&self, flow: Flow) -> Decimal {
        self.bucket(flow).total()
    }

    /// Number of accepted instructions across both buckets.
    pub fn len(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }
}

impl std::fmt::Display for ProcessedBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for flow in [Flow::Incoming, Flow::Outgoing] {
            write!(f, "{}", table::render_ranking(self, flow))?;
        }
        for flow in [Flow::Incoming, Flow::Outgoing] {
            write!(f, "{}", table::render_daily_totals(self, flow))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::direction::Direction;
    use crate::core::instruction::InstructionRecord;
    use crate::core::validation::InstructionValidator;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 7, d).unwrap()
    }

    fn instruction(direction: Direction, fx: Decimal, units: i64, day: u32) -> Instruction {
        InstructionValidator::new()
            .validate(
                &InstructionRecord::new()
                    .with_entity("Nikon")
                    .with_direction(direction)
                    .with_agreed_fx(fx)
                    .with_currency("GBP")
                    .with_instruction_date(date(20))
                    .with_settlement_date(date(day))
                    .with_units(units)
                    .with_price_per_unit(dec!(100)),
            )
            .unwrap()
    }

    #[test]
    fn test_bucket_accumulates_per_date() {
        let mut bucket = SettlementBucket::default();
        bucket.add(instruction(Direction::Buy, dec!(1.11), 3, 23)).unwrap();
        bucket.add(instruction(Direction::Buy, dec!(0.87), 2, 24)).unwrap();
        bucket.add(instruction(Direction::Buy, dec!(0.0079), 1, 24)).unwrap();

        assert_eq!(bucket.by_date().len(), 2);
        assert_eq!(bucket.amount_on(date(23)), dec!(333));
        assert_eq!(bucket.amount_on(date(24)), dec!(174.79));
        assert_eq!(bucket.amount_on(date(25)), Decimal::ZERO);
        assert_eq!(bucket.total(), dec!(507.79));
    }

    #[test]
    fn test_batch_routes_by_direction() {
        let mut batch = ProcessedBatch::new();
        batch.add(instruction(Direction::Sell, dec!(1.11), 3, 23)).unwrap();
        batch.add(instruction(Direction::Buy, dec!(0.87), 2, 24)).unwrap();

        assert_eq!(batch.incoming_ranked().len(), 1);
        assert_eq!(batch.outgoing_ranked().len(), 1);
        assert_eq!(batch.incoming_by_date()[&date(23)], dec!(333));
        assert_eq!(batch.outgoing_by_date()[&date(24)], dec!(174));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.on_date(Flow::Incoming, date(24)).len(), 0);
    }

    #[test]
    fn test_total_overflow_leaves_bucket_untouched() {
        let huge = InstructionValidator::new()
            .validate(
                &InstructionRecord::from(instruction(Direction::Sell, dec!(1), 1, 23))
                    .with_price_per_unit(Decimal::MAX),
            )
            .unwrap();
        let mut batch = ProcessedBatch::new();
        batch.add(huge.clone()).unwrap();

        let err = batch.add(huge).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TotalOutOfRange {
                flow: Flow::Incoming,
                date: date(23),
            }
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.incoming_by_date()[&date(23)], Decimal::MAX);
        assert_eq!(batch.total(Flow::Incoming), Decimal::MAX);
    }

    #[test]
    fn test_empty_batch() {
        let batch = ProcessedBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.total(Flow::Incoming), Decimal::ZERO);
        assert_eq!(batch.total(Flow::Outgoing), Decimal::ZERO);
    }

    #[test]
    fn test_batch_serializes_dates_as_keys() {
        let mut batch = ProcessedBatch::new();
        batch.add(instruction(Direction::Buy, dec!(1.11), 3, 23)).unwrap();

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["outgoing"]["by_date"]["2018-07-23"], "333.00");
        assert_eq!(json["outgoing"]["ranked"][0]["entity"], "Nikon");
        assert!(json["incoming"]["ranked"].as_array().unwrap().is_empty());
    }
}
