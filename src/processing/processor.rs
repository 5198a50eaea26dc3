use crate::calendar::settlement::SettlementCalendar;
use crate::core::instruction::{Instruction, InstructionRecord};
use crate::core::validation::InstructionValidator;
use crate::processing::batch::ProcessedBatch;
use crate::processing::input::{BatchInput, ProcessingError};
use crate::processing::observer::{LogObserver, ProcessingObserver};
use chrono::NaiveDate;

/// The instruction pipeline.
///
/// Each record, in input order, is
///
/// 1. validated: incomplete records, and records whose USD amount is not
///    exactly representable, are dropped and reported,
/// 2. moved off rest days by the [`SettlementCalendar`] (exactly once),
/// 3. classified: sells are incoming, buys are outgoing,
/// 4. inserted into its bucket's USD ranking and added to the bucket's
///    per-date USD total, unless that total would overflow, in which case
///    the record is reported as rejected.
///
/// Every call builds a fresh [`ProcessedBatch`]; nothing is shared
/// between calls apart from the observer.
///
/// # Examples
///
/// ```
/// use settlement_engine::prelude::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let friday = NaiveDate::from_ymd_opt(2018, 7, 20).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2018, 7, 22).unwrap();
///
/// let record = InstructionRecord::new()
///     .with_entity("Yahoo")
///     .with_direction(Direction::Buy)
///     .with_agreed_fx(dec!(19.001))
///     .with_currency("AED")
///     .with_instruction_date(friday)
///     .with_settlement_date(friday)
///     .with_units(2)
///     .with_price_per_unit(dec!(100));
///
/// let batch = InstructionProcessor::new().process(vec![record]);
///
/// assert_eq!(batch.outgoing_ranked().len(), 1);
/// assert_eq!(batch.outgoing_by_date()[&sunday], dec!(3800.2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstructionProcessor<O = LogObserver> {
    validator: InstructionValidator,
    calendar: SettlementCalendar,
    observer: O,
}

impl InstructionProcessor<LogObserver> {
    /// Default calendar, events sent to the `log` facade.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ProcessingObserver> InstructionProcessor<O> {
    pub fn with_calendar(mut self, calendar: SettlementCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Report events to `observer` instead.
    pub fn with_observer<P: ProcessingObserver>(self, observer: P) -> InstructionProcessor<P> {
        InstructionProcessor {
            validator: self.validator,
            calendar: self.calendar,
            observer,
        }
    }

    pub fn calendar(&self) -> &SettlementCalendar {
        &self.calendar
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Run every record through the pipeline.
    ///
    /// Invalid records never fail the call; an empty input gives an empty batch.
    pub fn process<I>(&mut self, records: I) -> ProcessedBatch
    where
        I: IntoIterator<Item = InstructionRecord>,
    {
        let mut batch = ProcessedBatch::new();

        for (position, record) in records.into_iter().enumerate() {
            let instruction = match self.validator.validate(&record) {
                Ok(instruction) => instruction,
                Err(error) => {
                    self.observer.rejected(position, &record, &error);
                    continue;
                }
            };

            let (instruction, original) = self.settle(instruction);
            match batch.add(instruction) {
                Ok(stored) => {
                    if stored.settlement_date() != original {
                        self.observer
                            .settlement_adjusted(position, stored, original);
                    }
                    self.observer.accepted(position, stored);
                }
                Err(error) => self.observer.rejected(position, &record, &error),
            }
        }

        batch
    }

    /// Run a whole input document through the pipeline.
    ///
    /// Fails with [`ProcessingError::InvalidArgument`] before touching any
    /// record when the document carries no instruction list.
    pub fn process_input(&mut self, input: BatchInput) -> Result<ProcessedBatch, ProcessingError> {
        let records = input.into_records()?;
        Ok(self.process(records))
    }

    /// Move the instruction off rest days, keeping the date it came with.
    fn settle(&self, instruction: Instruction) -> (Instruction, NaiveDate) {
        let original = instruction.settlement_date();
        let adjusted = self.calendar.adjust(instruction.currency(), original);
        (instruction.with_settlement_date(adjusted), original)
    }
}
