//! Reporting hooks for the instruction pipeline.
//!
//! The processor reports what happens to each input record through a
//! [`ProcessingObserver`] instead of writing to a global logger, so callers
//! decide where rejections and date adjustments go.

use crate::core::currency::CurrencyCode;
use crate::core::direction::Flow;
use crate::core::instruction::{Instruction, InstructionRecord};
use crate::core::validation::ValidationError;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::Decimal;

/// Receives per-instruction events, in input order.
///
/// `position` is the zero-based index of the record in the input sequence.
pub trait ProcessingObserver {
    /// A record was dropped: a field is missing or an amount is out of range.
    fn rejected(&mut self, position: usize, record: &InstructionRecord, error: &ValidationError);

    /// A stored instruction's settlement date fell on a rest day and was moved.
    fn settlement_adjusted(
        &mut self,
        position: usize,
        instruction: &Instruction,
        original: NaiveDate,
    );

    /// An instruction was stored in its bucket.
    fn accepted(&mut self, _position: usize, _instruction: &Instruction) {}
}

/// Default observer: forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ProcessingObserver for LogObserver {
    fn rejected(&mut self, position: usize, record: &InstructionRecord, error: &ValidationError) {
        warn!(
            "Instruction #{} {} could not be added: {}",
            position, record, error
        );
    }

    fn settlement_adjusted(
        &mut self,
        position: usize,
        instruction: &Instruction,
        original: NaiveDate,
    ) {
        info!(
            "Instruction #{} ({}, {}): settlement date {} is not a trading day, moved to {}",
            position,
            instruction.entity(),
            instruction.currency(),
            original,
            instruction.settlement_date()
        );
    }

    fn accepted(&mut self, position: usize, instruction: &Instruction) {
        debug!(
            "Instruction #{} ({}) stored as {} for {} USD on {}",
            position,
            instruction.entity(),
            instruction.flow(),
            instruction.usd_amount(),
            instruction.settlement_date()
        );
    }
}

/// An event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingEvent {
    Rejected {
        position: usize,
        entity: Option<String>,
        reason: ValidationError,
    },
    SettlementAdjusted {
        position: usize,
        entity: String,
        currency: CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    },
    Accepted {
        position: usize,
        entity: String,
        flow: Flow,
        usd_amount: Decimal,
    },
}

/// Keeps every event in memory, e.g. for an audit trail or assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<ProcessingEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ProcessingEvent] {
        &self.events
    }

    pub fn rejections(&self) -> impl Iterator<Item = &ProcessingEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, ProcessingEvent::Rejected { .. }))
    }

    pub fn adjustments(&self) -> impl Iterator<Item = &ProcessingEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, ProcessingEvent::SettlementAdjusted { .. }))
    }
}

impl ProcessingObserver for RecordingObserver {
    fn rejected(&mut self, position: usize, record: &InstructionRecord, error: &ValidationError) {
        self.events.push(ProcessingEvent::Rejected {
            position,
            entity: record.entity.clone(),
            reason: error.clone(),
        });
    }

    fn settlement_adjusted(
        &mut self,
        position: usize,
        instruction: &Instruction,
        original: NaiveDate,
    ) {
        self.events.push(ProcessingEvent::SettlementAdjusted {
            position,
            entity: instruction.entity().to_string(),
            currency: instruction.currency().clone(),
            from: original,
            to: instruction.settlement_date(),
        });
    }

    fn accepted(&mut self, position: usize, instruction: &Instruction) {
        self.events.push(ProcessingEvent::Accepted {
            position,
            entity: instruction.entity().to_string(),
            flow: instruction.flow(),
            usd_amount: instruction.usd_amount(),
        });
    }
}

impl<O: ProcessingObserver + ?Sized> ProcessingObserver for &mut O {
    fn rejected(&mut self, position: usize, record: &InstructionRecord, error: &ValidationError) {
        (**self).rejected(position, record, error)
    }

    fn settlement_adjusted(
        &mut self,
        position: usize,
        instruction: &Instruction,
        original: NaiveDate,
    ) {
        (**self).settlement_adjusted(position, instruction, original)
    }

    fn accepted(&mut self, position: usize, instruction: &Instruction) {
        (**self).accepted(position, instruction)
    }
}
