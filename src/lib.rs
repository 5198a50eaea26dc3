//! # settlement-engine
//!
//! Settlement instruction processing for a trading entity.
//!
//! Given a batch of buy/sell settlement instructions in multiple currencies,
//! this engine validates each record, moves settlement dates that land on a
//! market's rest days to the next trading day, and sorts the accepted
//! instructions into incoming and outgoing buckets ranked by USD value with
//! daily USD totals.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: instructions, directions, currencies, validation, valuation
//! - **calendar** — Trading-week regimes and settlement date adjustment
//! - **processing** — The instruction pipeline, ranked buckets and daily aggregation
//! - **report** — Fixed-width table rendering of processed batches
//! - **simulation** — Sample and randomly generated instruction batches

pub mod calendar;
pub mod core;
pub mod processing;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::calendar::regime::SettlementRegime;
    pub use crate::calendar::settlement::SettlementCalendar;
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::direction::{Direction, Flow};
    pub use crate::core::instruction::{Instruction, InstructionRecord};
    pub use crate::core::validation::{InstructionValidator, ValidationError};
    pub use crate::processing::batch::ProcessedBatch;
    pub use crate::processing::input::{BatchInput, ProcessingError};
    pub use crate::processing::processor::InstructionProcessor;
}
