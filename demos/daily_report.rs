//! Daily settlement report for the sample batch.
//!
//! Shows how instructions are ranked by USD value, which settlement dates
//! move because they fall on a rest day, and how USD amounts add up per day.

use settlement_engine::core::direction::Flow;
use settlement_engine::processing::observer::{ProcessingEvent, RecordingObserver};
use settlement_engine::processing::processor::InstructionProcessor;
use settlement_engine::report::table;
use settlement_engine::simulation::sample::{sample_instructions, sample_report_dates};

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  settlement-engine: Daily Settlement Report  ║");
    println!("╚══════════════════════════════════════════════╝");

    let mut processor = InstructionProcessor::new().with_observer(RecordingObserver::new());
    let batch = processor.process(sample_instructions());

    // --- Rankings ---
    print!("{}", table::render_ranking(&batch, Flow::Incoming));
    print!("{}", table::render_ranking(&batch, Flow::Outgoing));

    // --- Single days ---
    let (incoming_date, outgoing_date) = sample_report_dates();
    print!("{}", table::render_on_date(&batch, Flow::Incoming, incoming_date));
    print!("{}", table::render_on_date(&batch, Flow::Outgoing, outgoing_date));

    // --- Daily totals ---
    print!("{}", table::render_daily_totals(&batch, Flow::Incoming));
    print!("{}", table::render_daily_totals(&batch, Flow::Outgoing));

    println!("\n━━━ Adjusted settlement dates ━━━\n");
    for event in processor.observer().adjustments() {
        if let ProcessingEvent::SettlementAdjusted {
            entity,
            currency,
            from,
            to,
            ..
        } = event
        {
            println!("  {:<10} {}  {} → {}", entity, currency, from, to);
        }
    }
}
