//! settlement-engine CLI
//!
//! Process settlement instructions from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Rank and aggregate instructions from a JSON file
//! settlement-engine process --input instructions.json
//!
//! # Also show the instructions settling on one date
//! settlement-engine process --input instructions.json --date 2018-06-11
//!
//! # Output as JSON
//! settlement-engine process --input instructions.json --format json
//!
//! # Run the built-in sample batch
//! settlement-engine sample
//!
//! # Generate a random batch for testing
//! settlement-engine generate --count 50 --output instructions.json
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use chrono::NaiveDate;
use settlement_engine::core::direction::Flow;
use settlement_engine::core::instruction::InstructionRecord;
use settlement_engine::processing::batch::ProcessedBatch;
use settlement_engine::processing::input::BatchInput;
use settlement_engine::processing::processor::InstructionProcessor;
use settlement_engine::report::table;
use settlement_engine::simulation::generator::{generate_random_batch, GeneratorConfig};
use settlement_engine::simulation::sample::{sample_instructions, sample_report_dates};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"settlement-engine — settlement instruction ranking and daily aggregation

USAGE:
    settlement-engine <COMMAND> [OPTIONS]

COMMANDS:
    process     Validate, adjust, rank and aggregate an instruction file
    sample      Run the built-in five-instruction sample batch
    generate    Generate a random instruction file (for testing)
    help        Show this message

OPTIONS (process, sample):
    --input <FILE>      Path to JSON instructions file (process only)
    --format <FORMAT>   Output format: text (default) or json
    --date <DATE>       Also list instructions settling on DATE (YYYY-MM-DD)

OPTIONS (generate):
    --count <N>         Number of instructions (default: 100)
    --incomplete <P>    Share of records with a missing field, 0.0-1.0 (default: 0)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    settlement-engine process --input instructions.json
    settlement-engine process --input instructions.json --date 2018-06-11
    settlement-engine process --input instructions.json --format json
    settlement-engine sample
    settlement-engine generate --count 20 --incomplete 0.1 --output test.json"#
    );
}

/// JSON output schema for a processed batch.
#[derive(serde::Serialize)]
struct BatchOutput<'a> {
    accepted: usize,
    incoming_total: String,
    outgoing_total: String,
    #[serde(flatten)]
    batch: &'a ProcessedBatch,
}

struct ReportOptions {
    format: String,
    dates: Vec<NaiveDate>,
}

fn load_input(path: &str) -> BatchInput {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    BatchInput::from_json(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "instructions": [
    {{ "entity": "Lego", "direction": "SELL", "agreed_fx": "0.27", "currency": "SAR",
      "instruction_date": "2018-03-12", "settlement_date": "2018-06-10",
      "units": 5, "price_per_unit": "100" }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Invalid date '{}': {} (expected YYYY-MM-DD)", value, e);
        process::exit(1);
    })
}

fn run_and_print(records: Vec<InstructionRecord>, options: &ReportOptions) {
    let batch = InstructionProcessor::new().process(records);
    print_batch(&batch, options);
}

fn print_batch(batch: &ProcessedBatch, options: &ReportOptions) {
    if options.format == "json" {
        let output = BatchOutput {
            accepted: batch.len(),
            incoming_total: batch.total(Flow::Incoming).to_string(),
            outgoing_total: batch.total(Flow::Outgoing).to_string(),
            batch,
        };
        let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        });
        println!("{}", json);
    } else {
        print!("{}", batch);
        for date in &options.dates {
            for flow in [Flow::Incoming, Flow::Outgoing] {
                print!("{}", table::render_on_date(batch, flow, *date));
            }
        }
    }
}

fn cmd_process(args: &[String]) {
    let mut input_path = None;
    let mut options = ReportOptions {
        format: "text".to_string(),
        dates: Vec::new(),
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                options.format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--date" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| {
                    eprintln!("--date requires a date (YYYY-MM-DD)");
                    process::exit(1);
                });
                options.dates.push(parse_date(value));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let records = load_input(&path).into_records().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    run_and_print(records, &options);
}

fn cmd_sample(args: &[String]) {
    let (incoming_date, outgoing_date) = sample_report_dates();
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let batch = InstructionProcessor::new().process(sample_instructions());
    if format == "json" {
        print_batch(
            &batch,
            &ReportOptions {
                format,
                dates: Vec::new(),
            },
        );
        return;
    }

    print!("{}", table::render_ranking(&batch, Flow::Incoming));
    print!("{}", table::render_ranking(&batch, Flow::Outgoing));
    print!("{}", table::render_on_date(&batch, Flow::Incoming, incoming_date));
    print!("{}", table::render_on_date(&batch, Flow::Outgoing, outgoing_date));
    print!("{}", table::render_daily_totals(&batch, Flow::Incoming));
    print!("{}", table::render_daily_totals(&batch, Flow::Outgoing));
}

fn cmd_generate(args: &[String]) {
    let mut config = GeneratorConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                i += 1;
                config.count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--count requires a number");
                        process::exit(1);
                    });
            }
            "--incomplete" => {
                i += 1;
                config.incomplete_ratio = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .filter(|p: &f64| (0.0..=1.0).contains(p))
                    .unwrap_or_else(|| {
                        eprintln!("--incomplete requires a number between 0 and 1");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let records = generate_random_batch(&config);
    let count = records.len();
    let json = BatchInput::new(records).to_json().unwrap_or_else(|e| {
        eprintln!("Error serializing instructions: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} instructions → {}", count, path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "process" => cmd_process(rest),
        "sample" => cmd_sample(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
