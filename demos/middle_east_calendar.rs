//! Settlement dates across one week under both trading-week regimes.
//!
//! AED and SAR rest on Friday and Saturday and restart on Sunday; every
//! other currency rests on Saturday and Sunday and restarts on Monday.

use chrono::{Datelike, Days, NaiveDate};
use settlement_engine::calendar::settlement::SettlementCalendar;
use settlement_engine::core::currency::CurrencyCode;

fn main() {
    let calendar = SettlementCalendar::default().with_middle_east_currency("QAR");
    let currencies = ["USD", "GBP", "AED", "SAR", "QAR"].map(CurrencyCode::new);
    let Some(monday) = NaiveDate::from_ymd_opt(2018, 7, 16) else {
        return;
    };

    print!("{:<16}", "Requested");
    for currency in &currencies {
        print!("{:>14}", currency.as_str());
    }
    println!();
    print!("{:<16}", "");
    for currency in &currencies {
        print!("{:>14}", format!("{:?}", calendar.regime_for(currency)));
    }
    println!("\n");

    for offset in 0..7 {
        let date = monday + Days::new(offset);
        print!("{:<16}", format!("{} {}", date.weekday(), date));
        for currency in &currencies {
            let settles = calendar.adjust(currency, date);
            let cell = if settles == date {
                "—".to_string()
            } else {
                format!("{} {}", settles.weekday(), settles.format("%d/%m"))
            };
            print!("{:>14}", cell);
        }
        println!();
    }
}
