//! Trading-week regimes.
//!
//! Pure date logic. No IO, no wall-clock.
//!
//! A regime names the weekday a trading week starts on and the two rest days
//! on which no settlement happens. A settlement date that lands on a rest day
//! moves forward to the next start-of-week day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Trading-week convention of a currency's market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementRegime {
    /// Monday to Friday trading; Saturday and Sunday are rest days.
    Western,
    /// Sunday to Thursday trading; Friday and Saturday are rest days.
    MiddleEast,
}

impl SettlementRegime {
    /// First trading day of the week.
    pub fn week_start(self) -> Weekday {
        match self {
            SettlementRegime::Western => Weekday::Mon,
            SettlementRegime::MiddleEast => Weekday::Sun,
        }
    }

    pub fn rest_days(self) -> [Weekday; 2] {
        match self {
            SettlementRegime::Western => [Weekday::Sat, Weekday::Sun],
            SettlementRegime::MiddleEast => [Weekday::Fri, Weekday::Sat],
        }
    }

    pub fn is_rest_day(self, date: NaiveDate) -> bool {
        self.rest_days().contains(&date.weekday())
    }

    /// The date cash actually settles under this regime.
    ///
    /// Rest days move to the next start-of-week day strictly after `date`;
    /// every other date is returned unchanged. The week-start day is never a
    /// rest day, so adjusting twice gives the same result as adjusting once.
    ///
    /// # Panics
    ///
    /// Panics if the adjusted date is past [`NaiveDate::MAX`].
    pub fn adjust(self, date: NaiveDate) -> NaiveDate {
        if self.is_rest_day(date) {
            next_weekday_after(date, self.week_start())
        } else {
            date
        }
    }
}

/// Next occurrence of `target` strictly after `date` (1 to 7 days later).
fn next_weekday_after(date: NaiveDate, target: Weekday) -> NaiveDate {
    let from = date.weekday().num_days_from_monday();
    let to = target.num_days_from_monday();
    let ahead = match (to + 7 - from) % 7 {
        0 => 7,
        n => n,
    };
    date + Days::new(u64::from(ahead))
}
