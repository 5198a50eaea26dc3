use crate::calendar::regime::SettlementRegime;
use crate::core::currency::CurrencyCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Currencies settled on the Sunday-to-Thursday week by default.
pub const DEFAULT_MIDDLE_EAST_CURRENCIES: [&str; 2] = ["AED", "SAR"];

/// Maps currencies to trading-week regimes and adjusts settlement dates.
///
/// Currencies listed as Middle-East follow [`SettlementRegime::MiddleEast`];
/// every other currency follows [`SettlementRegime::Western`].
///
/// # Examples
///
/// ```
/// use settlement_engine::calendar::settlement::SettlementCalendar;
/// use settlement_engine::core::currency::CurrencyCode;
/// use chrono::NaiveDate;
///
/// let calendar = SettlementCalendar::default();
/// let friday = NaiveDate::from_ymd_opt(2018, 7, 20).unwrap();
///
/// // AED rests on Friday: settles the following Sunday.
/// assert_eq!(
///     calendar.adjust(&CurrencyCode::new("AED"), friday),
///     NaiveDate::from_ymd_opt(2018, 7, 22).unwrap(),
/// );
/// // GBP trades on Friday.
/// assert_eq!(calendar.adjust(&CurrencyCode::new("GBP"), friday), friday);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCalendar {
    middle_east_currencies: BTreeSet<CurrencyCode>,
}

impl Default for SettlementCalendar {
    fn default() -> Self {
        Self {
            middle_east_currencies: DEFAULT_MIDDLE_EAST_CURRENCIES
                .iter()
                .map(|code| CurrencyCode::new(*code))
                .collect(),
        }
    }
}

impl SettlementCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// A calendar in which every currency follows the Western regime.
    pub fn western_only() -> Self {
        Self {
            middle_east_currencies: BTreeSet::new(),
        }
    }

    /// Settle `currency` on the Middle-East week as well.
    pub fn with_middle_east_currency(mut self, currency: impl Into<CurrencyCode>) -> Self {
        self.middle_east_currencies.insert(currency.into());
        self
    }

    pub fn middle_east_currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.middle_east_currencies.iter()
    }

    pub fn regime_for(&self, currency: &CurrencyCode) -> SettlementRegime {
        if self.middle_east_currencies.contains(currency) {
            SettlementRegime::MiddleEast
        } else {
            SettlementRegime::Western
        }
    }

    /// Next business day on or after `settlement_date` for `currency`.
    pub fn adjust(&self, currency: &CurrencyCode, settlement_date: NaiveDate) -> NaiveDate {
        self.regime_for(currency).adjust(settlement_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_regimes() {
        let calendar = SettlementCalendar::default();
        assert_eq!(
            calendar.regime_for(&CurrencyCode::new("AED")),
            SettlementRegime::MiddleEast
        );
        assert_eq!(
            calendar.regime_for(&CurrencyCode::new("SAR")),
            SettlementRegime::MiddleEast
        );
        for code in ["USD", "GBP", "EUR", "JPY"] {
            assert_eq!(
                calendar.regime_for(&CurrencyCode::new(code)),
                SettlementRegime::Western
            );
        }
    }

    #[test]
    fn test_sar_saturday_moves_to_sunday() {
        let calendar = SettlementCalendar::default();
        assert_eq!(
            calendar.adjust(&CurrencyCode::new("SAR"), date(2018, 7, 21)),
            date(2018, 7, 22)
        );
    }

    #[test]
    fn test_western_only_calendar() {
        let calendar = SettlementCalendar::western_only();
        // Friday is a trading day in the Western week.
        assert_eq!(
            calendar.adjust(&CurrencyCode::new("AED"), date(2018, 7, 20)),
            date(2018, 7, 20)
        );
    }

    #[test]
    fn test_extra_middle_east_currency() {
        let calendar = SettlementCalendar::default().with_middle_east_currency("QAR");
        assert_eq!(
            calendar.adjust(&CurrencyCode::new("QAR"), date(2018, 7, 20)),
            date(2018, 7, 22)
        );
        assert_eq!(calendar.middle_east_currencies().count(), 3);
    }

    #[test]
    fn test_lower_case_codes_share_the_regime() {
        let calendar = SettlementCalendar::default().with_middle_east_currency("qar");
        assert_eq!(
            calendar.regime_for(&CurrencyCode::new("aed")),
            SettlementRegime::MiddleEast
        );
        assert_eq!(
            calendar.regime_for(&CurrencyCode::new("QAR")),
            SettlementRegime::MiddleEast
        );
    }
}
