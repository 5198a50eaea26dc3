use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-style currency code of an instruction.
///
/// The code selects the trading-week regime used when adjusting
/// settlement dates (see [`crate::calendar::settlement::SettlementCalendar`]).
/// Codes are stored trimmed and upper-cased, however they were written in
/// the input, so `"aed"` and `"AED"` settle under the same regime.
///
/// # Examples
///
/// ```
/// use settlement_engine::core::currency::CurrencyCode;
///
/// let aed = CurrencyCode::new("aed");
/// assert_eq!(aed.as_str(), "AED");
/// assert_eq!(aed, CurrencyCode::new(" AED "));
/// assert_ne!(aed, CurrencyCode::new("GBP"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("SAR");
        let b = CurrencyCode::from("SAR");
        assert_eq!(a, b);
        assert_ne!(a, CurrencyCode::new("USD"));
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(format!("{}", CurrencyCode::new("EUR")), "EUR");
    }

    #[test]
    fn test_currency_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&CurrencyCode::new("JPY")).unwrap();
        assert_eq!(json, "\"JPY\"");
        let back: CurrencyCode = serde_json::from_str("\"AED\"").unwrap();
        assert_eq!(back, CurrencyCode::new("AED"));
    }

    #[test]
    fn test_codes_are_upper_cased() {
        assert_eq!(CurrencyCode::new("sar").as_str(), "SAR");
        assert_eq!(CurrencyCode::from("Aed "), CurrencyCode::new("AED"));
        let back: CurrencyCode = serde_json::from_str("\"gbp\"").unwrap();
        assert_eq!(back.as_str(), "GBP");
        assert_eq!(serde_json::to_string(&back).unwrap(), "\"GBP\"");
    }
}
