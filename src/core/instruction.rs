use crate::core::currency::CurrencyCode;
use crate::core::direction::{Direction, Flow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A settlement instruction as supplied by an input source.
///
/// Any field may be missing; records are checked by
/// [`InstructionValidator`](crate::core::validation::InstructionValidator)
/// before they enter the pipeline. `units` defaults to zero when absent.
///
/// # Examples
///
/// ```
/// use settlement_engine::core::instruction::InstructionRecord;
/// use settlement_engine::core::direction::Direction;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let record = InstructionRecord::new()
///     .with_entity("Yahoo")
///     .with_direction(Direction::Buy)
///     .with_agreed_fx(dec!(19.001))
///     .with_currency("AED")
///     .with_instruction_date(NaiveDate::from_ymd_opt(2018, 1, 10).unwrap())
///     .with_settlement_date(NaiveDate::from_ymd_opt(2018, 6, 22).unwrap())
///     .with_units(2)
///     .with_price_per_unit(dec!(100));
///
/// assert_eq!(record.entity.as_deref(), Some("Yahoo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionRecord {
    /// Counterparty name.
    pub entity: Option<String>,
    pub direction: Option<Direction>,
    /// Conversion factor from the instruction currency to USD.
    pub agreed_fx: Option<Decimal>,
    pub currency: Option<CurrencyCode>,
    /// Date the instruction was raised. Informational only.
    pub instruction_date: Option<NaiveDate>,
    /// Date the cash is due to change hands, before calendar adjustment.
    pub settlement_date: Option<NaiveDate>,
    pub units: i64,
    pub price_per_unit: Option<Decimal>,
}

impl InstructionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_agreed_fx(mut self, agreed_fx: Decimal) -> Self {
        self.agreed_fx = Some(agreed_fx);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<CurrencyCode>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_instruction_date(mut self, date: NaiveDate) -> Self {
        self.instruction_date = Some(date);
        self
    }

    pub fn with_settlement_date(mut self, date: NaiveDate) -> Self {
        self.settlement_date = Some(date);
        self
    }

    pub fn with_units(mut self, units: i64) -> Self {
        self.units = units;
        self
    }

    pub fn with_price_per_unit(mut self, price_per_unit: Decimal) -> Self {
        self.price_per_unit = Some(price_per_unit);
        self
    }
}

impl fmt::Display for InstructionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_missing<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "<missing>".to_string())
        }

        write!(
            f,
            "[{} {} {} x {} @ {} fx {} settling {}]",
            or_missing(&self.entity),
            or_missing(&self.direction),
            or_missing(&self.currency),
            self.units,
            or_missing(&self.price_per_unit),
            or_missing(&self.agreed_fx),
            or_missing(&self.settlement_date),
        )
    }
}

/// An accepted settlement instruction.
///
/// Every field is present: instances are only produced by the validator,
/// so anything held by a processed batch has passed validation.
///
/// Equality is structural over all fields. Ranking by USD value goes
/// through [`crate::processing::ranking::by_usd_amount_descending`] instead,
/// so two different trades with the same value never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    entity: String,
    direction: Direction,
    agreed_fx: Decimal,
    currency: CurrencyCode,
    instruction_date: NaiveDate,
    settlement_date: NaiveDate,
    units: i64,
    price_per_unit: Decimal,
    usd_amount: Decimal,
}

impl Instruction {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        entity: String,
        direction: Direction,
        agreed_fx: Decimal,
        currency: CurrencyCode,
        instruction_date: NaiveDate,
        settlement_date: NaiveDate,
        units: i64,
        price_per_unit: Decimal,
        usd_amount: Decimal,
    ) -> Self {
        Self {
            entity,
            direction,
            agreed_fx,
            currency,
            instruction_date,
            settlement_date,
            units,
            price_per_unit,
            usd_amount,
        }
    }

    /// The same instruction settling on `date`.
    pub fn with_settlement_date(self, date: NaiveDate) -> Self {
        Self {
            settlement_date: date,
            ..self
        }
    }

    /// USD-equivalent value: `price_per_unit × agreed_fx × units`,
    /// computed once at validation.
    pub fn usd_amount(&self) -> Decimal {
        self.usd_amount
    }

    /// Bucket this instruction settles into.
    pub fn flow(&self) -> Flow {
        self.direction.flow()
    }

    // --- Accessors ---

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn agreed_fx(&self) -> Decimal {
        self.agreed_fx
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn instruction_date(&self) -> NaiveDate {
        self.instruction_date
    }

    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }
}

impl From<Instruction> for InstructionRecord {
    fn from(instruction: Instruction) -> Self {
        Self {
            entity: Some(instruction.entity),
            direction: Some(instruction.direction),
            agreed_fx: Some(instruction.agreed_fx),
            currency: Some(instruction.currency),
            instruction_date: Some(instruction.instruction_date),
            settlement_date: Some(instruction.settlement_date),
            units: instruction.units,
            price_per_unit: Some(instruction.price_per_unit),
        }
    }
}
