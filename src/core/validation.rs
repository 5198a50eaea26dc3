use crate::core::direction::Flow;
use crate::core::instruction::{Instruction, InstructionRecord};
use crate::core::valuation::usd_amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// A required instruction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingField {
    Entity,
    Direction,
    AgreedFx,
    PricePerUnit,
    Currency,
    InstructionDate,
    SettlementDate,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::Entity => "entity",
            MissingField::Direction => "direction",
            MissingField::AgreedFx => "agreed_fx",
            MissingField::PricePerUnit => "price_per_unit",
            MissingField::Currency => "currency",
            MissingField::InstructionDate => "instruction_date",
            MissingField::SettlementDate => "settlement_date",
        };
        f.write_str(name)
    }
}

/// Why a record was left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("instruction is missing required fields: {}", join(.0))]
    MissingFields(Vec<MissingField>),

    #[error(
        "USD amount of {units} units at {price_per_unit} x {agreed_fx} \
         cannot be represented exactly"
    )]
    AmountOutOfRange {
        price_per_unit: Decimal,
        agreed_fx: Decimal,
        units: i64,
    },

    #[error("{flow} USD total for {date} cannot be represented exactly")]
    TotalOutOfRange { flow: Flow, date: NaiveDate },
}

impl ValidationError {
    /// Absent fields, empty for the other reasons.
    pub fn missing(&self) -> &[MissingField] {
        match self {
            ValidationError::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

fn join(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks that a record carries every field the pipeline needs.
///
/// Every field must be present and the USD amount must be exactly
/// representable. Zero or negative unit counts are accepted and flow
/// through valuation as zero or negative amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionValidator;

impl InstructionValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn is_valid(&self, record: &InstructionRecord) -> bool {
        self.validate(record).is_ok()
    }

    /// Every absent required field, in declaration order.
    pub fn missing_fields(&self, record: &InstructionRecord) -> Vec<MissingField> {
        let checks = [
            (record.entity.is_none(), MissingField::Entity),
            (record.direction.is_none(), MissingField::Direction),
            (record.agreed_fx.is_none(), MissingField::AgreedFx),
            (record.price_per_unit.is_none(), MissingField::PricePerUnit),
            (record.currency.is_none(), MissingField::Currency),
            (record.instruction_date.is_none(), MissingField::InstructionDate),
            (record.settlement_date.is_none(), MissingField::SettlementDate),
        ];
        checks
            .into_iter()
            .filter_map(|(absent, field)| absent.then_some(field))
            .collect()
    }

    /// Build an [`Instruction`] from a complete record, valuing it once.
    pub fn validate(&self, record: &InstructionRecord) -> Result<Instruction, ValidationError> {
        match record {
            InstructionRecord {
                entity: Some(entity),
                direction: Some(direction),
                agreed_fx: Some(agreed_fx),
                currency: Some(currency),
                instruction_date: Some(instruction_date),
                settlement_date: Some(settlement_date),
                units,
                price_per_unit: Some(price_per_unit),
            } => {
                let amount = usd_amount(*price_per_unit, *agreed_fx, *units).ok_or(
                    ValidationError::AmountOutOfRange {
                        price_per_unit: *price_per_unit,
                        agreed_fx: *agreed_fx,
                        units: *units,
                    },
                )?;
                Ok(Instruction::from_parts(
                    entity.clone(),
                    *direction,
                    *agreed_fx,
                    currency.clone(),
                    *instruction_date,
                    *settlement_date,
                    *units,
                    *price_per_unit,
                    amount,
                ))
            }
            incomplete => Err(ValidationError::MissingFields(
                self.missing_fields(incomplete),
            )),
        }
    }
}
