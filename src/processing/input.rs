use crate::core::instruction::InstructionRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole processing call.
///
/// Per-record validation failures never surface here: those records are
/// dropped and reported to the observer.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("malformed instruction document: {0}")]
    Json(#[from] serde_json::Error),
}

/// An instruction document as handed over by an input source.
///
/// `instructions` is `None` when the source supplied no list at all
/// (`null` or an absent key), which is distinct from an empty list.
///
/// # Examples
///
/// ```
/// use settlement_engine::processing::input::BatchInput;
///
/// let input = BatchInput::from_json(r#"{ "instructions": [] }"#).unwrap();
/// assert_eq!(input.instructions.map(|v| v.len()), Some(0));
///
/// let input = BatchInput::from_json(r#"{ "instructions": null }"#).unwrap();
/// assert!(input.instructions.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    #[serde(default)]
    pub instructions: Option<Vec<InstructionRecord>>,
}

impl BatchInput {
    pub fn new(instructions: Vec<InstructionRecord>) -> Self {
        Self {
            instructions: Some(instructions),
        }
    }

    /// A document that carries no instruction list.
    pub fn missing() -> Self {
        Self { instructions: None }
    }

    pub fn from_json(json: &str) -> Result<Self, ProcessingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProcessingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The instruction list, or `InvalidArgument` when there is none.
    pub fn into_records(self) -> Result<Vec<InstructionRecord>, ProcessingError> {
        self.instructions.ok_or_else(|| {
            ProcessingError::InvalidArgument(
                "please provide a valid list of instructions".to_string(),
            )
        })
    }
}

impl From<Vec<InstructionRecord>> for BatchInput {
    fn from(instructions: Vec<InstructionRecord>) -> Self {
        Self::new(instructions)
    }
}
