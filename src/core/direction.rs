use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction of a settlement instruction.
///
/// Seen from the processing entity: a `Buy` pays currency out,
/// a `Sell` receives currency in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[serde(alias = "B", alias = "buy")]
    Buy,
    #[serde(alias = "S", alias = "sell")]
    Sell,
}

impl Direction {
    /// One-letter trade code (`B` or `S`).
    pub fn code(self) -> char {
        match self {
            Direction::Buy => 'B',
            Direction::Sell => 'S',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'B' => Some(Direction::Buy),
            'S' => Some(Direction::Sell),
            _ => None,
        }
    }

    /// The cash flow bucket this direction settles into.
    pub fn flow(self) -> Flow {
        match self {
            Direction::Buy => Flow::Outgoing,
            Direction::Sell => Flow::Incoming,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Direction of cash relative to the processing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Incoming,
    Outgoing,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Incoming => write!(f, "INCOMING"),
            Flow::Outgoing => write!(f, "OUTGOING"),
        }
    }
}
