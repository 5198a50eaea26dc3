use crate::core::instruction::Instruction;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Orders instructions by USD amount, largest first.
///
/// This is the only ordering the buckets use. Instructions with equal
/// amounts compare `Equal` here even when they are different trades; they
/// are kept side by side in a bucket, never merged.
pub fn by_usd_amount_descending(a: &Instruction, b: &Instruction) -> Ordering {
    b.usd_amount().cmp(&a.usd_amount())
}

/// Instructions of one direction, kept sorted by descending USD amount.
///
/// Behaves as an ordered multiset: instructions with equal amounts are all
/// retained, the later insertion placed after the earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedInstructions {
    entries: Vec<Instruction>,
}

impl RankedInstructions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `instruction` after every entry ranked at or above it.
    pub fn insert(&mut self, instruction: Instruction) -> &Instruction {
        let at = self.entries.partition_point(|existing| {
            by_usd_amount_descending(existing, &instruction) != Ordering::Greater
        });
        self.entries.insert(at, instruction);
        &self.entries[at]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranked instructions settling on `date`.
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &Instruction> {
        self.entries
            .iter()
            .filter(move |i| i.settlement_date() == date)
    }
}

impl<'a> IntoIterator for &'a RankedInstructions {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Instruction> for RankedInstructions {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        let mut ranked = Self::new();
        for instruction in iter {
            ranked.insert(instruction);
        }
        ranked
    }
}
