pub mod currency;
pub mod direction;
pub mod instruction;
pub mod validation;
pub mod valuation;
