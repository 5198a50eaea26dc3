pub mod regime;
pub mod settlement;
