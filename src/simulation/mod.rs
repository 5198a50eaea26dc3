pub mod generator;
pub mod sample;
