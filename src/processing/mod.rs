pub mod batch;
pub mod input;
pub mod observer;
pub mod processor;
pub mod ranking;
