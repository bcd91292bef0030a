pub mod aggregation;
pub use aggregation::*;

pub mod accumulator;
pub use accumulator::*;

pub mod processor;
pub use processor::*;
