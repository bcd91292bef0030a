pub mod filter;
pub use filter::*;

pub mod pushdown;
pub use pushdown::*;

pub mod local;
pub use local::*;
