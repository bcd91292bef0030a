pub mod report_definition;
pub use report_definition::*;

pub mod saved_report;
pub use saved_report::*;

pub mod persistence;
pub use persistence::*;

pub mod report_store;
pub use report_store::*;
