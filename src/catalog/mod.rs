pub mod field_definition;
pub use field_definition::*;

pub mod builtin;
pub use builtin::*;

pub mod field_registry;
pub use field_registry::*;

pub mod resolver;
pub use resolver::*;
