//! Configuration parsing and types.
//!
//! - `types` - Config structure (`Config`, `Backends`, `SystemdConfig`)
//! - `parser` - YAML config discovery and parsing
//! - `validation` - Config validation

mod parser;
mod types;
mod validation;

pub use parser::*;
pub use types::*;
