mod builder;
mod core;
mod registration;

pub use builder::RegistryBuilder;
pub use self::core::*;
