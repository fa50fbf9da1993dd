mod factories;
mod info;
mod lifecycle;
mod list;

pub use factories::run_factories;
pub use info::run_info;
pub use lifecycle::run_lifecycle;
pub use list::run_list;
