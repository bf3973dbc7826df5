//! Command implementations.

mod analyze;
mod info;
mod simulate;
mod validate;

pub use analyze::run_analyze;
pub use info::run_info;
pub use simulate::run_simulate;
pub use validate::run_validate;
