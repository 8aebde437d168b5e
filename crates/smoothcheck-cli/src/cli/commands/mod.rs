mod batch;
mod check;
mod fetch;
mod info;
mod join;

pub use batch::run_batch;
pub use check::run_check;
pub use fetch::run_fetch;
pub use info::run_info;
pub use join::run_join;
