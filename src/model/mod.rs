pub mod config;
pub mod tag;
pub mod task;
pub mod task_set;

pub use config::*;
pub use tag::*;
pub use task::*;
pub use task_set::*;
