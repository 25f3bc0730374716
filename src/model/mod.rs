pub mod config;
pub mod selection;
pub mod task;

pub use config::*;
pub use selection::*;
pub use task::*;
