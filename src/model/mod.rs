pub mod config;
pub mod section;
pub mod store;
pub mod task;

pub use config::*;
pub use section::*;
pub use store::*;
pub use task::*;
