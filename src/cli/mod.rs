pub mod toolset;
pub mod types;

pub use types::{Cli, Commands, available_categories, available_tools, invalid_tools};
