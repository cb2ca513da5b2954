//! CLI surface: clap parse types, the route table, presentation and error mapping.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, RecipeArgs, ShowTarget};
pub use presentation::{DocumentStatus, StatusReport};
pub use route::RunContext;
