mod cli;
mod json;
mod pom;

pub use cli::{print_package_issues, print_summary};
pub use json::{render_json, write_json};
pub use pom::{render_pom, write_pom};
