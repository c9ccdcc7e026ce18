pub mod analyzer;
pub mod cache;
pub mod checker;
pub mod config;
pub mod credentials;
pub mod error;
pub mod identify;
pub mod inputs;
pub mod model;
pub mod output;
pub mod search;

pub use analyzer::Analyzer;
pub use cache::Cache;
pub use config::Config;
pub use error::{Error, Result};
pub use identify::Identifier;
pub use model::{ArchiveAnalysisResult, Issue, PackageCoordinate};
