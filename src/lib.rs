pub mod config;
pub mod error;
pub mod models;
pub mod taxonomy;
pub mod analysis;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use models::{Category, IncomingMail, TriageResult, TriagedMail};
pub use taxonomy::TriageTaxonomy;
pub use analysis::TriagePipeline;
