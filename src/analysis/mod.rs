pub mod action_items;
pub mod classifier;
pub mod deadline;
pub mod pipeline;
pub mod summarizer;

pub use action_items::ActionItemExtractor;
pub use classifier::Classifier;
pub use deadline::DeadlineExtractor;
pub use pipeline::TriagePipeline;
pub use summarizer::Summarizer;
