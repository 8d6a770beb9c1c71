pub mod classifier;
pub mod config;
pub mod extractor;
pub mod packer;
pub mod report;
pub mod summary;

pub use classifier::PathClassifier;
pub use config::Config;
pub use extractor::DependencyExtractor;
pub use packer::Packer;
pub use report::ReportWriter;
pub use summary::SummaryAggregator;

pub type Result<T> = anyhow::Result<T>;
