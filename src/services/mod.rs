pub mod ingestion;
pub mod processing;
pub mod reporting;
