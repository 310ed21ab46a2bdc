// Catalog search: prompt classification, query planning, multi-field lookup,
// relevance ranking and response assembly.

pub mod assembly;
pub mod classifier;
pub mod detail;
pub mod executor;
pub mod filename;
pub mod handlers;
pub mod pipeline;
pub mod planner;
pub mod prompts;
pub mod scoring;
pub mod similarity;
pub mod vocabulary;
