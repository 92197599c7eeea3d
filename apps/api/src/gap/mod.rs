pub mod analyzer;
pub mod compare;
pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod placeholder;
pub mod prompts;
pub mod similarity;
pub mod taxonomy;
pub mod weighting;
