pub mod api;
pub mod config;
pub mod model;
pub mod pdf;
pub mod pipeline;
pub mod segmenter;
pub use pipeline::{summarize_document, SummaryOptions};
pub use segmenter::segment;
