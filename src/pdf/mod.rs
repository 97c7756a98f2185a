pub mod extractor;
pub use extractor::{extract_file, ExtractError};
