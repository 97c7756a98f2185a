use crate::model::{ModelError, SummaryModel};
use crate::segmenter::segment;
use tracing::debug;

/// Knobs for one summarization run. Output length bounds are forwarded to
/// the model unchanged for every chunk.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub max_chunk_chars: usize,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_chunk_chars: 1000,
            min_length: 40,
            max_length: 150,
        }
    }
}

/// Summarizes a whole document chunk by chunk.
///
/// Chunks are processed strictly in order, one model call at a time; a later
/// chunk is never started before the previous call completes. `progress` is
/// invoked with the 1-based chunk index and the total before each call so a
/// caller can render "Summarizing chunk i/N". The first model failure aborts
/// the run: remaining chunks are not invoked and no partial result is kept.
///
/// Empty input returns an empty summary without touching the model.
pub async fn summarize_document(
    text: &str,
    opts: &SummaryOptions,
    model: &dyn SummaryModel,
    mut progress: impl FnMut(usize, usize),
) -> Result<String, ModelError> {
    let chunks = segment(text, opts.max_chunk_chars);
    let total = chunks.len();
    let mut partials = Vec::with_capacity(total);

    for (i, chunk) in chunks.iter().enumerate() {
        progress(i + 1, total);
        debug!(chunk = i + 1, total, chars = chunk.len(), "Summarizing chunk");
        let summary = model
            .summarize(chunk, opts.min_length, opts.max_length, true)
            .await?;
        partials.push(summary);
    }

    Ok(partials.join("\n\n"))
}
