use async_trait::async_trait;
use pdfsum::model::{ModelError, SummaryModel};
use pdfsum::pipeline::{summarize_document, SummaryOptions};
use pdfsum::segmenter::segment;
use std::sync::Mutex;

// Three sentences, budget 10: every sentence closes its own chunk.
const THREE_CHUNK_TEXT: &str = "AAAAAAAA. BBBBBBBB. CCCCCCCC.";

fn tiny_chunk_opts() -> SummaryOptions {
    SummaryOptions {
        max_chunk_chars: 10,
        ..SummaryOptions::default()
    }
}

/// Scripted stand-in for the summarization model: records every call and
/// returns "S1", "S2", ... in call order, optionally failing at one call.
#[derive(Default)]
struct ScriptedModel {
    calls: Mutex<Vec<(String, usize, usize, bool)>>,
    fail_on: Option<usize>,
}

impl ScriptedModel {
    fn failing_at(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    fn recorded(&self) -> Vec<(String, usize, usize, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryModel for ScriptedModel {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
        deterministic: bool,
    ) -> Result<String, ModelError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((text.to_string(), min_length, max_length, deterministic));
        let n = calls.len();
        if Some(n) == self.fail_on {
            return Err(ModelError::GenerationFailed("model exploded".to_string()));
        }
        Ok(format!("S{}", n))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn partial_summaries_join_in_document_order() {
    let model = ScriptedModel::default();
    let opts = tiny_chunk_opts();

    let summary = summarize_document(THREE_CHUNK_TEXT, &opts, &model, |_, _| {})
        .await
        .expect("summarization should succeed");

    assert_eq!(summary, "S1\n\nS2\n\nS3");

    // Call i received chunk i, with the fixed output bounds, always greedy.
    let expected_chunks = segment(THREE_CHUNK_TEXT, opts.max_chunk_chars);
    let calls = model.recorded();
    assert_eq!(calls.len(), expected_chunks.len());
    for (call, chunk) in calls.iter().zip(&expected_chunks) {
        assert_eq!(&call.0, chunk);
        assert_eq!((call.1, call.2), (40, 150));
        assert!(call.3, "decoding must be deterministic");
    }
}

#[tokio::test]
async fn empty_input_returns_empty_summary_without_model_calls() {
    let model = ScriptedModel::default();

    let summary = summarize_document("", &SummaryOptions::default(), &model, |_, _| {})
        .await
        .expect("empty input is not an error");

    assert_eq!(summary, "");
    assert!(model.recorded().is_empty());
}

#[tokio::test]
async fn model_failure_aborts_remaining_chunks() {
    let model = ScriptedModel::failing_at(2);

    let result = summarize_document(THREE_CHUNK_TEXT, &tiny_chunk_opts(), &model, |_, _| {}).await;

    assert!(matches!(result, Err(ModelError::GenerationFailed(_))));
    // Chunk 3 is never invoked: sequential abort, not best-effort.
    assert_eq!(model.recorded().len(), 2);
}

#[tokio::test]
async fn progress_events_cover_every_chunk_in_order() {
    let model = ScriptedModel::default();
    let mut events = Vec::new();

    summarize_document(THREE_CHUNK_TEXT, &tiny_chunk_opts(), &model, |current, total| {
        events.push((current, total))
    })
    .await
    .expect("summarization should succeed");

    assert_eq!(events, vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn oversized_sentence_reaches_model_untruncated() {
    let model = ScriptedModel::default();
    let sentence = "x".repeat(2000);

    let summary = summarize_document(&sentence, &SummaryOptions::default(), &model, |_, _| {})
        .await
        .expect("summarization should succeed");

    assert_eq!(summary, "S1");
    let calls = model.recorded();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.starts_with(&sentence));
}
