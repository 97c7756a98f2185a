/// Splits raw document text into model-sized chunks on ". " boundaries.
///
/// The budget is measured in characters as a cheap stand-in for the model's
/// token limit. A single sentence longer than the budget is emitted alone as
/// an oversized chunk rather than truncated or split mid-sentence, so every
/// sentence of the input lands in exactly one chunk, in document order.
pub fn segment(text: &str, max_chunk_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split(". ") {
        if current.len() + sentence.len() >= max_chunk_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(sentence);
        current.push_str(". ");
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(segment("", 1000).is_empty());
    }

    #[test]
    fn text_without_delimiter_is_one_chunk() {
        let chunks = segment("no sentence boundary here", 1000);
        assert_eq!(chunks, vec!["no sentence boundary here. ".to_string()]);
    }

    #[test]
    fn tiny_budget_closes_chunks_at_sentence_boundaries() {
        // "B" still fits: len("A. ") + len("B") == 4 < 5. "C." does not.
        let chunks = segment("A. B. C.", 5);
        assert_eq!(chunks, vec!["A. B. ".to_string(), "C.. ".to_string()]);
    }
}
