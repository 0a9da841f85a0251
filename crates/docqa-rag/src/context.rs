use docqa_core::types::RetrievalResult;

/// Returned instead of a prompt when retrieval found nothing; safe to show to the end user.
pub const NO_RELEVANT_DOCUMENTS: &str =
    "Sorry, the loaded documents do not contain anything relevant to this question.";

const PREAMBLE: &str = "Answer the question using only the document excerpts below.";
const CLOSING: &str =
    "Answer based only on the excerpts above. If they do not contain the information needed, say so explicitly.";

/// Formats retrieved segments and the question into a single plain-text prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self { Self }

    /// Excerpts are labelled `[Excerpt 1]`, `[Excerpt 2]`, ... in result order.
    pub fn assemble(&self, question: &str, results: &RetrievalResult) -> String {
        if results.is_empty() {
            return NO_RELEVANT_DOCUMENTS.to_string();
        }
        let body_len: usize = results.iter().map(|h| h.segment.text.len() + 16).sum();
        let mut prompt = String::with_capacity(PREAMBLE.len() + CLOSING.len() + question.len() + body_len + 32);
        prompt.push_str(PREAMBLE);
        prompt.push_str("\n\n");
        for (i, hit) in results.iter().enumerate() {
            prompt.push_str(&format!("[Excerpt {}]\n", i + 1));
            prompt.push_str(&hit.segment.text);
            prompt.push_str("\n\n");
        }
        prompt.push_str("Question: ");
        prompt.push_str(question);
        prompt.push_str("\n\n");
        prompt.push_str(CLOSING);
        prompt
    }
}
