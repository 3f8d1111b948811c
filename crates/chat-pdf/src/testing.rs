//! Offline fixtures: PDF builder, deterministic embedder and an extractive LLM

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::Result;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::types::SENTINEL_ANSWER;

/// Build a PDF with one page per entry; each line of an entry is drawn as text
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    build_pdf_with_font(
        pages,
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        },
    )
}

/// Same as `build_pdf`, drawing every page with the given font dictionary
pub fn build_pdf_with_font(pages: &[&str], font: Dictionary) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for text in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 750.into()]),
        ];
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-16).into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize test pdf");
    bytes
}

/// Words ignored when matching questions against context
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "of", "in", "on", "to", "and", "or", "what",
    "which", "who", "whom", "when", "where", "why", "how", "does", "did", "do", "it", "its",
    "this", "that", "for", "with", "as", "by", "be",
];

fn content_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// FNV-1a, stable across runs and platforms
fn fnv1a(word: &str) -> u64 {
    word.bytes().fold(0xcbf29ce484222325u64, |hash, b| {
        (hash ^ b as u64).wrapping_mul(0x100000001b3)
    })
}

/// Bag-of-words embedder hashing content words into a fixed number of buckets
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { dimensions: 256 }
    }
}

impl HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for word in content_words(text) {
            vector[(fnv1a(&word) % self.dimensions as u64) as usize] += 1.0;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed_document(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed(text))
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed(text))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn model(&self) -> &str {
        "bag-of-words"
    }
}

/// Answers with the context sentence sharing the most content words with the
/// question, or the "not available" phrase when nothing overlaps
pub struct ExtractiveLlm;

impl ExtractiveLlm {
    fn section<'a>(prompt: &'a str, start: &str, end: &str) -> &'a str {
        let Some(from) = prompt.find(start).map(|i| i + start.len()) else {
            return "";
        };
        let rest = &prompt[from..];
        rest.find(end).map(|i| &rest[..i]).unwrap_or(rest)
    }
}

#[async_trait]
impl LlmProvider for ExtractiveLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let context = Self::section(prompt, "Context:\n", "?\n\nQuestion:");
        let question = Self::section(prompt, "Question: \n", "\n\nAnswer:");
        let question_words = content_words(question);

        let best = context
            .split_inclusive('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|sentence| {
                let words = content_words(sentence);
                let overlap = question_words.iter().filter(|w| words.contains(w)).count();
                (overlap, sentence)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .max_by_key(|(overlap, _)| *overlap);

        Ok(match best {
            Some((_, sentence)) => sentence.to_string(),
            None => SENTINEL_ANSWER.to_string(),
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "extractive"
    }

    fn model(&self) -> &str {
        "first-match"
    }
}

/// Multipart boundary used by `multipart_body`
pub const BOUNDARY: &str = "chat-pdf-test-boundary";

/// Encode an upload form as `multipart/form-data`
pub fn multipart_body(pdf: Option<(&str, &[u8])>, question: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((filename, data)) = pdf {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"pdf_file\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(question) = question {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"question\"\r\n\r\n{}\r\n",
                BOUNDARY, question
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extractive_llm_finds_overlapping_sentence() {
        let prompt = crate::generation::PromptBuilder::build_qa_prompt(
            "Bananas are yellow. The capital of France is Paris.",
            "What is the capital of France?",
        );
        let answer = ExtractiveLlm.complete(&prompt).await.unwrap();
        assert_eq!(answer, "The capital of France is Paris.");
    }

    #[tokio::test]
    async fn test_extractive_llm_reports_missing_answer() {
        let prompt = crate::generation::PromptBuilder::build_qa_prompt(
            "Bananas are yellow.",
            "Who won the 1998 World Cup?",
        );
        let answer = ExtractiveLlm.complete(&prompt).await.unwrap();
        assert_eq!(answer, SENTINEL_ANSWER);
    }

    #[tokio::test]
    async fn test_hashing_embedder_same_text_same_vector() {
        let embedder = HashingEmbedder::default();
        let text = "The capital of France is Paris.";

        let first = embedder.embed_document(text).await.unwrap();
        let second = embedder.embed_document(text).await.unwrap();
        assert_eq!(first, second);

        let batch = embedder.embed_batch(&[text.to_string()]).await.unwrap();
        assert_eq!(batch[0], first);
    }

    #[tokio::test]
    async fn test_hashing_embedder_is_normalized() {
        let v = HashingEmbedder::default()
            .embed_document("some words here")
            .await
            .unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
