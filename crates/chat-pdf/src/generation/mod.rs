//! Prompt assembly and answer generation

mod answer;
mod prompt;

pub use answer::AnswerGenerator;
pub use prompt::PromptBuilder;
