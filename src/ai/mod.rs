//! Generative-AI collaborator

mod gemini;

pub use gemini::{first_word, select_model, GeminiClient, ModelInfo, ONE_WORD_INSTRUCTION};
