//! Chat API implementations

pub mod ollama;
pub mod openai;
