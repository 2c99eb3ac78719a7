//! LLM Provider Client
//!
//! The wellness chat talks to a text-generation service through the
//! [`LLMClient`] trait, which keeps the chat logic testable without a
//! network. [`GeminiClient`] is the production implementation.
//!
//! # Example
//!
//! ```ignore
//! use feelora::llm::{GeminiClient, LLMClient};
//!
//! let client = GeminiClient::new(api_key, api_base, "gemini-pro".to_string());
//! let text = client.generate("What helps with stress?").await?;
//! ```

/// Core LLM client trait plus generation and safety parameters.
pub mod client;
/// Gemini `generateContent` REST client.
pub mod gemini;

pub use client::{
    default_safety_settings, GenerationConfig, HarmBlockThreshold, HarmCategory, LLMClient,
    SafetySetting,
};
pub use gemini::GeminiClient;
