pub mod provider;
pub mod anthropic;
pub mod openai;
pub mod gemini;
pub mod local;
pub mod router;
pub mod types;
pub mod catalog;

#[cfg(test)]
pub(crate) mod testing;

pub use provider::{run_analysis, LLMProvider};
pub use router::{Dispatcher, ProviderFactory};
pub use types::{GenerationOptions, LLMResponse, ProviderTimeouts};
