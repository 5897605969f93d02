pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod llm;
pub mod models;
pub mod prompts;
