pub mod security;

pub use security::build_prompt;
