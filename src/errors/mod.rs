pub mod types;
pub mod classification;

pub use types::SeezoError;
pub use classification::ErrorClassification;
