pub mod finding;
pub mod analysis;
pub mod request;

pub use finding::*;
pub use analysis::*;
pub use request::*;
