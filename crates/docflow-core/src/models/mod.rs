pub mod document;
pub mod nlp;
pub mod storage;

pub use document::*;
pub use nlp::*;
pub use storage::*;
