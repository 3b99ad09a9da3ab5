//! Docflow Services Layer
//!
//! HTTP clients for the external collaborators: the document parsing service that turns a
//! stored object into text and metadata, and the answering engine behind the NLP routes.
//! Both sit behind traits so the pipeline and handlers can be tested without a network.

pub mod answer;
pub mod parser;

pub use answer::{AnswerEngine, AnswerError, HttpAnswerEngine};
pub use docflow_core::models::Sentiment;
pub use parser::{DocumentParser, ParseError, UnstructuredParser};
