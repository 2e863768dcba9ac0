//! Document analyzer adapters.
//!
//! - `MockDocumentAnalyzer` - Fixed fields per type
//! - `TextDocumentAnalyzer` - Rule extraction over UTF-8 text

mod mock_analyzer;
mod text_analyzer;

pub use mock_analyzer::MockDocumentAnalyzer;
pub use text_analyzer::TextDocumentAnalyzer;
