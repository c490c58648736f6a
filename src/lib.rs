//! Prism Core - question selection for sustainability reporting frameworks
//!
//! Resolves a framework's question pool, narrows it by focus keywords and
//! draws a bounded random sample.

pub mod catalog;
pub mod error;
pub mod export;
pub mod filter;
pub mod framework;
pub mod request;
pub mod response;
pub mod sampler;
pub mod selector;

pub use catalog::{FrameworkCatalog, DEFAULT_CATALOG_PATH};
pub use error::SelectionError;
pub use filter::{filter, FilterOutcome, FocusTerms};
pub use framework::{resolve, Framework, FrameworkSummary, Question};
pub use request::{parse_num_questions, SelectionRequest, DEFAULT_NUM_QUESTIONS};
pub use response::{ErrorBody, SelectionResponse};
pub use sampler::{sample, shuffle};
pub use selector::{select_questions, QuestionSelector, SelectionResult};
