pub mod aggregate;
pub mod loaders;
pub mod question;

pub use aggregate::AggregateResult;
pub use loaders::{load_all_documents, load_document};
pub use question::{GenerationRequest, ParsedQuestion, QuestionType, QuizItem, SourceDocument};
