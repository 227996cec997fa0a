pub mod article_document;
pub mod quiz_question;
pub mod quiz_result;
pub mod wiki_quiz;
pub use article_document::ArticleDocument;
pub use quiz_question::{Difficulty, QuizQuestion};
pub use quiz_result::{KeyEntities, QuizResult};
pub use wiki_quiz::{QuizHistoryEntry, WikiQuiz};
