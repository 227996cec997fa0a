pub mod wiki_quiz_repository;

pub use wiki_quiz_repository::{MongoWikiQuizRepository, WikiQuizRepository};
