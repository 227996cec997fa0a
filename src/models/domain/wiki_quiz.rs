use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    article_document::ArticleDocument,
    quiz_question::QuizQuestion,
    quiz_result::{KeyEntities, QuizResult},
};

/// Stored quiz for one article URL.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WikiQuiz {
    pub id: String,  // set on create
    pub url: String, // unique per store
    pub title: String,
    pub summary: Option<String>,
    pub raw_html: Option<String>,
    pub key_entities: KeyEntities,
    pub sections: Vec<String>,
    pub related_topics: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    // millisecond timestamps keep the store's ordering numeric
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl WikiQuiz {
    pub fn from_generation(url: &str, document: ArticleDocument, result: QuizResult) -> Self {
        let summary = Some(document.summary).filter(|s| !s.is_empty());
        WikiQuiz {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: document.title,
            summary,
            raw_html: document.raw_html,
            key_entities: result.key_entities,
            sections: document.sections,
            related_topics: result.related_topics,
            quiz: result.quiz,
            created_at: Utc::now(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }

    pub fn history_entry(&self) -> QuizHistoryEntry {
        QuizHistoryEntry {
            id: self.id.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            question_count: self.question_count(),
        }
    }
}

/// The fields of a stored quiz that the history listing needs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizHistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
}
