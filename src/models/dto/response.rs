use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{KeyEntities, QuizHistoryEntry, QuizQuestion, WikiQuiz};

#[derive(Debug, Clone, Serialize)]
pub struct WikiQuizResponse {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: Option<String>,
    pub key_entities: KeyEntities,
    pub sections: Vec<String>,
    pub related_topics: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
}

impl From<WikiQuiz> for WikiQuizResponse {
    fn from(quiz: WikiQuiz) -> Self {
        let mut questions = quiz.quiz;
        questions.sort_by_key(|q| q.sort_order);

        WikiQuizResponse {
            id: quiz.id,
            url: quiz.url,
            title: quiz.title,
            summary: quiz.summary,
            key_entities: quiz.key_entities,
            sections: quiz.sections,
            related_topics: quiz.related_topics,
            quiz: questions,
            created_at: quiz.created_at,
        }
    }
}

/// History row.
#[derive(Debug, Clone, Serialize)]
pub struct WikiQuizListItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
}

impl From<QuizHistoryEntry> for WikiQuizListItem {
    fn from(entry: QuizHistoryEntry) -> Self {
        WikiQuizListItem {
            id: entry.id,
            url: entry.url,
            title: entry.title,
            created_at: entry.created_at,
            question_count: entry.question_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub valid: bool,
    pub title: String,
    pub url: String,
}
