use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuizHistoryEntry, WikiQuiz},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WikiQuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WikiQuiz>>;
    async fn find_by_url(&self, url: &str) -> AppResult<Option<WikiQuiz>>;
    /// Newest first.
    async fn list_recent(&self) -> AppResult<Vec<QuizHistoryEntry>>;
    async fn create(&self, quiz: WikiQuiz) -> AppResult<WikiQuiz>;
}

pub struct MongoWikiQuizRepository {
    collection: Collection<WikiQuiz>,
}

impl MongoWikiQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.wiki_quizzes(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", self.collection.name());

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let url_index = IndexModel::builder()
            .keys(doc! { "url": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("url_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(url_index).await?;

        log::info!("Successfully created indexes for {} collection", self.collection.name());
        Ok(())
    }
}

#[async_trait]
impl WikiQuizRepository for MongoWikiQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WikiQuiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_url(&self, url: &str) -> AppResult<Option<WikiQuiz>> {
        let quiz = self.collection.find_one(doc! { "url": url }).await?;
        Ok(quiz)
    }

    async fn list_recent(&self) -> AppResult<Vec<QuizHistoryEntry>> {
        let cursor = self
            .collection
            .aggregate(history_pipeline())
            .with_type::<QuizHistoryEntry>()
            .await?;
        let items: Vec<QuizHistoryEntry> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn create(&self, quiz: WikiQuiz) -> AppResult<WikiQuiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }
}

/// Newest first, projected down to the history fields.
fn history_pipeline() -> Vec<Document> {
    vec![
        doc! { "$sort": { "created_at": -1 } },
        doc! {
            "$project": {
                "_id": 0,
                "id": 1,
                "url": 1,
                "title": 1,
                "created_at": 1,
                "question_count": { "$size": { "$ifNull": ["$quiz", []] } },
            }
        },
    ]
}
