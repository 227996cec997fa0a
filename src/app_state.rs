use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::MongoWikiQuizRepository,
    services::{HttpArticleFetcher, OpenAiQuizModel, QuizGenerator, QuizModel, WikiQuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub wiki_quiz_service: Arc<WikiQuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repository = Arc::new(MongoWikiQuizRepository::new(&db));
        repository.ensure_indexes().await?;

        let fetcher = Arc::new(HttpArticleFetcher::new(&config.scraper_user_agent)?);

        let model = OpenAiQuizModel::from_config(&config).map(|model| {
            log::info!("Quiz generation uses model {} at {}", model.model(), config.llm_api_base);
            Arc::new(model) as Arc<dyn QuizModel>
        });
        if model.is_none() {
            log::warn!("LLM_API_KEY is not set, quizzes will be synthesized from article text");
        }

        let wiki_quiz_service = WikiQuizService::new(
            repository,
            fetcher,
            QuizGenerator::new(model),
            &config,
        );

        Ok(Self::with_service(wiki_quiz_service, config))
    }

    pub fn with_service(wiki_quiz_service: WikiQuizService, config: Config) -> Self {
        Self {
            wiki_quiz_service: Arc::new(wiki_quiz_service),
            config: Arc::new(config),
        }
    }
}
