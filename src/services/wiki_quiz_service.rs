use std::{sync::Arc, time::Duration};

use validator::Validate;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::WikiQuiz,
        dto::{
            request::GenerateQuizRequest,
            response::{PreviewResponse, WikiQuizListItem, WikiQuizResponse},
        },
    },
    repositories::WikiQuizRepository,
    services::{
        article_extractor::ArticleExtractor, article_fetcher::ArticleFetcher,
        quiz_generator::QuizGenerator, url_validator::ensure_wikipedia_url,
    },
};

pub struct WikiQuizService {
    repository: Arc<dyn WikiQuizRepository>,
    fetcher: Arc<dyn ArticleFetcher>,
    extractor: ArticleExtractor,
    generator: QuizGenerator,
    preview_timeout: Duration,
    fetch_timeout: Duration,
}

impl WikiQuizService {
    pub fn new(
        repository: Arc<dyn WikiQuizRepository>,
        fetcher: Arc<dyn ArticleFetcher>,
        generator: QuizGenerator,
        config: &Config,
    ) -> Self {
        Self {
            repository,
            fetcher,
            extractor: ArticleExtractor::new(),
            generator,
            preview_timeout: config.preview_timeout(),
            fetch_timeout: config.fetch_timeout(),
        }
    }

    pub async fn preview(&self, url: &str) -> AppResult<PreviewResponse> {
        ensure_wikipedia_url(url)?;

        let html = self.fetcher.fetch(url, self.preview_timeout).await?;
        let title = self.extractor.extract_title(&html);

        Ok(PreviewResponse {
            valid: true,
            title,
            url: url.to_string(),
        })
    }

    /// Returns the stored quiz when the URL has been generated before.
    pub async fn generate(&self, request: GenerateQuizRequest) -> AppResult<WikiQuizResponse> {
        request.validate()?;
        let url = request.url;
        ensure_wikipedia_url(&url)?;

        if let Some(existing) = self.repository.find_by_url(&url).await? {
            log::info!("Returning stored quiz {} for {}", existing.id, url);
            return Ok(existing.into());
        }

        let html = self.fetcher.fetch(&url, self.fetch_timeout).await?;
        let document = self.extractor.extract(&html)?;

        let result = self.generator.generate(&document).await.map_err(|e| {
            log::error!("Quiz generation failed for {}: {}", url, e);
            e
        })?;

        let quiz = WikiQuiz::from_generation(&url, document, result);
        let quiz_id = quiz.id.clone();
        match self.repository.create(quiz).await {
            Ok(saved) => {
                log::info!("Stored quiz {} for {}", saved.id, url);
                Ok(saved.into())
            }
            // a concurrent run may have stored the same URL first
            Err(AppError::DatabaseError(message)) => {
                match self.repository.find_by_url(&url).await? {
                    Some(existing) => {
                        log::warn!("Discarding quiz {}, {} was stored concurrently", quiz_id, url);
                        Ok(existing.into())
                    }
                    None => Err(AppError::DatabaseError(message)),
                }
            }
            Err(e) => Err(e),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<WikiQuizListItem>> {
        let entries = self.repository.list_recent().await?;
        Ok(entries.into_iter().map(WikiQuizListItem::from).collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<WikiQuizResponse> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz.into())
    }
}
