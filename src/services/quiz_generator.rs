use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{ArticleDocument, QuizResult},
    services::{
        heuristic_quiz_synthesizer::HeuristicQuizSynthesizer,
        model_response_normalizer::ModelResponseNormalizer, model_service::QuizModel,
        quiz_prompt_builder::QuizPromptBuilder,
    },
};

/// Routes a document through the model when one is configured, otherwise
/// through the offline synthesizer.
pub struct QuizGenerator {
    model: Option<Arc<dyn QuizModel>>,
    prompt_builder: QuizPromptBuilder,
    synthesizer: HeuristicQuizSynthesizer,
    normalizer: ModelResponseNormalizer,
}

impl QuizGenerator {
    pub fn new(model: Option<Arc<dyn QuizModel>>) -> Self {
        Self {
            model,
            prompt_builder: QuizPromptBuilder::new(),
            synthesizer: HeuristicQuizSynthesizer::new(),
            normalizer: ModelResponseNormalizer::new(),
        }
    }

    pub fn heuristic() -> Self {
        Self::new(None)
    }

    pub fn uses_model(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(&self, document: &ArticleDocument) -> AppResult<QuizResult> {
        let Some(model) = &self.model else {
            log::info!("No model configured, synthesizing quiz for '{}'", document.title);
            return Ok(self.synthesizer.synthesize(document));
        };

        log::info!("Generating quiz for '{}' with the language model", document.title);
        let prompt = self.prompt_builder.build(document);
        let reply = model.complete(&prompt).await?;
        let result = self.normalizer.normalize(&reply)?;

        log::info!(
            "Model produced {} questions and {} related topics",
            result.quiz.len(),
            result.related_topics.len()
        );
        Ok(result)
    }
}
