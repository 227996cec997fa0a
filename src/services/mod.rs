pub mod article_extractor;
pub mod article_fetcher;
pub mod heuristic_quiz_synthesizer;
pub mod model_response_normalizer;
pub mod model_service;
pub mod quiz_generator;
pub mod quiz_prompt_builder;
pub mod url_validator;
pub mod wiki_quiz_service;

pub use article_extractor::ArticleExtractor;
pub use article_fetcher::{ArticleFetcher, HttpArticleFetcher};
pub use heuristic_quiz_synthesizer::HeuristicQuizSynthesizer;
pub use model_response_normalizer::ModelResponseNormalizer;
pub use model_service::{OpenAiQuizModel, QuizModel};
pub use quiz_generator::QuizGenerator;
pub use quiz_prompt_builder::QuizPromptBuilder;
pub use wiki_quiz_service::WikiQuizService;
