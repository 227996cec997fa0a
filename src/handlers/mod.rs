pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, root};
pub use quiz_handler::{generate_quiz, get_quiz, list_quizzes, preview_url};

/// Registers every route and maps body/query rejections onto `AppError`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .service(root)
    .service(health_check)
    .service(preview_url)
    .service(generate_quiz)
    .service(list_quizzes)
    .service(get_quiz);
}
