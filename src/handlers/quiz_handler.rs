use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::{GenerateQuizRequest, PreviewQuery},
};

/// Logs a failed pipeline request under its request id.
fn traced(req: &HttpRequest, err: AppError) -> AppError {
    let request_id = get_request_id(req);
    log::warn!(
        "Request {} to {} failed: {}",
        request_id.as_deref().unwrap_or("-"),
        req.path(),
        err
    );
    err
}

#[get("/api/preview")]
async fn preview_url(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<PreviewQuery>,
) -> Result<HttpResponse, AppError> {
    let preview = state
        .wiki_quiz_service
        .preview(&query.url)
        .await
        .map_err(|e| traced(&req, e))?;
    Ok(HttpResponse::Ok().json(preview))
}

#[post("/api/generate")]
async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .wiki_quiz_service
        .generate(request.into_inner())
        .await
        .map_err(|e| traced(&req, e))?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/quizzes")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = state.wiki_quiz_service.list().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.wiki_quiz_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}
