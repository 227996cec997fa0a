use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(url(message = "url must be an absolute URL"))]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewQuery {
    pub url: String,
}
