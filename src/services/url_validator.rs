use url::Url;

use crate::errors::{AppError, AppResult};

pub const INVALID_URL_MESSAGE: &str =
    "Invalid Wikipedia URL. Use format: https://en.wikipedia.org/wiki/Article_Name";

/// Accepts http(s) article URLs on a wikipedia.org host, rejecting `Special:` and `File:` pages.
pub fn is_valid_wikipedia_url(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw.trim()) else {
        return false;
    };

    matches!(parsed.scheme(), "http" | "https")
        && parsed
            .host_str()
            .is_some_and(|host| host.contains("wikipedia.org"))
        && parsed.path().starts_with("/wiki/")
        && !raw.contains("Special:")
        && !raw.contains("File:")
}

pub fn ensure_wikipedia_url(raw: &str) -> AppResult<()> {
    if is_valid_wikipedia_url(raw) {
        Ok(())
    } else {
        Err(AppError::ValidationError(INVALID_URL_MESSAGE.to_string()))
    }
}
