use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const INTRODUCTION: &str = "Introduction";

/// Normalized extraction of a single article page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDocument {
    pub title: String,
    /// Section names in document order, navigational sections excluded.
    pub sections: Vec<String>,
    pub section_text: BTreeMap<String, String>,
    pub summary: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
}

impl ArticleDocument {
    pub fn introduction(&self) -> &str {
        self.section_text
            .get(INTRODUCTION)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Comma-joined section list as shown to the model.
    pub fn sections_label(&self) -> String {
        if self.sections.is_empty() {
            INTRODUCTION.to_string()
        } else {
            self.sections.join(", ")
        }
    }
}
