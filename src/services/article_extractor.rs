use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{article_document::INTRODUCTION, ArticleDocument},
};

const MAX_ELEMENTS: usize = 120;
const MAX_SECTIONS: usize = 10;
const MIN_TEXT_CHARS: usize = 20;
const MAX_SUMMARY_CHARS: usize = 800;
const MAX_CONTENT_CHARS: usize = 5000;
const MAX_RAW_HTML_CHARS: usize = 30000;
const UNKNOWN_TITLE: &str = "Unknown";

const NAVIGATIONAL_SECTIONS: [&str; 4] = ["Contents", "See also", "References", "External links"];

static STRIP_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script, style, nav, footer, .navbox, .infobox, .metadata, .noprint")
        .expect("STRIP_SELECTOR is a valid selector")
});
static FIRST_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1#firstHeading").expect("FIRST_HEADING_SELECTOR is a valid selector"));
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("H1_SELECTOR is a valid selector"));
static CONTENT_TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#mw-content-text").expect("CONTENT_TEXT_SELECTOR is a valid selector")
});
static PARSER_OUTPUT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.mw-parser-output").expect("PARSER_OUTPUT_SELECTOR is a valid selector")
});
static WALK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3, p, li").expect("WALK_SELECTOR is a valid selector"));
static HEADLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.mw-headline").expect("HEADLINE_SELECTOR is a valid selector"));

/// Turns a Wikipedia article page into an [`ArticleDocument`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleExtractor;

impl ArticleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Title of the page only, used by the URL preview.
    pub fn extract_title(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        page_title(&document)
    }

    pub fn extract(&self, html: &str) -> AppResult<ArticleDocument> {
        let mut document = Html::parse_document(html);
        strip_non_content(&mut document);

        let title = page_title(&document);

        let container = document
            .select(&CONTENT_TEXT_SELECTOR)
            .next()
            .or_else(|| document.select(&PARSER_OUTPUT_SELECTOR).next())
            .ok_or_else(|| AppError::ExtractionError("Could not find article content".to_string()))?;

        let mut collector = SectionCollector::new();
        for element in container.select(&WALK_SELECTOR).take(MAX_ELEMENTS) {
            match element.value().name() {
                "h2" | "h3" => collector.start_section(heading_name(element)),
                _ => {
                    let text = element_text(element);
                    if text.chars().count() > MIN_TEXT_CHARS {
                        collector.push_text(text);
                    }
                }
            }
        }
        let (collected, section_text) = collector.finish();

        let content = build_content(&collected, &section_text);
        let summary = build_summary(
            section_text
                .get(INTRODUCTION)
                .map(String::as_str)
                .unwrap_or_default(),
        );
        let raw_html = Some(html)
            .filter(|h| !h.is_empty())
            .map(|h| truncate_chars(h, MAX_RAW_HTML_CHARS).to_string());

        log::info!(
            "Extracted '{}' with {} sections and {} content chars",
            title,
            collected.len(),
            content.chars().count()
        );

        Ok(ArticleDocument {
            title,
            sections: collected.into_iter().take(MAX_SECTIONS).collect(),
            section_text,
            summary,
            content,
            raw_html,
        })
    }
}

struct SectionCollector {
    collected: Vec<String>,
    section_text: BTreeMap<String, String>,
    current: String,
    buffer: Vec<String>,
}

impl SectionCollector {
    fn new() -> Self {
        Self {
            collected: Vec::new(),
            section_text: BTreeMap::new(),
            current: INTRODUCTION.to_string(),
            buffer: Vec::new(),
        }
    }

    fn start_section(&mut self, name: String) {
        self.flush();
        self.current = name;
        if is_retained(&self.current) && !self.collected.contains(&self.current) {
            self.collected.push(self.current.clone());
            self.section_text.entry(self.current.clone()).or_default();
        }
    }

    fn push_text(&mut self, text: String) {
        self.buffer.push(text);
    }

    // Text under navigational or unnamed headings is dropped here.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = self.buffer.join(" ");
        self.buffer.clear();
        if !is_retained(&self.current) {
            return;
        }
        let entry = self.section_text.entry(self.current.clone()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(&text);
    }

    fn finish(mut self) -> (Vec<String>, BTreeMap<String, String>) {
        self.flush();
        (self.collected, self.section_text)
    }
}

fn is_retained(name: &str) -> bool {
    !name.is_empty() && !NAVIGATIONAL_SECTIONS.contains(&name)
}

fn strip_non_content(document: &mut Html) {
    let ids: Vec<_> = document.select(&STRIP_SELECTOR).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn page_title(document: &Html) -> String {
    document
        .select(&FIRST_HEADING_SELECTOR)
        .next()
        .or_else(|| document.select(&H1_SELECTOR).next())
        .map(element_text)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn heading_name(heading: ElementRef) -> String {
    heading
        .select(&HEADLINE_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_else(|| element_text(heading))
}

fn element_text(element: ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn build_content(collected: &[String], section_text: &BTreeMap<String, String>) -> String {
    let names = std::iter::once(INTRODUCTION)
        .chain(collected.iter().map(String::as_str).filter(|name| *name != INTRODUCTION));

    let blocks: Vec<String> = names
        .filter_map(|name| {
            section_text
                .get(name)
                .filter(|text| !text.is_empty())
                .map(|text| format!("## {}\n{}", name, text))
        })
        .collect();

    truncate_chars(&blocks.join("\n\n"), MAX_CONTENT_CHARS).to_string()
}

fn build_summary(introduction: &str) -> String {
    if introduction.chars().count() > MAX_SUMMARY_CHARS {
        format!("{}...", truncate_chars(introduction, MAX_SUMMARY_CHARS))
    } else {
        introduction.to_string()
    }
}

/// Longest prefix holding at most `max` characters.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
