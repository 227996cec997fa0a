use wiki_quiz_server::{
    errors::AppError,
    models::domain::Difficulty,
    services::{
        ArticleExtractor, HeuristicQuizSynthesizer, ModelResponseNormalizer, QuizPromptBuilder,
    },
};

const ARTICLE_HTML: &str = r#"<html><body>
<h1 id="firstHeading">Ada Lovelace</h1>
<div id="mw-content-text"><div class="mw-parser-output">
  <p>Ada Lovelace was an English mathematician and writer of the nineteenth century.</p>
  <p>The Analytical Engine was a proposed mechanical general-purpose computer.</p>
  <h2>Work</h2>
  <p>Charles Babbage was the inventor who designed the Analytical Engine.</p>
  <p>Her notes were the first published description of a computing algorithm.</p>
  <h2>Legacy</h2>
  <p>Ada Lovelace Day is an annual event celebrated in October each year.</p>
  <h2>References</h2>
  <p>Toole, Betty Alexandra (1998). Ada, the Enchantress of Numbers.</p>
</div></div>
</body></html>"#;

#[test]
fn test_extract_then_synthesize_pipeline() {
    let document = ArticleExtractor::new()
        .extract(ARTICLE_HTML)
        .expect("article should extract");

    assert_eq!(document.title, "Ada Lovelace");
    assert_eq!(document.sections, vec!["Work", "Legacy"]);
    assert!(!document.content.contains("Enchantress"));

    let synthesizer = HeuristicQuizSynthesizer::new();
    let result = synthesizer.synthesize(&document);

    assert!(!result.quiz.is_empty());
    for (position, question) in result.quiz.iter().enumerate() {
        assert!((1..=4).contains(&question.options.len()));
        assert!(question.options.contains(&question.answer));
        assert_eq!(question.sort_order, position as i32);
    }
    assert!(result.related_topics.len() <= 6);
    assert!(!result
        .related_topics
        .iter()
        .any(|topic| topic.eq_ignore_ascii_case("Ada Lovelace")));

    assert_eq!(result, synthesizer.synthesize(&document));
}

#[test]
fn test_prompt_carries_extracted_document() {
    let document = ArticleExtractor::new()
        .extract(ARTICLE_HTML)
        .expect("article should extract");
    let prompt = QuizPromptBuilder::new().build(&document);

    assert!(prompt.contains("ARTICLE TITLE: Ada Lovelace"));
    assert!(prompt.contains("ARTICLE SECTIONS: Work, Legacy"));
    assert!(prompt.contains("Charles Babbage was the inventor"));
}

#[test]
fn test_missing_container_is_extraction_error() {
    let result = ArticleExtractor::new().extract("<html><body><p>No article here.</p></body></html>");
    assert!(matches!(result, Err(AppError::ExtractionError(_))));
}

#[test]
fn test_normalizer_handles_fenced_model_reply() {
    let reply = r#"Here you go:
```json
{
  "key_entities": {"people": ["Ada Lovelace", "Charles Babbage"], "organizations": [], "locations": ["London"]},
  "quiz": [
    {"question": "Who designed the Analytical Engine?", "options": ["Charles Babbage", "Ada Lovelace", "Alan Turing", "John von Neumann"], "answer": "Charles Babbage", "difficulty": "easy", "section": "Work"},
    {"question": "When is Ada Lovelace Day?", "options": ["October", "March"], "difficulty": "hard"}
  ],
  "related_topics": ["Analytical Engine", "Charles Babbage"]
}
```"#;

    let result = ModelResponseNormalizer::new()
        .normalize(reply)
        .expect("fenced reply should parse");

    assert_eq!(result.quiz.len(), 1);
    assert_eq!(result.quiz[0].difficulty, Difficulty::Easy);
    assert_eq!(result.quiz[0].section.as_deref(), Some("Work"));
    assert_eq!(result.key_entities.people.len(), 2);
    assert_eq!(result.related_topics, vec!["Analytical Engine", "Charles Babbage"]);
}

#[cfg(test)]
mod sync_tests {
    use wiki_quiz_server::services::url_validator::is_valid_wikipedia_url;

    #[test]
    fn test_url_validation_rules() {
        assert!(is_valid_wikipedia_url("https://en.wikipedia.org/wiki/Ada_Lovelace"));
        assert!(is_valid_wikipedia_url("http://de.wikipedia.org/wiki/Ada_Lovelace"));
        assert!(!is_valid_wikipedia_url("ftp://en.wikipedia.org/wiki/Ada_Lovelace"));
        assert!(!is_valid_wikipedia_url("https://en.wikipedia.org/w/index.php?title=Ada"));
        assert!(!is_valid_wikipedia_url("https://en.wikipedia.org/wiki/File:Ada.jpg"));
        assert!(!is_valid_wikipedia_url("not a url"));
    }
}
