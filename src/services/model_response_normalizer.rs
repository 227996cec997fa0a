use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, KeyEntities, QuizQuestion, QuizResult},
};

const MAX_OPTIONS: usize = 4;
const MAX_RELATED_TOPICS: usize = 6;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("JSON_FENCE is a valid regex pattern")
});
static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("ANY_FENCE is a valid regex pattern"));

/// Parses a model reply into a [`QuizResult`].
///
/// Recovery runs in layers: fence stripping, a direct parse, then the outermost
/// `{...}` span. Malformed quiz items are dropped and a malformed
/// `key_entities` collapses to the empty default; neither fails the parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelResponseNormalizer;

impl ModelResponseNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> AppResult<QuizResult> {
        let text = strip_fences(raw.trim());
        let data = parse_object(text)?;

        let quiz = match data.get("quiz") {
            Some(Value::Array(items)) => normalize_quiz(items),
            _ => Vec::new(),
        };

        let related_topics = match data.get("related_topics") {
            Some(Value::Array(topics)) => normalize_topics(topics),
            _ => Vec::new(),
        };

        let key_entities = match data.get("key_entities") {
            None | Some(Value::Null) => KeyEntities::default(),
            Some(value) => normalize_key_entities(value).unwrap_or_else(|| {
                log::warn!("Model returned malformed key_entities, using empty defaults");
                KeyEntities::default()
            }),
        };

        Ok(QuizResult {
            quiz,
            related_topics,
            key_entities,
        })
    }
}

fn strip_fences(text: &str) -> &str {
    let fence = if text.contains("```json") {
        JSON_FENCE.captures(text)
    } else if text.contains("```") {
        ANY_FENCE.captures(text)
    } else {
        None
    };

    fence
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim())
        .unwrap_or(text)
}

fn parse_object(text: &str) -> AppResult<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return Ok(map);
    }

    let span = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            return Err(AppError::ParseError(
                "No valid JSON found in model response".to_string(),
            ))
        }
    };

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::ParseError(
            "Failed to parse model response as JSON".to_string(),
        )),
    }
}

fn normalize_quiz(items: &[Value]) -> Vec<QuizQuestion> {
    let mut quiz = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let Some(record) = item.as_object().filter(|r| {
            r.contains_key("question") && r.contains_key("options") && r.contains_key("answer")
        }) else {
            log::warn!("Dropping malformed quiz item at position {}", position);
            continue;
        };

        let question = QuizQuestion {
            question: to_text(&record["question"]),
            options: match &record["options"] {
                Value::Array(options) => options.iter().take(MAX_OPTIONS).map(to_text).collect(),
                _ => Vec::new(),
            },
            answer: to_text(&record["answer"]),
            difficulty: match record.get("difficulty") {
                None | Some(Value::Null) => Difficulty::Medium,
                Some(value) => Difficulty::from_label(&to_text(value)),
            },
            explanation: record.get("explanation").filter(|v| is_truthy(v)).map(to_text),
            section: record.get("section").filter(|v| is_truthy(v)).map(to_text),
            sort_order: quiz.len() as i32,
        };

        if !question.answer_in_options() {
            log::warn!(
                "Answer for quiz item {} is not among its options",
                question.sort_order
            );
        }
        quiz.push(question);
    }
    quiz
}

/// First occurrence wins; blanks are skipped.
fn normalize_topics(topics: &[Value]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(MAX_RELATED_TOPICS);
    for topic in topics.iter().map(to_text) {
        let topic = topic.trim();
        if topic.is_empty() || kept.iter().any(|k| k.eq_ignore_ascii_case(topic)) {
            continue;
        }
        kept.push(topic.to_string());
        if kept.len() == MAX_RELATED_TOPICS {
            break;
        }
    }
    kept
}

fn normalize_key_entities(value: &Value) -> Option<KeyEntities> {
    let map = value.as_object()?;
    let list = |key: &str| -> Option<Vec<String>> {
        match map.get(key) {
            None | Some(Value::Null) => Some(Vec::new()),
            Some(Value::Array(items)) => Some(items.iter().map(to_text).collect()),
            Some(_) => None,
        }
    };
    Some(KeyEntities {
        people: list("people")?,
        organizations: list("organizations")?,
        locations: list("locations")?,
    })
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::WELL_FORMED_MODEL_REPLY;

    fn normalize(raw: &str) -> AppResult<QuizResult> {
        ModelResponseNormalizer::new().normalize(raw)
    }

    #[test]
    fn round_trips_well_formed_reply() {
        let result = normalize(WELL_FORMED_MODEL_REPLY).expect("reply should parse");

        assert_eq!(result.quiz.len(), 2);
        let first = &result.quiz[0];
        assert_eq!(first.question, "Where did Turing work during the Second World War?");
        assert_eq!(first.options, vec!["Bletchley Park", "Los Alamos", "Cambridge", "Manchester"]);
        assert_eq!(first.answer, "Bletchley Park");
        assert_eq!(first.difficulty, Difficulty::Easy);
        assert_eq!(
            first.explanation.as_deref(),
            Some("The Cryptanalysis section places him at Bletchley Park.")
        );
        assert_eq!(first.section.as_deref(), Some("Cryptanalysis"));
        assert_eq!(first.sort_order, 0);
        assert_eq!(result.quiz[1].difficulty, Difficulty::Medium);
        assert_eq!(result.quiz[1].sort_order, 1);

        assert_eq!(result.related_topics, vec!["Enigma machine", "Bletchley Park", "Turing test"]);
        assert_eq!(result.key_entities.people, vec!["Alan Turing"]);
        assert_eq!(result.key_entities.organizations, vec!["Government Code and Cypher School"]);
        assert_eq!(result.key_entities.locations, vec!["Bletchley Park"]);
    }

    #[test]
    fn json_fence_matches_unwrapped_result() {
        let fenced = format!("Here is your quiz:\n```json\n{}\n```\nEnjoy!", WELL_FORMED_MODEL_REPLY);
        assert_eq!(
            normalize(&fenced).expect("fenced reply should parse"),
            normalize(WELL_FORMED_MODEL_REPLY).expect("reply should parse")
        );
    }

    #[test]
    fn bare_fence_is_stripped() {
        let fenced = format!("```\n{}\n```", WELL_FORMED_MODEL_REPLY);
        let result = normalize(&fenced).expect("fenced reply should parse");
        assert_eq!(result.quiz.len(), 2);
    }

    #[test]
    fn recovers_object_embedded_in_prose() {
        let raw = format!("Sure! {} Let me know if you need more.", WELL_FORMED_MODEL_REPLY);
        let result = normalize(&raw).expect("embedded object should parse");
        assert_eq!(result.quiz.len(), 2);
    }

    #[test]
    fn unterminated_fence_falls_back_to_brace_scan() {
        let raw = format!("```json\n{}", WELL_FORMED_MODEL_REPLY);
        let result = normalize(&raw).expect("object should still be recovered");
        assert_eq!(result.related_topics.len(), 3);
    }

    #[test]
    fn text_without_json_is_a_parse_error() {
        let result = normalize("I'm sorry, I cannot produce a quiz for this article.");
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }

    #[test]
    fn broken_json_is_a_parse_error() {
        let result = normalize("{\"quiz\": [ {\"question\": \"unterminated\" }");
        assert!(matches!(result, Err(AppError::ParseError(_))));
        assert!(matches!(normalize("[1, 2, 3]"), Err(AppError::ParseError(_))));
    }

    #[test]
    fn drops_item_missing_answer_and_renumbers() {
        let raw = r#"{
          "quiz": [
            {"question": "Dropped?", "options": ["a", "b", "c", "d"]},
            {"question": "Kept first?", "options": ["a", "b", "c", "d"], "answer": "a"},
            "not even an object",
            {"question": "Kept second?", "options": ["a", "b", "c", "d"], "answer": "b"}
          ]
        }"#;
        let result = normalize(raw).expect("reply should parse");
        let kept: Vec<(&str, i32)> = result
            .quiz
            .iter()
            .map(|q| (q.question.as_str(), q.sort_order))
            .collect();
        assert_eq!(kept, vec![("Kept first?", 0), ("Kept second?", 1)]);
    }

    #[test]
    fn coerces_loose_field_types() {
        let raw = r#"{
          "quiz": [{
            "question": 42,
            "options": ["one", 2, true, "four", "five"],
            "answer": 2,
            "difficulty": "HARD",
            "explanation": "",
            "section": null
          }, {
            "question": "No options list?",
            "options": "a, b, c",
            "answer": "a"
          }]
        }"#;
        let result = normalize(raw).expect("reply should parse");

        let first = &result.quiz[0];
        assert_eq!(first.question, "42");
        assert_eq!(first.options, vec!["one", "2", "true", "four"]);
        assert_eq!(first.answer, "2");
        assert_eq!(first.difficulty, Difficulty::Hard);
        assert!(first.explanation.is_none());
        assert!(first.section.is_none());

        let second = &result.quiz[1];
        assert!(second.options.is_empty());
        assert_eq!(second.difficulty, Difficulty::Medium);
    }

    #[test]
    fn malformed_key_entities_collapse_to_default() {
        let raw = r#"{"quiz": [], "key_entities": {"people": "Alan Turing", "locations": ["UK"]}}"#;
        let result = normalize(raw).expect("reply should parse");
        assert!(result.key_entities.is_empty());

        let raw = r#"{"key_entities": ["Alan Turing"]}"#;
        assert!(normalize(raw).expect("reply should parse").key_entities.is_empty());
    }

    #[test]
    fn partial_key_entities_fill_missing_lists() {
        let raw = r#"{"key_entities": {"people": ["Alan Turing"]}}"#;
        let entities = normalize(raw).expect("reply should parse").key_entities;
        assert_eq!(entities.people, vec!["Alan Turing"]);
        assert!(entities.organizations.is_empty());
        assert!(entities.locations.is_empty());
    }

    #[test]
    fn related_topics_are_deduplicated_and_capped() {
        let raw = r#"{"related_topics": [
            "Enigma machine", "enigma machine", " ", "Bletchley Park", "Enigma machine",
            "Turing test", "Alonzo Church", "Computability", "Halting problem",
            "Lambda calculus", "Manchester Baby"
        ]}"#;
        let result = normalize(raw).expect("reply should parse");
        assert_eq!(
            result.related_topics,
            vec![
                "Enigma machine",
                "Bletchley Park",
                "Turing test",
                "Alonzo Church",
                "Computability",
                "Halting problem",
            ]
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let result = normalize("{}").expect("empty object should parse");
        assert_eq!(result, QuizResult::default());

        let result = normalize(r#"{"quiz": "nope", "related_topics": "Enigma"}"#)
            .expect("reply should parse");
        assert!(result.quiz.is_empty());
        assert!(result.related_topics.is_empty());
    }
}
