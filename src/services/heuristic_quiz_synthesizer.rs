use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    models::domain::{ArticleDocument, Difficulty, KeyEntities, QuizQuestion, QuizResult},
    services::article_extractor::truncate_chars,
};

const MIN_SENTENCE_CHARS: usize = 40;
const MAX_SENTENCE_CHARS: usize = 220;
const FACT_SENTENCE_WINDOW: usize = 80;
const PADDING_SENTENCE_END: usize = 120;
const MAX_PADDING_SENTENCE_CHARS: usize = 120;
const MAX_FACTS: usize = 10;
const MAX_FACT_QUESTIONS: usize = 8;
const DISTRACTOR_COUNT: usize = 3;
const OPTION_COUNT: usize = 4;
const MIN_QUESTIONS: usize = 5;
const MAX_QUESTIONS: usize = 10;
const TOPIC_SCAN_CHARS: usize = 4000;
const TOP_PHRASES: usize = 10;
const MAX_RELATED_TOPICS: usize = 6;

const FACT_EXPLANATION: &str = "This answer is taken directly from a sentence in the article text.";
const SECTION_EXPLANATION: &str = "Section names are taken from the scraped article structure.";
const SECTION_FILLERS: [&str; 3] = ["Overview", "Appendix", "Bibliography"];

const PRONOUN_SUBJECTS: [&str; 5] = ["it", "this", "he", "she", "they"];
const STOP_TOPICS: [&str; 18] = [
    "The", "A", "An", "And", "Or", "But", "However", "This", "That", "It", "In", "On", "By",
    "From", "As", "For", "With", "Without",
];

static FACT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][A-Za-z0-9 ,.'()-]{2,60})\s+(is|was|are|were)\s+(.+?)\.$")
        .expect("FACT_PATTERN is a valid regex pattern")
});
static CAPITALIZED_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b")
        .expect("CAPITALIZED_PHRASE is a valid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fact {
    subject: String,
    verb: String,
    predicate: String,
}

/// Rule-based quiz builder used when no model is configured.
///
/// Output depends only on the document: running it twice on the same input
/// yields identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicQuizSynthesizer;

impl HeuristicQuizSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(&self, document: &ArticleDocument) -> QuizResult {
        let text = normalize_whitespace(&document.content);
        let sentences: Vec<&str> = split_sentences(&text)
            .into_iter()
            .map(str::trim)
            .filter(|s| (MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&s.chars().count()))
            .collect();

        let facts = extract_facts(&sentences);
        let mut quiz = fact_questions(&facts, &sentences, &document.sections);
        pad_with_section_questions(&mut quiz, &document.title, &document.sections);
        quiz.truncate(MAX_QUESTIONS);

        let related_topics = related_topics(&text, &document.title, &document.sections);

        log::debug!(
            "Synthesized {} questions from {} facts for '{}'",
            quiz.len(),
            facts.len(),
            document.title
        );

        QuizResult {
            quiz,
            related_topics,
            key_entities: KeyEntities::default(),
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits after `.`, `!` or `?` when followed by whitespace. The punctuation stays with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut previous = None;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() && matches!(previous, Some('.' | '!' | '?')) {
            sentences.push(&text[start..idx]);
            start = idx + ch.len_utf8();
        }
        previous = Some(ch);
    }
    sentences.push(&text[start..]);
    sentences
}

fn clean_subject(subject: &str) -> &str {
    let subject = subject.trim();
    ["The ", "A ", "An "]
        .iter()
        .find_map(|prefix| subject.strip_prefix(prefix))
        .map(str::trim)
        .unwrap_or(subject)
}

fn extract_facts(sentences: &[&str]) -> Vec<Fact> {
    let mut facts = Vec::new();
    for sentence in sentences.iter().take(FACT_SENTENCE_WINDOW) {
        let Some(caps) = FACT_PATTERN.captures(sentence) else {
            continue;
        };
        let subject = clean_subject(&caps[1]);
        let predicate = caps[3].trim();
        if subject.chars().count() < 3 || predicate.chars().count() < 10 {
            continue;
        }
        if PRONOUN_SUBJECTS.contains(&subject.to_lowercase().as_str()) {
            continue;
        }
        facts.push(Fact {
            subject: subject.to_string(),
            verb: caps[2].trim().to_string(),
            predicate: predicate.to_string(),
        });
        if facts.len() >= MAX_FACTS {
            break;
        }
    }
    facts
}

fn fact_questions(facts: &[Fact], sentences: &[&str], sections: &[String]) -> Vec<QuizQuestion> {
    facts
        .iter()
        .take(MAX_FACT_QUESTIONS)
        .enumerate()
        .map(|(i, fact)| {
            let mut options = Vec::with_capacity(OPTION_COUNT);
            options.push(fact.predicate.clone());
            options.extend(distractors(fact, facts, sentences));
            rotate_options(&mut options, i);
            options.truncate(OPTION_COUNT);

            QuizQuestion {
                question: format!("According to the article, what {} {}?", fact.verb, fact.subject),
                options,
                answer: fact.predicate.clone(),
                difficulty: difficulty_for(i),
                explanation: Some(FACT_EXPLANATION.to_string()),
                section: sections.get(i).cloned(),
                sort_order: i as i32,
            }
        })
        .collect()
}

fn distractors(fact: &Fact, facts: &[Fact], sentences: &[&str]) -> Vec<String> {
    let mut distractors: Vec<String> = facts
        .iter()
        .map(|other| other.predicate.as_str())
        .filter(|predicate| *predicate != fact.predicate)
        .take(DISTRACTOR_COUNT)
        .map(str::to_string)
        .collect();

    if distractors.len() < DISTRACTOR_COUNT {
        let late_sentences = sentences
            .iter()
            .skip(FACT_SENTENCE_WINDOW)
            .take(PADDING_SENTENCE_END - FACT_SENTENCE_WINDOW);
        for sentence in late_sentences {
            if let Some(body) = sentence.strip_suffix('.') {
                if body != fact.predicate && sentence.chars().count() < MAX_PADDING_SENTENCE_CHARS {
                    distractors.push(body.to_string());
                }
            }
            if distractors.len() >= DISTRACTOR_COUNT {
                break;
            }
        }
    }

    distractors.truncate(DISTRACTOR_COUNT);
    distractors
}

/// Left rotation by `index mod len`, so option order is reproducible.
pub(crate) fn rotate_options(options: &mut [String], index: usize) {
    if !options.is_empty() {
        let by = index % options.len();
        options.rotate_left(by);
    }
}

fn difficulty_for(index: usize) -> Difficulty {
    match index {
        0..=2 => Difficulty::Easy,
        3..=5 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

fn pad_with_section_questions(quiz: &mut Vec<QuizQuestion>, title: &str, sections: &[String]) {
    if quiz.len() >= MIN_QUESTIONS {
        return;
    }
    let missing = MIN_QUESTIONS - quiz.len();
    let names: Vec<&String> = sections
        .iter()
        .filter(|s| !s.trim().is_empty())
        .take(missing)
        .collect();

    for name in names {
        let mut options = vec![name.clone()];
        options.extend(SECTION_FILLERS.iter().map(|f| f.to_string()));
        let sort_order = quiz.len() as i32;
        quiz.push(QuizQuestion {
            question: format!(
                "Which of the following is a section listed in the article '{}'?",
                title
            ),
            options,
            answer: name.clone(),
            difficulty: Difficulty::Easy,
            explanation: Some(SECTION_EXPLANATION.to_string()),
            section: Some(name.clone()),
            sort_order,
        });
    }
}

/// Capitalized 1-3 word phrases ordered by frequency, ties by first occurrence.
fn frequent_phrases(text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for caps in CAPITALIZED_PHRASE.captures_iter(text) {
        let phrase = caps[1].trim();
        if !(3..=30).contains(&phrase.chars().count()) {
            continue;
        }
        match counts.iter_mut().find(|(p, _)| p == phrase) {
            Some((_, count)) => *count += 1,
            None => counts.push((phrase.to_string(), 1)),
        }
    }
    // stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_PHRASES)
        .map(|(phrase, _)| phrase)
        .collect()
}

fn related_topics(text: &str, title: &str, sections: &[String]) -> Vec<String> {
    let title = title.to_lowercase();
    let candidates = sections.iter().take(3).cloned().chain(
        frequent_phrases(truncate_chars(text, TOPIC_SCAN_CHARS))
            .into_iter()
            .filter(|phrase| !STOP_TOPICS.contains(&phrase.as_str())),
    );

    let mut topics: Vec<String> = Vec::new();
    for candidate in candidates {
        if !candidate.is_empty() && !topics.contains(&candidate) && candidate.to_lowercase() != title
        {
            topics.push(candidate);
        }
        if topics.len() >= MAX_RELATED_TOPICS {
            break;
        }
    }
    topics
}
