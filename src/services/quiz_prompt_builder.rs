use crate::{constants::quiz_prompt::QUIZ_GENERATION_PROMPT, models::domain::ArticleDocument};

#[derive(Debug, Clone, Copy)]
pub struct QuizPromptBuilder {
    template: &'static str,
}

impl Default for QuizPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizPromptBuilder {
    pub fn new() -> Self {
        Self {
            template: QUIZ_GENERATION_PROMPT,
        }
    }

    pub fn build(&self, document: &ArticleDocument) -> String {
        let sections = document.sections_label();
        render(
            self.template,
            &[
                ("title", document.title.as_str()),
                ("sections", sections.as_str()),
                ("content", document.content.as_str()),
            ],
        )
    }
}

/// Single pass over the template: substituted values are never scanned for placeholders.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let replaced = values.iter().find_map(|(name, value)| {
            let placeholder_len = name.len() + 2;
            (tail.len() >= placeholder_len
                && tail[1..].starts_with(name)
                && tail[1 + name.len()..].starts_with('}'))
            .then_some((*value, placeholder_len))
        });
        match replaced {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
