/// Placeholders: `{title}`, `{sections}`, `{content}`. Every other brace is literal.
pub const QUIZ_GENERATION_PROMPT: &str = r#"You are an expert educational quiz creator. Your task is to generate a high-quality quiz based EXCLUSIVELY on the following Wikipedia article content.

CRITICAL RULES:
- Base ALL questions, options, answers, and explanations ONLY on information explicitly stated in the article text below.
- Do NOT add any information not present in the article. If unsure, omit the question.
- Each question must have exactly 4 options (A, B, C, D).
- Only ONE option should be correct. The correct answer must be explicitly supported by the article.
- Vary difficulty: include 2-3 easy, 2-4 medium, and 1-2 hard questions.
- Include 5-10 questions total.
- For explanations, cite the relevant section or fact from the article.

ARTICLE TITLE: {title}

ARTICLE SECTIONS: {sections}

ARTICLE CONTENT:
{content}

Generate the quiz as a valid JSON object with this exact structure (no markdown, no extra text):
{
  "key_entities": {
    "people": ["Person 1", "Person 2"],
    "organizations": ["Org 1", "Org 2"],
    "locations": ["Place 1", "Place 2"]
  },
  "quiz": [
    {
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "Exact text of correct option",
      "difficulty": "easy|medium|hard",
      "explanation": "Brief explanation citing article content.",
      "section": "Section name this question relates to"
    }
  ],
  "related_topics": ["Topic 1", "Topic 2", "Topic 3"]
}

- "key_entities": Extract people, organizations, and locations explicitly mentioned in the article. Use empty arrays [] for any category with none.
- "related_topics": 3-6 Wikipedia topic names for further reading. Use names that work as Wikipedia article titles.
Output ONLY the JSON object, nothing else."#;
