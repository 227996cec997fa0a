#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::models::domain::{article_document::INTRODUCTION, ArticleDocument};

    const SAMPLE_ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Alan Turing - Wikipedia</title>
  <script>var tracking = "should never be read";</script>
  <style>.mw-body { color: black; }</style>
</head>
<body>
  <nav><ul><li>Main page navigation link with plenty of text</li></ul></nav>
  <h1 id="firstHeading">Alan Turing</h1>
  <div id="mw-content-text"><div class="mw-parser-output">
    <table class="infobox"><tr><td><p>Born 23 June 1912 in Maida Vale, London, England</p></td></tr></table>
    <p>Alan Turing was an English mathematician and computer scientist.
       He was highly influential in the development of theoretical computer science.</p>
    <p>Short para.</p>
    <h2><span class="mw-headline">Early life</span></h2>
    <p>Turing was born in Maida Vale, London, while his father was on leave.</p>
    <ul><li>Sherborne School was the independent boarding school he attended.</li></ul>
    <h2>Cryptanalysis</h2>
    <p>Bletchley Park was the central site for British codebreakers during the war.</p>
    <p>The Enigma machine was a cipher device used by the German military command.</p>
    <h2>See also</h2>
    <ul><li>List of things named after Alan Turing in many places</li></ul>
    <h2>References</h2>
    <p>Hodges, Andrew (1983). Alan Turing: The Enigma. Burnett Books.</p>
    <div class="navbox"><p>Navbox paragraph that should definitely be stripped out.</p></div>
  </div></div>
  <footer><p>Footer text that should never appear in any extracted section.</p></footer>
</body>
</html>"#;

    pub fn sample_article_html() -> &'static str {
        SAMPLE_ARTICLE_HTML
    }

    /// Article with `section_count` sections, long enough to hit every size cap.
    pub fn long_article_html(section_count: usize) -> String {
        let filler = "This sentence pads the article with plenty of ordinary words. ".repeat(8);
        let mut html = String::from(r#"<html><body><h1 id="firstHeading">Long Article</h1><div id="mw-content-text">"#);
        for _ in 0..3 {
            html.push_str(&format!("<p>{}</p>", filler));
        }
        for i in 0..section_count {
            html.push_str(&format!("<h2>Section {}</h2><p>{}</p><p>{}</p>", i, filler, filler));
        }
        html.push_str("</div></body></html>");
        html
    }

    /// Document with four clean facts and two named sections.
    pub fn fact_document() -> ArticleDocument {
        let content = "Filler opening line that is short. \
            Alan Turing was an English mathematician and computer scientist. \
            Bletchley Park was the central site for British codebreakers in wartime. \
            The Enigma machine was a cipher device used by the German military. \
            Cryptanalysis is the study of analysing information systems to find hidden aspects.";
        ArticleDocument {
            title: "Alan Turing".to_string(),
            sections: vec!["Early life".to_string(), "Cryptanalysis".to_string()],
            section_text: BTreeMap::from([
                (INTRODUCTION.to_string(), content.to_string()),
                ("Early life".to_string(), String::new()),
                ("Cryptanalysis".to_string(), String::new()),
            ]),
            summary: content.to_string(),
            content: content.to_string(),
            raw_html: None,
        }
    }

    pub fn empty_document(title: &str) -> ArticleDocument {
        ArticleDocument {
            title: title.to_string(),
            sections: Vec::new(),
            section_text: BTreeMap::new(),
            summary: String::new(),
            content: String::new(),
            raw_html: None,
        }
    }

    pub const WELL_FORMED_MODEL_REPLY: &str = r#"{
  "key_entities": {
    "people": ["Alan Turing"],
    "organizations": ["Government Code and Cypher School"],
    "locations": ["Bletchley Park"]
  },
  "quiz": [
    {
      "question": "Where did Turing work during the Second World War?",
      "options": ["Bletchley Park", "Los Alamos", "Cambridge", "Manchester"],
      "answer": "Bletchley Park",
      "difficulty": "easy",
      "explanation": "The Cryptanalysis section places him at Bletchley Park.",
      "section": "Cryptanalysis"
    },
    {
      "question": "Which machine did Turing help to break?",
      "options": ["Colossus", "Enigma", "ENIAC", "Z3"],
      "answer": "Enigma",
      "difficulty": "medium",
      "explanation": "The article describes his work on Enigma.",
      "section": "Cryptanalysis"
    }
  ],
  "related_topics": ["Enigma machine", "Bletchley Park", "Turing test"]
}"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_html_has_container() {
        assert!(sample_article_html().contains("mw-content-text"));
        assert!(sample_article_html().contains("firstHeading"));
    }

    #[test]
    fn test_fixtures_long_article() {
        let html = long_article_html(3);
        assert_eq!(html.matches("<h2>").count(), 3);
    }

    #[test]
    fn test_fixtures_fact_document() {
        let doc = fact_document();
        assert_eq!(doc.title, "Alan Turing");
        assert_eq!(doc.sections.len(), 2);
        assert!(empty_document("X").content.is_empty());
    }
}
