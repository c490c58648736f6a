//! Framework and question records, plus candidate pool resolution
//!
//! The records mirror the layout of `prism.frameworks.json`: ids are stored
//! under `_id`, field names are camelCase, and any question attribute the
//! selector does not look at is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One assessment question
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Preferred display text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Alternate display text, used when `question` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Guidance, mandatoriness, answer hints, grouping, children, ...
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Question {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Display text: `question` if present, else `text`, else empty
    pub fn display_text(&self) -> &str {
        self.question
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or("")
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// A reporting framework and its question lists
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Basic question list
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    /// Detailed question list; authoritative when non-empty
    #[serde(default)]
    pub detailed_questions: Option<Vec<Question>>,
    #[serde(default)]
    pub questions_menu: Option<Vec<Value>>,
    #[serde(default)]
    pub sidebar: Option<Vec<Value>>,
}

/// `{id, name}` pair used in results and listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    pub id: String,
    pub name: String,
}

impl Framework {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = Some(questions);
        self
    }

    pub fn with_detailed_questions(mut self, questions: Vec<Question>) -> Self {
        self.detailed_questions = Some(questions);
        self
    }

    pub fn summary(&self) -> FrameworkSummary {
        FrameworkSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn basic_questions(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or(&[])
    }

    pub fn detailed_questions(&self) -> &[Question] {
        self.detailed_questions.as_deref().unwrap_or(&[])
    }

    pub fn questions_menu(&self) -> &[Value] {
        self.questions_menu.as_deref().unwrap_or(&[])
    }

    pub fn sidebar(&self) -> &[Value] {
        self.sidebar.as_deref().unwrap_or(&[])
    }

    /// The candidate pool for this framework, see [`resolve`]
    pub fn candidate_questions(&self) -> &[Question] {
        resolve(self)
    }
}

/// Resolve a framework to its flat candidate pool.
///
/// Detailed questions win when non-empty, otherwise the basic list is used.
/// A framework with neither yields an empty slice.
pub fn resolve(framework: &Framework) -> &[Question] {
    let detailed = framework.detailed_questions();
    if !detailed.is_empty() {
        return detailed;
    }
    framework.basic_questions()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(prefix: &str, n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| Question::new(format!("{}{}", prefix, i)).with_question(format!("Q {}", i)))
            .collect()
    }

    #[test]
    fn test_resolve_prefers_detailed() {
        let framework = Framework::new("F1", "Test")
            .with_questions(questions("b", 4))
            .with_detailed_questions(questions("d", 2));

        let pool = resolve(&framework);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|q| q.id.starts_with('d')));
        assert_eq!(pool, framework.detailed_questions());
    }

    #[test]
    fn test_resolve_falls_back_to_basic() {
        let framework = Framework::new("F1", "Test")
            .with_questions(questions("b", 3))
            .with_detailed_questions(Vec::new());

        assert_eq!(resolve(&framework), framework.basic_questions());

        let framework = Framework::new("F1", "Test").with_questions(questions("b", 3));
        assert_eq!(resolve(&framework).len(), 3);
    }

    #[test]
    fn test_resolve_empty() {
        let framework = Framework::new("F1", "Test");
        assert!(resolve(&framework).is_empty());

        let framework = Framework::new("F1", "Test")
            .with_questions(Vec::new())
            .with_detailed_questions(Vec::new());
        assert!(framework.candidate_questions().is_empty());
    }

    #[test]
    fn test_display_text_order() {
        let both = Question::new("1").with_question("primary").with_text("secondary");
        assert_eq!(both.display_text(), "primary");

        let text_only = Question::new("2").with_text("secondary");
        assert_eq!(text_only.display_text(), "secondary");

        assert_eq!(Question::new("3").display_text(), "");
    }

    #[test]
    fn test_deserialize_source_layout() {
        let json = r#"{
            "_id": "gri",
            "name": "GRI",
            "logoUrl": "https://example.org/gri.png",
            "questions": null,
            "detailedQuestions": [
                {
                    "_id": "q1",
                    "question": "Total water withdrawal",
                    "category": "Water",
                    "tags": ["water", "withdrawal"],
                    "labelGuidance": "Report in megalitres",
                    "mandatory": "yes",
                    "children": [{"_id": "q1a", "text": "By source"}]
                }
            ],
            "questionsMenu": ["Environment"],
            "sidebar": [{"title": "Environment"}]
        }"#;

        let framework: Framework = serde_json::from_str(json).unwrap();
        assert_eq!(framework.id, "gri");
        assert_eq!(framework.logo_url.as_deref(), Some("https://example.org/gri.png"));
        assert!(framework.basic_questions().is_empty());
        assert_eq!(framework.questions_menu().len(), 1);

        let q = &framework.candidate_questions()[0];
        assert_eq!(q.id, "q1");
        assert_eq!(q.tags(), &["water".to_string(), "withdrawal".to_string()]);
        assert_eq!(q.attributes["labelGuidance"], "Report in megalitres");
        assert!(q.attributes.contains_key("children"));

        // Passthrough attributes survive re-serialization
        let out = serde_json::to_value(q).unwrap();
        assert_eq!(out["_id"], "q1");
        assert_eq!(out["mandatory"], "yes");
        assert!(out.get("text").is_none());
    }
}
