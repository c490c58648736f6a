//! Selection requests and caller-side normalisation

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SelectionError;

/// Questions returned when the caller does not ask for a specific count
pub const DEFAULT_NUM_QUESTIONS: usize = 3;

fn default_num_questions() -> usize {
    DEFAULT_NUM_QUESTIONS
}

/// Accept whatever a caller put in `numQuestions`: numbers and numeric
/// strings follow [`parse_num_questions`], anything else is the default.
fn lenient_num_questions<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) if v > 0 => usize::try_from(v).unwrap_or(DEFAULT_NUM_QUESTIONS),
            (None, Some(f)) if f >= 1.0 => parse_num_questions(&f.to_string()),
            _ => DEFAULT_NUM_QUESTIONS,
        },
        Value::String(s) => parse_num_questions(&s),
        _ => DEFAULT_NUM_QUESTIONS,
    };
    Ok(count)
}

/// A request to select questions from one framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    #[serde(default)]
    pub framework_id: String,
    #[serde(default)]
    pub focus_areas: String,
    #[serde(
        default = "default_num_questions",
        deserialize_with = "lenient_num_questions"
    )]
    pub num_questions: usize,
}

impl SelectionRequest {
    pub fn new(framework_id: impl Into<String>) -> Self {
        Self {
            framework_id: framework_id.into(),
            focus_areas: String::new(),
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }

    pub fn with_focus_areas(mut self, focus_areas: impl Into<String>) -> Self {
        self.focus_areas = focus_areas.into();
        self
    }

    /// Set the target count; zero falls back to the default
    pub fn with_count(mut self, count: usize) -> Self {
        self.num_questions = if count == 0 { DEFAULT_NUM_QUESTIONS } else { count };
        self
    }

    /// Reject requests without a framework id and clamp a zero count.
    ///
    /// The id is used verbatim; a whitespace-only id is looked up like any
    /// other and ends up not found.
    pub fn validate(mut self) -> Result<Self, SelectionError> {
        if self.framework_id.is_empty() {
            return Err(SelectionError::MissingFrameworkId);
        }
        if self.num_questions == 0 {
            self.num_questions = DEFAULT_NUM_QUESTIONS;
        }
        Ok(self)
    }
}

/// Parse a user-entered question count.
///
/// Reads the leading run of digits after trimming (so `"5 questions"` is 5).
/// Anything without a positive leading integer becomes the default.
pub fn parse_num_questions(raw: &str) -> usize {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_NUM_QUESTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_num_questions() {
        assert_eq!(parse_num_questions("5"), 5);
        assert_eq!(parse_num_questions("  7 "), 7);
        assert_eq!(parse_num_questions("4 questions"), 4);
        assert_eq!(parse_num_questions("+2"), 2);
        assert_eq!(parse_num_questions("0"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse_num_questions("-4"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse_num_questions("abc"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse_num_questions(""), DEFAULT_NUM_QUESTIONS);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let request: SelectionRequest = serde_json::from_str(r#"{"frameworkId": "gri"}"#).unwrap();
        assert_eq!(request.framework_id, "gri");
        assert_eq!(request.focus_areas, "");
        assert_eq!(request.num_questions, DEFAULT_NUM_QUESTIONS);

        let request: SelectionRequest = serde_json::from_str(
            r#"{"frameworkId": "sasb", "focusAreas": "water", "numQuestions": 8}"#,
        )
        .unwrap();
        assert_eq!(request.focus_areas, "water");
        assert_eq!(request.num_questions, 8);
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            SelectionRequest::new("").validate(),
            Err(SelectionError::MissingFrameworkId)
        );
        assert_eq!(SelectionRequest::new("  ").validate().unwrap().framework_id, "  ");

        let request: SelectionRequest =
            serde_json::from_str(r#"{"frameworkId": "gri", "numQuestions": 0}"#).unwrap();
        let request = request.validate().unwrap();
        assert_eq!(request.num_questions, DEFAULT_NUM_QUESTIONS);
    }

    #[test]
    fn test_malformed_num_questions_uses_default() {
        let parse = |raw: &str| {
            let json = format!(r#"{{"frameworkId": "gri", "numQuestions": {}}}"#, raw);
            serde_json::from_str::<SelectionRequest>(&json)
                .unwrap()
                .num_questions
        };

        assert_eq!(parse(r#""abc""#), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse(r#""5""#), 5);
        assert_eq!(parse("-2"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse("null"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse("0"), DEFAULT_NUM_QUESTIONS);
        assert_eq!(parse("4.7"), 4);
        assert_eq!(parse("[1]"), DEFAULT_NUM_QUESTIONS);
    }

    #[test]
    fn test_with_count_zero_uses_default() {
        let request = SelectionRequest::new("gri").with_count(0);
        assert_eq!(request.num_questions, DEFAULT_NUM_QUESTIONS);
        assert_eq!(SelectionRequest::new("gri").with_count(6).num_questions, 6);
    }
}
