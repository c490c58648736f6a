//! Success / error envelopes handed to callers and written to exports

use serde::{Deserialize, Serialize};

use crate::catalog::FrameworkCatalog;
use crate::error::SelectionError;
use crate::framework::FrameworkSummary;
use crate::selector::SelectionResult;

/// Error side of the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_frameworks: Option<Vec<FrameworkSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Describe a domain error. Not-found errors list what the catalog
    /// does contain.
    pub fn from_selection_error(err: &SelectionError, catalog: &FrameworkCatalog) -> Self {
        let mut body = Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
            framework_id: None,
            framework_name: None,
            available_frameworks: None,
            details: None,
        };
        match err {
            SelectionError::MissingFrameworkId => {}
            SelectionError::FrameworkNotFound { id } => {
                body.framework_id = Some(id.clone());
                body.available_frameworks = Some(catalog.summaries());
            }
            SelectionError::EmptyQuestionPool {
                framework_id,
                framework_name,
            } => {
                body.framework_id = Some(framework_id.clone());
                body.framework_name = Some(framework_name.clone());
            }
        }
        body
    }

    /// Failure outside the selection domain (I/O, parsing)
    pub fn internal(err: &anyhow::Error) -> Self {
        Self {
            error: "Failed to generate questions".to_string(),
            kind: "internal".to_string(),
            framework_id: None,
            framework_name: None,
            available_frameworks: None,
            details: Some(format!("{:#}", err)),
        }
    }
}

/// `{ success: true, ... }` or `{ success: false, error, ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: Option<SelectionResult>,
    #[serde(flatten)]
    pub failure: Option<ErrorBody>,
}

impl SelectionResponse {
    pub fn success(result: SelectionResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            failure: None,
        }
    }

    pub fn failure(body: ErrorBody) -> Self {
        Self {
            success: false,
            result: None,
            failure: Some(body),
        }
    }

    pub fn from_outcome(
        outcome: Result<SelectionResult, SelectionError>,
        catalog: &FrameworkCatalog,
    ) -> Self {
        match outcome {
            Ok(result) => Self::success(result),
            Err(err) => Self::failure(ErrorBody::from_selection_error(&err, catalog)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{Framework, Question};
    use crate::request::SelectionRequest;
    use crate::selector::QuestionSelector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> FrameworkCatalog {
        FrameworkCatalog::from_frameworks(vec![
            Framework::new("gri", "GRI").with_questions(vec![
                Question::new("g1").with_question("Water use"),
                Question::new("g2").with_question("Energy use"),
            ]),
            Framework::new("empty", "Empty"),
        ])
    }

    #[test]
    fn test_success_shape() {
        let catalog = catalog();
        let selector = QuestionSelector::new(&catalog);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = selector.select(&SelectionRequest::new("gri").with_count(1), &mut rng);

        let response = SelectionResponse::from_outcome(outcome, &catalog);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["framework"]["id"], "gri");
        assert_eq!(json["framework"]["name"], "GRI");
        assert_eq!(json["totalQuestions"], 2);
        assert_eq!(json["selectedCount"], 1);
        assert_eq!(json["questions"].as_array().unwrap().len(), 1);
        assert_eq!(json["questionsMenu"], serde_json::json!([]));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_not_found_shape() {
        let catalog = catalog();
        let err = SelectionError::FrameworkNotFound {
            id: "missing".to_string(),
        };

        let response = SelectionResponse::from_outcome(Err(err), &catalog);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Framework not found: missing");
        assert_eq!(json["kind"], "framework_not_found");
        assert_eq!(json["frameworkId"], "missing");
        assert_eq!(json["availableFrameworks"][1]["id"], "empty");
        assert!(json.get("questions").is_none());
    }

    #[test]
    fn test_empty_pool_shape() {
        let catalog = catalog();
        let err = SelectionError::EmptyQuestionPool {
            framework_id: "empty".to_string(),
            framework_name: "Empty".to_string(),
        };
        let body = ErrorBody::from_selection_error(&err, &catalog);
        assert_eq!(body.framework_name.as_deref(), Some("Empty"));
        assert!(body.available_frameworks.is_none());
    }

    #[test]
    fn test_internal_error_details() {
        let err = anyhow::anyhow!("disk on fire");
        let body = ErrorBody::internal(&err);
        assert_eq!(body.error, "Failed to generate questions");
        assert_eq!(body.details.as_deref(), Some("disk on fire"));
    }
}
