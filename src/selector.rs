//! Question selection: resolve, filter, sample, assemble
//!
//! Each step is a pure transformation. The only mutation is the shuffle,
//! which runs on a copy owned by the current request.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::FrameworkCatalog;
use crate::error::SelectionError;
use crate::filter::{filter_with_outcome, FilterOutcome};
use crate::framework::{resolve, Framework, FrameworkSummary, Question};
use crate::request::SelectionRequest;
use crate::sampler::sample;

/// Outcome of one selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub questions: Vec<Question>,
    pub questions_menu: Vec<Value>,
    pub sidebar: Vec<Value>,
    pub framework: FrameworkSummary,
    /// Size of the resolved pool before filtering
    pub total_questions: usize,
    pub selected_count: usize,
}

impl SelectionResult {
    fn assemble(framework: &Framework, total_questions: usize, questions: Vec<Question>) -> Self {
        Self {
            selected_count: questions.len(),
            questions,
            questions_menu: framework.questions_menu().to_vec(),
            sidebar: framework.sidebar().to_vec(),
            framework: framework.summary(),
            total_questions,
        }
    }
}

/// Select up to `count` questions from `framework`, narrowed by `focus_areas`.
pub fn select_questions<R: Rng + ?Sized>(
    framework: &Framework,
    focus_areas: &str,
    count: usize,
    rng: &mut R,
) -> Result<SelectionResult, SelectionError> {
    let candidates = resolve(framework);
    if candidates.is_empty() {
        return Err(SelectionError::EmptyQuestionPool {
            framework_id: framework.id.clone(),
            framework_name: framework.name.clone(),
        });
    }

    // `filter` hands back an owned Vec, so the shuffle below never sees
    // the framework's own list.
    let (pool, outcome) = filter_with_outcome(candidates, focus_areas);
    match outcome {
        FilterOutcome::Unfiltered => {}
        FilterOutcome::Matched(n) => {
            tracing::debug!("{} of {} questions matched focus areas", n, candidates.len());
        }
        FilterOutcome::FellBack => {
            tracing::debug!("Focus areas matched nothing in {:?}", framework.id);
        }
    }

    let selected = sample(pool, count, rng);
    tracing::debug!(
        "Selected {} of {} questions from {:?}",
        selected.len(),
        candidates.len(),
        framework.id
    );

    Ok(SelectionResult::assemble(framework, candidates.len(), selected))
}

/// Runs selection requests against a catalog
pub struct QuestionSelector<'a> {
    catalog: &'a FrameworkCatalog,
}

impl<'a> QuestionSelector<'a> {
    pub fn new(catalog: &'a FrameworkCatalog) -> Self {
        Self { catalog }
    }

    /// Validate the request, look up its framework and select from it
    pub fn select<R: Rng + ?Sized>(
        &self,
        request: &SelectionRequest,
        rng: &mut R,
    ) -> Result<SelectionResult, SelectionError> {
        let request = request.clone().validate()?;
        let framework = self.catalog.get(&request.framework_id).ok_or_else(|| {
            SelectionError::FrameworkNotFound {
                id: request.framework_id.clone(),
            }
        })?;

        select_questions(framework, &request.focus_areas, request.num_questions, rng)
    }

    /// One independent selection per framework id, in input order.
    ///
    /// With a `seed`, the k-th framework draws from `seed + k`, which makes
    /// the whole batch reproducible regardless of scheduling.
    pub fn select_many(
        &self,
        framework_ids: &[String],
        focus_areas: &str,
        count: usize,
        seed: Option<u64>,
    ) -> Vec<Result<SelectionResult, SelectionError>> {
        framework_ids
            .par_iter()
            .enumerate()
            .map(|(k, id)| {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(k as u64)),
                    None => StdRng::from_entropy(),
                };
                let request = SelectionRequest::new(id.as_str())
                    .with_focus_areas(focus_areas)
                    .with_count(count);
                self.select(&request, &mut rng)
            })
            .collect()
    }
}
