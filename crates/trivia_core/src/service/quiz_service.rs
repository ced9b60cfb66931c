//! Quiz-play question selection.
//!
//! # Responsibility
//! - Pick one random unseen question, optionally restricted to a category.
//!
//! # Invariants
//! - Stateless: candidates are re-derived from `previous` on every call; the
//!   caller accumulates seen ids.
//! - A returned question is never in `previous`.
//! - An exhausted pool yields `Ok(None)`, never an error.
//! - Selection is uniform over the candidate set for any injected `Rng`.

use crate::model::category::{CategoryId, CategoryScope};
use crate::model::question::{Question, QuestionId};
use crate::repo::question_repo::{QuestionListQuery, QuestionRepository};
use crate::service::error::TriviaResult;
use crate::service::store_failure;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Quiz service facade over the question repository.
pub struct QuizService<Q: QuestionRepository> {
    repo: Q,
}

impl<Q: QuestionRepository> QuizService<Q> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: Q) -> Self {
        Self { repo }
    }

    /// Returns the next quiz question, or `None` when the pool is exhausted.
    ///
    /// `category_id` of `None` or `Some(0)` means all categories.
    pub fn next_question<G: Rng + ?Sized>(
        &self,
        previous: &[QuestionId],
        category_id: Option<CategoryId>,
        rng: &mut G,
    ) -> TriviaResult<Option<Question>> {
        let scope = CategoryScope::from_id(category_id);
        let query = match scope {
            CategoryScope::All => QuestionListQuery::default(),
            CategoryScope::Only(id) => QuestionListQuery::in_category(id),
        };
        let pool = self
            .repo
            .list_questions(&query)
            .map_err(|err| store_failure("quiz_next", err))?;

        let seen: HashSet<QuestionId> = previous.iter().copied().collect();
        let picked = pick_question(&pool, &seen, scope, rng).cloned();
        debug!(
            "event=quiz_next module=service status=ok pool={} seen={} exhausted={}",
            pool.len(),
            seen.len(),
            picked.is_none()
        );

        Ok(picked)
    }
}

/// Questions eligible for the next pick, in input order.
pub fn quiz_candidates<'a>(
    questions: &'a [Question],
    seen: &HashSet<QuestionId>,
    scope: CategoryScope,
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|question| !seen.contains(&question.id) && scope.admits(question.category))
        .collect()
}

/// Picks one candidate uniformly at random.
pub fn pick_question<'a, G: Rng + ?Sized>(
    questions: &'a [Question],
    seen: &HashSet<QuestionId>,
    scope: CategoryScope,
    rng: &mut G,
) -> Option<&'a Question> {
    let candidates = quiz_candidates(questions, seen, scope);
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::{pick_question, quiz_candidates};
    use crate::model::category::CategoryScope;
    use crate::model::question::Question;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn pool() -> Vec<Question> {
        (1..=6)
            .map(|id| Question {
                id,
                question: format!("question {id}"),
                answer: format!("answer {id}"),
                category: if id % 2 == 0 { 2 } else { 1 },
                difficulty: 1,
            })
            .collect()
    }

    #[test]
    fn candidates_exclude_seen_and_respect_scope() {
        let questions = pool();
        let seen = HashSet::from([2]);
        let ids: Vec<_> = quiz_candidates(&questions, &seen, CategoryScope::Only(2))
            .into_iter()
            .map(|question| question.id)
            .collect();
        assert_eq!(ids, vec![4, 6]);
    }

    #[test]
    fn growing_seen_set_never_repeats_and_ends_in_none() {
        let questions = pool();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        while let Some(question) = pick_question(&questions, &seen, CategoryScope::All, &mut rng) {
            assert!(seen.insert(question.id), "question {} repeated", question.id);
        }
        assert_eq!(seen.len(), questions.len());
    }

    #[test]
    fn same_seed_gives_same_pick() {
        let questions = pool();
        let seen = HashSet::new();
        let first = pick_question(
            &questions,
            &seen,
            CategoryScope::All,
            &mut StdRng::seed_from_u64(42),
        )
        .map(|question| question.id);
        let second = pick_question(
            &questions,
            &seen,
            CategoryScope::All,
            &mut StdRng::seed_from_u64(42),
        )
        .map(|question| question.id);
        assert_eq!(first, second);
    }

    #[test]
    fn every_candidate_is_reachable() {
        let questions = pool();
        let seen = HashSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut counts: HashMap<i64, u32> = HashMap::new();

        for _ in 0..600 {
            let question = pick_question(&questions, &seen, CategoryScope::All, &mut rng).unwrap();
            *counts.entry(question.id).or_default() += 1;
        }

        assert_eq!(counts.len(), questions.len());
        assert!(counts.values().all(|count| *count > 50));
    }
}
