//! In-memory evaluation of condition trees over JSON entities.

use crate::config::EvaluatorConfig;
use crate::error::{Error, Result};
use crate::functions::{Bindings, BoolFunction};
use crate::sorting::SortMethod;
use rayon::prelude::*;
use serde_json::Value;
use std::cmp::Ordering;

/// Applies conditions (implicitly ANDed) and sort methods to entities.
#[derive(Debug, Clone, Default)]
pub struct ConditionEvaluator {
    config: EvaluatorConfig,
}

impl ConditionEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// True iff every condition holds for `entity`. No conditions means true.
    pub fn evaluate_conditions(&self, entity: &Value, conditions: &[BoolFunction]) -> Result<bool> {
        let bindings = Bindings::new(entity).with_row_limit(self.config.row_limit);
        for condition in conditions {
            if !condition.evaluate(&bindings)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The entities matching all conditions, in their original order.
    pub fn filter_array<'e>(&self, entities: &'e [Value], conditions: &[BoolFunction]) -> Result<Vec<&'e Value>> {
        let matches: Vec<&Value> = if self.config.parallel {
            entities
                .par_iter()
                .filter_map(|entity| match self.evaluate_conditions(entity, conditions) {
                    Ok(true) => Some(Ok(entity)),
                    Ok(false) => None,
                    Err(e) => Some(Err(e)),
                })
                .collect::<Result<_>>()?
        } else {
            let mut matches = Vec::new();
            for entity in entities {
                if self.evaluate_conditions(entity, conditions)? {
                    matches.push(entity);
                }
            }
            matches
        };

        tracing::debug!(
            entities = entities.len(),
            conditions = conditions.len(),
            matches = matches.len(),
            parallel = self.config.parallel,
            "filtered entities"
        );
        Ok(matches)
    }

    /// Sorts `entities` by the first sort method, breaking ties with the next.
    ///
    /// The sort is stable. Keys are resolved up front so a missing property
    /// fails before anything moves.
    pub fn sort_array(&self, entities: &mut [&Value], sort_methods: &[SortMethod]) -> Result<()> {
        if sort_methods.is_empty() || entities.len() < 2 {
            return Ok(());
        }

        let mut keyed = entities
            .iter()
            .map(|entity| -> Result<(Vec<Value>, &Value)> {
                let keys = sort_methods
                    .iter()
                    .map(|method| method.key(entity))
                    .collect::<Result<Vec<_>>>()?;
                Ok((keys, *entity))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut failure: Option<Error> = None;
        keyed.sort_by(|(left, _), (right, _)| {
            for (method, (a, b)) in sort_methods.iter().zip(left.iter().zip(right)) {
                match method.compare_keys(a, b, self.config.nulls_first) {
                    Ok(Ordering::Equal) => continue,
                    Ok(ordering) => return ordering,
                    Err(e) => {
                        failure.get_or_insert(e);
                        return Ordering::Equal;
                    }
                }
            }
            Ordering::Equal
        });
        if let Some(e) = failure {
            return Err(e);
        }

        for (slot, (_, entity)) in entities.iter_mut().zip(keyed) {
            *slot = entity;
        }
        tracing::debug!(entities = entities.len(), methods = sort_methods.len(), "sorted entities");
        Ok(())
    }
}
