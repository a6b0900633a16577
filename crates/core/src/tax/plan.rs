//! Evaluation order for calculated fields.
//!
//! The calculated fields and the fields their formulas read form a directed
//! graph. The plan is a topological order of that graph, computed once per
//! field table (Kahn's algorithm, ties broken by definition order). A cycle
//! is a configuration error.

use std::collections::{BTreeSet, HashMap};

use super::error::TaxError;
use super::field::{FieldCode, FieldDefinition};

/// Topologically sorted indices of calculated definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationPlan {
    order: Vec<usize>,
}

impl EvaluationPlan {
    /// Compiles the plan for a field table.
    ///
    /// # Errors
    ///
    /// - `TaxError::DuplicateField` if two definitions share a code
    /// - `TaxError::FormulaCycle` if calculated fields depend on each other in a loop
    pub fn compile(definitions: &[FieldDefinition]) -> Result<Self, TaxError> {
        let mut positions: HashMap<&FieldCode, usize> = HashMap::with_capacity(definitions.len());
        for (index, definition) in definitions.iter().enumerate() {
            if positions.insert(&definition.code, index).is_some() {
                return Err(TaxError::DuplicateField(definition.code.to_string()));
            }
        }

        // Edges run from a calculated dependency to the field that reads it.
        let mut pending: HashMap<usize, usize> = HashMap::new();
        let mut dependents: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, definition) in definitions.iter().enumerate() {
            let Some(formula) = &definition.formula else {
                continue;
            };
            let deps: Vec<usize> = formula
                .operands()
                .into_iter()
                .filter_map(|code| positions.get(code).copied())
                .filter(|dep| definitions[*dep].is_calculated())
                .collect();
            pending.insert(index, deps.len());
            for dep in deps {
                dependents.entry(dep).or_default().push(index);
            }
        }

        let mut ready: BTreeSet<usize> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(index, _)| *index)
            .collect();
        let mut order = Vec::with_capacity(pending.len());

        while let Some(index) = ready.pop_first() {
            order.push(index);
            for dependent in dependents.get(&index).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        if order.len() < pending.len() {
            let stuck: BTreeSet<usize> = pending
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(index, _)| index)
                .collect();
            return Err(TaxError::FormulaCycle {
                cycle: find_cycle(definitions, &positions, &stuck),
            });
        }

        Ok(Self { order })
    }

    /// Definition indices in evaluation order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

/// Walks unresolved fields until one repeats.
///
/// Every stuck field has at least one stuck dependency, so the walk
/// always closes a loop.
fn find_cycle(
    definitions: &[FieldDefinition],
    positions: &HashMap<&FieldCode, usize>,
    stuck: &BTreeSet<usize>,
) -> Vec<String> {
    let Some(&start) = stuck.first() else {
        return Vec::new();
    };
    let mut path = vec![start];
    let mut current = start;
    loop {
        let next = definitions[current]
            .formula
            .as_ref()
            .into_iter()
            .flat_map(|formula| formula.operands())
            .filter_map(|code| positions.get(code).copied())
            .find(|dep| stuck.contains(dep));
        let Some(next) = next else {
            break;
        };
        if let Some(seen) = path.iter().position(|index| *index == next) {
            path.drain(..seen);
            path.push(next);
            break;
        }
        path.push(next);
        current = next;
    }
    path.into_iter()
        .map(|index| definitions[index].code.to_string())
        .collect()
}
