//! Shared binary hitting-set model.
//!
//! Input: node sequences, either simple paths (chains) or closed cycles.
//! One binary variable per distinct consecutive-pair edge at unit cost,
//! one "select at least one of these edges" constraint per sequence,
//! minimize the total selection. The chain cut is a valid hitting set
//! rather than a flow problem because every chain is already a single
//! simple path.

use crate::types::Edge;
use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::collections::{BTreeMap, BTreeSet};

/// Solves the minimum hitting set over the sequences' edges.
///
/// Sequences with fewer than two nodes carry no edges and are excluded
/// from the model (an empty covering constraint can never be satisfied).
/// Returns `None` when the solver reports infeasibility or otherwise
/// fails, so the caller can degrade that track to "no solution found".
pub fn minimum_hitting_set(sequences: &[Vec<String>]) -> Option<Vec<Edge>> {
    let sequences: Vec<&Vec<String>> = sequences.iter().filter(|s| s.len() >= 2).collect();
    if sequences.is_empty() {
        return Some(Vec::new());
    }

    // Dedup edges across sequences, assigning each a stable variable slot.
    let mut edge_index: BTreeMap<Edge, usize> = BTreeMap::new();
    for seq in &sequences {
        for pair in seq.windows(2) {
            let edge = Edge::new(pair[0].as_str(), pair[1].as_str());
            let next = edge_index.len();
            edge_index.entry(edge).or_insert(next);
        }
    }

    let mut problem = variables!();
    let vars: Vec<Variable> = (0..edge_index.len())
        .map(|_| problem.add(variable().binary()))
        .collect();
    let objective: Expression = vars.iter().map(|&v| Expression::from(v)).sum();
    let mut model = problem.minimise(objective).using(default_solver);

    for seq in &sequences {
        let mut members: BTreeSet<usize> = BTreeSet::new();
        for pair in seq.windows(2) {
            let edge = Edge::new(pair[0].as_str(), pair[1].as_str());
            if let Some(&idx) = edge_index.get(&edge) {
                members.insert(idx);
            }
        }
        let cover: Expression = members.iter().map(|&i| Expression::from(vars[i])).sum();
        model = model.with(constraint!(cover >= 1));
    }

    match model.solve() {
        Ok(solution) => {
            let mut selected = Vec::new();
            for (edge, &idx) in &edge_index {
                if solution.value(vars[idx]) > 0.5 {
                    selected.push(edge.clone());
                }
            }
            Some(selected)
        }
        Err(ResolutionError::Infeasible) => {
            tracing::warn!("hitting-set model reported infeasible");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "hitting-set solve failed");
            None
        }
    }
}
