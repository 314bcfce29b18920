//! Answers fixed by graph structure alone.
//!
//! - A tree is its own unique spanning tree, so exactly one `k` (its leaf
//!   count) is feasible.
//! - A disconnected graph, or one with fewer than `n - 1` edges, admits no
//!   spanning tree at all.
//! - `k > n` is never feasible.
//! - A connected graph on at least two vertices admits some `k`.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{CancellationToken, DisjointSet, SolverKind};

use super::types::{GraphFixture, GraphShape};

/// Checks that both solvers accept exactly the leaf count of a tree.
pub(super) fn run_tree_leaf_count_property(fixture: &GraphFixture) -> TestCaseResult {
    if fixture.shape != GraphShape::Tree {
        return Err(TestCaseError::reject("tree property needs a tree fixture"));
    }
    let graph = fixture.graph()?;
    let leaves = (0..graph.vertex_count())
        .filter(|&vertex| graph.degree(vertex) == 1)
        .count();

    for kind in SolverKind::ALL {
        for k in fixture.k_values() {
            let expected = k == leaves;
            let answer = kind.solve(&graph, k, CancellationToken::new());
            if answer != expected {
                return Err(TestCaseError::fail(format!(
                    "{kind} answered {answer} for k={k} on a tree with {leaves} leaves \
                     ({fixture})",
                )));
            }
        }
    }
    Ok(())
}

/// Checks the structural shortcuts every solver must honour.
pub(super) fn run_structural_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = fixture.graph()?;
    let connected = is_connected(fixture);

    for kind in SolverKind::ALL {
        let feasible: Vec<usize> = fixture
            .k_values()
            .filter(|&k| kind.solve(&graph, k, CancellationToken::new()))
            .collect();

        if feasible.iter().any(|&k| k > graph.vertex_count()) {
            return Err(TestCaseError::fail(format!(
                "{kind} accepted k above the vertex count: {feasible:?} ({fixture})",
            )));
        }
        if !connected && !feasible.is_empty() {
            return Err(TestCaseError::fail(format!(
                "{kind} found a spanning tree of a disconnected graph: {feasible:?} \
                 ({fixture})",
            )));
        }
        if connected && feasible.is_empty() {
            return Err(TestCaseError::fail(format!(
                "{kind} found no k for a connected graph ({fixture})",
            )));
        }
        if feasible.iter().any(|&k| k < 2) {
            return Err(TestCaseError::fail(format!(
                "{kind} accepted fewer than two leaves on {} vertices: {feasible:?} \
                 ({fixture})",
                graph.vertex_count(),
            )));
        }
    }
    Ok(())
}

fn is_connected(fixture: &GraphFixture) -> bool {
    let mut components = DisjointSet::new(fixture.vertex_count);
    let merges = fixture
        .edges
        .iter()
        .filter(|&&(u, v)| components.union(u, v))
        .count();
    merges + 1 == fixture.vertex_count
}
