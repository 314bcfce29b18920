//! Leafspan core library.
//!
//! Decides whether an undirected graph has a spanning tree with exactly `k`
//! leaves. [`Graph`] holds the input, [`BaselineSolver`] and
//! [`BranchAndBoundSolver`] answer the question exactly, and
//! [`solve_with_timeout`] races either of them against a deadline.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cancel;
mod error;
mod graph;
mod solver;
mod union_find;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    cancel::CancellationToken,
    error::{GraphError, GraphErrorCode, Result},
    graph::Graph,
    solver::{
        BaselineSolver, BranchAndBoundSolver, SolveOutcome, SolverKind, TimedSolve,
        solve_with_timeout,
    },
    union_find::DisjointSet,
};
