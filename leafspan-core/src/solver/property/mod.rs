//! Property-based tests for the k-leaf spanning tree solvers.
//!
//! Checks the branch-and-bound solver against the exhaustive baseline on
//! small random graphs, pins both solvers to the unique answer a tree
//! admits, confirms the structural shortcuts (too few edges, disconnected
//! input, out-of-range `k`) and verifies that answers survive vertex
//! relabelling, edge reordering and repeated or deadline-bounded runs.

mod agreement;
mod invariance;
mod strategies;
mod structural;
mod types;
