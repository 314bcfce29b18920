//! Benchmark parameter types.
//!
//! Each struct doubles as the Criterion parameter label through its
//! `Display` implementation.

use std::fmt;

/// Parameters for a grid benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GridBenchParams {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub cols: usize,
    /// Required leaf count.
    pub k: usize,
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{},k={}", self.rows, self.cols, self.k)
    }
}

/// Parameters for a random connected graph benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct RandomBenchParams {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Edges added on top of the random spanning tree.
    pub extra_edges: usize,
    /// Required leaf count.
    pub k: usize,
}

impl fmt::Display for RandomBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},extra={},k={}",
            self.vertex_count, self.extra_edges, self.k,
        )
    }
}
