//! Fixture types for solver property tests.

use proptest::test_runner::TestCaseError;
use test_strategy::Arbitrary;

use crate::Graph;

/// Topology family used when generating a fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// A random spanning tree and nothing else.
    #[weight(2)]
    Tree,
    /// A spanning tree plus a handful of chords.
    #[weight(3)]
    Sparse,
    /// Each vertex pair joined with high probability; may be disconnected.
    #[weight(3)]
    Dense,
    /// Two connected parts with no edge between them.
    #[weight(1)]
    Disconnected,
    /// A sparse graph with repeated edges and self-loops mixed in.
    #[weight(1)]
    Multigraph,
}

/// Generated input for one property case.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Edge list in generation order.
    pub edges: Vec<(usize, usize)>,
    /// Family the fixture was drawn from.
    pub shape: GraphShape,
}

impl GraphFixture {
    /// Builds the solver input, reporting malformed fixtures as test failures.
    pub(super) fn graph(&self) -> Result<Graph, TestCaseError> {
        Graph::from_edges(self.vertex_count, self.edges.clone()).map_err(|err| {
            TestCaseError::fail(format!("fixture must build a graph: {err} ({self})"))
        })
    }

    /// Every `k` worth asking about, including the out-of-range `n + 1`.
    pub(super) fn k_values(&self) -> impl Iterator<Item = usize> {
        0..=self.vertex_count + 1
    }
}

impl std::fmt::Display for GraphFixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "shape={:?}, vertices={}, edges={:?}",
            self.shape, self.vertex_count, self.edges,
        )
    }
}
