//! Exhaustive inclusion/exclusion search over edge subsets.

use tracing::{debug, info, instrument};

use crate::{cancel::CancellationToken, graph::Graph, union_find::DisjointSet};

/// Decides the k-leaf spanning tree problem by enumerating acyclic edge
/// subsets in edge order.
///
/// Worst case `O(2^|E|)` expansions; intended for graphs with a few dozen
/// edges or for use under a timeout.
///
/// # Examples
/// ```
/// use leafspan_core::{BaselineSolver, CancellationToken, Graph};
///
/// let star = Graph::from_edges(5, vec![(0, 1), (0, 2), (0, 3), (0, 4)])?;
/// assert!(BaselineSolver::new(&star, 4, CancellationToken::new()).solve());
/// assert!(!BaselineSolver::new(&star, 2, CancellationToken::new()).solve());
/// # Ok::<(), leafspan_core::GraphError>(())
/// ```
#[derive(Debug)]
pub struct BaselineSolver<'g> {
    graph: &'g Graph,
    k: usize,
    token: CancellationToken,
}

impl<'g> BaselineSolver<'g> {
    /// Prepares a search for a spanning tree of `graph` with exactly `k` leaves.
    #[must_use]
    pub fn new(graph: &'g Graph, k: usize, token: CancellationToken) -> Self {
        Self { graph, k, token }
    }

    /// Runs the search, returning `true` iff a spanning tree with exactly `k`
    /// leaves exists.
    ///
    /// Graphs with fewer than `vertex_count - 1` edges are rejected without
    /// searching. A graph with at most one vertex has itself as its spanning
    /// tree, whose leaf count is its vertex count.
    #[must_use]
    #[instrument(
        name = "solver.solve",
        skip(self),
        fields(
            solver = "baseline",
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            k = self.k,
        ),
    )]
    pub fn solve(self) -> bool {
        if self.graph.lacks_spanning_edges() {
            debug!("too few edges to span the graph");
            return false;
        }

        let mut search = EdgeSearch::new(self.graph, self.k, &self.token);
        search.backtrack(0);

        if search.cancelled && !search.found {
            info!(explored = search.explored, "search cancelled");
        }
        debug!(found = search.found, explored = search.explored, "search finished");
        search.found
    }
}

/// Mutable state for one `solve` call.
struct EdgeSearch<'a> {
    graph: &'a Graph,
    k: usize,
    token: &'a CancellationToken,
    target_edges: usize,
    components: DisjointSet,
    tree: Vec<(usize, usize)>,
    found: bool,
    cancelled: bool,
    explored: u64,
}

impl<'a> EdgeSearch<'a> {
    fn new(graph: &'a Graph, k: usize, token: &'a CancellationToken) -> Self {
        let vertex_count = graph.vertex_count();
        Self {
            graph,
            k,
            token,
            target_edges: vertex_count.saturating_sub(1),
            components: DisjointSet::new(vertex_count),
            tree: Vec::with_capacity(vertex_count),
            found: false,
            cancelled: false,
            explored: 0,
        }
    }

    fn backtrack(&mut self, edge_index: usize) {
        if self.token.is_cancelled() {
            self.cancelled = true;
            return;
        }
        if self.found {
            return;
        }
        self.explored += 1;

        if self.tree.len() == self.target_edges {
            if self.count_leaves() == self.k {
                self.found = true;
            }
            return;
        }

        let Some(&(u, v)) = self.graph.edges().get(edge_index) else {
            return;
        };

        if self.components.find(u) != self.components.find(v) {
            let snapshot = self.components.snapshot();
            self.components.union(u, v);
            self.tree.push((u, v));
            self.backtrack(edge_index + 1);
            if self.found {
                return;
            }
            self.tree.pop();
            self.components.restore(snapshot);
        }

        self.backtrack(edge_index + 1);
    }

    /// Counts degree-one vertices of the committed edge set, or `0` when the
    /// set does not touch every vertex.
    fn count_leaves(&self) -> usize {
        let vertex_count = self.graph.vertex_count();
        if vertex_count <= 1 {
            return vertex_count;
        }
        if self.tree.is_empty() {
            return 0;
        }

        let mut degrees = vec![0_usize; vertex_count];
        for &(u, v) in &self.tree {
            degrees[u] += 1;
            degrees[v] += 1;
        }
        if degrees.iter().any(|&degree| degree == 0) {
            return 0;
        }
        degrees.iter().filter(|&&degree| degree == 1).count()
    }
}
