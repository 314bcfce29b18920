//! Static undirected graph model shared read-only by the solvers.
//!
//! Edge order is significant: both solvers walk edges and neighbour lists in
//! construction order, which decides the first solution branch explored but
//! never whether one exists.

use tracing::instrument;

use crate::error::{GraphError, Result};

/// Immutable undirected graph over vertices `0..vertex_count`.
///
/// Adjacency lists are built once from the edge sequence, inserting both
/// directions per edge, so a vertex's neighbours appear in edge insertion
/// order. Duplicate edges and self-loops are kept as given; they inflate
/// [`Graph::degree`] but can never both appear in a spanning tree.
///
/// # Examples
/// ```
/// use leafspan_core::Graph;
///
/// let graph = Graph::from_edges(3, vec![(0, 1), (1, 2)])?;
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.neighbors(1), &[0, 2]);
/// # Ok::<(), leafspan_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
    // Edge ids parallel to `adjacency`.
    incidence: Vec<Vec<usize>>,
}

impl Graph {
    /// Builds a graph from an explicit vertex count and edge sequence.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertex`] when an edge endpoint is not in
    /// `0..vertex_count`.
    #[instrument(name = "graph.from_edges", err, skip(edges), fields(edges = edges.len()))]
    pub fn from_edges(vertex_count: usize, edges: Vec<(usize, usize)>) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); vertex_count];
        let mut incidence = vec![Vec::new(); vertex_count];

        for (id, &(u, v)) in edges.iter().enumerate() {
            for vertex in [u, v] {
                if vertex >= vertex_count {
                    return Err(GraphError::InvalidVertex {
                        vertex,
                        vertex_count,
                    });
                }
            }
            adjacency[u].push(v);
            incidence[u].push(id);
            adjacency[v].push(u);
            incidence[v].push(id);
        }

        Ok(Self {
            vertex_count,
            edges,
            adjacency,
            incidence,
        })
    }

    /// Generates a `rows x cols` lattice.
    ///
    /// Vertex `r * cols + c` sits at row `r`, column `c`. Cells are scanned
    /// row-major and each emits its downward edge before its rightward edge.
    ///
    /// # Errors
    /// Returns [`GraphError::DimensionOverflow`] when `rows * cols` does not
    /// fit in `usize`.
    ///
    /// # Examples
    /// ```
    /// use leafspan_core::Graph;
    ///
    /// let grid = Graph::grid(3, 3)?;
    /// assert_eq!(grid.vertex_count(), 9);
    /// assert_eq!(grid.edge_count(), 12);
    /// assert_eq!(&grid.edges()[..2], &[(0, 3), (0, 1)]);
    /// # Ok::<(), leafspan_core::GraphError>(())
    /// ```
    pub fn grid(rows: usize, cols: usize) -> Result<Self> {
        let vertex_count = rows
            .checked_mul(cols)
            .ok_or(GraphError::DimensionOverflow { rows, cols })?;
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let vertex = r * cols + c;
                if r + 1 < rows {
                    edges.push((vertex, (r + 1) * cols + c));
                }
                if c + 1 < cols {
                    edges.push((vertex, vertex + 1));
                }
            }
        }
        Self::from_edges(vertex_count, edges)
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of edges, duplicates included.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Returns the edges in construction order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[(usize, usize)] { &self.edges }

    /// Returns the neighbours of `vertex` in edge insertion order.
    ///
    /// # Panics
    /// Panics when `vertex >= self.vertex_count()`.
    #[must_use]
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Returns the adjacency-list length of `vertex`.
    ///
    /// # Panics
    /// Panics when `vertex >= self.vertex_count()`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    /// Returns `true` when a spanning tree needs more edges than the graph has.
    pub(crate) fn lacks_spanning_edges(&self) -> bool {
        self.vertex_count > 1 && self.edges.len() < self.vertex_count - 1
    }

    /// Iterates `(neighbour, edge id)` pairs of `vertex` in adjacency order.
    pub(crate) fn incident(&self, vertex: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency[vertex]
            .iter()
            .copied()
            .zip(self.incidence[vertex].iter().copied())
    }
}
