//! Seeded random graph generators for benchmarking.

use leafspan_core::{Graph, GraphError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur while generating synthetic graphs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SyntheticError {
    /// The requested vertex count was zero.
    #[error("vertex count must be greater than zero")]
    ZeroVertices,
    /// The generated edges were rejected by the graph model.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Configuration for [`random_connected`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Chords added on top of the random spanning tree; self-loops drawn
    /// by the RNG are skipped, so fewer may be added.
    pub extra_edges: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a connected graph: a random recursive tree plus random chords.
///
/// Vertex `v > 0` attaches to a uniformly chosen earlier vertex, so the
/// first `vertex_count - 1` edges always span the graph.
///
/// # Errors
/// Returns [`SyntheticError::ZeroVertices`] for an empty configuration.
///
/// # Examples
/// ```
/// use leafspan_benches::synthetic::{SyntheticGraphConfig, random_connected};
///
/// let graph = random_connected(&SyntheticGraphConfig {
///     vertex_count: 8,
///     extra_edges: 0,
///     seed: 3,
/// })?;
/// assert_eq!(graph.edge_count(), 7);
/// # Ok::<(), leafspan_benches::synthetic::SyntheticError>(())
/// ```
pub fn random_connected(config: &SyntheticGraphConfig) -> Result<Graph, SyntheticError> {
    let vertex_count = config.vertex_count;
    if vertex_count == 0 {
        return Err(SyntheticError::ZeroVertices);
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut edges = Vec::with_capacity(vertex_count - 1 + config.extra_edges);
    for vertex in 1..vertex_count {
        edges.push((rng.gen_range(0..vertex), vertex));
    }
    for _ in 0..config.extra_edges {
        let u = rng.gen_range(0..vertex_count);
        let v = rng.gen_range(0..vertex_count);
        if u != v {
            edges.push((u, v));
        }
    }

    Ok(Graph::from_edges(vertex_count, edges)?)
}
