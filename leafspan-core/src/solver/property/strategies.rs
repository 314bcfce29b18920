//! Strategy builders for solver property tests.
//!
//! Graphs stay at seven vertices or fewer so the exhaustive baseline
//! finishes every case quickly. Vertex labels are shuffled after
//! generation so vertex `0` is not always the generator's root.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::types::{GraphFixture, GraphShape};

const MIN_VERTICES: usize = 2;
const MAX_VERTICES: usize = 7;
/// Dense graphs are capped lower to bound the baseline's edge subsets.
const DENSE_MAX_VERTICES: usize = 6;
const DISCONNECTED_MIN_VERTICES: usize = 4;
const MAX_CHORDS: usize = 3;

/// Generates fixtures across every [`GraphShape`].
pub(super) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates tree fixtures only.
pub(super) fn tree_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    any::<u64>().prop_map(|seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(GraphShape::Tree, &mut rng)
    })
}

/// Generates a fixture for a specific shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> GraphFixture {
    let (vertex_count, edges) = match shape {
        GraphShape::Tree => {
            let n = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
            (n, random_tree(rng, 0..n))
        }
        GraphShape::Sparse => {
            let n = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
            let mut edges = random_tree(rng, 0..n);
            add_chords(rng, n, &mut edges);
            (n, edges)
        }
        GraphShape::Dense => {
            let n = rng.gen_range(MIN_VERTICES..=DENSE_MAX_VERTICES);
            (n, random_dense(rng, n))
        }
        GraphShape::Disconnected => {
            let n = rng.gen_range(DISCONNECTED_MIN_VERTICES..=MAX_VERTICES);
            let split = rng.gen_range(1..n);
            let mut edges = random_tree(rng, 0..split);
            edges.extend(random_tree(rng, split..n));
            (n, edges)
        }
        GraphShape::Multigraph => {
            let n = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
            let mut edges = random_tree(rng, 0..n);
            add_chords(rng, n, &mut edges);
            add_repeats(rng, n, &mut edges);
            (n, edges)
        }
    };

    GraphFixture {
        vertex_count,
        edges: relabel(rng, vertex_count, edges),
        shape,
    }
}

/// Attaches each vertex of `range` after the first to a random earlier one.
fn random_tree(rng: &mut SmallRng, range: std::ops::Range<usize>) -> Vec<(usize, usize)> {
    let start = range.start;
    let mut edges = Vec::with_capacity(range.len().saturating_sub(1));
    for vertex in range.skip(1) {
        let parent = rng.gen_range(start..vertex);
        edges.push(orient(rng, parent, vertex));
    }
    edges.shuffle(rng);
    edges
}

fn random_dense(rng: &mut SmallRng, n: usize) -> Vec<(usize, usize)> {
    let probability: f64 = rng.gen_range(0.6..=0.95);
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(probability) {
                edges.push(orient(rng, u, v));
            }
        }
    }
    edges
}

fn add_chords(rng: &mut SmallRng, n: usize, edges: &mut Vec<(usize, usize)>) {
    if n < 3 {
        return;
    }
    for _ in 0..rng.gen_range(1..=MAX_CHORDS) {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let at = rng.gen_range(0..=edges.len());
            edges.insert(at, (u, v));
        }
    }
}

fn add_repeats(rng: &mut SmallRng, n: usize, edges: &mut Vec<(usize, usize)>) {
    if let Some(&(u, v)) = edges.choose(rng) {
        edges.push((v, u));
    }
    let looped = rng.gen_range(0..n);
    let at = rng.gen_range(0..=edges.len());
    edges.insert(at, (looped, looped));
}

fn orient(rng: &mut SmallRng, u: usize, v: usize) -> (usize, usize) {
    if rng.gen_bool(0.5) { (u, v) } else { (v, u) }
}

fn relabel(rng: &mut SmallRng, n: usize, edges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut labels: Vec<usize> = (0..n).collect();
    labels.shuffle(rng);
    edges
        .into_iter()
        .map(|(u, v)| (labels[u], labels[v]))
        .collect()
}

/// Applies `labels` to every endpoint and reverses the edge order.
pub(super) fn permuted(edges: &[(usize, usize)], labels: &[usize]) -> Vec<(usize, usize)> {
    edges
        .iter()
        .rev()
        .map(|&(u, v)| (labels[v], labels[u]))
        .collect()
}
