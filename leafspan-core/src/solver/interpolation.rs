//! Witness search by leaf-count interpolation.
//!
//! The leaf counts of a connected graph's spanning trees form an interval,
//! and exchanging one tree edge for one non-tree edge moves the count by at
//! most two. Starting from a tree with many leaves and one with few, a chain
//! of exchanges that turns one into the other passes through leaf counts
//! close to every value in between. Each exchange keeps the removed edge's
//! choice greedy towards `k`, so a chain frequently lands on `k` exactly.
//!
//! Only a confirmed tree is ever reported. A miss says nothing about `k`
//! and leaves the question to the exhaustive search.

use tracing::{debug, instrument};

use super::distinct::DistinctCounter;
use crate::{cancel::CancellationToken, graph::Graph};

/// Depth-first trees rooted at this many of the lowest-degree vertices serve
/// as low-leaf endpoints.
const DEPTH_FIRST_STARTS: usize = 3;

/// Looks for a spanning tree with exactly `k` leaves, returning its edge ids.
///
/// Expects a graph with at least two vertices. Returns `None` on a miss, on
/// a disconnected graph and once `token` is cancelled.
#[instrument(name = "solver.interpolate", level = "debug", skip(graph, token))]
pub(super) fn find_witness(
    graph: &Graph,
    k: usize,
    token: &CancellationToken,
) -> Option<Vec<usize>> {
    if token.is_cancelled() || graph.vertex_count() < 2 {
        return None;
    }
    let high = greedy_high_leaf_tree(graph)?;

    let mut starts: Vec<usize> = (0..graph.vertex_count()).collect();
    starts.sort_by_key(|&vertex| graph.degree(vertex));
    for start in starts.into_iter().take(DEPTH_FIRST_STARTS) {
        let low = depth_first_tree(graph, start)?;
        for (from, to) in [(&high, &low), (&low, &high)] {
            if let Some(tree) = exchange_walk(graph, k, from, to, token) {
                debug!(start, "exchange walk reached k");
                return Some(tree.edge_ids());
            }
        }
    }
    None
}

/// Grows a tree from the vertex with most distinct neighbours, repeatedly
/// expanding the tree vertex that pulls in the most unreached neighbours.
/// Every expansion attaches all of them at once, so expanded vertices become
/// internal and the rest stay leaves.
fn greedy_high_leaf_tree(graph: &Graph) -> Option<Vec<usize>> {
    let vertex_count = graph.vertex_count();
    let mut distinct = DistinctCounter::new(vertex_count);
    let mut root = None;
    let mut root_degree = 0;
    for vertex in 0..vertex_count {
        let degree = distinct.count(
            graph
                .neighbors(vertex)
                .iter()
                .copied()
                .filter(|&neighbor| neighbor != vertex),
        );
        if root.is_none() || degree > root_degree {
            root = Some(vertex);
            root_degree = degree;
        }
    }
    let root = root?;

    let mut reached = vec![false; vertex_count];
    let mut tree = Vec::with_capacity(vertex_count - 1);
    let mut frontier = Vec::new();
    reached[root] = true;
    expand(graph, root, &mut reached, &mut tree, &mut frontier);

    while tree.len() < vertex_count - 1 {
        let mut best: Option<(usize, usize)> = None;
        for (position, &vertex) in frontier.iter().enumerate() {
            let gain = distinct.count(
                graph
                    .neighbors(vertex)
                    .iter()
                    .copied()
                    .filter(|&neighbor| !reached[neighbor]),
            );
            if gain > 0 && best.is_none_or(|(_, best_gain)| gain > best_gain) {
                best = Some((position, gain));
            }
        }
        let (position, _) = best?;
        let vertex = frontier.remove(position);
        expand(graph, vertex, &mut reached, &mut tree, &mut frontier);
    }
    Some(tree)
}

fn expand(
    graph: &Graph,
    vertex: usize,
    reached: &mut [bool],
    tree: &mut Vec<usize>,
    frontier: &mut Vec<usize>,
) {
    for (neighbor, edge) in graph.incident(vertex) {
        if !reached[neighbor] {
            reached[neighbor] = true;
            tree.push(edge);
            frontier.push(neighbor);
        }
    }
}

/// Depth-first spanning tree from `start`; long paths keep leaves scarce.
fn depth_first_tree(graph: &Graph, start: usize) -> Option<Vec<usize>> {
    let vertex_count = graph.vertex_count();
    let mut visited = vec![false; vertex_count];
    let mut tree = Vec::with_capacity(vertex_count - 1);
    // (vertex, position of the next incident edge to try)
    let mut stack = vec![(start, 0)];
    visited[start] = true;

    while let Some((vertex, cursor)) = stack.last_mut() {
        let next = graph
            .incident(*vertex)
            .enumerate()
            .skip(*cursor)
            .find(|&(_, (neighbor, _))| !visited[neighbor]);
        match next {
            Some((position, (neighbor, edge))) => {
                *cursor = position + 1;
                visited[neighbor] = true;
                tree.push(edge);
                stack.push((neighbor, 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    (tree.len() == vertex_count - 1).then_some(tree)
}

/// Turns the tree `from` into the tree `to` one exchange at a time, stopping
/// as soon as the current tree has `k` leaves.
///
/// Each edge of `to` that is missing closes a cycle; of the cycle's edges
/// outside `to`, the one whose removal leaves the leaf count nearest `k` is
/// dropped (the first such edge along the cycle on ties).
fn exchange_walk<'g>(
    graph: &'g Graph,
    k: usize,
    from: &[usize],
    to: &[usize],
    token: &CancellationToken,
) -> Option<SpanningTree<'g>> {
    let mut tree = SpanningTree::new(graph, from);
    if tree.leaf_count() == k {
        return Some(tree);
    }
    let mut in_target = vec![false; graph.edge_count()];
    for &edge in to {
        in_target[edge] = true;
    }

    for &edge in to {
        if token.is_cancelled() {
            return None;
        }
        if tree.contains(edge) {
            continue;
        }
        let (u, v) = graph.edges()[edge];
        let mut best: Option<(usize, usize)> = None;
        for removed in tree.path(u, v) {
            if in_target[removed] {
                continue;
            }
            tree.exchange(edge, removed);
            let distance = tree.leaf_count().abs_diff(k);
            tree.exchange(removed, edge);
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, removed));
            }
        }
        let (distance, removed) = best?;
        tree.exchange(edge, removed);
        if distance == 0 {
            return Some(tree);
        }
    }
    None
}

/// Spanning tree over a fixed graph with incrementally maintained degrees.
struct SpanningTree<'g> {
    graph: &'g Graph,
    in_tree: Vec<bool>,
    degree: Vec<usize>,
    leaves: usize,
}

impl<'g> SpanningTree<'g> {
    fn new(graph: &'g Graph, edges: &[usize]) -> Self {
        let mut tree = Self {
            graph,
            in_tree: vec![false; graph.edge_count()],
            degree: vec![0; graph.vertex_count()],
            leaves: 0,
        };
        for &edge in edges {
            tree.insert(edge);
        }
        tree
    }

    const fn leaf_count(&self) -> usize {
        self.leaves
    }

    fn contains(&self, edge: usize) -> bool {
        self.in_tree[edge]
    }

    fn edge_ids(&self) -> Vec<usize> {
        (0..self.in_tree.len())
            .filter(|&edge| self.in_tree[edge])
            .collect()
    }

    /// Adds `added` and removes `removed`.
    fn exchange(&mut self, added: usize, removed: usize) {
        self.insert(added);
        self.delete(removed);
    }

    fn insert(&mut self, edge: usize) {
        self.in_tree[edge] = true;
        let (u, v) = self.graph.edges()[edge];
        for endpoint in [u, v] {
            if self.degree[endpoint] == 1 {
                self.leaves -= 1;
            }
            self.degree[endpoint] += 1;
            if self.degree[endpoint] == 1 {
                self.leaves += 1;
            }
        }
    }

    fn delete(&mut self, edge: usize) {
        self.in_tree[edge] = false;
        let (u, v) = self.graph.edges()[edge];
        for endpoint in [u, v] {
            if self.degree[endpoint] == 1 {
                self.leaves -= 1;
            }
            self.degree[endpoint] -= 1;
            if self.degree[endpoint] == 1 {
                self.leaves += 1;
            }
        }
    }

    /// Edge ids on the tree path between `from` and `to`, listed from `to`
    /// back to `from`.
    fn path(&self, from: usize, to: usize) -> Vec<usize> {
        let mut via: Vec<Option<(usize, usize)>> = vec![None; self.graph.vertex_count()];
        let mut seen = vec![false; self.graph.vertex_count()];
        let mut queue = vec![from];
        seen[from] = true;
        let mut head = 0;
        while let Some(&vertex) = queue.get(head) {
            head += 1;
            if vertex == to {
                break;
            }
            for (neighbor, edge) in self.graph.incident(vertex) {
                if self.in_tree[edge] && !seen[neighbor] {
                    seen[neighbor] = true;
                    via[neighbor] = Some((vertex, edge));
                    queue.push(neighbor);
                }
            }
        }

        let mut path = Vec::new();
        let mut current = to;
        while let Some((previous, edge)) = via[current] {
            path.push(edge);
            current = previous;
        }
        path
    }
}
