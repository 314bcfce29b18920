//! Role-assignment branch and bound.
//!
//! Before any branching, `find_witness` tries to reach a tree with `k`
//! leaves by edge exchanges. Only when that misses does the exhaustive role
//! search below run.
//!
//! The search grows a rooted tree one vertex at a time. Each step picks the
//! highest-degree undecided vertex adjacent to a vertex that may still take
//! children, names its parent (preferring one that still owes the tree a
//! child), and branches on:
//!
//! 1. the vertex becomes INTERNAL (while the internal budget `n - k` allows),
//! 2. the vertex becomes a LEAF,
//! 3. the frontier edge to that parent is excluded for the rest of the path,
//!    leaving the vertex free to attach elsewhere.
//!
//! The first vertex chosen is the root and may itself be a leaf, in which
//! case it accepts exactly one child. A complete assignment is accepted only
//! when its leaf count is `k`, the recorded degrees agree with the roles and
//! the parent relation reaches every vertex from vertex `0`.
//!
//! Once a root exists every node is bounded before branching. A partial tree
//! is abandoned when
//!
//! - an INTERNAL vertex (or a leaf root) lacks enough open undecided
//!   neighbours to collect the children its role still demands,
//! - some undecided vertex has no open path through undecided vertices back
//!   to the tree, or sits further away than the remaining internal budget
//!   can bridge,
//! - the undecided vertices that can only ever be leaves push the leaf count
//!   past `k`,
//! - too few internal vertices remain to dominate the undecided vertices that
//!   are not yet adjacent to the tree.
//!
//! Every bound is a necessary condition on all completions, so the search
//! stays exact.

use tracing::{debug, info, instrument};

use super::{distinct::DistinctCounter, interpolation::find_witness};
use crate::{cancel::CancellationToken, graph::Graph};

/// Decides the k-leaf spanning tree problem by assigning leaf/internal roles.
///
/// # Examples
/// ```
/// use leafspan_core::{BranchAndBoundSolver, CancellationToken, Graph};
///
/// let grid = Graph::grid(3, 3)?;
/// assert!(BranchAndBoundSolver::new(&grid, 5, CancellationToken::new()).solve());
/// assert!(!BranchAndBoundSolver::new(&grid, 7, CancellationToken::new()).solve());
/// # Ok::<(), leafspan_core::GraphError>(())
/// ```
#[derive(Debug)]
pub struct BranchAndBoundSolver<'g> {
    graph: &'g Graph,
    k: usize,
    token: CancellationToken,
}

impl<'g> BranchAndBoundSolver<'g> {
    /// Prepares a search for a spanning tree of `graph` with exactly `k` leaves.
    #[must_use]
    pub fn new(graph: &'g Graph, k: usize, token: CancellationToken) -> Self {
        Self { graph, k, token }
    }

    /// Runs the search, returning `true` iff a spanning tree with exactly `k`
    /// leaves exists.
    ///
    /// `k > vertex_count` is rejected outright. A graph with at most one
    /// vertex succeeds iff `k == vertex_count`; larger graphs need `k >= 2`
    /// and at least `vertex_count - 1` edges before any search happens.
    #[must_use]
    #[instrument(
        name = "solver.solve",
        skip(self),
        fields(
            solver = "branch-and-bound",
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            k = self.k,
        ),
    )]
    pub fn solve(self) -> bool {
        let vertex_count = self.graph.vertex_count();
        if self.k > vertex_count {
            debug!("k exceeds the vertex count");
            return false;
        }
        if vertex_count <= 1 {
            return self.k == vertex_count;
        }
        if self.k < 2 || self.graph.lacks_spanning_edges() {
            debug!("no spanning tree can have k leaves");
            return false;
        }

        if find_witness(self.graph, self.k, &self.token).is_some() {
            debug!(found = true, explored = 0, "search finished");
            return true;
        }

        let mut search = RoleSearch::new(self.graph, self.k, &self.token);
        search.backtrack(0, 0);

        if search.cancelled && !search.found {
            info!(explored = search.explored, "search cancelled");
        }
        debug!(found = search.found, explored = search.explored, "search finished");
        search.found
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Role {
    Undecided,
    Leaf,
    Internal,
}

/// Mutable state for one `solve` call. Every field touched by a branch is
/// reverted when that branch fails.
struct RoleSearch<'a> {
    graph: &'a Graph,
    k: usize,
    token: &'a CancellationToken,
    internal_budget: usize,
    roles: Vec<Role>,
    parent: Vec<Option<usize>>,
    children: Vec<usize>,
    excluded: Vec<bool>,
    root: Option<usize>,
    found: bool,
    cancelled: bool,
    explored: u64,
}

impl<'a> RoleSearch<'a> {
    fn new(graph: &'a Graph, k: usize, token: &'a CancellationToken) -> Self {
        let vertex_count = graph.vertex_count();
        Self {
            graph,
            k,
            token,
            internal_budget: vertex_count - k,
            roles: vec![Role::Undecided; vertex_count],
            parent: vec![None; vertex_count],
            children: vec![0; vertex_count],
            excluded: vec![false; graph.edge_count()],
            root: None,
            found: false,
            cancelled: false,
            explored: 0,
        }
    }

    fn backtrack(&mut self, leaf_count: usize, internal_count: usize) {
        if self.token.is_cancelled() {
            self.cancelled = true;
            return;
        }
        if self.found {
            return;
        }
        self.explored += 1;

        let vertex_count = self.graph.vertex_count();
        if leaf_count + internal_count == vertex_count {
            if leaf_count == self.k && self.is_spanning_tree() {
                self.found = true;
            }
            return;
        }

        let remaining = vertex_count - leaf_count - internal_count;
        if leaf_count > self.k || leaf_count + remaining < self.k {
            return;
        }
        if !self.can_still_complete(leaf_count, internal_count) {
            return;
        }

        if self.root.is_none() {
            self.branch_root(leaf_count, internal_count);
        } else {
            self.branch_frontier(leaf_count, internal_count);
        }
    }

    fn branch_root(&mut self, leaf_count: usize, internal_count: usize) {
        let Some(root) = self.densest_undecided() else {
            return;
        };
        self.root = Some(root);

        if internal_count < self.internal_budget {
            self.roles[root] = Role::Internal;
            self.backtrack(leaf_count, internal_count + 1);
            if self.found {
                return;
            }
        }

        self.roles[root] = Role::Leaf;
        self.backtrack(leaf_count + 1, internal_count);
        if self.found {
            return;
        }

        self.roles[root] = Role::Undecided;
        self.root = None;
    }

    fn branch_frontier(&mut self, leaf_count: usize, internal_count: usize) {
        let Some(vertex) = self.densest_frontier_vertex() else {
            return;
        };
        let Some((parent, edge)) = self.preferred_parent(vertex) else {
            return;
        };

        if internal_count < self.internal_budget {
            self.attach(vertex, parent, Role::Internal);
            self.backtrack(leaf_count, internal_count + 1);
            if self.found {
                return;
            }
            self.detach(vertex, parent);
        }

        self.attach(vertex, parent, Role::Leaf);
        self.backtrack(leaf_count + 1, internal_count);
        if self.found {
            return;
        }
        self.detach(vertex, parent);

        self.excluded[edge] = true;
        self.backtrack(leaf_count, internal_count);
        if self.found {
            return;
        }
        self.excluded[edge] = false;
    }

    fn attach(&mut self, vertex: usize, parent: usize, role: Role) {
        self.roles[vertex] = role;
        self.parent[vertex] = Some(parent);
        self.children[parent] += 1;
    }

    fn detach(&mut self, vertex: usize, parent: usize) {
        self.roles[vertex] = Role::Undecided;
        self.parent[vertex] = None;
        self.children[parent] -= 1;
    }

    /// Internal vertices take any number of children; a leaf root takes one.
    fn accepts_children(&self, vertex: usize) -> bool {
        match self.roles[vertex] {
            Role::Internal => true,
            Role::Leaf => self.root == Some(vertex) && self.children[vertex] == 0,
            Role::Undecided => false,
        }
    }

    fn densest_undecided(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for vertex in 0..self.graph.vertex_count() {
            if self.roles[vertex] != Role::Undecided {
                continue;
            }
            let degree = self.graph.degree(vertex);
            if best.is_none_or(|(_, best_degree)| degree > best_degree) {
                best = Some((vertex, degree));
            }
        }
        best.map(|(vertex, _)| vertex)
    }

    /// Scans vertices that accept children in ascending order and their
    /// neighbours in adjacency order; the first undecided neighbour of
    /// maximal degree reachable over a non-excluded edge wins.
    fn densest_frontier_vertex(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for host in 0..self.graph.vertex_count() {
            if !self.accepts_children(host) {
                continue;
            }
            for (neighbor, edge) in self.graph.incident(host) {
                if self.roles[neighbor] != Role::Undecided || self.excluded[edge] {
                    continue;
                }
                let degree = self.graph.degree(neighbor);
                if best.is_none_or(|(_, best_degree)| degree > best_degree) {
                    best = Some((neighbor, degree));
                }
            }
        }
        best.map(|(vertex, _)| vertex)
    }

    /// The first open neighbour that still owes the tree a child, falling
    /// back to the first open neighbour that accepts children at all.
    fn preferred_parent(&self, vertex: usize) -> Option<(usize, usize)> {
        let mut fallback = None;
        for (neighbor, edge) in self.graph.incident(vertex) {
            if self.excluded[edge] || !self.accepts_children(neighbor) {
                continue;
            }
            if self.outstanding_children(neighbor) > 0 {
                return Some((neighbor, edge));
            }
            fallback = fallback.or(Some((neighbor, edge)));
        }
        fallback
    }

    /// Children the vertex's role still requires: two for an internal root,
    /// one for any other internal vertex and one for a leaf root.
    fn outstanding_children(&self, vertex: usize) -> usize {
        let is_root = self.root == Some(vertex);
        let required: usize = match self.roles[vertex] {
            Role::Internal if is_root => 2,
            Role::Internal => 1,
            Role::Leaf if is_root => 1,
            Role::Leaf | Role::Undecided => 0,
        };
        required.saturating_sub(self.children[vertex])
    }

    /// Open edges of `vertex` leading to an undecided vertex other than
    /// itself.
    fn open_undecided(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .incident(vertex)
            .filter(move |&(neighbor, edge)| {
                neighbor != vertex
                    && !self.excluded[edge]
                    && self.roles[neighbor] == Role::Undecided
            })
            .map(|(neighbor, _)| neighbor)
    }

    /// Necessary conditions for the current partial tree to grow into a
    /// spanning tree with `k` leaves.
    fn can_still_complete(&self, leaf_count: usize, internal_count: usize) -> bool {
        if self.root.is_none() {
            return true;
        }
        let remaining = self.graph.vertex_count() - leaf_count - internal_count;
        let internal_left = self.internal_budget.saturating_sub(internal_count);
        let mut distinct = DistinctCounter::new(self.graph.vertex_count());

        self.outstanding_children_fit(remaining, &mut distinct)
            && self.undecided_reach_the_tree(remaining, internal_left)
            && leaf_count + self.forced_leaves(&mut distinct) <= self.k
            && self.far_vertices_can_be_dominated(internal_left, &mut distinct)
    }

    fn outstanding_children_fit(&self, remaining: usize, distinct: &mut DistinctCounter) -> bool {
        let mut total = 0;
        for vertex in 0..self.graph.vertex_count() {
            let owed = self.outstanding_children(vertex);
            if owed == 0 {
                continue;
            }
            if distinct.count(self.open_undecided(vertex)) < owed {
                return false;
            }
            total += owed;
        }
        total <= remaining
    }

    /// Breadth-first search from the vertices accepting children over open
    /// edges and undecided vertices. A vertex first reached at hop `d` needs
    /// `d - 1` new internal vertices between it and the tree.
    fn undecided_reach_the_tree(&self, remaining: usize, internal_left: usize) -> bool {
        let vertex_count = self.graph.vertex_count();
        // Zero marks a vertex not reached yet.
        let mut hops = vec![0; vertex_count];
        let mut queue = Vec::with_capacity(remaining);
        for host in (0..vertex_count).filter(|&host| self.accepts_children(host)) {
            for neighbor in self.open_undecided(host) {
                if hops[neighbor] == 0 {
                    hops[neighbor] = 1;
                    queue.push(neighbor);
                }
            }
        }

        let mut head = 0;
        let mut furthest: usize = 0;
        while let Some(&vertex) = queue.get(head) {
            head += 1;
            let hop = hops[vertex];
            furthest = furthest.max(hop);
            for neighbor in self.open_undecided(vertex) {
                if hops[neighbor] == 0 {
                    hops[neighbor] = hop + 1;
                    queue.push(neighbor);
                }
            }
        }

        queue.len() == remaining && furthest.saturating_sub(1) <= internal_left
    }

    /// Undecided vertices that cannot become internal: no open undecided
    /// neighbour to take as a child, or fewer than two distinct neighbours
    /// to serve as parent and child.
    fn forced_leaves(&self, distinct: &mut DistinctCounter) -> usize {
        (0..self.graph.vertex_count())
            .filter(|&vertex| self.roles[vertex] == Role::Undecided)
            .filter(|&vertex| {
                let has_child = self.open_undecided(vertex).next().is_some();
                let usable = self
                    .graph
                    .incident(vertex)
                    .filter(|&(neighbor, edge)| {
                        neighbor != vertex
                            && !self.excluded[edge]
                            && (self.roles[neighbor] == Role::Undecided
                                || self.accepts_children(neighbor))
                    })
                    .map(|(neighbor, _)| neighbor);
                !has_child || distinct.count(usable) < 2
            })
            .count()
    }

    /// A "far" undecided vertex has no open edge to a vertex accepting
    /// children, so its parent must be a vertex that is undecided now and
    /// turns internal later. Every far vertex therefore lies in the open
    /// neighbourhood of some future internal vertex; this checks that the
    /// best `internal_left` neighbourhoods could cover them all.
    fn far_vertices_can_be_dominated(
        &self,
        internal_left: usize,
        distinct: &mut DistinctCounter,
    ) -> bool {
        let vertex_count = self.graph.vertex_count();
        let mut near = vec![false; vertex_count];
        for host in (0..vertex_count).filter(|&host| self.accepts_children(host)) {
            for neighbor in self.open_undecided(host) {
                near[neighbor] = true;
            }
        }
        let is_far = |vertex: usize| self.roles[vertex] == Role::Undecided && !near[vertex];
        let far_count = (0..vertex_count).filter(|&vertex| is_far(vertex)).count();
        if far_count == 0 {
            return true;
        }

        let mut coverage: Vec<usize> = (0..vertex_count)
            .filter(|&vertex| self.roles[vertex] == Role::Undecided)
            .map(|vertex| distinct.count(self.open_undecided(vertex).filter(|&next| is_far(next))))
            .collect();
        coverage.sort_unstable_by(|a, b| b.cmp(a));

        let mut covered = 0;
        let mut used = 0;
        for cover in coverage {
            if covered >= far_count {
                break;
            }
            covered += cover;
            used += 1;
        }
        covered >= far_count && used <= internal_left
    }

    /// Final check on a complete assignment: `n - 1` parent links, tree
    /// degrees matching roles, and every vertex reachable from vertex `0`.
    fn is_spanning_tree(&self) -> bool {
        let vertex_count = self.graph.vertex_count();
        let links = self.parent.iter().flatten().count();
        if links != vertex_count - 1 {
            return false;
        }

        let roles_match_degrees = (0..vertex_count).all(|vertex| {
            let degree = self.children[vertex] + usize::from(self.parent[vertex].is_some());
            match self.roles[vertex] {
                Role::Leaf => degree == 1,
                Role::Internal => degree >= 2,
                Role::Undecided => false,
            }
        });
        if !roles_match_degrees {
            return false;
        }

        let mut child_lists = vec![Vec::new(); vertex_count];
        for (child, parent) in self.parent.iter().enumerate() {
            if let Some(parent) = *parent {
                child_lists[parent].push(child);
            }
        }

        let mut visited = vec![false; vertex_count];
        let mut queue = vec![0];
        visited[0] = true;
        let mut reached = 1;
        let mut head = 0;
        while let Some(&vertex) = queue.get(head) {
            head += 1;
            let parent = self.parent[vertex].into_iter();
            for next in parent.chain(child_lists[vertex].iter().copied()) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push(next);
                    reached += 1;
                }
            }
        }
        reached == vertex_count
    }
}
