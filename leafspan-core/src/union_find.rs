//! Union-find (disjoint set union) with caller-driven rollback.
//!
//! The baseline solver commits tentative tree edges by merging components
//! and backs out of a branch by restoring a copy of the parent array taken
//! before the merge. There is no undo log and no union by rank: the search
//! above this structure is exponential, so keeping `restore` a plain array
//! replacement matters more than amortised tree height.

/// Disjoint-set forest over `0..len`.
///
/// # Examples
/// ```
/// use leafspan_core::DisjointSet;
///
/// let mut set = DisjointSet::new(3);
/// let before = set.snapshot();
/// set.union(0, 1);
/// assert_eq!(set.find(0), set.find(1));
/// set.restore(before);
/// assert_ne!(set.find(0), set.find(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton components.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Returns the number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when no elements are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of `node`'s component, pointing every
    /// visited node directly at it.
    ///
    /// # Panics
    /// Panics when `node >= self.len()`.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Attaches the root of `left` under the root of `right`.
    ///
    /// Returns `false` without modifying the forest when both already share a
    /// component.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let left = self.find(left);
        let right = self.find(right);
        if left == right {
            return false;
        }
        self.parent[left] = right;
        true
    }

    /// Returns the raw parent array.
    #[must_use]
    pub fn parents(&self) -> &[usize] {
        &self.parent
    }

    /// Copies the parent array so a later [`DisjointSet::restore`] can roll
    /// back every union made in between.
    #[must_use]
    pub fn snapshot(&self) -> Vec<usize> {
        self.parent.clone()
    }

    /// Replaces the parent array with a previously taken snapshot.
    ///
    /// The snapshot must come from a set of the same length.
    pub fn restore(&mut self, snapshot: Vec<usize>) {
        debug_assert_eq!(snapshot.len(), self.parent.len());
        self.parent = snapshot;
    }
}
