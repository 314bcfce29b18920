//! Distinct-vertex counting without per-call allocation.

/// Counts distinct vertices, reusing one stamp buffer across calls.
pub(super) struct DistinctCounter {
    stamps: Vec<usize>,
    round: usize,
}

impl DistinctCounter {
    pub(super) fn new(vertex_count: usize) -> Self {
        Self {
            stamps: vec![0; vertex_count],
            round: 0,
        }
    }

    /// Counts the distinct vertices in `vertices`; repeated ids (from
    /// duplicate edges) count once.
    pub(super) fn count(&mut self, vertices: impl Iterator<Item = usize>) -> usize {
        self.round += 1;
        let mut distinct = 0;
        for vertex in vertices {
            if self.stamps[vertex] != self.round {
                self.stamps[vertex] = self.round;
                distinct += 1;
            }
        }
        distinct
    }
}
