//! Edge-list provider: one `u v` pair per line.
//!
//! Lines starting with `#` and lines with fewer than two fields are skipped;
//! columns after the second are ignored. Vertex ids are arbitrary integers
//! and are remapped to `0..n` in order of first appearance.
use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use leafspan_core::{Graph, GraphError};
use thiserror::Error;

/// Errors raised while loading an edge list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    /// A vertex field was not an integer.
    #[error("line {line}: vertex id `{raw}` is not an integer")]
    InvalidVertexId {
        /// One-based line number.
        line: usize,
        /// Offending field.
        raw: String,
    },
    /// The input held no edge lines.
    #[error("edge list contains no edges")]
    EmptyInput,
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The remapped edges did not form a valid graph.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Graph loaded from a whitespace-separated edge list.
#[derive(Clone, Debug)]
pub struct EdgeListProvider {
    name: String,
    graph: Graph,
    vertex_ids: Vec<i64>,
}

impl EdgeListProvider {
    /// Parses an edge list from any buffered reader.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    ///
    /// use leafspan_providers_edgelist::EdgeListProvider;
    ///
    /// let text = "# triangle\n10 20\n20 30\n30 10\n";
    /// let provider = EdgeListProvider::try_from_reader("demo", Cursor::new(text))?;
    /// assert_eq!(provider.graph().vertex_count(), 3);
    /// assert_eq!(provider.vertex_ids(), &[10, 20, 30]);
    /// # Ok::<(), leafspan_providers_edgelist::EdgeListError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListError> {
        let mut remap = DenseIds::default();
        let mut edges = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(left), Some(right)) = (fields.next(), fields.next()) else {
                continue;
            };
            let u = remap.dense(parse_id(left, index + 1)?);
            let v = remap.dense(parse_id(right, index + 1)?);
            edges.push((u, v));
        }

        if edges.is_empty() {
            return Err(EdgeListError::EmptyInput);
        }
        let graph = Graph::from_edges(remap.ids.len(), edges)?;
        Ok(Self {
            name: name.into(),
            graph,
            vertex_ids: remap.ids,
        })
    }

    /// Opens and parses an edge-list file.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, EdgeListError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Returns the human-readable source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the original id of each dense vertex.
    #[must_use]
    pub fn vertex_ids(&self) -> &[i64] {
        &self.vertex_ids
    }

    /// Consumes the provider, keeping only the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

fn parse_id(raw: &str, line: usize) -> Result<i64, EdgeListError> {
    raw.parse().map_err(|_| EdgeListError::InvalidVertexId {
        line,
        raw: raw.to_owned(),
    })
}

#[derive(Default)]
struct DenseIds {
    index: HashMap<i64, usize>,
    ids: Vec<i64>,
}

impl DenseIds {
    fn dense(&mut self, id: i64) -> usize {
        *self.index.entry(id).or_insert_with(|| {
            self.ids.push(id);
            self.ids.len() - 1
        })
    }
}
