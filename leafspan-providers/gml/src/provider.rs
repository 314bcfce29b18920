//! GML graph provider.
use std::{collections::HashMap, fs, path::Path};

use leafspan_core::Graph;

use crate::{
    errors::GmlError,
    lexer::tokenize,
    parse::{Entry, Value, lookup, parse},
};

/// Graph loaded from the first `graph [ ... ]` block of a GML document.
///
/// Node ids are remapped to `0..n` in declaration order; a repeated id
/// refers to the first node that declared it. Edges are read as undirected
/// whatever the document's `directed` flag says.
#[derive(Clone, Debug)]
pub struct GmlProvider {
    name: String,
    graph: Graph,
    vertex_ids: Vec<i64>,
}

impl GmlProvider {
    /// Parses a GML document held in memory.
    ///
    /// # Examples
    /// ```
    /// use leafspan_providers_gml::GmlProvider;
    ///
    /// let text = r#"graph [
    ///   node [ id 7 label "a" ]
    ///   node [ id 9 ]
    ///   edge [ source 7 target 9 ]
    /// ]"#;
    /// let provider = GmlProvider::try_from_str("demo", text)?;
    /// assert_eq!(provider.graph().edges(), &[(0, 1)]);
    /// # Ok::<(), leafspan_providers_gml::GmlError>(())
    /// ```
    pub fn try_from_str(name: impl Into<String>, text: &str) -> Result<Self, GmlError> {
        let tokens = tokenize(text)?;
        let document = parse(&tokens)?;
        let body = lookup(&document, "graph")
            .and_then(Value::as_list)
            .ok_or(GmlError::EmptyGraph)?;

        let (index, vertex_ids) = collect_nodes(body)?;
        if vertex_ids.is_empty() {
            return Err(GmlError::EmptyGraph);
        }
        let edges = collect_edges(body, &index)?;
        let graph = Graph::from_edges(vertex_ids.len(), edges)?;
        Ok(Self {
            name: name.into(),
            graph,
            vertex_ids,
        })
    }

    /// Reads and parses a GML file.
    pub fn try_from_path(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, GmlError> {
        let text = fs::read_to_string(path)?;
        Self::try_from_str(name, &text)
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

    /// Returns the GML id of each dense vertex.
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

fn blocks<'e, 'a>(body: &'e [Entry<'a>], key: &'e str) -> impl Iterator<Item = &'e [Entry<'a>]> {
    body.iter()
        .filter(move |entry| entry.key == key)
        .filter_map(|entry| entry.value.as_list())
}

fn collect_nodes(body: &[Entry<'_>]) -> Result<(HashMap<i64, usize>, Vec<i64>), GmlError> {
    let mut index = HashMap::new();
    let mut vertex_ids = Vec::new();
    for (node_index, node) in blocks(body, "node").enumerate() {
        let id = lookup(node, "id").ok_or(GmlError::MissingNodeId { node_index })?;
        let id = parse_id(id)?;
        index.entry(id).or_insert_with(|| {
            vertex_ids.push(id);
            vertex_ids.len() - 1
        });
    }
    Ok((index, vertex_ids))
}

fn collect_edges(
    body: &[Entry<'_>],
    index: &HashMap<i64, usize>,
) -> Result<Vec<(usize, usize)>, GmlError> {
    blocks(body, "edge")
        .enumerate()
        .map(|(edge_index, edge)| -> Result<(usize, usize), GmlError> {
            let endpoint = |key: &str| -> Result<usize, GmlError> {
                let value = lookup(edge, key).ok_or(GmlError::MissingEndpoint { edge_index })?;
                let id = parse_id(value)?;
                index
                    .get(&id)
                    .copied()
                    .ok_or(GmlError::UnknownNode { id })
            };
            Ok((endpoint("source")?, endpoint("target")?))
        })
        .collect()
}

fn parse_id(value: &Value<'_>) -> Result<i64, GmlError> {
    match value {
        Value::Number(raw) => raw.parse().map_err(|_| GmlError::InvalidId {
            raw: (*raw).to_owned(),
        }),
        Value::Str(_) | Value::List(_) => Err(GmlError::InvalidId { raw: value.raw() }),
    }
}
