//! Edge-list ingestion and compilation into a [`Graph`].
//!
//! The pipeline runs in fixed order: parse, drop self-loops, keep the largest
//! undirected component, renumber surviving tokens in first-seen order, add
//! reverse edges, sort and deduplicate, then compile offsets and neighbors in
//! one linear pass.
//!
//! The connectivity filter ignores edge direction. It therefore keeps the
//! largest weakly connected component, not the largest strongly connected
//! one.

use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{Span, debug, field, info, instrument};

use crate::{
    error::{GraphError, Result},
    rng::{DEFAULT_SEED, RandomSource},
    union_find::largest_component,
};

use super::{Graph, NodeId};

const COMMENT_MARKER: char = '#';
const DEFAULT_NAME: &str = "edge_list";

type TokenEdge = (String, String);
type Edge = (NodeId, NodeId);

/// Configures and runs graph construction.
///
/// The seed drives the coin flips of the connectivity filter. Component
/// membership does not depend on it, but internal forest layout does.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use coreper_core::GraphBuilder;
///
/// let input = "# triangle plus a detached pair\nA B\nB C\nC A\nD E\n";
/// let graph = GraphBuilder::new()
///     .with_seed(7)
///     .build_from_reader(Cursor::new(input))
///     .expect("edge list parses");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    seed: u64,
    name: Option<String>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            name: None,
        }
    }
}

impl GraphBuilder {
    /// Creates a builder with the default seed and a derived name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the seed used by the connectivity filter.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Overrides the data-source name recorded on the graph.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reads and builds the edge list stored at `path`.
    ///
    /// Unless overridden, the graph is named after the file stem.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] when the file cannot be opened, and the
    /// errors of [`Self::build_from_reader`] for its content.
    #[instrument(name = "graph.open", err, skip(self, path), fields(path = field::Empty))]
    pub fn build_from_path(&self, path: &Path) -> Result<Graph> {
        Span::current().record("path", field::display(path.display()));
        let file = File::open(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = self.name.clone().unwrap_or_else(|| derive_name(path));
        let edges = parse_edge_list(&name, BufReader::new(file))?;
        Ok(self.assemble(name, edges))
    }

    /// Reads and builds an edge list from `reader`.
    ///
    /// # Errors
    /// Returns [`GraphError::Read`] when reading fails and
    /// [`GraphError::MalformedLine`] when a data line lacks a target token.
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> Result<Graph> {
        let name = self.resolved_name();
        let edges = parse_edge_list(&name, reader)?;
        Ok(self.assemble(name, edges))
    }

    /// Builds a graph from in-memory token pairs.
    #[must_use]
    pub fn build_from_edges<I, S>(&self, edges: I) -> Graph
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let edges = edges
            .into_iter()
            .map(|(source, target)| (source.into(), target.into()))
            .collect();
        self.assemble(self.resolved_name(), edges)
    }

    fn resolved_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_owned())
    }

    #[instrument(
        name = "graph.build",
        skip(self, name, edges),
        fields(name = %name, seed = self.seed, parsed_edges = edges.len()),
    )]
    fn assemble(&self, name: String, mut edges: Vec<TokenEdge>) -> Graph {
        let parsed = edges.len();
        edges.retain(|(source, target)| source != target);
        let self_loops = parsed - edges.len();

        let mut rng = RandomSource::from_seed(self.seed);
        retain_largest_component(&mut edges, &mut rng);
        debug!(
            self_loops,
            kept = edges.len(),
            "restricted edge list to the largest component"
        );

        let (external_names, mut numbered) = renumber(edges);
        add_reverse_edges(&mut numbered);
        sort_and_dedup(&mut numbered);
        let (offsets, neighbors) = compile(external_names.len(), &numbered);

        let graph = Graph::from_parts(name, external_names, offsets, neighbors);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        graph
    }
}

fn derive_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| DEFAULT_NAME.to_owned(), ToOwned::to_owned)
}

pub(super) fn parse_edge_list<R: BufRead>(name: &str, reader: R) -> Result<Vec<TokenEdge>> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| GraphError::Read {
            name: name.to_owned(),
            line: line_number,
            source,
        })?;
        if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(source), Some(target)) = (tokens.next(), tokens.next()) else {
            return Err(GraphError::MalformedLine {
                name: name.to_owned(),
                line: line_number,
                content: line.clone(),
            });
        };
        edges.push((source.to_owned(), target.to_owned()));
    }
    Ok(edges)
}

fn retain_largest_component(edges: &mut Vec<TokenEdge>, rng: &mut RandomSource) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        for (source, target) in edges.iter() {
            for token in [source.as_str(), target.as_str()] {
                if seen.insert(token) {
                    tokens.push(token);
                }
            }
        }
        let relations: Vec<(&str, &str)> = edges
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
            .collect();
        let component = largest_component(tokens, &relations, rng);
        edges
            .iter()
            .map(|(source, _)| component.contains(source.as_str()))
            .collect()
    };

    let mut keep = keep.into_iter();
    edges.retain(|_| keep.next().unwrap_or(false));
}

fn renumber(edges: Vec<TokenEdge>) -> (Vec<String>, Vec<Edge>) {
    let mut ids: HashMap<String, NodeId> = HashMap::new();
    let mut names = Vec::new();
    let mut numbered = Vec::with_capacity(edges.len() * 2);

    let mut intern = |token: String| -> NodeId {
        if let Some(&id) = ids.get(&token) {
            return id;
        }
        let id = names.len();
        names.push(token.clone());
        ids.insert(token, id);
        id
    };

    for (source, target) in edges {
        let source = intern(source);
        let target = intern(target);
        numbered.push((source, target));
    }
    (names, numbered)
}

fn add_reverse_edges(edges: &mut Vec<Edge>) {
    let forward = edges.len();
    for index in 0..forward {
        let (source, target) = edges[index];
        edges.push((target, source));
    }
}

fn sort_and_dedup(edges: &mut Vec<Edge>) {
    edges.sort_unstable();
    edges.dedup();
}

pub(super) fn compile(node_count: usize, edges: &[Edge]) -> (Vec<usize>, Vec<NodeId>) {
    let mut offsets = Vec::with_capacity(node_count + 1);
    let mut neighbors = Vec::with_capacity(edges.len());
    let mut current: NodeId = 0;
    offsets.push(0);

    for (index, &(source, target)) in edges.iter().enumerate() {
        while current != source {
            offsets.push(index);
            current += 1;
        }
        neighbors.push(target);
    }
    while offsets.len() <= node_count {
        offsets.push(neighbors.len());
    }
    (offsets, neighbors)
}
