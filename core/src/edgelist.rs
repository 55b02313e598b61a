//! Reader for `.edgelist` graph descriptions.
//!
//! ```text
//! nodes 4
//! edges 3
//! 0 1
//! 1 2 5
//! 2 3
//! ```
//!
//! The first two significant lines carry the node and edge counts as their
//! second token. Each following line is one edge with an optional weight
//! (default 1). Every node has weight 1. Blank lines and lines starting with
//! `#` are skipped.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::EdgeListError;
use crate::graph::{Edge, Graph};

pub const EXTENSION: &str = "edgelist";

/// Largest node count a header may declare.
pub const MAX_NODES: usize = 1 << 24;

pub fn read_edgelist(path: impl AsRef<Path>) -> Result<Graph, EdgeListError> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
        return Err(EdgeListError::UnsupportedFormat(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| EdgeListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_edgelist(&text)
}

pub fn parse_edgelist(text: &str) -> Result<Graph, EdgeListError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let node_count: usize = header_value(lines.next(), "node count")?;
    let edge_count: usize = header_value(lines.next(), "edge count")?;
    if node_count > MAX_NODES {
        return Err(EdgeListError::TooManyNodes { declared: node_count, max: MAX_NODES });
    }

    // Header counts are untrusted until the body confirms them.
    let mut edges = Vec::new();
    for (line, content) in lines {
        let mut tokens = content.split_whitespace();
        let n1 = field(tokens.next(), line, "first node")?;
        let n2 = field(tokens.next(), line, "second node")?;
        let weight = match tokens.next() {
            Some(token) => parse(token, line, "edge weight")?,
            None => 1,
        };
        edges.push(Edge { n1, n2, weight });
    }

    if edges.len() != edge_count {
        return Err(EdgeListError::CountMismatch {
            what: "edges",
            declared: edge_count,
            found: edges.len(),
        });
    }

    Ok(Graph::with_unit_nodes(node_count, edges)?)
}

fn header_value(line: Option<(usize, &str)>, what: &str) -> Result<usize, EdgeListError> {
    let (line, content) = line.ok_or_else(|| EdgeListError::Parse {
        line: 0,
        message: format!("missing {} header", what),
    })?;
    let token = content.split_whitespace().nth(1);
    field(token, line, what)
}

fn field<T: FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T, EdgeListError> {
    match token {
        Some(token) => parse(token, line, what),
        None => Err(EdgeListError::Parse { line, message: format!("missing {}", what) }),
    }
}

fn parse<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, EdgeListError> {
    token.parse().map_err(|_| EdgeListError::Parse {
        line,
        message: format!("invalid {} {:?}", what, token),
    })
}
