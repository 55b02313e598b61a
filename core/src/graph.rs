use crate::chromosome::Chromosome;
use crate::error::GraphError;
use rand::Rng;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Node {
    pub id: usize,
    pub weight: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub n1: usize,
    pub n2: usize,
    pub weight: u32,
}

/// Weighted undirected graph, immutable while the optimizer runs.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Graph, GraphError> {
        if nodes.is_empty() {
            return Err(GraphError::NoNodes);
        }

        if let Some((position, node)) = nodes.iter().enumerate().find(|(i, n)| n.id != *i) {
            return Err(GraphError::NodeIdOutOfOrder { position, id: node.id });
        }

        let node_count = nodes.len();
        for (index, edge) in edges.iter().enumerate() {
            for &node in &[edge.n1, edge.n2] {
                if node >= node_count {
                    return Err(GraphError::EdgeOutOfRange { edge: index, node, node_count });
                }
            }
        }

        Ok(Graph { nodes, edges })
    }

    /// Graph with `vertices` unit-weight nodes and the given edges.
    pub fn with_unit_nodes(vertices: usize, edges: Vec<Edge>) -> Result<Graph, GraphError> {
        let nodes = (0..vertices).map(|id| Node { id, weight: 1 }).collect();
        Graph::new(nodes, edges)
    }

    #[inline]
    pub fn vertices(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn edge_list(&self) -> &[Edge] {
        &self.edges
    }

    /// Fraction of all possible node pairs that are joined by an edge.
    pub fn density(&self) -> f32 {
        let vertices = self.vertices() as f32;
        let all_edges = vertices * (vertices - 1.0) / 2.0;
        if all_edges == 0.0 {
            return 0.0;
        }
        self.edges() as f32 / all_edges
    }

    /// Edges whose endpoints land in different partitions.
    pub fn iter_cut<'g>(&'g self, c: &'g Chromosome) -> impl Iterator<Item=&'g Edge> + 'g {
        self.edges.iter().filter(move |e| c.get(e.n1) != c.get(e.n2))
    }

    fn clear_edges(&mut self) {
        self.edges.clear();
    }

    fn push_edge(&mut self, n1: usize, n2: usize, weight: u32) {
        debug_assert!(n1 < self.vertices() && n2 < self.vertices());
        self.edges.push(Edge { n1, n2, weight });
    }
}

pub fn is_connected(graph: &Graph) -> bool {
    let mut neighbours = vec![Vec::new(); graph.vertices()];
    for edge in graph.edge_list() {
        neighbours[edge.n1].push(edge.n2);
        neighbours[edge.n2].push(edge.n1);
    }

    let mut visited = HashSet::new();
    let mut remaining = vec![0];

    while let Some(current) = remaining.pop() {
        if !visited.insert(current) {
            continue;
        }
        remaining.extend(neighbours[current].iter().copied());
    }

    visited.len() == graph.vertices()
}

/// Replaces the edges of `graph` with random ones of weight `1..=10`.
///
/// Every node pair is joined with `initial_probability`; while the result is
/// disconnected the probability is raised by 0.01 and the draw repeated.
/// Returns the probability that produced a connected graph.
pub fn fill_graph_randomly(
    graph: &mut Graph,
    initial_probability: f32,
    rng: &mut impl Rng,
) -> f32 {
    let mut probability = initial_probability;
    loop {
        graph.clear_edges();
        for i in 0..graph.vertices() {
            for j in i + 1..graph.vertices() {
                if rng.gen_range(0.0..1.0) <= probability {
                    graph.push_edge(i, j, rng.gen_range(1..=10));
                }
            }
        }

        if is_connected(graph) {
            return probability;
        } else {
            probability += 0.01;
        }
    }
}
