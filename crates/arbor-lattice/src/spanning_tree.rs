use std::collections::VecDeque;

use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::{Edge, RngHandle, Vertex};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::edge_set::EdgeSet;
use crate::grid::LatticeGraph;

/// A tree over the R x C vertex set, stored as per-vertex adjacency plus an
/// [`EdgeSet`] of its edges.
///
/// The structure itself only guarantees that adjacency and the edge set stay
/// in sync; whether it is a spanning tree of a particular lattice is checked
/// by [`SpanningTree::validate_against`].
#[derive(Debug, Clone)]
pub struct SpanningTree {
    rows: usize,
    cols: usize,
    adjacency: Vec<Vec<usize>>,
    edges: EdgeSet,
}

impl SpanningTree {
    /// Creates an edgeless tree skeleton over a rows x cols vertex set.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, ArborError> {
        if rows == 0 || cols == 0 {
            return Err(ArborError::Tree(
                ErrorInfo::new("invalid-dimensions", "tree dimensions must be positive")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string()),
            ));
        }
        Ok(Self {
            rows,
            cols,
            adjacency: vec![Vec::new(); rows * cols],
            edges: EdgeSet::new(),
        })
    }

    /// Number of rows in the vertex set.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the vertex set.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of tree edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The tree's edge set.
    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    /// Tree edges in canonical sorted order. This is the read-only snapshot
    /// contract for renderers: enough to draw the layout, nothing mutable.
    pub fn sorted_edges(&self) -> Vec<Edge> {
        self.edges.sorted()
    }

    /// Dense row-major index of a vertex, or `None` when out of bounds.
    pub fn index_of(&self, v: Vertex) -> Option<usize> {
        if v.row < self.rows && v.col < self.cols {
            Some(v.row * self.cols + v.col)
        } else {
            None
        }
    }

    /// Vertex at the given dense index.
    pub fn vertex_at(&self, idx: usize) -> Vertex {
        Vertex::new(idx / self.cols, idx % self.cols)
    }

    /// Neighbour indices of the vertex at `idx` within the tree.
    pub fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Tree degree of a vertex.
    pub fn degree(&self, v: Vertex) -> Result<usize, ArborError> {
        let idx = self.require_index(v)?;
        Ok(self.adjacency[idx].len())
    }

    /// Whether the edge belongs to the tree.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Adds an edge, keeping adjacency and the edge set in sync.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), ArborError> {
        let a = self.require_index(edge.a())?;
        let b = self.require_index(edge.b())?;
        if !self.edges.insert(edge) {
            return Err(ArborError::Tree(
                ErrorInfo::new("duplicate-edge", "edge is already part of the tree")
                    .with_context("edge", edge.to_string()),
            ));
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        Ok(())
    }

    /// Removes an edge, keeping adjacency and the edge set in sync.
    pub fn remove_edge(&mut self, edge: Edge) -> Result<(), ArborError> {
        if !self.edges.remove(edge) {
            return Err(ArborError::Tree(
                ErrorInfo::new("missing-edge", "edge is not part of the tree")
                    .with_context("edge", edge.to_string()),
            ));
        }
        let a = self.require_index(edge.a())?;
        let b = self.require_index(edge.b())?;
        self.adjacency[a].retain(|&n| n != b);
        self.adjacency[b].retain(|&n| n != a);
        Ok(())
    }

    /// BFS distances from `start` over tree edges, bounded by `cutoff` hops
    /// when provided. Unreached vertices stay `None`.
    pub fn bfs_distances(&self, start: usize, cutoff: Option<usize>) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.vertex_count()];
        dist[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            let d = dist[u].unwrap_or(0);
            if let Some(max) = cutoff {
                if d >= max {
                    continue;
                }
            }
            for &w in &self.adjacency[u] {
                if dist[w].is_none() {
                    dist[w] = Some(d + 1);
                    queue.push_back(w);
                }
            }
        }
        dist
    }

    /// The unique tree path from `from` to `to` as vertex indices, inclusive
    /// of both endpoints. `None` when the endpoints are not connected.
    pub fn path_between(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        if from == to {
            return Some(vec![from]);
        }
        let mut parent: Vec<Option<usize>> = vec![None; self.vertex_count()];
        parent[from] = Some(from);
        let mut queue = VecDeque::from([from]);
        while let Some(u) = queue.pop_front() {
            for &w in &self.adjacency[u] {
                if parent[w].is_none() {
                    parent[w] = Some(u);
                    if w == to {
                        queue.clear();
                        break;
                    }
                    queue.push_back(w);
                }
            }
        }
        parent[to]?;
        let mut path = vec![to];
        let mut cur = to;
        while cur != from {
            cur = parent[cur]?;
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }

    /// Checks that `self` is a valid spanning tree of `graph`: matching
    /// dimensions, exactly |V| - 1 edges, every edge in the background, and
    /// connected (acyclicity follows from the edge count).
    pub fn validate_against(&self, graph: &LatticeGraph) -> Result<(), ArborError> {
        if self.rows != graph.rows() || self.cols != graph.cols() {
            return Err(ArborError::Tree(
                ErrorInfo::new("invalid-initial-tree", "tree dimensions do not match the lattice")
                    .with_context("tree", format!("{}x{}", self.rows, self.cols))
                    .with_context("lattice", format!("{}x{}", graph.rows(), graph.cols())),
            ));
        }
        let expected = self.vertex_count() - 1;
        if self.edge_count() != expected {
            return Err(ArborError::Tree(
                ErrorInfo::new("invalid-initial-tree", "tree has the wrong number of edges")
                    .with_context("edges", self.edge_count().to_string())
                    .with_context("expected", expected.to_string()),
            ));
        }
        for edge in self.edges.iter() {
            if !graph.contains_edge(*edge) {
                return Err(ArborError::Tree(
                    ErrorInfo::new("invalid-initial-tree", "tree edge is not a background edge")
                        .with_context("edge", edge.to_string()),
                ));
            }
        }
        let reached = self
            .bfs_distances(0, None)
            .iter()
            .filter(|d| d.is_some())
            .count();
        if reached != self.vertex_count() {
            return Err(ArborError::Tree(
                ErrorInfo::new("invalid-initial-tree", "tree is disconnected")
                    .with_context("reached", reached.to_string())
                    .with_context("vertices", self.vertex_count().to_string()),
            ));
        }
        Ok(())
    }
}

fn require_index_impl(rows: usize, cols: usize, v: Vertex) -> Result<usize, ArborError> {
    if v.row < rows && v.col < cols {
        Ok(v.row * cols + v.col)
    } else {
        Err(ArborError::Tree(
            ErrorInfo::new("vertex-outside-lattice", "vertex is not part of the vertex set")
                .with_context("vertex", v.to_string())
                .with_context("rows", rows.to_string())
                .with_context("cols", cols.to_string()),
        ))
    }
}

impl SpanningTree {
    fn require_index(&self, v: Vertex) -> Result<usize, ArborError> {
        require_index_impl(self.rows, self.cols, v)
    }
}

/// Uniform random spanning tree of the background graph via the
/// Aldous-Broder random walk: whenever the walk first reaches a vertex, the
/// traversal edge joins the tree. O(cover time); runs once per chain.
pub fn aldous_broder(graph: &LatticeGraph, rng: &mut RngHandle) -> Result<SpanningTree, ArborError> {
    let mut tree = SpanningTree::empty(graph.rows(), graph.cols())?;
    let n = graph.vertex_count();
    let start = (rng.next_u64() as usize) % n;
    let mut cur = graph.vertices()[start];
    let mut visited = vec![false; n];
    visited[start] = true;
    let mut remaining = n - 1;

    while remaining > 0 {
        let neighbors = graph.neighbors(cur)?;
        let next = *neighbors.choose(rng).ok_or_else(|| {
            ArborError::Tree(
                ErrorInfo::new("isolated-vertex", "random walk reached a vertex with no neighbours")
                    .with_context("vertex", cur.to_string()),
            )
        })?;
        // `neighbors` only yields in-lattice vertices.
        let next_idx = next.row * graph.cols() + next.col;
        if !visited[next_idx] {
            tree.add_edge(Edge::new(cur, next))?;
            visited[next_idx] = true;
            remaining -= 1;
        }
        cur = next;
    }
    Ok(tree)
}

/// Deterministic boustrophedon Hamiltonian path: full rows of horizontal
/// edges joined by alternating end connectors. Useful as a hand-built
/// initial state with known diameter |V| - 1.
pub fn serpentine_path(rows: usize, cols: usize) -> Result<SpanningTree, ArborError> {
    let mut tree = SpanningTree::empty(rows, cols)?;
    for row in 0..rows {
        for col in 0..cols.saturating_sub(1) {
            tree.add_edge(Edge::new(Vertex::new(row, col), Vertex::new(row, col + 1)))?;
        }
    }
    for row in 0..rows.saturating_sub(1) {
        let col = if row % 2 == 1 { 0 } else { cols - 1 };
        tree.add_edge(Edge::new(Vertex::new(row, col), Vertex::new(row + 1, col)))?;
    }
    Ok(tree)
}
