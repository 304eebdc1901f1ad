use std::collections::BTreeSet;

use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::{Edge, Periodic, Vertex};

/// The fixed background graph: a rows x cols grid with optional per-axis
/// periodic wraparound. Immutable after construction.
#[derive(Debug, Clone)]
pub struct LatticeGraph {
    rows: usize,
    cols: usize,
    periodic: Periodic,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    edge_index: BTreeSet<Edge>,
    adjacency: Vec<Vec<Vertex>>,
}

impl LatticeGraph {
    /// Builds the background lattice. Deterministic; fails only on zero
    /// dimensions.
    pub fn build(rows: usize, cols: usize, periodic: Periodic) -> Result<Self, ArborError> {
        if rows == 0 || cols == 0 {
            return Err(ArborError::Lattice(
                ErrorInfo::new("invalid-dimensions", "lattice dimensions must be positive")
                    .with_context("rows", rows.to_string())
                    .with_context("cols", cols.to_string()),
            ));
        }

        let mut vertices = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                vertices.push(Vertex::new(row, col));
            }
        }

        let mut edges = Vec::with_capacity(Self::expected_edge_count(rows, cols, periodic));
        for row in 0..rows {
            for col in 0..cols {
                if col + 1 < cols {
                    edges.push(Edge::new(Vertex::new(row, col), Vertex::new(row, col + 1)));
                }
                if row + 1 < rows {
                    edges.push(Edge::new(Vertex::new(row, col), Vertex::new(row + 1, col)));
                }
            }
        }
        // A wrap edge on an axis of length <= 2 would duplicate an existing
        // edge (or self-loop), so those axes are left open.
        if periodic.rows && rows > 2 {
            for col in 0..cols {
                edges.push(Edge::new(Vertex::new(0, col), Vertex::new(rows - 1, col)));
            }
        }
        if periodic.cols && cols > 2 {
            for row in 0..rows {
                edges.push(Edge::new(Vertex::new(row, 0), Vertex::new(row, cols - 1)));
            }
        }

        let edge_index: BTreeSet<Edge> = edges.iter().copied().collect();
        let mut adjacency = vec![Vec::new(); rows * cols];
        for edge in &edges {
            let (a, b) = edge.endpoints();
            adjacency[a.row * cols + a.col].push(b);
            adjacency[b.row * cols + b.col].push(a);
        }

        Ok(Self {
            rows,
            cols,
            periodic,
            vertices,
            edges,
            edge_index,
            adjacency,
        })
    }

    /// Number of edges the builder produces for the given dimensions.
    pub fn expected_edge_count(rows: usize, cols: usize, periodic: Periodic) -> usize {
        let mut count = rows * cols.saturating_sub(1) + cols * rows.saturating_sub(1);
        if periodic.rows && rows > 2 {
            count += cols;
        }
        if periodic.cols && cols > 2 {
            count += rows;
        }
        count
    }

    /// Number of rows in the lattice.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the lattice.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Wraparound flags the lattice was built with.
    pub fn periodic(&self) -> Periodic {
        self.periodic
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// All vertices in row-major order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All background edges in construction order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total number of background edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Dense row-major index of a vertex, or `None` when out of bounds.
    pub fn index_of(&self, v: Vertex) -> Option<usize> {
        if v.row < self.rows && v.col < self.cols {
            Some(v.row * self.cols + v.col)
        } else {
            None
        }
    }

    /// Whether the vertex lies inside the lattice.
    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.index_of(v).is_some()
    }

    /// Whether the edge belongs to the background graph.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.edge_index.contains(&edge)
    }

    /// Grid neighbours of a vertex (including wrap neighbours).
    pub fn neighbors(&self, v: Vertex) -> Result<&[Vertex], ArborError> {
        let idx = self.index_of(v).ok_or_else(|| {
            ArborError::Lattice(
                ErrorInfo::new("vertex-outside-lattice", "vertex is not part of the lattice")
                    .with_context("vertex", v.to_string())
                    .with_context("rows", self.rows.to_string())
                    .with_context("cols", self.cols.to_string()),
            )
        })?;
        Ok(&self.adjacency[idx])
    }
}
