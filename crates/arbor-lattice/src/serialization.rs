use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::Edge;
use serde::{Deserialize, Serialize};

use crate::spanning_tree::SpanningTree;

/// Read-only JSON snapshot of a tree: dimensions plus its sorted edge list.
/// This is the only surface external renderers consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Number of rows in the vertex set.
    pub rows: usize,
    /// Number of columns in the vertex set.
    pub cols: usize,
    /// Tree edges in canonical sorted order.
    pub edges: Vec<Edge>,
}

impl TreeSnapshot {
    /// Captures the current edge enumeration of a tree.
    pub fn capture(tree: &SpanningTree) -> Self {
        Self {
            rows: tree.rows(),
            cols: tree.cols(),
            edges: tree.sorted_edges(),
        }
    }
}

/// Serializes a tree snapshot to JSON.
pub fn tree_to_json(tree: &SpanningTree) -> Result<String, ArborError> {
    serde_json::to_string(&TreeSnapshot::capture(tree)).map_err(|err| {
        ArborError::Serde(ErrorInfo::new("tree-json-encode", err.to_string()))
    })
}

/// Rebuilds a tree from its JSON snapshot. The edge list is replayed through
/// the normal mutation path, so malformed snapshots surface structural
/// errors rather than producing an inconsistent tree.
pub fn tree_from_json(json: &str) -> Result<SpanningTree, ArborError> {
    let snapshot: TreeSnapshot = serde_json::from_str(json).map_err(|err| {
        ArborError::Serde(ErrorInfo::new("tree-json-decode", err.to_string()))
    })?;
    let mut tree = SpanningTree::empty(snapshot.rows, snapshot.cols)?;
    for edge in snapshot.edges {
        tree.add_edge(edge)?;
    }
    Ok(tree)
}
