use sha2::{Digest, Sha256};

use crate::spanning_tree::SpanningTree;

/// Computes the canonical structural hash for the provided tree.
///
/// Two trees hash equal iff they have the same dimensions and the same edge
/// set; the backing-array order of the edge set never leaks in.
pub fn canonical_hash(tree: &SpanningTree) -> String {
    let mut hasher = Sha256::new();
    hasher.update((tree.rows() as u64).to_le_bytes());
    hasher.update((tree.cols() as u64).to_le_bytes());

    let edges = tree.sorted_edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        let (a, b) = edge.endpoints();
        hasher.update((a.row as u64).to_le_bytes());
        hasher.update((a.col as u64).to_le_bytes());
        hasher.update((b.row as u64).to_le_bytes());
        hasher.update((b.col as u64).to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
