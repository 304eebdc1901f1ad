use std::f64::consts::PI;

use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::Vertex;
use arbor_lattice::SpanningTree;
use serde::{Deserialize, Serialize};

use crate::config::EnergyParams;

/// Breakdown of the structural terms used to construct the total energy.
///
/// `diameter`, `turns` and `winding` are the raw term values; `degree` and
/// `winding` already carry their weights (the degree table and per-pivot
/// coefficients), while `total` applies `alpha` and `gamma` on top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyBreakdown {
    /// Tree diameter in hops.
    pub diameter: f64,
    /// Number of right-angle bends along degree-2 vertices.
    pub turns: f64,
    /// Summed per-degree contributions.
    pub degree: f64,
    /// Weighted winding accumulation over all configured pivots.
    pub winding: f64,
    /// Weighted total energy.
    pub total: f64,
}

impl EnergyBreakdown {
    /// Creates a zeroed breakdown for convenience.
    pub fn zero() -> Self {
        Self {
            diameter: 0.0,
            turns: 0.0,
            degree: 0.0,
            winding: 0.0,
            total: 0.0,
        }
    }
}

/// Computes the weighted energy of a tree configuration.
pub fn score(tree: &SpanningTree, params: &EnergyParams) -> Result<EnergyBreakdown, ArborError> {
    let diameter = tree_diameter(tree) as f64;
    let turns = count_turns(tree) as f64;
    let degree = degree_term(tree, &params.delta)?;
    let mut winding = 0.0;
    for pin in &params.vortex {
        winding += pin.coeff * count_winding(tree, pin.pivot, params.winding_radius)?;
    }

    let total = params.alpha * diameter + params.gamma * turns + degree + winding;

    Ok(EnergyBreakdown {
        diameter,
        turns,
        degree,
        winding,
        total,
    })
}

/// Exact tree diameter via the classic double BFS: the farthest vertex from
/// any start is one end of a diameter. The first BFS starts from vertex
/// index 0 and ties resolve to the lowest index, so the result is
/// deterministic for a given tree.
pub fn tree_diameter(tree: &SpanningTree) -> usize {
    if tree.vertex_count() <= 1 {
        return 0;
    }
    let first = tree.bfs_distances(0, None);
    let leaf = farthest(&first);
    let second = tree.bfs_distances(leaf, None);
    second.iter().flatten().copied().max().unwrap_or(0)
}

fn farthest(dist: &[Option<usize>]) -> usize {
    let mut best = 0;
    let mut best_dist = 0;
    for (idx, d) in dist.iter().enumerate() {
        if let Some(d) = *d {
            if d > best_dist {
                best_dist = d;
                best = idx;
            }
        }
    }
    best
}

/// Counts degree-2 vertices whose incident edges are not collinear. Raw grid
/// coordinates are compared even across periodic wrap edges, so a corridor
/// running through a wrap edge can still register a bend.
pub fn count_turns(tree: &SpanningTree) -> usize {
    let mut turns = 0;
    for idx in 0..tree.vertex_count() {
        let neighbors = tree.neighbor_indices(idx);
        if neighbors.len() != 2 {
            continue;
        }
        let n1 = tree.vertex_at(neighbors[0]);
        let n2 = tree.vertex_at(neighbors[1]);
        if n1.row != n2.row && n1.col != n2.col {
            turns += 1;
        }
    }
    turns
}

/// Sums the per-degree table over every vertex. A degree beyond the table is
/// a parameter/topology mismatch and surfaces as an error rather than being
/// clamped.
pub fn degree_term(tree: &SpanningTree, delta: &[f64; 5]) -> Result<f64, ArborError> {
    let mut sum = 0.0;
    for idx in 0..tree.vertex_count() {
        let degree = tree.neighbor_indices(idx).len();
        if degree >= delta.len() {
            return Err(ArborError::Energy(
                ErrorInfo::new("degree-out-of-range", "vertex degree exceeds the delta table")
                    .with_context("vertex", tree.vertex_at(idx).to_string())
                    .with_context("degree", degree.to_string())
                    .with_context("table_len", delta.len().to_string())
                    .with_hint("periodic wraparound on small grids can exceed degree 4"),
            ));
        }
        sum += delta[degree];
    }
    Ok(sum)
}

/// Discrete winding accumulation of the tree around `pivot`, restricted to a
/// BFS ball of `radius` hops.
///
/// For every outward tree edge (u, w) inside the ball -- `w` strictly
/// farther from the pivot than `u` -- the signed angle between the vectors
/// `u - pivot` and `w - pivot` is accumulated, normalised into [-pi, pi] by
/// a single 2-pi correction. Positive totals indicate net counter-clockwise
/// structure. Only tree-restricted adjacency participates.
pub fn count_winding(
    tree: &SpanningTree,
    pivot: Vertex,
    radius: usize,
) -> Result<f64, ArborError> {
    let pivot_idx = tree.index_of(pivot).ok_or_else(|| {
        ArborError::Energy(
            ErrorInfo::new("vortex-outside-lattice", "winding pivot is not a lattice vertex")
                .with_context("pivot", pivot.to_string())
                .with_context("rows", tree.rows().to_string())
                .with_context("cols", tree.cols().to_string()),
        )
    })?;

    let dist = tree.bfs_distances(pivot_idx, Some(radius));
    let mut total = 0.0;
    for u in 0..tree.vertex_count() {
        let Some(du) = dist[u] else { continue };
        for &w in tree.neighbor_indices(u) {
            let Some(dw) = dist[w] else { continue };
            if dw <= du {
                continue;
            }
            let uv = tree.vertex_at(u);
            let wv = tree.vertex_at(w);
            let angle_u = angle_from(pivot, uv);
            let angle_w = angle_from(pivot, wv);
            let mut delta_angle = angle_w - angle_u;
            if delta_angle > PI {
                delta_angle -= 2.0 * PI;
            } else if delta_angle < -PI {
                delta_angle += 2.0 * PI;
            }
            total += delta_angle;
        }
    }
    Ok(total)
}

fn angle_from(pivot: Vertex, v: Vertex) -> f64 {
    let d_row = v.row as f64 - pivot.row as f64;
    let d_col = v.col as f64 - pivot.col as f64;
    d_col.atan2(d_row)
}
