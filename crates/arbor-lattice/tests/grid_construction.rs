use arbor_core::{Edge, Periodic, Vertex};
use arbor_lattice::LatticeGraph;

#[test]
fn open_grid_edge_count_matches_formula() {
    let graph = LatticeGraph::build(3, 4, Periodic::none()).unwrap();
    assert_eq!(graph.vertex_count(), 12);
    // 3 rows of 3 horizontals + 4 cols of 2 verticals.
    assert_eq!(graph.edge_count(), 3 * 3 + 4 * 2);
    assert_eq!(
        graph.edge_count(),
        LatticeGraph::expected_edge_count(3, 4, Periodic::none())
    );
}

#[test]
fn periodic_rows_add_one_wrap_edge_per_column() {
    let open = LatticeGraph::build(4, 5, Periodic::none()).unwrap();
    let wrapped = LatticeGraph::build(4, 5, Periodic { rows: true, cols: false }).unwrap();
    assert_eq!(wrapped.edge_count(), open.edge_count() + 5);
    assert!(wrapped.contains_edge(Edge::new(Vertex::new(0, 2), Vertex::new(3, 2))));
    assert!(!open.contains_edge(Edge::new(Vertex::new(0, 2), Vertex::new(3, 2))));
}

#[test]
fn wraparound_is_skipped_on_short_axes() {
    // A wrap edge on an axis of length 2 would duplicate an existing edge.
    let graph = LatticeGraph::build(2, 5, Periodic { rows: true, cols: false }).unwrap();
    assert_eq!(
        graph.edge_count(),
        LatticeGraph::expected_edge_count(2, 5, Periodic::none())
    );
}

#[test]
fn torus_wraps_both_axes() {
    let graph = LatticeGraph::build(5, 6, Periodic::both()).unwrap();
    let open_count = 5 * 5 + 6 * 4;
    assert_eq!(graph.edge_count(), open_count + 6 + 5);
    let corner = graph.neighbors(Vertex::new(0, 0)).unwrap();
    assert_eq!(corner.len(), 4);
}

#[test]
fn zero_dimensions_are_rejected() {
    let err = LatticeGraph::build(0, 4, Periodic::none()).unwrap_err();
    assert_eq!(err.info().code, "invalid-dimensions");
    let err = LatticeGraph::build(3, 0, Periodic::none()).unwrap_err();
    assert_eq!(err.info().code, "invalid-dimensions");
}

#[test]
fn neighbor_queries_respect_bounds() {
    let graph = LatticeGraph::build(3, 3, Periodic::none()).unwrap();
    let center = graph.neighbors(Vertex::new(1, 1)).unwrap();
    assert_eq!(center.len(), 4);
    let corner = graph.neighbors(Vertex::new(0, 0)).unwrap();
    assert_eq!(corner.len(), 2);
    let err = graph.neighbors(Vertex::new(3, 0)).unwrap_err();
    assert_eq!(err.info().code, "vertex-outside-lattice");
}

#[test]
fn single_vertex_grid_has_no_edges() {
    let graph = LatticeGraph::build(1, 1, Periodic::both()).unwrap();
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}
