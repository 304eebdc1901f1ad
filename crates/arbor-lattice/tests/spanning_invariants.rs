use arbor_core::rng::RngHandle;
use arbor_core::{Edge, Periodic, Vertex};
use arbor_lattice::{
    aldous_broder, canonical_hash, serpentine_path, tree_from_json, tree_to_json, LatticeGraph,
    SpanningTree,
};

#[test]
fn aldous_broder_produces_a_spanning_tree() {
    let graph = LatticeGraph::build(6, 7, Periodic::none()).unwrap();
    let mut rng = RngHandle::from_seed(11);
    let tree = aldous_broder(&graph, &mut rng).unwrap();
    assert_eq!(tree.edge_count(), graph.vertex_count() - 1);
    tree.validate_against(&graph).unwrap();
}

#[test]
fn aldous_broder_covers_periodic_lattices() {
    let graph = LatticeGraph::build(5, 5, Periodic::both()).unwrap();
    let mut rng = RngHandle::from_seed(23);
    let tree = aldous_broder(&graph, &mut rng).unwrap();
    tree.validate_against(&graph).unwrap();
}

#[test]
fn serpentine_path_is_a_hamiltonian_path() {
    let graph = LatticeGraph::build(4, 5, Periodic::none()).unwrap();
    let tree = serpentine_path(4, 5).unwrap();
    tree.validate_against(&graph).unwrap();

    // A path has exactly two leaves and its ends are the extremes of a BFS.
    let leaves = (0..tree.vertex_count())
        .filter(|&idx| tree.neighbor_indices(idx).len() == 1)
        .count();
    assert_eq!(leaves, 2);
    let dist = tree.bfs_distances(0, None);
    let max = dist.iter().map(|d| d.unwrap()).max().unwrap();
    assert_eq!(max, tree.vertex_count() - 1);
}

#[test]
fn path_between_follows_tree_edges() {
    let tree = serpentine_path(3, 3).unwrap();
    let from = tree.index_of(Vertex::new(0, 0)).unwrap();
    let to = tree.index_of(Vertex::new(2, 0)).unwrap();
    let path = tree.path_between(from, to).unwrap();
    assert_eq!(path.first(), Some(&from));
    assert_eq!(path.last(), Some(&to));
    for pair in path.windows(2) {
        let edge = Edge::new(tree.vertex_at(pair[0]), tree.vertex_at(pair[1]));
        assert!(tree.contains_edge(edge));
    }
    // The serpentine path visits all nine vertices between its endpoints.
    assert_eq!(path.len(), 9);
}

#[test]
fn validation_rejects_malformed_trees() {
    let graph = LatticeGraph::build(3, 3, Periodic::none()).unwrap();

    let short = SpanningTree::empty(3, 3).unwrap();
    let err = short.validate_against(&graph).unwrap_err();
    assert_eq!(err.info().code, "invalid-initial-tree");

    // Right edge count (8) but disconnected: rows 0-1 form a component
    // with a cycle while row 2 only connects horizontally.
    let mut forest = SpanningTree::empty(3, 3).unwrap();
    for col in 0..2 {
        forest
            .add_edge(Edge::new(Vertex::new(0, col), Vertex::new(0, col + 1)))
            .unwrap();
        forest
            .add_edge(Edge::new(Vertex::new(1, col), Vertex::new(1, col + 1)))
            .unwrap();
        forest
            .add_edge(Edge::new(Vertex::new(2, col), Vertex::new(2, col + 1)))
            .unwrap();
    }
    forest
        .add_edge(Edge::new(Vertex::new(0, 0), Vertex::new(1, 0)))
        .unwrap();
    forest
        .add_edge(Edge::new(Vertex::new(0, 1), Vertex::new(1, 1)))
        .unwrap();
    let err = forest.validate_against(&graph).unwrap_err();
    assert_eq!(err.info().code, "invalid-initial-tree");

    // Right edge count but one edge is not grid-adjacent.
    let mut foreign = serpentine_path(3, 3).unwrap();
    foreign
        .remove_edge(Edge::new(Vertex::new(0, 0), Vertex::new(0, 1)))
        .unwrap();
    foreign
        .add_edge(Edge::new(Vertex::new(0, 0), Vertex::new(1, 1)))
        .unwrap();
    let err = foreign.validate_against(&graph).unwrap_err();
    assert_eq!(err.info().code, "invalid-initial-tree");
}

#[test]
fn canonical_hash_ignores_edge_insertion_order() {
    let mut a = SpanningTree::empty(1, 3).unwrap();
    a.add_edge(Edge::new(Vertex::new(0, 0), Vertex::new(0, 1))).unwrap();
    a.add_edge(Edge::new(Vertex::new(0, 1), Vertex::new(0, 2))).unwrap();

    let mut b = SpanningTree::empty(1, 3).unwrap();
    b.add_edge(Edge::new(Vertex::new(0, 1), Vertex::new(0, 2))).unwrap();
    b.add_edge(Edge::new(Vertex::new(0, 0), Vertex::new(0, 1))).unwrap();

    assert_eq!(canonical_hash(&a), canonical_hash(&b));

    let c = SpanningTree::empty(3, 1).unwrap();
    assert_ne!(canonical_hash(&a), canonical_hash(&c));
}

#[test]
fn json_snapshot_round_trips() {
    let tree = serpentine_path(4, 4).unwrap();
    let json = tree_to_json(&tree).unwrap();
    let restored = tree_from_json(&json).unwrap();
    assert_eq!(canonical_hash(&tree), canonical_hash(&restored));
}

#[test]
fn json_snapshot_rejects_duplicate_edges() {
    let json = r#"{"rows":1,"cols":3,"edges":[[{"row":0,"col":0},{"row":0,"col":1}],[{"row":0,"col":1},{"row":0,"col":0}]]}"#;
    let err = tree_from_json(json).unwrap_err();
    assert_eq!(err.info().code, "duplicate-edge");
}
