use arbor_core::rng::RngHandle;
use arbor_core::{Edge, Periodic, Vertex};
use arbor_lattice::{aldous_broder, canonical_hash, tree_from_json, tree_to_json, EdgeSet, LatticeGraph};
use proptest::prelude::*;

proptest! {
    #[test]
    fn random_walk_trees_span_the_lattice(
        seed in any::<u64>(),
        rows in 1usize..8,
        cols in 1usize..8,
        wrap_rows in any::<bool>(),
        wrap_cols in any::<bool>(),
    ) {
        let periodic = Periodic { rows: wrap_rows, cols: wrap_cols };
        let graph = LatticeGraph::build(rows, cols, periodic).unwrap();
        let mut rng = RngHandle::from_seed(seed);
        let tree = aldous_broder(&graph, &mut rng).unwrap();

        prop_assert_eq!(tree.edge_count(), graph.vertex_count() - 1);
        tree.validate_against(&graph).unwrap();

        let json = tree_to_json(&tree).unwrap();
        let restored = tree_from_json(&json).unwrap();
        prop_assert_eq!(canonical_hash(&tree), canonical_hash(&restored));
    }

    #[test]
    fn edge_set_tracks_membership_under_churn(
        seed in any::<u64>(),
        ops in prop::collection::vec((0usize..6, 0usize..6, any::<bool>()), 1..64),
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let mut set = EdgeSet::new();
        let mut mirror = std::collections::BTreeSet::new();

        for (row, col, insert) in ops {
            let edge = Edge::new(Vertex::new(row, col), Vertex::new(row, col + 1));
            if insert {
                prop_assert_eq!(set.insert(edge), mirror.insert(edge));
            } else {
                prop_assert_eq!(set.remove(edge), mirror.remove(&edge));
            }
            prop_assert_eq!(set.len(), mirror.len());
        }

        for edge in &mirror {
            prop_assert!(set.contains(*edge));
        }
        prop_assert_eq!(set.sorted(), mirror.iter().copied().collect::<Vec<_>>());
        if let Some(drawn) = set.choose(&mut rng) {
            prop_assert!(mirror.contains(&drawn));
        } else {
            prop_assert!(mirror.is_empty());
        }
    }
}
