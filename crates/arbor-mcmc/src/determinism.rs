use arbor_core::derive_substream_seed;

/// Derives the deterministic seed for the initial-tree random walk.
pub fn initial_tree_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 0)
}

/// Derives the deterministic seed for the chain's proposal and acceptance
/// draws. Distinct from the walk substream so changing the number of walk
/// steps never perturbs the chain.
pub fn chain_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 1)
}
