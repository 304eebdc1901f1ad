use arbor_core::{Periodic, RngHandle};
use arbor_mcmc::config::EnergyParams;
use arbor_mcmc::{build_sampler, build_state};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_chain_steps(c: &mut Criterion) {
    c.bench_function("step_30x40_straight", |b| {
        let mut rng = RngHandle::from_seed(0xBE7C);
        let state = build_state(
            30,
            40,
            EnergyParams::straight_corridors(),
            None,
            Periodic::none(),
            &mut rng,
        )
        .unwrap();
        let mut sampler = build_sampler(state, 0.1, RngHandle::from_seed(0xBE7D)).unwrap();
        b.iter(|| sampler.step().unwrap());
    });

    c.bench_function("step_20x20_vortex", |b| {
        let mut rng = RngHandle::from_seed(0xF00D);
        let pivot = arbor_core::Vertex::new(10, 10);
        let state = build_state(
            20,
            20,
            EnergyParams::vortex_swirl(pivot),
            None,
            Periodic::none(),
            &mut rng,
        )
        .unwrap();
        let mut sampler = build_sampler(state, 0.1, RngHandle::from_seed(0xF00E)).unwrap();
        b.iter(|| sampler.step().unwrap());
    });
}

criterion_group!(benches, bench_chain_steps);
criterion_main!(benches);
