//! Criterion benchmarks for nimbus-poi critical operations.
//!
//! Covers: transition-graph construction, sparse matrix-vector products,
//! and the full importance recalculation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use nimbus_core::account::AccountState;
use nimbus_core::types::{Address, Outlink};
use nimbus_math::{ColumnVector, Matrix, SparseMatrix};
use nimbus_poi::{ImportanceCalculator, PoiContext, PoiOptions, SingletonClustering};

const HEIGHT: u64 = 100_000;
const ACCOUNT_COUNT: usize = 500;

fn address(index: usize) -> Address {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&(index as u64).to_le_bytes());
    Address::from_bytes(bytes)
}

fn bench_options() -> PoiOptions {
    PoiOptions {
        min_harvester_balance: 1_000,
        min_outlink_weight: 1,
        ..PoiOptions::default()
    }
}

// A reproducible transfer graph: every account holds a balance and sends
// a handful of random-sized transfers to random counterparties.
fn synthetic_accounts() -> Vec<AccountState> {
    let mut rng = StdRng::seed_from_u64(0x1337);
    (0..ACCOUNT_COUNT)
        .map(|index| {
            let mut state = AccountState::new(address(index));
            state.set_vested_balance(1, rng.gen_range(1_000..1_000_000));
            let mut heights: Vec<u64> =
                (0..5).map(|_| HEIGHT - rng.gen_range(0..10_000u64)).collect();
            heights.sort_unstable();
            for height in heights {
                state.add_outlink(Outlink {
                    height,
                    amount: rng.gen_range(100..100_000),
                    recipient: address(rng.gen_range(0..ACCOUNT_COUNT)),
                });
            }
            state
        })
        .collect()
}

fn bench_context_build(c: &mut Criterion) {
    let accounts = synthetic_accounts();
    let options = bench_options();

    c.bench_function("transition_graph_build", |b| {
        b.iter(|| {
            PoiContext::new(HEIGHT, black_box(&accounts), &options, &SingletonClustering)
                .unwrap()
        })
    });
}

fn bench_sparse_multiply(c: &mut Criterion) {
    let accounts = synthetic_accounts();
    let options = bench_options();
    let context = PoiContext::new(HEIGHT, &accounts, &options, &SingletonClustering).unwrap();
    let vector = {
        let mut v = ColumnVector::new(context.account_count()).unwrap();
        v.set_all(1.0);
        v.normalize();
        v
    };

    c.bench_function("sparse_matrix_multiply", |b| {
        b.iter(|| context.outlink_matrix().multiply(black_box(&vector)).unwrap())
    });
}

fn bench_sparse_set(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let writes: Vec<(usize, usize, f64)> = (0..4_096)
        .map(|_| {
            (
                rng.gen_range(0..ACCOUNT_COUNT),
                rng.gen_range(0..ACCOUNT_COUNT),
                rng.gen_range(0.1..100.0),
            )
        })
        .collect();

    c.bench_function("sparse_matrix_set", |b| {
        b.iter(|| {
            let mut matrix = SparseMatrix::new(ACCOUNT_COUNT, ACCOUNT_COUNT, 8);
            for &(row, col, value) in black_box(&writes) {
                matrix.set_unchecked(row, col, value);
            }
            matrix
        })
    });
}

fn bench_full_recalculation(c: &mut Criterion) {
    let accounts = synthetic_accounts();
    let calculator = ImportanceCalculator::new(bench_options());

    c.bench_function("importance_recalculation", |b| {
        b.iter(|| {
            let mut accounts = accounts.clone();
            calculator.recalculate(HEIGHT, black_box(&mut accounts)).unwrap();
            accounts
        })
    });
}

criterion_group!(
    benches,
    bench_context_build,
    bench_sparse_multiply,
    bench_sparse_set,
    bench_full_recalculation
);
criterion_main!(benches);
