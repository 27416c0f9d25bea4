//! Throughput benchmarks for the memory-backed ledger.

use criterion::{criterion_group, criterion_main, Criterion};

use halaltrace::{Ledger, LedgerConfig};
use halaltrace_core::{AccountId, BatchId, BatchStatus};
use halaltrace_roles::Role;
use halaltrace_store::MemoryStore;

fn staffed() -> Ledger<MemoryStore> {
    let admin = AccountId::derive("admin");
    let ledger = Ledger::open(MemoryStore::new(), admin, LedgerConfig::default()).unwrap();
    ledger
        .grant_role(&admin, Role::Producer, &AccountId::derive("producer"), 1)
        .unwrap();
    ledger
        .grant_role(&admin, Role::Producer, &AccountId::derive("producer-2"), 2)
        .unwrap();
    ledger
}

fn bench_create_batch(c: &mut Criterion) {
    let ledger = staffed();
    let producer = AccountId::derive("producer");
    let mut i = 0u64;

    c.bench_function("create_batch", |b| {
        b.iter(|| {
            i += 1;
            ledger
                .create_batch(
                    &producer,
                    BatchId::new(format!("B{i}")),
                    "Chicken breast",
                    i as i64,
                )
                .unwrap()
        })
    });
}

fn bench_transfer_batch(c: &mut Criterion) {
    let ledger = staffed();
    let producer = AccountId::derive("producer");
    let other = AccountId::derive("producer-2");
    ledger
        .create_batch(&producer, BatchId::from("B1"), "Chicken breast", 1)
        .unwrap();
    let b1 = BatchId::from("B1");
    let mut now = 1i64;

    c.bench_function("transfer_batch_producer_to_producer", |b| {
        b.iter(|| {
            now += 1;
            let owner = ledger.get_batch(&b1).unwrap().current_owner;
            let to = if owner == producer { other } else { producer };
            ledger.transfer_batch(&owner, &b1, &to, now).unwrap()
        })
    });
}

fn bench_history_read(c: &mut Criterion) {
    let ledger = staffed();
    let producer = AccountId::derive("producer");
    let b1 = BatchId::from("B1");
    ledger
        .create_batch(&producer, b1.clone(), "Chicken breast", 1)
        .unwrap();
    for i in 0..100i64 {
        ledger
            .update_status(
                &producer,
                &b1,
                BatchStatus::Custom(format!("Stage-{i}")),
                2 + i,
            )
            .unwrap();
    }

    c.bench_function("history_read_100_entries", |b| {
        b.iter(|| ledger.history(&b1).unwrap())
    });
}

criterion_group!(
    benches,
    bench_create_batch,
    bench_transfer_batch,
    bench_history_read
);
criterion_main!(benches);
