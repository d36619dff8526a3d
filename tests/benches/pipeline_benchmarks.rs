//! # postshortly Pipeline Benchmarks
//!
//! | Subsystem | Operation |
//! |-----------|-----------|
//! | ps-01 Signature Verification | sanitize + Ed25519 verify |
//! | ps-03 Statistics | full aggregate over N updates |
//! | ps-04 Ingestion | submit through the whole pipeline |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ps_01_signature_verification::test_helpers::{signed_candidate, signed_request_json, TestKeypair};
use ps_01_signature_verification::verify_update;
use ps_03_statistics::{aggregate, SnapshotLimits, StatisticsMode};
use ps_tests::fixtures::TestNode;
use shared_types::{PublicKey, RequestCounters, SignatureBytes, StatusUpdate};

fn bench_signature_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("ps-01-signature-verification");
    let keys = TestKeypair::generate();
    let candidate = signed_candidate(&keys, "benchmark status update", Some("https://example.com"));

    group.throughput(Throughput::Elements(1));
    group.bench_function("verify_update", |b| {
        b.iter(|| verify_update(black_box(candidate.clone())).unwrap())
    });
    group.finish();
}

fn bench_statistics_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ps-03-statistics");
    let limits = SnapshotLimits::with_rate_limit(1);

    for size in [100usize, 10_000] {
        let updates: Vec<StatusUpdate> = (0..size)
            .map(|i| StatusUpdate {
                id: i as u64 + 1,
                timestamp: i as u64,
                body: "x".into(),
                link: None,
                pubkey: PublicKey([(i % 251) as u8; 32]),
                signature: SignatureBytes([0; 64]),
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("aggregate", size), &updates, |b, updates| {
            b.iter(|| aggregate(black_box(updates), RequestCounters::default(), &limits))
        });
    }
    group.finish();
}

fn bench_ingestion_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("ps-04-ingestion");
    let node = TestNode::new(1_000_000, StatisticsMode::Synchronous);
    let keys = TestKeypair::generate();
    let raw = signed_request_json(&keys, "benchmark status update", None);

    group.throughput(Throughput::Elements(1));
    group.bench_function("submit", |b| {
        b.iter(|| node.ingestion.submit(black_box(raw.as_bytes())).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_signature_verification,
    bench_statistics_aggregate,
    bench_ingestion_submit
);
criterion_main!(benches);
