use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ledger_rlp::{record, Decode, DecodeExt, Encode, Schema, Value};
use std::hint::black_box;

record! {
    #[derive(Clone)]
    struct Transfer {
        nonce: u64,
        to: [u8; 20],
        amount: u64,
        memo: Option<Bytes>,
        #[tail]
        extra: Vec<Bytes>,
    }
}

fn transfer(i: u64) -> Transfer {
    Transfer {
        nonce: i,
        to: [i as u8; 20],
        amount: i * 1_000_003,
        memo: (i % 2 == 0).then(|| Bytes::from(vec![0xAB; 32])),
        extra: Vec::new(),
    }
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for &n in &[1usize, 16, 256, 4096] {
        let batch: Vec<Transfer> = (0..n as u64).map(transfer).collect();
        group.bench_with_input(BenchmarkId::new("transfers", n), &batch, |b, batch| {
            b.iter(|| black_box(batch.encode()));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &n in &[1usize, 16, 256, 4096] {
        let batch: Vec<Transfer> = (0..n as u64).map(transfer).collect();
        let encoded = batch.encode().freeze();
        group.bench_with_input(BenchmarkId::new("typed", n), &encoded, |b, encoded| {
            b.iter(|| black_box(Vec::<Transfer>::decode(encoded.clone()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("dynamic", n), &encoded, |b, encoded| {
            b.iter(|| black_box(Value::decode_cfg(encoded.clone(), &Schema::Any).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
