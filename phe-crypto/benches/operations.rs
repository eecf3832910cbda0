use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_bigint::{BigInt, BigUint};
use phe_crypto::paillier;
use phe_crypto::phe::batch;
use phe_crypto::phe::{HeKit, SchemaType};
use phe_crypto::ring::random::random_bits;
use phe_crypto::ring::{FixedBaseTable, Ring};
use phe_crypto::{Encryptor, Evaluator, KeyGenerator as _};

use std::sync::Arc;

fn bench_fixed_base(c: &mut Criterion) {
    let modulus = BigUint::from(1u32) << 2047u32 | BigUint::from(159u32);
    let ring = Ring::try_with(modulus.clone()).expect("ring");
    let base = random_bits(2000);
    let table = FixedBaseTable::new(&base, &ring, 1024);
    let exp = random_bits(1024);

    let mut group = c.benchmark_group("fixed_base_2048");
    group.bench_function("table", |b| b.iter(|| black_box(table.pow(black_box(&exp)))));
    group.bench_function("modpow", |b| {
        b.iter(|| black_box(base.modpow(black_box(&exp), &modulus)))
    });
    group.finish();
}

fn bench_paillier_ops(c: &mut Criterion) {
    let (_, pk) = paillier::KeyGenerator::generate(2048).expect("keys");
    let pk = Arc::new(pk);
    let encryptor = paillier::Encryptor::new(pk.clone());
    let evaluator = paillier::Evaluator::new(pk);

    let a = encryptor.encrypt(&BigInt::from(1_000)).expect("encrypt");
    let b = encryptor.encrypt(&BigInt::from(-7)).expect("encrypt");

    let mut group = c.benchmark_group("paillier_2048");
    group.bench_function("add", |bench| bench.iter(|| evaluator.add(&a, &b).expect("add")));
    group.bench_function("add_plain", |bench| {
        bench.iter(|| evaluator.add_plain(&a, &BigInt::from(5)).expect("add_plain"))
    });
    group.bench_function("mul_small", |bench| {
        bench.iter(|| evaluator.mul(&a, &BigInt::from(1_000_003)).expect("mul"))
    });
    group.bench_function("randomize", |bench| {
        bench.iter(|| evaluator.randomize(&a).expect("randomize"))
    });
    group.finish();
}

fn bench_batch_sum(c: &mut Criterion) {
    let kit = HeKit::generate(SchemaType::Paillier, 1024).expect("kit");
    let mut group = c.benchmark_group("batch_sum_paillier_1024");

    for size in [16usize, 256] {
        let plaintexts: Vec<_> = (0..size as i64).map(BigInt::from).collect();
        let cts = batch::encrypt_all(kit.encryptor(), &plaintexts).expect("encrypt");

        group.bench_with_input(BenchmarkId::from_parameter(size), &cts, |b, cts| {
            b.iter(|| batch::sum(kit.evaluator(), cts).expect("sum"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fixed_base, bench_paillier_ops, bench_batch_sum);
criterion_main!(benches);
