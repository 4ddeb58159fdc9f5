use criterion::{criterion_group, criterion_main, Criterion};

use kyber_r3::traits::Kem;
use kyber_r3::{kyber_1024, kyber_512, kyber_768};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut k512 = kyber_512::Kyber::new();
    let (pk_512, sk_512) = k512.try_keygen().unwrap();
    let (ct_512, _) = k512.try_encaps(&pk_512).unwrap();
    let mut k768 = kyber_768::Kyber::new();
    let (pk_768, sk_768) = k768.try_keygen().unwrap();
    let (ct_768, _) = k768.try_encaps(&pk_768).unwrap();
    let mut k1024 = kyber_1024::Kyber::new();
    let (pk_1024, sk_1024) = k1024.try_keygen().unwrap();
    let (ct_1024, _) = k1024.try_encaps(&pk_1024).unwrap();

    c.bench_function("kyber_512 keygen", |b| b.iter(|| k512.try_keygen()));
    c.bench_function("kyber_512 encaps", |b| b.iter(|| k512.try_encaps(&pk_512)));
    c.bench_function("kyber_512 decaps", |b| b.iter(|| k512.try_decaps(&sk_512, &ct_512)));

    c.bench_function("kyber_768 keygen", |b| b.iter(|| k768.try_keygen()));
    c.bench_function("kyber_768 encaps", |b| b.iter(|| k768.try_encaps(&pk_768)));
    c.bench_function("kyber_768 decaps", |b| b.iter(|| k768.try_decaps(&sk_768, &ct_768)));

    c.bench_function("kyber_1024 keygen", |b| b.iter(|| k1024.try_keygen()));
    c.bench_function("kyber_1024 encaps", |b| b.iter(|| k1024.try_encaps(&pk_1024)));
    c.bench_function("kyber_1024 decaps", |b| b.iter(|| k1024.try_decaps(&sk_1024, &ct_1024)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
