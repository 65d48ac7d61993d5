use base437::{Codec, MappingRegistry, OutputShape};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const SIZES: [usize; 5] = [64, 256, 1024, 4096, 16384];

fn get_codec(name: &str) -> Codec {
    let registry = MappingRegistry::load_default().unwrap();
    Codec::new(registry.build(name).unwrap())
}

fn sample(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let codec = get_codec("base437");
    let mut group = c.benchmark_group("encode");

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let data = sample(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| codec.encode(black_box(data)));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let codec = get_codec("base437");
    let mut group = c.benchmark_group("decode");

    for size in SIZES {
        let encoded = codec.encode(sample(size));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| codec.decode(black_box(encoded)).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_integer_sequence(c: &mut Criterion) {
    let codec = get_codec("html");
    let mut group = c.benchmark_group("decode_integer_sequence");

    for size in SIZES {
        let encoded = codec.encode(sample(size));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &encoded, |b, encoded| {
            b.iter(|| {
                codec
                    .decode_as(black_box(encoded), OutputShape::IntegerSequence)
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_to_standard_encoding(c: &mut Criterion) {
    let codec = get_codec("base437");
    let mut group = c.benchmark_group("to_standard_encoding");

    for size in SIZES {
        let locator = codec.to_data_locator("application/octet-stream", sample(size));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &locator, |b, locator| {
            b.iter(|| codec.to_standard_encoding(black_box(locator)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_decode_integer_sequence,
    bench_to_standard_encoding
);
criterion_main!(benches);
