//! Throughput of the decimal codecs and conversions.
//!
//! Cases are swept over digit count and over exponent size, the two inputs
//! that drive the cost of every operation here.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use vardecimal::Decimal;

const DIGIT_COUNTS: [usize; 4] = [2, 16, 128, 1024];

/// `digits` significant digits 1..9 repeating, scaled by `10^exponent`.
fn literal(digits: usize, exponent: &str) -> String {
    let mantissa: String = (0..digits)
        .map(|i| char::from(b'1' + u8::try_from(i % 9).unwrap_or(0)))
        .collect();
    format!("0.{mantissa}e{exponent}")
}

fn by_digit_count() -> Vec<(usize, Decimal)> {
    DIGIT_COUNTS
        .iter()
        .map(|&n| (n, literal(n, "-3").parse().unwrap()))
        .collect()
}

/// Same two-digit mantissa under exponents of growing width
fn by_exponent() -> Vec<(&'static str, Decimal)> {
    [
        ("e0", "0"),
        ("e-40", "-40"),
        ("e+2^31", "2147483653"),
        ("e-10^20", "-36546632732954564791"),
        ("e+10^60", "+1000000000000000000000000000000000000000000000000000000000001"),
    ]
    .into_iter()
    .map(|(name, exponent)| (name, literal(2, exponent).parse().unwrap()))
    .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for n in DIGIT_COUNTS {
        let text = literal(n, "7");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("digits", n), &text, |b, text| {
            b.iter(|| black_box(text.as_str()).parse::<Decimal>().unwrap());
        });
    }

    for exponent in ["5", "-2147483646", "-36546632732954564791"] {
        let text = literal(4, exponent);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("exponent", exponent), &text, |b, text| {
            b.iter(|| black_box(text.as_str()).parse::<Decimal>().unwrap());
        });
    }

    group.finish();
}

fn bench_double(c: &mut Criterion) {
    let mut group = c.benchmark_group("double");

    // Exact expansion grows with the binary exponent: 751 digits at the bottom
    let doubles = [
        ("one_tenth", 0.1),
        ("max", f64::MAX),
        ("min_normal", f64::MIN_POSITIVE),
        ("denorm_min", f64::from_bits(1)),
    ];
    for (name, value) in doubles {
        group.bench_with_input(BenchmarkId::new("from_f64", name), &value, |b, &v| {
            b.iter(|| Decimal::from_f64(black_box(v)).unwrap());
        });
    }

    for (name, value) in doubles.iter().take(3) {
        let decimal = Decimal::from_f64(*value).unwrap();
        group.bench_with_input(BenchmarkId::new("to_f64", name), &decimal, |b, d| {
            b.iter(|| black_box(d).to_f64().unwrap());
        });
    }

    group.finish();
}

fn bench_comparable(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparable");

    for (n, decimal) in by_digit_count() {
        let key = decimal.encode_comparable();
        group.throughput(Throughput::Bytes(key.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", n), &decimal, |b, d| {
            let mut buf = Vec::with_capacity(key.len());
            b.iter(|| {
                buf.clear();
                black_box(d).encode_comparable_into(&mut buf);
                black_box(buf.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("decode", n), &key, |b, key| {
            b.iter(|| Decimal::decode_comparable(black_box(key)).unwrap());
        });
    }

    group.throughput(Throughput::Elements(1));
    for (name, decimal) in by_exponent() {
        let key = decimal.encode_comparable();
        group.bench_with_input(BenchmarkId::new("encode_exponent", name), &decimal, |b, d| {
            b.iter(|| black_box(d).encode_comparable());
        });
        group.bench_with_input(BenchmarkId::new("decode_exponent", name), &key, |b, key| {
            b.iter(|| Decimal::decode_comparable(black_box(key)).unwrap());
        });
    }

    group.finish();
}

fn bench_big_decimal(c: &mut Criterion) {
    let mut group = c.benchmark_group("big_decimal");

    for (n, decimal) in by_digit_count() {
        let Some(wire) = decimal.encode_big_decimal() else {
            continue;
        };
        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", n), &decimal, |b, d| {
            b.iter(|| black_box(d).encode_big_decimal());
        });
        group.bench_with_input(BenchmarkId::new("decode", n), &wire, |b, wire| {
            b.iter(|| Decimal::decode_big_decimal(black_box(wire)).unwrap());
        });
    }

    // Out of range is decided before the unscaled value is built
    let far: Decimal = literal(128, "-36546632732954564791").parse().unwrap();
    group.throughput(Throughput::Elements(1));
    group.bench_function("encode/out_of_range", |b| {
        b.iter(|| black_box(&far).encode_big_decimal());
    });

    group.finish();
}

fn bench_sort_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_1000");

    let decimals: Vec<Decimal> = (0..1000u32)
        .map(|i| {
            let exponent = i64::from(i % 37) - 18;
            let sign = if i % 3 == 0 { "-" } else { "" };
            format!("{sign}{}.{}e{exponent}", i * 7919 % 1000, i)
                .parse()
                .unwrap()
        })
        .collect();
    let keys: Vec<Vec<u8>> = decimals.iter().map(Decimal::encode_comparable).collect();

    group.throughput(Throughput::Elements(decimals.len() as u64));
    group.bench_function("decimal_ord", |b| {
        b.iter_batched(
            || decimals.clone(),
            |mut v| {
                v.sort();
                v
            },
            criterion::BatchSize::LargeInput,
        );
    });
    group.bench_function("comparable_bytes", |b| {
        b.iter_batched(
            || keys.clone(),
            |mut v| {
                v.sort();
                v
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_double,
    bench_comparable,
    bench_big_decimal,
    bench_sort_keys
);
criterion_main!(benches);
