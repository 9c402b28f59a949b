//! 短链注册表与校验性能基准测试

use std::hint::black_box;
use std::sync::Arc;

use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minilinker::services::{NoopLogSink, ShortenFlow, ShortenSettings, validate};
use minilinker::storage::{CandidateInput, UrlRecord, UrlRegistry};
use minilinker::utils::url_validator::validate_url;

fn seeded_registry(size: usize) -> UrlRegistry {
    let now = Utc::now();
    let mut registry = UrlRegistry::new();
    for i in 0..size {
        // 一半记录已过期
        let created = if i % 2 == 0 { now } else { now - Duration::hours(2) };
        registry.add(UrlRecord::new(
            format!("https://example.com/page/{}", i),
            format!("code{}", i),
            created,
            30,
        ));
    }
    registry
}

// ============== find_active 基准测试 ==============

fn bench_find_active(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/find_active");
    let now = Utc::now();

    for size in [100, 10_000] {
        let registry = seeded_registry(size);
        group.bench_with_input(BenchmarkId::new("hit", size), &registry, |b, registry| {
            b.iter(|| registry.find_active(black_box("code0"), now));
        });
        group.bench_with_input(BenchmarkId::new("expired", size), &registry, |b, registry| {
            b.iter(|| registry.find_active(black_box("code1"), now));
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &registry, |b, registry| {
            b.iter(|| registry.find_active(black_box("nothere"), now));
        });
    }

    group.finish();
}

// ============== validate 基准测试 ==============

fn bench_validate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator/batch");
    let registry = seeded_registry(1_000);

    let rows: Vec<CandidateInput> = (0..5)
        .map(|i| {
            CandidateInput::new(format!("https://site{}.example.com/path?q={}", i, i))
                .with_validity("45")
                .with_shortcode(format!("fresh{}", i))
        })
        .collect();

    group.bench_function("five_valid_rows", |b| {
        b.iter(|| {
            let errors = validate(black_box(&rows), registry.all(), &NoopLogSink);
            assert!(errors.is_empty());
        });
    });

    let bad_rows: Vec<CandidateInput> = (0..5)
        .map(|i| {
            CandidateInput::new("not a url")
                .with_validity("soon")
                .with_shortcode(format!("code{}", i))
        })
        .collect();

    group.bench_function("five_invalid_rows", |b| {
        b.iter(|| {
            let errors = validate(black_box(&bad_rows), registry.all(), &NoopLogSink);
            assert_eq!(errors.len(), 15);
        });
    });

    group.finish();
}

// ============== URL 校验基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("valid_https", |b| {
        b.iter(|| validate_url(black_box("https://example.com/a/b?c=d#e")).is_ok());
    });

    let long_url = format!("https://example.com/{}", "a".repeat(2000));
    group.bench_function("valid_long", |b| {
        b.iter(|| validate_url(black_box(&long_url)).is_ok());
    });

    group.bench_function("invalid_scheme", |b| {
        b.iter(|| validate_url(black_box("javascript:alert(1)")).is_err());
    });

    group.finish();
}

// ============== 生成流程基准测试 ==============

fn bench_submit_generated(c: &mut Criterion) {
    let mut group = c.benchmark_group("shorten/submit");
    let flow = ShortenFlow::new(ShortenSettings::default(), Arc::new(NoopLogSink));
    let rows: Vec<CandidateInput> = (0..5)
        .map(|i| CandidateInput::new(format!("https://site{}.example.com", i)))
        .collect();

    group.bench_function("five_generated_codes", |b| {
        b.iter_batched(
            UrlRegistry::new,
            |mut registry| {
                let created = flow.submit(&rows, &mut registry);
                assert!(created.is_ok());
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_find_active,
    bench_validate_batch,
    bench_validate_url,
    bench_submit_generated,
);
criterion_main!(benches);
