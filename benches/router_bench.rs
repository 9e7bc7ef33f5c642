//! 导航系统性能基准测试
//!
//! 使用 Criterion 框架进行性能测试，包括：
//! - 路由表解析基准（启用/禁用缓存）
//! - 不同路由表大小的解析性能
//! - 导航压入基准
//! - 不同订阅者数量的事件分发性能

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::HashMap;

use nav_core::router::{MemoryHistory, RouteTable, Router};
use nav_core::{RouteDef, StaticPage};

// ============================================================================
// 测试辅助函数
// ============================================================================

/// 构建指定大小的路由表
fn build_table(size: usize, cache_enabled: bool) -> RouteTable {
    let mut builder = RouteTable::builder();
    if !cache_enabled {
        builder = builder.without_cache();
    }

    for i in 0..size {
        let path = format!("/page{}", i);
        let name = format!("page_{}", i);
        builder = builder.route(RouteDef::with_page(
            &path,
            &name,
            StaticPage::new(&name, ""),
        ));
    }

    builder.build().unwrap()
}

/// 构建带动态路由的演示路由表
fn build_mixed_table() -> RouteTable {
    RouteTable::builder()
        .route(RouteDef::with_page("/", "home", StaticPage::new("Home", "")))
        .route(RouteDef::with_page(
            "/xaffman",
            "Xaffman",
            StaticPage::new("Xaffman", ""),
        ))
        .route(RouteDef::with_page(
            "/algorithm/:id",
            "algorithm",
            StaticPage::new("Algorithm", ""),
        ))
        .route(RouteDef::with_page(
            "/docs/*rest",
            "docs",
            StaticPage::new("Docs", ""),
        ))
        .build()
        .unwrap()
}

// ============================================================================
// 路由表解析基准测试
// ============================================================================

/// 缓存命中与未命中的解析对比
fn resolve_benchmark(c: &mut Criterion) {
    let cached = build_table(100, true);
    let uncached = build_table(100, false);

    // 预热缓存
    let _ = cached.resolve("/page50");

    c.bench_function("resolve_cached", |b| {
        b.iter(|| cached.resolve(black_box("/page50")));
    });

    c.bench_function("resolve_uncached", |b| {
        b.iter(|| uncached.resolve(black_box("/page50")));
    });

    c.bench_function("resolve_miss", |b| {
        b.iter(|| uncached.resolve(black_box("/nonexistent")));
    });
}

/// 路由表不同大小的解析性能
fn table_size_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_size");

    for size in [2, 10, 100, 500].iter() {
        // 禁用缓存以测量线性扫描本身
        let table = build_table(*size, false);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let path = format!("/page{}", size / 2);
            b.iter(|| table.resolve(black_box(&path)));
        });
    }

    group.finish();
}

/// 动态路由与兜底路由的匹配性能
fn dynamic_match_benchmark(c: &mut Criterion) {
    let table = build_mixed_table();

    c.bench_function("resolve_static", |b| {
        b.iter(|| table.resolve(black_box("/xaffman")));
    });

    c.bench_function("resolve_param", |b| {
        b.iter(|| table.resolve(black_box("/algorithm/xaffman")));
    });

    c.bench_function("resolve_catch_all", |b| {
        b.iter(|| table.resolve(black_box("/docs/guide/encoding/huffman")));
    });

    c.bench_function("resolve_by_name", |b| {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "xaffman".to_string());
        b.iter(|| table.resolve_by_name(black_box("algorithm"), black_box(&params)));
    });
}

// ============================================================================
// 导航流程基准测试
// ============================================================================

/// 导航压入基准
fn navigation_benchmark(c: &mut Criterion) {
    c.bench_function("push_alternating", |b| {
        let router = Router::new(build_mixed_table(), Box::new(MemoryHistory::new()));
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let path = if flip { "/xaffman" } else { "/" };
            router.push(black_box(path))
        });
    });

    c.bench_function("replace", |b| {
        let router = Router::new(build_mixed_table(), Box::new(MemoryHistory::new()));
        b.iter(|| router.replace(black_box("/xaffman")));
    });

    c.bench_function("back_forward_pair", |b| {
        let router = Router::new(build_mixed_table(), Box::new(MemoryHistory::new()));
        router.push("/xaffman").unwrap();
        b.iter(|| {
            router.back().unwrap();
            router.forward().unwrap();
        });
    });
}

/// 不同订阅者数量的事件分发性能
fn subscriber_count_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscriber_count");

    for subscriber_count in [0, 1, 10, 50].iter() {
        let router = Router::new(build_mixed_table(), Box::new(MemoryHistory::new()));
        for _ in 0..*subscriber_count {
            router.subscribe(Box::new(|event| {
                black_box(&event.to.path);
            }));
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                b.iter(|| router.replace(black_box("/xaffman")));
            },
        );
    }

    group.finish();
}

// ============================================================================
// 基准测试组
// ============================================================================

criterion_group!(
    name = resolve_benches;
    config = Criterion::default().sample_size(100);
    targets = resolve_benchmark, table_size_benchmark, dynamic_match_benchmark
);

criterion_group!(
    name = navigation_benches;
    config = Criterion::default().sample_size(100);
    targets = navigation_benchmark, subscriber_count_benchmark
);

criterion_main!(resolve_benches, navigation_benches);
