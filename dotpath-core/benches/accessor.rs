use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dotpath_core::{delete, enumerate_paths, flatten, get, set, tokenize};
use serde_json::{json, Value};

fn create_test_tree(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "user": {"name": format!("user{}", i), "roles": ["read", "write"]},
                "level": if i % 3 == 0 { "info" } else if i % 3 == 1 { "warn" } else { "error" },
                "meta": {"timestamp": 1600000000 + i, "tags": {"env": "prod"}}
            })
        })
        .collect();

    json!({"data": {"items": items}})
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for path in ["a.b.c", "data.items.*.user.name", "a\\.b.c\\.d.e\\.f.g.h.i.j"] {
        group.bench_with_input(BenchmarkId::from_parameter(path), path, |b, path| {
            b.iter(|| black_box(tokenize(black_box(path))));
        });
    }

    group.finish();
}

fn bench_accessors(c: &mut Criterion) {
    let mut group = c.benchmark_group("accessors");

    for count in [10, 1000] {
        let tree = create_test_tree(count);

        group.bench_with_input(BenchmarkId::new("get_index", count), &tree, |b, tree| {
            b.iter(|| black_box(get(tree, "data.items.5.user.name")));
        });

        group.bench_with_input(BenchmarkId::new("get_projection", count), &tree, |b, tree| {
            b.iter(|| black_box(get(tree, "data.items.*.user.name")));
        });

        group.bench_with_input(BenchmarkId::new("set_fan_out", count), &tree, |b, tree| {
            b.iter(|| {
                let mut tree = tree.clone();
                set(&mut tree, "data.items.*.meta.seen", json!(true)).unwrap();
                black_box(tree);
            });
        });

        group.bench_with_input(BenchmarkId::new("delete_fan_out", count), &tree, |b, tree| {
            b.iter(|| {
                let mut tree = tree.clone();
                delete(&mut tree, "data.items.*.meta").unwrap();
                black_box(tree);
            });
        });
    }

    group.finish();
}

fn bench_walkers(c: &mut Criterion) {
    let mut group = c.benchmark_group("walkers");

    for count in [10, 1000] {
        let tree = create_test_tree(count);

        group.bench_with_input(BenchmarkId::new("flatten", count), &tree, |b, tree| {
            b.iter(|| black_box(flatten(tree)));
        });

        group.bench_with_input(BenchmarkId::new("enumerate_paths", count), &tree, |b, tree| {
            b.iter(|| black_box(enumerate_paths(tree)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_accessors, bench_walkers);
criterion_main!(benches);
