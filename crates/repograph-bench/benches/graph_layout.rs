use criterion::{Criterion, black_box, criterion_group, criterion_main};
use repograph_bench::{generate_synthetic_listing, write_listing};
use repograph_core::PathEntry;
use repograph_graph::{GraphViewController, Layouter, UsageResolver, build_repository, normalize};

fn bench_normalize_2000_entries(c: &mut Criterion) {
    let entries = generate_synthetic_listing(2000);

    c.bench_function("normalize_2000_entries", |b| {
        b.iter(|| {
            let roots = normalize(black_box(&entries));
            black_box(roots);
        })
    });
}

fn bench_tree_layout_2000_entries(c: &mut Criterion) {
    let roots = normalize(&generate_synthetic_listing(2000));
    let layouter = Layouter::default();

    c.bench_function("tree_layout_2000_entries", |b| {
        b.iter(|| {
            let nodes = layouter.layout_tree(black_box(&roots), "bench/repo", Some("pkg_3"));
            black_box(nodes);
        })
    });
}

fn bench_recompute_on_selection(c: &mut Criterion) {
    let data = build_repository(
        "bench",
        "repo",
        &generate_synthetic_listing(2000),
        &UsageResolver::None,
    );
    let mut controller = GraphViewController::default();
    controller.load(data);
    let targets = ["pkg_0/mod_0/file_0.ts", "pkg_1/mod_0/file_1.js"];
    let mut flip = 0usize;

    c.bench_function("recompute_on_selection_2000_entries", |b| {
        b.iter(|| {
            flip ^= 1;
            controller.select(Some(targets[flip].to_string()));
            black_box(controller.snapshot());
        })
    });
}

fn bench_listing_to_snapshot(c: &mut Criterion) {
    let entries = generate_synthetic_listing(2000);
    let Ok((_dir, path)) = write_listing(&entries) else {
        return;
    };

    c.bench_function("listing_file_to_snapshot_2000_entries", |b| {
        b.iter(|| {
            let Ok(content) = std::fs::read_to_string(&path) else {
                return;
            };
            let Ok(entries) = serde_json::from_str::<Vec<PathEntry>>(&content) else {
                return;
            };
            let mut controller = GraphViewController::default();
            controller.load(build_repository("bench", "repo", &entries, &UsageResolver::None));
            black_box(controller.snapshot());
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_2000_entries,
    bench_tree_layout_2000_entries,
    bench_recompute_on_selection,
    bench_listing_to_snapshot
);
criterion_main!(benches);
