//! Benchmarks for bar solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bar_solver::analysis;
use bar_solver::prelude::*;

fn create_fixed_free_bar(num_elem: usize) -> BarModel {
    let mut model = BarModel::uniform(10.0, num_elem);

    model.add_material(Material::elastic("Steel", 200e9, 0.3).unwrap());
    model.add_block(
        ElementBlock::new("Bar", "Steel", BlockElements::all())
            .with_properties(ElementProperties::new(1e-3).unwrap()),
    );
    model.add_boundary(BoundaryCondition::fixed(0));
    model.add_dload(DistributedLoad::on_set("all", 1000.0));
    model.add_cload(ConcentratedLoad::at_node(num_elem, 5000.0));

    model
}

fn benchmark_preprocess(c: &mut Criterion) {
    let model = create_fixed_free_bar(200);
    c.bench_function("preprocess_200", |b| {
        b.iter(|| black_box(preprocess(&model).unwrap()))
    });
}

fn benchmark_short_bar(c: &mut Criterion) {
    let model = create_fixed_free_bar(10);
    c.bench_function("bar_10_linear", |b| {
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_long_bar(c: &mut Criterion) {
    let model = create_fixed_free_bar(200);
    let preprocessed = preprocess(&model).unwrap();
    c.bench_function("bar_200_linear", |b| {
        b.iter(|| black_box(analysis::solve(&preprocessed, &AnalysisOptions::default()).unwrap()))
    });
}

fn benchmark_long_bar_cholesky(c: &mut Criterion) {
    let model = create_fixed_free_bar(200);
    let preprocessed = preprocess(&model).unwrap();
    c.bench_function("bar_200_cholesky", |b| {
        b.iter(|| black_box(analysis::solve(&preprocessed, &AnalysisOptions::cholesky()).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_preprocess,
    benchmark_short_bar,
    benchmark_long_bar,
    benchmark_long_bar_cholesky,
);

criterion_main!(benches);
