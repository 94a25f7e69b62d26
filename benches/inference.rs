//! Inference benchmark: TLE decode → scale → per-variant scoring.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orbit_sentry::features::{extract, FEATURE_DIM};
use orbit_sentry::model::{
    GradientBoostedModel, IsolationForestModel, SequenceConvModel, StandardScaler,
};

const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

const SCALER: &str = r#"{
    "mean":  [50.0, 180.0, 0.001, 180.0, 180.0, 14.0, 0.0001, 0.0],
    "scale": [20.0, 100.0, 0.01, 100.0, 100.0, 2.0, 0.001, 0.0001]
}"#;

const BOOSTED: &str = r#"{
    "base_score": 0.5,
    "trees": [[
        {"feature": 0, "threshold": 0.0, "left": 1, "right": 2},
        {"value": -0.4},
        {"feature": 5, "threshold": 0.5, "left": 3, "right": 4},
        {"value": 0.2},
        {"value": 0.7}
    ]]
}"#;

const CONV: &str = r#"{
    "conv_kernels": [[0.2, -0.1, 0.3], [0.05, 0.4, -0.2]],
    "conv_bias": [0.1, -0.1],
    "hidden_weights": [
        [0.1, -0.2], [0.3, 0.1], [-0.1, 0.2],
        [0.2, 0.2], [0.0, -0.3], [0.1, 0.1]
    ],
    "hidden_bias": [0.05, -0.05],
    "output_weights": [0.6, -0.4],
    "output_bias": 0.1
}"#;

const FOREST: &str = r#"{
    "max_samples": 64,
    "trees": [[
        {"feature": 0, "threshold": 0.0, "left": 1, "right": 2},
        {"feature": 2, "threshold": 0.5, "left": 3, "right": 4},
        {"size": 30},
        {"size": 4},
        {"size": 30}
    ]]
}"#;

fn bench_extract(c: &mut Criterion) {
    c.bench_function("tle_extract", |b| {
        b.iter(|| extract(black_box(ISS_LINE1), black_box(ISS_LINE2)).unwrap())
    });
}

fn bench_scorers(c: &mut Criterion) {
    let scaler = StandardScaler::from_json(SCALER, "bench").unwrap();
    let boosted = GradientBoostedModel::from_json(BOOSTED, "bench").unwrap();
    let conv = SequenceConvModel::from_json(CONV, "bench").unwrap();
    let forest = IsolationForestModel::from_json(FOREST, "bench").unwrap();

    let features = extract(ISS_LINE1, ISS_LINE2).unwrap();
    let scaled: [f64; FEATURE_DIM] = scaler.transform(&features);

    let mut g = c.benchmark_group("scorers");
    g.bench_function("boosted_tree", |b| {
        b.iter(|| boosted.predict_proba(black_box(&scaled)))
    });
    g.bench_function("sequence_conv", |b| {
        b.iter(|| conv.predict_proba(black_box(&scaled)))
    });
    g.bench_function("isolation_forest", |b| {
        b.iter(|| forest.decision_function(black_box(&scaled)))
    });
    g.finish();
}

criterion_group!(benches, bench_extract, bench_scorers);
criterion_main!(benches);
