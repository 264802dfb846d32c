//! Benchmarks for model output parsing and field reconciliation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nutripsych::parse::{brain_nutrients_from_map, impacts_from_value, parse_json};
use serde_json::{json, Value};

const NUTRIENT_OUTPUT: &str = r#"{
    "tryptophan_mg": 260, "tyrosine_mg": 710, "vitamin_b6_mg": 0.64,
    "folate_mcg": 26, "vitamin_b12_mcg": 3.2, "vitamin_d_mcg": 11,
    "magnesium_mg": 27, "zinc_mg": 0.4, "iron_mg": 0.3, "selenium_mcg": 36.5,
    "choline_mg": 78, "omega3_total_g": 2.3, "omega3_epa_mg": 690,
    "omega3_dha_mg": 1450, "omega3_ala_mg": 110,
    "confidence_omega3": 0.8, "confidence_zinc_mg": 0.6,
    "reasoning": "Fatty fish with high long-chain omega-3 content."
}"#;

fn fenced(body: &str) -> String {
    format!("Here is the estimate you asked for:\n```json\n{}\n```\nLet me know if you need more.", body)
}

fn impacts_output(count: usize) -> String {
    let impacts: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "impact_type": format!("outcome_{}", i),
                "direction": "positive",
                "mechanism": "Anti-inflammatory signalling in the hippocampus",
                "strength": 6,
                "confidence": 0.7,
                "time_to_effect": "weeks",
                "research_support": [{"citation": "Example et al.", "year": 2019}]
            })
        })
        .collect();
    json!({ "mental_health_impacts": impacts }).to_string()
}

fn bench_parse_strict(c: &mut Criterion) {
    c.bench_function("parse_json_strict", |b| {
        b.iter(|| black_box(parse_json(black_box(NUTRIENT_OUTPUT), json!({}))));
    });
}

fn bench_parse_recovered(c: &mut Criterion) {
    let raw = fenced(NUTRIENT_OUTPUT);
    c.bench_function("parse_json_fenced", |b| {
        b.iter(|| black_box(parse_json(black_box(&raw), json!({}))));
    });
}

fn bench_parse_garbage(c: &mut Criterion) {
    let raw = "I'm unable to provide nutrient estimates for this food. ".repeat(20);
    c.bench_function("parse_json_garbage_fallback", |b| {
        b.iter(|| black_box(parse_json(black_box(&raw), json!({}))));
    });
}

fn bench_brain_nutrient_reconcile(c: &mut Criterion) {
    let decoded = parse_json(NUTRIENT_OUTPUT, json!({}));
    let map = decoded.as_object().cloned().unwrap_or_default();
    c.bench_function("brain_nutrients_from_map", |b| {
        b.iter(|| black_box(brain_nutrients_from_map(black_box(&map))));
    });
}

fn bench_impacts_extract(c: &mut Criterion) {
    let raw = impacts_output(8);
    c.bench_function("impacts_from_value_8", |b| {
        b.iter(|| {
            let value = parse_json(black_box(&raw), json!([]));
            black_box(impacts_from_value(value))
        });
    });
}

criterion_group!(
    benches,
    bench_parse_strict,
    bench_parse_recovered,
    bench_parse_garbage,
    bench_brain_nutrient_reconcile,
    bench_impacts_extract
);
criterion_main!(benches);
