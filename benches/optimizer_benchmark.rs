use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use std::str::FromStr;

use foliar_engine::{
    compute_adjustments, LinearProgramOptimizer, NutrientLevels, ProductCatalog,
    VariationCoefficients,
};

fn d(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn worked_inputs() -> (NutrientLevels, NutrientLevels, VariationCoefficients) {
    let actual = NutrientLevels::from_entries([
        ("Nitrógeno", d("50")),
        ("Fósforo", d("20")),
        ("Potasio", d("80")),
        ("Cobre", d("100")),
        ("Zinc", d("50")),
    ])
    .unwrap();
    let ideal = NutrientLevels::from_entries([
        ("Nitrógeno", d("100")),
        ("Fósforo", d("50")),
        ("Potasio", d("90")),
        ("Cobre", d("150")),
        ("Zinc", d("80")),
    ])
    .unwrap();
    let coefficients = VariationCoefficients::from_entries([
        ("Nitrógeno", d("0.5")),
        ("Fósforo", d("0.3")),
        ("Potasio", d("0.4")),
        ("Cobre", d("0.2")),
        ("Zinc", d("0.25")),
    ])
    .unwrap();
    (actual, ideal, coefficients)
}

fn worked_catalog() -> ProductCatalog {
    ProductCatalog::from_entries([
        (
            "Fertilizante A",
            vec![
                ("Nitrógeno", d("10")),
                ("Fósforo", d("5")),
                ("Potasio", d("2")),
            ],
        ),
        (
            "Fertilizante B",
            vec![
                ("Nitrógeno", d("5")),
                ("Fósforo", d("15")),
                ("Cobre", d("20")),
            ],
        ),
        (
            "Fertilizante C",
            vec![("Zinc", d("30")), ("Cobre", d("10"))],
        ),
    ])
    .unwrap()
}

/// Synthetic problem with `nutrients` targets and `products` products,
/// each product contributing to a handful of nutrients.
fn synthetic_inputs(
    nutrients: usize,
    products: usize,
) -> (NutrientLevels, NutrientLevels, VariationCoefficients, ProductCatalog) {
    let names: Vec<String> = (0..nutrients).map(|i| format!("Nutriente {i:02}")).collect();

    let actual = NutrientLevels::from_entries(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), Decimal::from(30 + (i as i64 % 50)))),
    )
    .unwrap();
    let ideal = NutrientLevels::from_entries(
        names.iter().map(|name| (name.clone(), Decimal::from(100))),
    )
    .unwrap();
    let coefficients = VariationCoefficients::from_entries(
        names.iter().map(|name| (name.clone(), d("0.3"))),
    )
    .unwrap();

    let catalog = ProductCatalog::from_entries((0..products).map(|p| {
        let contributions: Vec<(String, Decimal)> = (0..4)
            .map(|k| {
                let nutrient = names[(p * 3 + k) % nutrients].clone();
                (nutrient, Decimal::from(2 + (p as i64 % 9)))
            })
            .collect();
        (format!("Producto {p:02}"), contributions)
    }))
    .unwrap();

    (actual, ideal, coefficients, catalog)
}

fn bench_adjustments(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjustments");

    let (actual, ideal, coefficients) = worked_inputs();
    group.bench_function("worked_dataset", |b| {
        b.iter(|| {
            black_box(
                compute_adjustments(black_box(&actual), black_box(&ideal), &coefficients)
                    .unwrap(),
            )
        });
    });

    group.finish();
}

fn bench_optimizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimizer");

    let (actual, ideal, coefficients) = worked_inputs();
    let catalog = worked_catalog();
    let adjustments = compute_adjustments(&actual, &ideal, &coefficients).unwrap();
    let optimizer = LinearProgramOptimizer::new();

    group.bench_function("worked_dataset", |b| {
        b.iter(|| {
            black_box(
                optimizer
                    .optimize(black_box(&adjustments), black_box(&catalog))
                    .unwrap(),
            )
        });
    });

    for (nutrients, products) in [(10, 8), (30, 20)] {
        let (actual, ideal, coefficients, catalog) = synthetic_inputs(nutrients, products);
        let adjustments = compute_adjustments(&actual, &ideal, &coefficients).unwrap();
        group.bench_with_input(
            BenchmarkId::new("synthetic", format!("{nutrients}n_{products}p")),
            &(adjustments, catalog),
            |b, (adjustments, catalog)| {
                b.iter(|| {
                    black_box(
                        optimizer
                            .optimize(black_box(adjustments), black_box(catalog))
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_adjustments, bench_optimizer);
criterion_main!(benches);
