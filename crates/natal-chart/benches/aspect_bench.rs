use criterion::{black_box, criterion_group, criterion_main, Criterion};
use natal_chart::aspects::AspectCalculator;
use natal_chart::ephemeris::Body;
use natal_chart::planets::PlanetPosition;
use natal_chart::zodiac::to_sign;

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(100.0), black_box(102.0)))
    });
}

fn bench_calculate_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    let planets: Vec<PlanetPosition> = Body::ALL
        .iter()
        .enumerate()
        .map(|(i, &body)| {
            let longitude = (i as f64) * 30.0;
            PlanetPosition {
                body,
                longitude,
                latitude: 0.0,
                distance: 1.0,
                speed: 1.0,
                retrograde: false,
                zodiac_sign: to_sign(longitude),
            }
        })
        .collect();

    c.bench_function("calculate_aspects", |b| {
        b.iter(|| calculator.calculate_aspects(black_box(&planets)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_calculate_aspects);
criterion_main!(benches);
