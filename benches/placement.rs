use annular_roots::{
    cluster_registry::ClusterRegistry, config::DataType, config::EngineConfig, number::Tier,
    polynomial::Polynomial, scheduler::Scheduler,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;

/// Synthetic polynomials spanning the conditioning regimes Radii/Placer
/// are expected to handle: well-conditioned (unit-circle roots),
/// ill-conditioned (wide magnitude spread across coefficients), and
/// near-monomial (all mass at the two ends).
fn well_conditioned(degree: usize) -> Polynomial<f64> {
    let mut c = vec![Complex64::new(0.0, 0.0); degree + 1];
    c[0] = Complex64::new(-1.0, 0.0);
    c[degree] = Complex64::new(1.0, 0.0);
    Polynomial::new(degree, c, DataType::Known).unwrap()
}

fn wide_spread(degree: usize) -> Polynomial<f64> {
    let c: Vec<Complex64> = (0..=degree)
        .map(|i| Complex64::new(10f64.powi((i as i32) * 3 - 10), 0.0))
        .collect();
    Polynomial::new(degree, c, DataType::Known).unwrap()
}

fn near_monomial(degree: usize) -> Polynomial<f64> {
    let mut c = vec![Complex64::new(1e-12, 0.0); degree + 1];
    c[0] = Complex64::new(-1.0, 0.0);
    c[degree] = Complex64::new(1.0, 0.0);
    Polynomial::new(degree, c, DataType::Known).unwrap()
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("radii-and-placer");

    let degree = 64;
    let cases: [(&str, Polynomial<f64>); 3] = [
        ("well-conditioned", well_conditioned(degree)),
        ("wide-spread", wide_spread(degree)),
        ("near-monomial", near_monomial(degree)),
    ];

    for (name, poly) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &poly, |b, poly| {
            let registry = ClusterRegistry::whole(degree);
            let config = EngineConfig::new();
            b.iter(|| {
                let mut roots = annular_roots::root::RootVector::<f64>::new(degree);
                let mut scheduler = Scheduler::new();
                annular_roots::placer::place_cluster(
                    poly,
                    &registry,
                    0,
                    &0.0,
                    &0.0,
                    &mut roots,
                    &mut scheduler,
                    &config,
                    Tier::Double,
                    false,
                );
                roots
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
