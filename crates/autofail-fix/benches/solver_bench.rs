use autofail_detect::{WindowOracle, detect};
use autofail_fix::PaddingSolver;
use autofail_model::{HitObject, Timeline, TimingParams};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// `sections` long spinners, each followed by a dense stream inside it.
fn spinner_chart(sections: i64) -> Timeline {
    let mut objects = Vec::new();
    for s in 0..sections {
        let base = s * 20_000 + 2000;
        objects.push(HitObject::point(base - 1000));
        objects.push(HitObject::channeled_range(base, base + 8000));
        objects.extend((1..80).map(|i| HitObject::point(base + i * 100)));
    }
    Timeline::new(objects)
}

fn detection_benchmark(c: &mut Criterion) {
    let params = TimingParams::new(1000, 150, 160);
    let mut group = c.benchmark_group("detect");

    for sections in [1, 4] {
        let tl = spinner_chart(sections);
        group.bench_function(format!("spinners_{sections}"), |b| {
            b.iter(|| detect(black_box(&tl), params));
        });
    }

    group.finish();
}

fn solver_benchmark(c: &mut Criterion) {
    let params = TimingParams::new(1000, 150, 160);
    let tl = spinner_chart(2);
    let Ok(detection) = detect(&tl, params) else {
        return;
    };
    let oracle = WindowOracle::new(&tl, params);
    let solver = PaddingSolver::new(oracle, detection.problem_areas());

    c.bench_function("minimal_solution", |b| {
        b.iter(|| black_box(solver.minimal_solution()));
    });

    c.bench_function("first_five_solutions", |b| {
        b.iter(|| black_box(solver.solutions().take(5).count()));
    });
}

criterion_group!(benches, detection_benchmark, solver_benchmark);
criterion_main!(benches);
