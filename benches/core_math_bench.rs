use criterion::{Criterion, criterion_group, criterion_main};
use specificity_graph::api::{ChartConfig, SpecificityChart};
use specificity_graph::core::{Interpolation, LinearScale, build_path};
use specificity_graph::css::extract;
use specificity_graph::render::NullRenderer;
use std::hint::black_box;

fn generated_stylesheet(rules: usize) -> String {
    (0..rules)
        .map(|i| match i % 4 {
            0 => format!(".block-{i} .element{{color:red;margin:0}}"),
            1 => format!("#id-{i} > li a:hover{{color:blue !important}}"),
            2 => format!("@media (min-width:{i}px){{.col-{i}{{float:left}}}}"),
            _ => format!("ul li.item-{i}, ol li.item-{i}::before{{padding:{i}px}}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (60.0, 1860.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.domain_to_pixel(black_box(4_321.123)).expect("to pixel");
            let _ = scale.pixel_to_domain(px).expect("from pixel");
        })
    });
}

fn bench_extract_5k_rules(c: &mut Criterion) {
    let css = generated_stylesheet(5_000);

    c.bench_function("extract_5k_rules", |b| {
        b.iter(|| {
            let _ = extract(black_box(&css), true).expect("extract");
        })
    });
}

fn bench_monotone_path_10k(c: &mut Criterion) {
    let points: Vec<(f64, f64)> = (0..10_000)
        .map(|i| {
            let x = i as f64 * 0.2;
            (x, 200.0 + (x * 0.05).sin() * 150.0)
        })
        .collect();

    c.bench_function("monotone_path_10k", |b| {
        b.iter(|| {
            let _ = build_path(black_box(&points), Interpolation::Monotone);
        })
    });
}

fn bench_hover_and_frame(c: &mut Criterion) {
    let mut chart = SpecificityChart::new(NullRenderer::default(), ChartConfig::new(1920, 600))
        .expect("chart init");
    chart
        .add(generated_stylesheet(2_000), Some("large"))
        .expect("add large");
    chart
        .add(generated_stylesheet(500), Some("small"))
        .expect("add small");
    chart.advance(10_000.0);
    let plot = chart.plot_area();

    c.bench_function("pointer_move_2500_records", |b| {
        let mut x = plot.left;
        b.iter(|| {
            x = if x >= plot.right { plot.left } else { x + 7.0 };
            chart.pointer_move(black_box(x), plot.top + 10.0);
        })
    });

    c.bench_function("build_render_frame_2500_records", |b| {
        b.iter(|| {
            let _ = chart.build_render_frame();
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_extract_5k_rules,
    bench_monotone_path_10k,
    bench_hover_and_frame
);
criterion_main!(benches);
