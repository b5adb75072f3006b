//! Benchmark for hit-testing and render passes over a wide tree.
//!
//! TARGET: hit-test under 10us and a full render pass under 1ms for 1,000 elements
//!
//! Run with: cargo bench --package trellis_ui --bench dispatch_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use trellis_ui::{ElementFlags, ElementSpec, InputEvent, RecordingLog, RecordingRenderer, Ui, UiConfig};

const WINDOWS: i32 = 40;
const BUTTONS_PER_WINDOW: i32 = 24;

fn build_ui() -> (Ui, RecordingLog) {
    let config = UiConfig {
        draw_on_demand: false,
        viewport_width: 1920,
        viewport_height: 1080,
        ..UiConfig::default()
    };
    let renderer = RecordingRenderer::new();
    let log = renderer.log();
    let mut ui = Ui::new(Box::new(renderer), config);

    for w in 0..WINDOWS {
        let x = (w % 8) * 230;
        let y = (w / 8) * 210;
        let window = ui.create_window_ex(None, &ElementSpec::new(x, y, 220, 200).text("window"));
        for b in 0..BUTTONS_PER_WINDOW {
            let spec = ElementSpec::new((b % 4) * 54, 24 + (b / 4) * 28, 50, 24)
                .flags(ElementFlags::TABSTOP)
                .text("button");
            ui.create_button_ex(Some(window), &spec);
        }
    }
    (ui, log)
}

fn benchmark_hit_test(c: &mut Criterion) {
    let (ui, _) = build_ui();

    let mut group = c.benchmark_group("hit_test");
    group.throughput(Throughput::Elements(1));
    group.bench_function("element_at", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(37);
            let x = i.rem_euclid(1920);
            let y = (i / 7).rem_euclid(1080);
            black_box(ui.element_at(black_box(x), black_box(y)))
        });
    });
    group.finish();
}

fn benchmark_mouse_move(c: &mut Criterion) {
    let (mut ui, log) = build_ui();

    c.bench_function("mouse_move_dispatch", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(13);
            ui.handle_input(black_box(InputEvent::MouseMove {
                x: i.rem_euclid(1920),
                y: (i / 3).rem_euclid(1080),
            }));
            log.clear();
        });
    });
}

fn benchmark_render_pass(c: &mut Criterion) {
    let (mut ui, log) = build_ui();
    let elements = (WINDOWS * (BUTTONS_PER_WINDOW + 1)) as u64;

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(elements));
    group.bench_function("full_pass", |b| {
        b.iter(|| {
            log.clear();
            black_box(ui.process())
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_hit_test, benchmark_mouse_move, benchmark_render_pass);
criterion_main!(benches);
