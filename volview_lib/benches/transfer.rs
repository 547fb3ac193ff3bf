use criterion::{black_box, criterion_group, criterion_main, Criterion};

use volview_lib::premade::presets;
use volview_lib::transfer::TransferFunction;

/// Sample the bone preset's transfer function across the full HU range.
/// The sampling pair is the per-step cost of any compositing loop.
fn sample_hu_range(c: &mut Criterion) {
    let preset = presets::ct_bone();

    let mut tf = TransferFunction::new();
    if let Some(window) = preset.window {
        tf.set_window(window);
    }
    tf.set_color_stops(preset.color_stops);

    c.bench_function("sample_hu_range", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            let mut scalar = -1024.0;
            while scalar < 3071.0 {
                let color = tf.sample_color(black_box(scalar));
                acc += color.x + tf.sample_opacity(black_box(scalar));
                scalar += 1.0;
            }
            acc
        })
    });
}

criterion_group! {
    name = transfer;
    config = Criterion::default().significance_level(0.1).sample_size(20);
    targets = sample_hu_range
}

criterion_main!(transfer);
