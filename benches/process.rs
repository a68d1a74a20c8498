// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use criterion::{criterion_group, criterion_main, Criterion};
use edgefirst_edges::{
    config::EdgeParams,
    image::{LumaFrame, RgbaFrameMut},
    processor::EdgeProcessor,
};

/// Diagonal gradient with a bright square, enough structure to keep the
/// hysteresis stage busy.
fn test_plane(width: usize, height: usize) -> Vec<u8> {
    let mut plane = vec![0u8; width * height];
    for (y, row) in plane.chunks_exact_mut(width).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let inside = x > width / 4 && x < width * 3 / 4 && y > height / 4 && y < height * 3 / 4;
            *px = if inside { 220 } else { ((x + y) % 64) as u8 };
        }
    }
    plane
}

pub fn benchmark_process(c: &mut Criterion) {
    let dims = [(320, 240), (640, 480), (960, 540), (1920, 1080)];

    for (name, params) in [
        ("l1", EdgeParams::default()),
        ("l2", EdgeParams::default().with_l2_gradient(true)),
    ] {
        let processor = EdgeProcessor::new(params).unwrap();
        let mut group = c.benchmark_group(format!("process/{}", name));
        for (w, h) in dims.iter() {
            let plane = test_plane(*w, *h);
            let mut rgba = vec![0u8; w * h * 4];
            group.bench_function(format!("{}x{}", w, h), |b| {
                b.iter(|| {
                    let input = LumaFrame::new(*w as u32, *h as u32, *w, &plane).unwrap();
                    let mut output =
                        RgbaFrameMut::new(*w as u32, *h as u32, *w * 4, &mut rgba).unwrap();
                    processor.process(&input, &mut output).unwrap();
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benchmark_process);
criterion_main!(benches);
