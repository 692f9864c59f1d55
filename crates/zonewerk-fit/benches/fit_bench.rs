// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for zone fitting in the zonewerk-fit crate.
// Runs block and line fitting over a synthetic page of text lines, the shape
// of a typical redaction drag across a paragraph.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use zonewerk_core::{FitMode, PageId, PixelRect, SpatialZone, ThresholdPolicy};
use zonewerk_fit::{BitmapClassifier, ZoneFitter};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A 1000x800 page with twenty 18-pixel lines of "text" every 30 rows, and a
/// zone drawn loosely around all of them.
fn paragraph_page() -> (BitmapClassifier, SpatialZone) {
    let mut img = GrayImage::from_pixel(1000, 800, Luma([245u8]));
    for line in 0..20 {
        let top = 100 + line * 30;
        let width = if line % 4 == 3 { 420 } else { 760 };
        draw_filled_rect_mut(&mut img, Rect::at(120, top).of_size(width, 18), Luma([20u8]));
    }
    let classifier = BitmapClassifier::new(PageId(0), &img, ThresholdPolicy::Fixed(128))
        .expect("fixed threshold never fails");
    let zone = SpatialZone::axis_aligned(PageId(0), PixelRect::new(80, 70, 920, 740));
    (classifier, zone)
}

fn bench_block_fit(c: &mut Criterion) {
    let (classifier, zone) = paragraph_page();
    let fitter = ZoneFitter::new(8);

    c.bench_function("block_fit (paragraph, 841x671 zone)", |b| {
        b.iter(|| black_box(fitter.fit(black_box(&zone), FitMode::Block, &classifier)));
    });
}

fn bench_line_fit(c: &mut Criterion) {
    let (classifier, zone) = paragraph_page();
    let fitter = ZoneFitter::new(8);

    c.bench_function("line_fit (paragraph, 20 lines)", |b| {
        b.iter(|| black_box(fitter.fit(black_box(&zone), FitMode::Line, &classifier)));
    });
}

criterion_group!(benches, bench_block_fit, bench_line_fit);
criterion_main!(benches);
