// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic pages for tests. Built into the library only under `cfg(test)` or
// the `testing` feature.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use zonewerk_core::{PageId, PixelRect, ThresholdPolicy};

use crate::classifier::BitmapClassifier;

/// White page 0 with solid black blocks over the given (inclusive) rectangles.
pub fn page_with_blocks(width: u32, height: u32, blocks: &[PixelRect]) -> BitmapClassifier {
    let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));
    for block in blocks {
        draw_filled_rect_mut(
            &mut img,
            Rect::at(block.left as i32, block.top as i32)
                .of_size(block.width() as u32, block.height() as u32),
            Luma([0u8]),
        );
    }
    BitmapClassifier::new(PageId(0), &img, ThresholdPolicy::Fixed(128))
        .expect("fixed threshold never fails")
}
