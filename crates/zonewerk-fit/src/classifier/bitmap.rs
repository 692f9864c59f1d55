// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bitmap classifier — binarizes one decoded page up front (fixed, Otsu or
// adaptive threshold) and answers ink/paper queries from the resulting mask.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use tracing::{debug, info, instrument};
use zonewerk_core::error::{Result, ZonewerkError};
use zonewerk_core::{PageId, PixelRect, ThresholdPolicy};

use super::PixelClassifier;

const INK: u8 = 0;
const PAPER: u8 = 255;

/// Ink/paper classifier backed by a binarized copy of one page.
///
/// The mask follows the scanning convention: black (0) is ink, white (255) is
/// paper.
#[derive(Debug, Clone)]
pub struct BitmapClassifier {
    page: PageId,
    mask: GrayImage,
    policy: ThresholdPolicy,
}

impl BitmapClassifier {
    // -- Construction ---------------------------------------------------------

    /// Binarize a grayscale page with the given policy.
    #[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
    pub fn new(page: PageId, gray: &GrayImage, policy: ThresholdPolicy) -> Result<Self> {
        let mask = match policy {
            ThresholdPolicy::Fixed(threshold) => binarize_fixed(gray, threshold),
            ThresholdPolicy::Otsu => binarize_otsu(gray),
            ThresholdPolicy::Adaptive { block_radius, c } => {
                if block_radius == 0 {
                    return Err(ZonewerkError::Config(
                        "adaptive threshold needs a block radius of at least 1".into(),
                    ));
                }
                binarize_adaptive(gray, block_radius, c)
            }
        };
        let classifier = Self { page, mask, policy };
        info!(ink = classifier.ink_count(), "Page classifier ready");
        Ok(classifier)
    }

    /// Binarize any decoded image (converted to 8-bit luma first).
    pub fn from_dynamic(
        page: PageId,
        image: &DynamicImage,
        policy: ThresholdPolicy,
    ) -> Result<Self> {
        Self::new(page, &image.to_luma8(), policy)
    }

    /// Decode a page from raw image bytes (PNG, TIFF, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(page: PageId, data: &[u8], policy: ThresholdPolicy) -> Result<Self> {
        let image = image::load_from_memory(data).map_err(|err| {
            ZonewerkError::ImageError(format!("failed to decode page image: {}", err))
        })?;
        Self::from_dynamic(page, &image, policy)
    }

    /// Decode a page from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(
        page: PageId,
        path: impl AsRef<std::path::Path>,
        policy: ThresholdPolicy,
    ) -> Result<Self> {
        let image = image::open(path.as_ref()).map_err(|err| {
            ZonewerkError::ImageError(format!(
                "failed to open page image {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Self::from_dynamic(page, &image, policy)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn policy(&self) -> ThresholdPolicy {
        self.policy
    }

    /// Pixel rectangle covered by the page, or `None` for an empty image.
    pub fn page_bounds(&self) -> Option<PixelRect> {
        let (width, height) = self.mask.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        Some(PixelRect::new(0, 0, width as i64 - 1, height as i64 - 1))
    }

    /// Number of ink pixels on the page.
    pub fn ink_count(&self) -> usize {
        self.mask.pixels().filter(|p| p.0[0] == INK).count()
    }

    /// Borrow the binarized page (0 = ink, 255 = paper).
    pub fn mask(&self) -> &GrayImage {
        &self.mask
    }
}

impl PixelClassifier for BitmapClassifier {
    fn is_foreground(&self, page: PageId, x: i64, y: i64) -> Result<bool> {
        if page != self.page {
            return Err(ZonewerkError::PageMismatch {
                expected: self.page,
                actual: page,
            });
        }
        let (width, height) = self.mask.dimensions();
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return Ok(false);
        }
        Ok(self.mask.get_pixel(x as u32, y as u32).0[0] == INK)
    }
}

// -- Threshold policies -------------------------------------------------------

fn binarize_fixed(gray: &GrayImage, threshold: u8) -> GrayImage {
    debug!(threshold, "Applying fixed threshold");
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        ink_if(gray.get_pixel(x, y).0[0] < threshold)
    })
}

/// Global threshold from the page histogram. A page with a single grey level
/// has nothing to separate, so it is treated as blank paper.
fn binarize_otsu(gray: &GrayImage) -> GrayImage {
    let darkest = gray.pixels().map(|p| p.0[0]).min();
    let lightest = gray.pixels().map(|p| p.0[0]).max();
    if darkest == lightest {
        debug!("Uniform page; no ink");
        return GrayImage::from_pixel(gray.width(), gray.height(), Luma([PAPER]));
    }

    let level = otsu_level(gray);
    debug!(level, "Otsu level computed");
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        ink_if(gray.get_pixel(x, y).0[0] <= level)
    })
}

/// Local mean threshold: for each pixel, the threshold is the mean intensity
/// within a `block_radius` neighbourhood, minus `c`.
fn binarize_adaptive(gray: &GrayImage, block_radius: u32, c: i32) -> GrayImage {
    debug!(block_radius, c, "Applying adaptive threshold");
    let (width, height) = gray.dimensions();
    let integral = compute_integral_image(gray);

    GrayImage::from_fn(width, height, |x, y| {
        let local_mean = region_mean(&integral, width, height, x, y, block_radius);
        let threshold = (local_mean as i32 - c).clamp(0, 255) as u8;
        ink_if(gray.get_pixel(x, y).0[0] < threshold)
    })
}

fn ink_if(is_ink: bool) -> Luma<u8> {
    Luma([if is_ink { INK } else { PAPER }])
}

// -- Integral image helpers ---------------------------------------------------

/// Compute the integral (summed-area table) of a grayscale image.
///
/// `integral[y * (width+1) + x]` contains the sum of all pixel values in the
/// rectangle [0, 0) to (x, y) (exclusive on both axes). The table has
/// dimensions `(width+1) x (height+1)` with a zero-padded border.
fn compute_integral_image(gray: &GrayImage) -> Vec<u64> {
    let (w, h) = gray.dimensions();
    let stride = (w + 1) as usize;
    let mut table = vec![0u64; stride * (h + 1) as usize];

    for y in 0..h {
        let mut row_sum: u64 = 0;
        for x in 0..w {
            row_sum += gray.get_pixel(x, y).0[0] as u64;
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            let above = y as usize * stride + (x + 1) as usize;
            table[idx] = row_sum + table[above];
        }
    }

    table
}

/// Mean pixel value within a square region centred on (cx, cy), clamped to
/// the image.
fn region_mean(
    integral: &[u64],
    img_width: u32,
    img_height: u32,
    cx: u32,
    cy: u32,
    radius: u32,
) -> f64 {
    let stride = (img_width + 1) as usize;

    let x1 = cx.saturating_sub(radius) as usize;
    let y1 = cy.saturating_sub(radius) as usize;
    let x2 = (cx as usize + radius as usize + 1).min(img_width as usize);
    let y2 = (cy as usize + radius as usize + 1).min(img_height as usize);

    let area = ((x2 - x1) * (y2 - y1)) as f64;
    if area == 0.0 {
        return 128.0;
    }

    // S = I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1]
    let sum = integral[y2 * stride + x2] as f64 - integral[y1 * stride + x2] as f64
        - integral[y2 * stride + x1] as f64
        + integral[y1 * stride + x1] as f64;

    sum / area
}

// -- Tests --------------------------------------------------------------------
