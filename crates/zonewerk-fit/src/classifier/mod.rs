// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel classification — the only view the fitting engine has of a page.

pub mod bitmap;

pub use bitmap::BitmapClassifier;

use zonewerk_core::PageId;
use zonewerk_core::error::Result;

/// Answers whether a page pixel is ink (foreground) or paper (background).
///
/// An implementation is bound to one decoded page and must answer for any
/// coordinate: pixels outside the page are background. Querying a page the
/// classifier was not built for is a caller bug and should fail with
/// [`ZonewerkError::PageMismatch`](zonewerk_core::ZonewerkError::PageMismatch).
pub trait PixelClassifier {
    fn is_foreground(&self, page: PageId, x: i64, y: i64) -> Result<bool>;
}

/// Plain predicates classify every page the same way and never fail.
impl<F> PixelClassifier for F
where
    F: Fn(PageId, i64, i64) -> bool,
{
    fn is_foreground(&self, page: PageId, x: i64, y: i64) -> Result<bool> {
        Ok(self(page, x, y))
    }
}
