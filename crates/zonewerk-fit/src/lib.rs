// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// zonewerk-fit — Content-aware zone fitting for scanned pages.
//
// Given a zone the user drew over a page and a classifier that tells ink from
// paper, shrinks the zone to the ink beneath it (block fit) or splits it into
// one tight zone per line of text (line fit).

pub mod classifier;
pub mod fit;
pub mod zone;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export the primary structs so callers can use `zonewerk_fit::ZoneFitter` etc.
pub use classifier::{BitmapClassifier, PixelClassifier};
pub use fit::line::find_split_row;
pub use fit::{FitResult, ZoneFitter};
pub use zone::{Side, ZoneGeometry};
