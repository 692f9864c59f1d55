// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Block fit — shrink a zone to the tight box around the ink beneath it.

use tracing::debug;
use zonewerk_core::SpatialZone;
use zonewerk_core::error::Result;

use crate::classifier::PixelClassifier;
use crate::zone::ZoneGeometry;

/// Shrink every edge of `geometry` onto the ink it covers. `None` when no ink
/// was found or the result is thinner than `min_height`.
pub fn block_fit_geometry<C>(
    geometry: ZoneGeometry,
    classifier: &C,
    min_height: u32,
) -> Result<Option<SpatialZone>>
where
    C: PixelClassifier + ?Sized,
{
    let fitted = geometry.fit_all_edges(classifier)?;
    debug!(before = ?geometry.edges(), after = ?fitted.edges(), "Edges fitted");
    Ok(fitted.to_zone(min_height))
}

/// Block-fit a page zone.
pub fn block_fit<C>(
    zone: &SpatialZone,
    classifier: &C,
    min_height: u32,
) -> Result<Option<SpatialZone>>
where
    C: PixelClassifier + ?Sized,
{
    block_fit_geometry(ZoneGeometry::from_zone(zone)?, classifier, min_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::page_with_blocks;
    use zonewerk_core::{PageId, PixelRect, Point};

    fn zone(rect: PixelRect) -> SpatialZone {
        SpatialZone::axis_aligned(PageId(0), rect)
    }

    #[test]
    fn blank_zone_has_no_fit() {
        let classifier = page_with_blocks(120, 120, &[]);
        let fitted = block_fit(&zone(PixelRect::new(0, 0, 100, 100)), &classifier, 1).unwrap();
        assert!(fitted.is_none());
    }

    #[test]
    fn fits_tight_box_around_block() {
        let classifier = page_with_blocks(120, 120, &[PixelRect::new(5, 10, 90, 50)]);
        let fitted = block_fit(&zone(PixelRect::new(0, 0, 100, 100)), &classifier, 5)
            .unwrap()
            .unwrap();
        assert_eq!(fitted.pixel_bounds(), Some(PixelRect::new(5, 10, 90, 50)));
    }

    #[test]
    fn ink_outside_the_zone_is_ignored() {
        let classifier = page_with_blocks(
            200,
            200,
            &[PixelRect::new(20, 30, 60, 40), PixelRect::new(150, 150, 190, 190)],
        );
        let fitted = block_fit(&zone(PixelRect::new(10, 10, 100, 100)), &classifier, 1)
            .unwrap()
            .unwrap();
        assert_eq!(fitted.pixel_bounds(), Some(PixelRect::new(20, 30, 60, 40)));
    }

    #[test]
    fn partly_covered_block_is_clipped_to_zone() {
        let classifier = page_with_blocks(100, 100, &[PixelRect::new(0, 20, 99, 40)]);
        let fitted = block_fit(&zone(PixelRect::new(30, 0, 70, 99)), &classifier, 1)
            .unwrap()
            .unwrap();
        assert_eq!(fitted.pixel_bounds(), Some(PixelRect::new(30, 20, 70, 40)));
    }

    #[test]
    fn thin_result_is_discarded() {
        // A 3-row rule under a 5-pixel minimum.
        let classifier = page_with_blocks(100, 100, &[PixelRect::new(10, 50, 80, 52)]);
        let area = zone(PixelRect::new(0, 0, 99, 99));
        assert!(block_fit(&area, &classifier, 5).unwrap().is_none());
        assert!(block_fit(&area, &classifier, 3).unwrap().is_some());
    }

    #[test]
    fn vertical_zone_fits_in_its_own_frame() {
        // Drawn top to bottom over columns 20..=59; local rows run across it.
        let classifier = page_with_blocks(100, 100, &[PixelRect::new(30, 15, 45, 70)]);
        let area = SpatialZone::new(
            PageId(0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 100.0),
            40.0,
        );
        let fitted = block_fit(&area, &classifier, 1).unwrap().unwrap();
        assert_eq!(fitted.pixel_bounds(), Some(PixelRect::new(30, 15, 45, 70)));
        // Still drawn top to bottom.
        assert!(fitted.end.y > fitted.start.y);
    }

    #[test]
    fn sparse_corners_follow_fixed_order() {
        // Two specks at opposite corners: the box spans both.
        let classifier = page_with_blocks(
            60,
            60,
            &[PixelRect::new(12, 8, 12, 8), PixelRect::new(47, 51, 47, 51)],
        );
        let fitted = block_fit(&zone(PixelRect::new(0, 0, 59, 59)), &classifier, 1)
            .unwrap()
            .unwrap();
        assert_eq!(fitted.pixel_bounds(), Some(PixelRect::new(12, 8, 47, 51)));
    }
}
