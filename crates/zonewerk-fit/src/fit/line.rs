// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line fit — peel a zone covering several lines of text into one tight zone
// per line.
//
// The working region is trimmed to its ink, then repeatedly cut along the
// first blank row that leaves a full line above it and a real line below it.
// Each cut strictly advances the region's top edge, so the loop ends within
// the zone's height.

use tracing::debug;
use zonewerk_core::SpatialZone;
use zonewerk_core::error::Result;

use super::block::block_fit_geometry;
use crate::classifier::PixelClassifier;
use crate::zone::{Side, ZoneGeometry};

/// Fit one zone per line of text under `geometry`. `None` when nothing
/// survived the `min_height` check.
pub fn line_fit_geometry<C>(
    geometry: ZoneGeometry,
    classifier: &C,
    min_height: u32,
) -> Result<Option<Vec<SpatialZone>>>
where
    C: PixelClassifier + ?Sized,
{
    let mut working = geometry.fit_all_edges(classifier)?;
    let mut zones = Vec::new();

    while let Some(row) = find_split_row(&working, classifier, min_height)? {
        let (upper, lower) = working.split_at_row(row);
        match block_fit_geometry(upper, classifier, min_height)? {
            Some(zone) => {
                debug!(row, line = zones.len(), "Line split off");
                zones.push(zone);
            }
            None => {
                debug!(row, "Line above split too thin; keeping remainder whole");
                break;
            }
        }
        working = lower.fit_edge(Side::Top, classifier)?;
    }

    if let Some(zone) = block_fit_geometry(working, classifier, min_height)? {
        zones.push(zone);
    }

    Ok((!zones.is_empty()).then_some(zones))
}

/// Line-fit a page zone.
pub fn line_fit<C>(
    zone: &SpatialZone,
    classifier: &C,
    min_height: u32,
) -> Result<Option<Vec<SpatialZone>>>
where
    C: PixelClassifier + ?Sized,
{
    line_fit_geometry(ZoneGeometry::from_zone(zone)?, classifier, min_height)
}

/// Find a blank row (offset from the top edge) where `region` can be cut into
/// two lines of at least `min_height` rows each.
///
/// The search starts at the last row of a minimum-height first line, finds the
/// first ink row, then the first blank row after it, and finally checks that
/// more ink follows before the last `min_height` rows.
pub fn find_split_row<C>(
    region: &ZoneGeometry,
    classifier: &C,
    min_height: u32,
) -> Result<Option<i64>>
where
    C: PixelClassifier + ?Sized,
{
    let height = region.height();
    let min_height = i64::from(min_height);
    let max_row = (height - min_height).min(height - 1);
    if max_row <= min_height {
        return Ok(None);
    }

    let first = (min_height - 1).max(0);
    let Some(content) = region.find_row(Side::Top, classifier, true, first, max_row)? else {
        return Ok(None);
    };
    let Some(split) = region.find_row(Side::Top, classifier, false, content, max_row)? else {
        return Ok(None);
    };
    if region
        .find_row(Side::Top, classifier, true, split, max_row)?
        .is_none()
    {
        return Ok(None);
    }
    Ok(Some(split))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::block::block_fit;
    use crate::testing::page_with_blocks;
    use zonewerk_core::{PageId, PixelRect, Point};

    fn zone(rect: PixelRect) -> SpatialZone {
        SpatialZone::axis_aligned(PageId(0), rect)
    }

    fn bounds(zones: &[SpatialZone]) -> Vec<PixelRect> {
        zones.iter().filter_map(SpatialZone::pixel_bounds).collect()
    }

    #[test]
    fn two_lines_split_at_gap() {
        let classifier = page_with_blocks(
            80,
            60,
            &[PixelRect::new(10, 0, 70, 20), PixelRect::new(10, 26, 70, 45)],
        );
        let zones = line_fit(&zone(PixelRect::new(0, 0, 79, 45)), &classifier, 5)
            .unwrap()
            .unwrap();
        assert_eq!(
            bounds(&zones),
            vec![PixelRect::new(10, 0, 70, 20), PixelRect::new(10, 26, 70, 45)]
        );
    }

    #[test]
    fn short_zone_is_not_split() {
        // 9 rows under a 5-pixel minimum: no room for two lines.
        let classifier = page_with_blocks(
            40,
            20,
            &[PixelRect::new(0, 2, 30, 4), PixelRect::new(5, 6, 35, 10)],
        );
        let area = zone(PixelRect::new(0, 2, 39, 10));
        let zones = line_fit(&area, &classifier, 5).unwrap().unwrap();
        let single = block_fit(&area, &classifier, 5).unwrap().unwrap();
        assert_eq!(zones, vec![single]);
    }

    #[test]
    fn lines_come_out_top_to_bottom_with_own_widths() {
        let classifier = page_with_blocks(
            200,
            200,
            &[
                PixelRect::new(20, 20, 180, 31),
                PixelRect::new(20, 40, 120, 51),
                PixelRect::new(35, 60, 160, 71),
            ],
        );
        let zones = line_fit(&zone(PixelRect::new(0, 0, 199, 99)), &classifier, 8)
            .unwrap()
            .unwrap();
        assert_eq!(
            bounds(&zones),
            vec![
                PixelRect::new(20, 20, 180, 31),
                PixelRect::new(20, 40, 120, 51),
                PixelRect::new(35, 60, 160, 71),
            ]
        );
    }

    #[test]
    fn lines_of_exactly_min_height_split() {
        let classifier = page_with_blocks(
            30,
            30,
            &[PixelRect::new(0, 0, 29, 4), PixelRect::new(0, 6, 29, 10)],
        );
        let zones = line_fit(&zone(PixelRect::new(0, 0, 29, 29)), &classifier, 5)
            .unwrap()
            .unwrap();
        assert_eq!(
            bounds(&zones),
            vec![PixelRect::new(0, 0, 29, 4), PixelRect::new(0, 6, 29, 10)]
        );
    }

    #[test]
    fn line_thinner_than_minimum_joins_the_next() {
        // A 2-row line between two full lines sits inside the minimum-height
        // window of the search, so it is kept with the line below it.
        let classifier = page_with_blocks(
            50,
            60,
            &[
                PixelRect::new(0, 0, 49, 6),
                PixelRect::new(0, 8, 49, 9),
                PixelRect::new(0, 12, 49, 40),
            ],
        );
        let zones = line_fit(&zone(PixelRect::new(0, 0, 49, 59)), &classifier, 5)
            .unwrap()
            .unwrap();
        assert_eq!(
            bounds(&zones),
            vec![PixelRect::new(0, 0, 49, 6), PixelRect::new(0, 8, 49, 40)]
        );
    }

    #[test]
    fn vertical_zone_splits_in_its_own_frame() {
        // Two columns of text on a page turned a quarter.
        let column_a = PixelRect::new(10, 5, 25, 58);
        let column_b = PixelRect::new(32, 5, 47, 58);
        let classifier = page_with_blocks(64, 64, &[column_a, column_b]);

        // Drawn downward the zone's top edge is on the right of the page.
        let down = SpatialZone::new(PageId(0), Point::new(30.0, 0.0), Point::new(30.0, 64.0), 60.0);
        let zones = line_fit(&down, &classifier, 5).unwrap().unwrap();
        assert_eq!(bounds(&zones), vec![column_b, column_a]);

        // Drawn upward it is on the left.
        let up = SpatialZone::new(PageId(0), Point::new(30.0, 64.0), Point::new(30.0, 0.0), 60.0);
        let zones = line_fit(&up, &classifier, 5).unwrap().unwrap();
        assert_eq!(bounds(&zones), vec![column_a, column_b]);
    }

    #[test]
    fn blank_zone_yields_nothing() {
        let classifier = page_with_blocks(50, 50, &[]);
        let zones = line_fit(&zone(PixelRect::new(0, 0, 49, 49)), &classifier, 5).unwrap();
        assert!(zones.is_none());
    }

    #[test]
    fn trailing_noise_is_not_a_second_line() {
        // One line plus a speck too close to the bottom to be a line.
        let classifier = page_with_blocks(
            40,
            40,
            &[PixelRect::new(0, 0, 39, 20), PixelRect::new(10, 24, 11, 25)],
        );
        let area = zone(PixelRect::new(0, 0, 39, 25));
        let geometry = ZoneGeometry::from_zone(&area)
            .unwrap()
            .fit_all_edges(&classifier)
            .unwrap();
        assert_eq!(find_split_row(&geometry, &classifier, 5).unwrap(), None);
    }

    #[test]
    fn split_row_is_first_blank_row_after_content() {
        let classifier = page_with_blocks(
            40,
            60,
            &[PixelRect::new(0, 0, 39, 20), PixelRect::new(0, 26, 39, 45)],
        );
        let geometry = ZoneGeometry::from_zone(&zone(PixelRect::new(0, 0, 39, 45))).unwrap();
        assert_eq!(find_split_row(&geometry, &classifier, 5).unwrap(), Some(21));
    }
}
