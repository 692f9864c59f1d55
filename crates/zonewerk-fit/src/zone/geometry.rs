// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Working geometry of one zone during a fit.
//
// The zone's local frame has columns running along its central axis and rows
// running across it, so a zone drawn at any right angle is scanned the same
// way. Edges are half-open: the zone covers columns `left..right` and rows
// `top..bottom`.

use zonewerk_core::error::Result;
use zonewerk_core::{PageId, Point, SpatialZone};

use crate::classifier::PixelClassifier;

/// One of the four edges of a zone, in its local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    /// Order in which block fitting shrinks the edges. Sparse corner content
    /// can give a slightly different box under another order, so it is fixed.
    pub const FIT_ORDER: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

    /// Whether lines parallel to this side are pixel rows.
    fn scans_rows(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// Immutable snapshot of a zone's edges. Every edge operation returns a new
/// value, so speculative sub-zones never alias the region they came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneGeometry {
    page: PageId,
    /// Page position of the local corner (column 0, row 0).
    origin: Point,
    /// Unit vector along the columns (the zone's axis).
    axis: (f64, f64),
    /// Unit vector along the rows.
    normal: (f64, f64),
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl ZoneGeometry {
    /// Lay a pixel grid over `zone`. Only whole cells are kept, so the grid
    /// never reaches past the drawn zone. A zone with a zero-length axis gets
    /// no columns; it can never produce a fitted zone.
    pub fn from_zone(zone: &SpatialZone) -> Result<Self> {
        zone.validate()?;

        let length = zone.length();
        let axis = if length > 0.0 {
            (
                (zone.end.x - zone.start.x) / length,
                (zone.end.y - zone.start.y) / length,
            )
        } else {
            (1.0, 0.0)
        };
        let normal = (-axis.1, axis.0);
        let half = zone.height / 2.0;
        let origin = Point::new(
            zone.start.x - normal.0 * half,
            zone.start.y - normal.1 * half,
        );

        Ok(Self {
            page: zone.page,
            origin,
            axis,
            normal,
            left: 0,
            top: 0,
            right: whole_cells(length),
            bottom: whole_cells(zone.height),
        })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Number of columns between the left and right edges.
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    /// Number of rows between the top and bottom edges.
    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// Current edges as `(left, top, right, bottom)` in the local frame.
    pub fn edges(&self) -> (i64, i64, i64, i64) {
        (self.left, self.top, self.right, self.bottom)
    }

    /// Page pixel sampled for the local cell `(column, row)`.
    pub fn page_pixel(&self, column: i64, row: i64) -> (i64, i64) {
        let u = column as f64 + 0.5;
        let v = row as f64 + 0.5;
        let x = self.origin.x + self.axis.0 * u + self.normal.0 * v;
        let y = self.origin.y + self.axis.1 * u + self.normal.1 * v;
        (x.floor() as i64, y.floor() as i64)
    }

    // -- Scanning -------------------------------------------------------------

    /// Whether the full line at `offset` (counted inward from `side`) holds at
    /// least one foreground pixel.
    pub fn line_has_foreground<C>(&self, side: Side, offset: i64, classifier: &C) -> Result<bool>
    where
        C: PixelClassifier + ?Sized,
    {
        if side.scans_rows() {
            let row = match side {
                Side::Top => self.top + offset,
                _ => self.bottom - 1 - offset,
            };
            for column in self.left..self.right {
                let (x, y) = self.page_pixel(column, row);
                if classifier.is_foreground(self.page, x, y)? {
                    return Ok(true);
                }
            }
        } else {
            let column = match side {
                Side::Left => self.left + offset,
                _ => self.right - 1 - offset,
            };
            for row in self.top..self.bottom {
                let (x, y) = self.page_pixel(column, row);
                if classifier.is_foreground(self.page, x, y)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// First offset in `from..=to`, counted inward from `side`, whose line
    /// contains foreground (`want_foreground`) or is entirely background
    /// (`!want_foreground`). The range is clipped to the zone.
    pub fn find_row<C>(
        &self,
        side: Side,
        classifier: &C,
        want_foreground: bool,
        from: i64,
        to: i64,
    ) -> Result<Option<i64>>
    where
        C: PixelClassifier + ?Sized,
    {
        let extent = self.extent(side);
        let from = from.max(0);
        let to = to.min(extent - 1);
        for offset in from..=to {
            if self.line_has_foreground(side, offset, classifier)? == want_foreground {
                return Ok(Some(offset));
            }
        }
        Ok(None)
    }

    fn extent(&self, side: Side) -> i64 {
        if side.scans_rows() {
            self.height()
        } else {
            self.width()
        }
    }

    // -- Edge operations ------------------------------------------------------

    /// Move `side` inward to the first line holding foreground. Without any
    /// foreground the side collapses onto the opposite edge.
    pub fn fit_edge<C>(self, side: Side, classifier: &C) -> Result<Self>
    where
        C: PixelClassifier + ?Sized,
    {
        let extent = self.extent(side);
        if extent <= 0 {
            return Ok(self);
        }
        Ok(match self.find_row(side, classifier, true, 0, extent - 1)? {
            Some(offset) => self.shrink(side, offset),
            None => self.shrink(side, extent),
        })
    }

    /// Shrink all four edges in [`Side::FIT_ORDER`].
    pub fn fit_all_edges<C>(self, classifier: &C) -> Result<Self>
    where
        C: PixelClassifier + ?Sized,
    {
        Side::FIT_ORDER
            .iter()
            .try_fold(self, |geometry, &side| geometry.fit_edge(side, classifier))
    }

    /// Move `side` inward by `amount` lines, never past the opposite edge.
    pub fn shrink(self, side: Side, amount: i64) -> Self {
        let amount = amount.clamp(0, self.extent(side).max(0));
        let mut next = self;
        match side {
            Side::Left => next.left += amount,
            Side::Top => next.top += amount,
            Side::Right => next.right -= amount,
            Side::Bottom => next.bottom -= amount,
        }
        next
    }

    /// Cut along the row at `row` (offset from the top edge). Returns the part
    /// above the row and the part below it; the row itself belongs to neither.
    pub fn split_at_row(self, row: i64) -> (Self, Self) {
        let row = row.clamp(0, self.height().max(0));
        let upper = self.shrink(Side::Bottom, self.height() - row);
        let lower = self.shrink(Side::Top, row + 1);
        (upper, lower)
    }

    // -- Conversion -----------------------------------------------------------

    /// Turn the current edges back into a page zone. Returns `None` for a zone
    /// without area or thinner than `min_height`.
    pub fn to_zone(&self, min_height: u32) -> Option<SpatialZone> {
        let (width, height) = (self.width(), self.height());
        if width <= 0 || height <= 0 || height < i64::from(min_height) {
            return None;
        }
        let mid = (self.top + self.bottom) as f64 / 2.0;
        let at = |column: i64| {
            let u = column as f64;
            Point::new(
                self.origin.x + self.axis.0 * u + self.normal.0 * mid,
                self.origin.y + self.axis.1 * u + self.normal.1 * mid,
            )
        };
        Some(SpatialZone::new(
            self.page,
            at(self.left),
            at(self.right),
            height as f64,
        ))
    }
}

/// Number of whole cells that fit in `extent` pixels. Extents within float
/// noise of a whole number count as that number.
fn whole_cells(extent: f64) -> i64 {
    let nearest = extent.round();
    if (extent - nearest).abs() < 1e-9 {
        nearest as i64
    } else {
        extent.floor() as i64
    }
}
