// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Zonewerk zone-fitting engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZonewerkError};

/// Identifier of one page in the caller's document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub u32);

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in page-pixel coordinates (x grows right, y grows down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Inclusive rectangle of whole pixels: columns `left..=right`, rows
/// `top..=bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl PixelRect {
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Number of pixel columns covered (0 for an inverted rectangle).
    pub fn width(&self) -> u64 {
        (self.right - self.left + 1).max(0) as u64
    }

    /// Number of pixel rows covered (0 for an inverted rectangle).
    pub fn height(&self) -> u64 {
        (self.bottom - self.top + 1).max(0) as u64
    }

    /// Whether the pixel `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }
}

/// An oriented rectangular region on one page.
///
/// The zone is described by the two end points of its central axis and a
/// thickness measured perpendicular to that axis. A horizontal zone drawn left
/// to right over pixel rows `10..=50` has its axis at `y = 30.5` and a height
/// of 41.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialZone {
    pub page: PageId,
    pub start: Point,
    pub end: Point,
    pub height: f64,
}

impl SpatialZone {
    pub fn new(page: PageId, start: Point, end: Point, height: f64) -> Self {
        Self {
            page,
            start,
            end,
            height,
        }
    }

    /// Horizontal zone covering exactly the pixels of `rect`.
    pub fn axis_aligned(page: PageId, rect: PixelRect) -> Self {
        let mid_y = (rect.top + rect.bottom + 1) as f64 / 2.0;
        Self {
            page,
            start: Point::new(rect.left as f64, mid_y),
            end: Point::new((rect.right + 1) as f64, mid_y),
            height: rect.height() as f64,
        }
    }

    /// Length of the central axis.
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    /// Reject coordinates the geometry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ZonewerkError::InvalidZone(format!(
                "axis end points must be finite, got {:?} -> {:?}",
                self.start, self.end
            )));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(ZonewerkError::InvalidZone(format!(
                "height must be a finite non-negative number, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// The four corners, in order: start-top, end-top, end-bottom,
    /// start-bottom. For an axis with direction `(dx, dy)` the normal is
    /// `(-dy, dx)`; "top" sits half a height against the normal, so a zone
    /// drawn left to right has its top edge above the axis.
    pub fn corners(&self) -> [Point; 4] {
        let length = self.length();
        let (nx, ny) = if length > 0.0 {
            (
                -(self.end.y - self.start.y) / length,
                (self.end.x - self.start.x) / length,
            )
        } else {
            (0.0, 1.0)
        };
        let half = self.height / 2.0;
        let offset = |p: Point, k: f64| Point::new(p.x + nx * k, p.y + ny * k);
        [
            offset(self.start, -half),
            offset(self.end, -half),
            offset(self.end, half),
            offset(self.start, half),
        ]
    }

    /// Smallest pixel rectangle covering the zone, or `None` for a zone with
    /// no area.
    ///
    /// Exact for zones whose axis is a multiple of 90 degrees and whose edges
    /// sit on pixel boundaries.
    pub fn pixel_bounds(&self) -> Option<PixelRect> {
        if self.length() <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let corners = self.corners();
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Some(PixelRect::new(
            min_x.round() as i64,
            min_y.round() as i64,
            max_x.round() as i64 - 1,
            max_y.round() as i64 - 1,
        ))
    }
}

/// How a user-drawn zone is turned into annotation zones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Keep the zone exactly as drawn.
    Raw,
    /// Shrink the zone to the ink beneath it.
    #[default]
    Block,
    /// One shrunk zone per line of text.
    Line,
}

/// Foreground/background policy used to build a bitmap classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdPolicy {
    /// Ink when luma is strictly below the value.
    Fixed(u8),
    /// Global threshold chosen from the page histogram.
    Otsu,
    /// Ink when luma is below the local mean minus `c`.
    Adaptive { block_radius: u32, c: i32 },
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::Fixed(128)
    }
}
