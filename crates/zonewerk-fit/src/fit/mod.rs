// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fitting entry points — block fit, line fit, and mode dispatch for the
// viewer's drawing tools.

pub mod block;
pub mod line;

use serde::Serialize;
use tracing::{info, instrument, warn};
use zonewerk_core::error::Result;
use zonewerk_core::{FitConfig, FitMode, SpatialZone};

use crate::classifier::PixelClassifier;
use crate::zone::ZoneGeometry;

/// Zones produced for one user-drawn zone. Empty means the drawing should be
/// dropped without creating an annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub mode: FitMode,
    pub zones: Vec<SpatialZone>,
}

impl FitResult {
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn into_zones(self) -> Vec<SpatialZone> {
        self.zones
    }
}

impl IntoIterator for FitResult {
    type Item = SpatialZone;
    type IntoIter = std::vec::IntoIter<SpatialZone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.into_iter()
    }
}

/// Shrinks user-drawn zones onto the ink beneath them.
///
/// ```ignore
/// let classifier = BitmapClassifier::open(PageId(0), "page.png", ThresholdPolicy::Otsu)?;
/// let fitter = ZoneFitter::new(8);
/// for zone in fitter.fit(&drawn, FitMode::Line, &classifier)? {
///     annotations.push(Redaction::new(zone));
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneFitter {
    min_split_height: u32,
}

impl Default for ZoneFitter {
    fn default() -> Self {
        Self::from_config(&FitConfig::default())
    }
}

impl ZoneFitter {
    pub fn new(min_split_height: u32) -> Self {
        Self { min_split_height }
    }

    pub fn from_config(config: &FitConfig) -> Self {
        Self::new(config.min_split_height)
    }

    pub fn min_split_height(&self) -> u32 {
        self.min_split_height
    }

    /// Shrink `zone` to the tight box around its ink.
    ///
    /// `Ok(None)` when the zone holds no ink or the box is thinner than the
    /// minimum split height. `Err` only for an invalid zone or a failing
    /// classifier.
    #[instrument(skip(self, classifier), fields(page = %zone.page, min = self.min_split_height))]
    pub fn block_fit<C>(&self, zone: &SpatialZone, classifier: &C) -> Result<Option<SpatialZone>>
    where
        C: PixelClassifier + ?Sized,
    {
        block::block_fit(zone, classifier, self.min_split_height)
    }

    /// Split `zone` into one tight zone per line of text, top to bottom.
    #[instrument(skip(self, classifier), fields(page = %zone.page, min = self.min_split_height))]
    pub fn line_fit<C>(
        &self,
        zone: &SpatialZone,
        classifier: &C,
    ) -> Result<Option<Vec<SpatialZone>>>
    where
        C: PixelClassifier + ?Sized,
    {
        line::line_fit(zone, classifier, self.min_split_height)
    }

    /// Blank row at which `region` can be cut into two lines, as an offset
    /// from its top edge.
    pub fn find_split_row<C>(&self, region: &ZoneGeometry, classifier: &C) -> Result<Option<i64>>
    where
        C: PixelClassifier + ?Sized,
    {
        line::find_split_row(region, classifier, self.min_split_height)
    }

    /// Apply the drawing mode chosen by the caller.
    #[instrument(skip(self, classifier), fields(page = %zone.page))]
    pub fn fit<C>(&self, zone: &SpatialZone, mode: FitMode, classifier: &C) -> Result<FitResult>
    where
        C: PixelClassifier + ?Sized,
    {
        let fitted = match mode {
            FitMode::Raw => Ok(vec![*zone]),
            FitMode::Block => self.block_fit(zone, classifier).map(|z| z.into_iter().collect()),
            FitMode::Line => self.line_fit(zone, classifier).map(Option::unwrap_or_default),
        };
        let zones = fitted.inspect_err(|err| {
            if err.is_classifier_failure() {
                warn!(error = %err, "Pixel classifier failed during fit");
            }
        })?;

        info!(?mode, zones = zones.len(), "Zone fitted");
        Ok(FitResult { mode, zones })
    }
}
