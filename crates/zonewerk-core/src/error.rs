// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Zonewerk.
//
// Only hard failures live here. A fit that finds no ink, or a zone that is too
// thin to keep, is reported as `None`/an empty result, never as an error.

use thiserror::Error;

use crate::types::PageId;

/// Top-level error type for all Zonewerk operations.
#[derive(Debug, Error)]
pub enum ZonewerkError {
    // -- Zone errors --
    #[error("invalid zone: {0}")]
    InvalidZone(String),

    // -- Classifier errors --
    #[error("classifier is bound to page {expected}, but page {actual} was queried")]
    PageMismatch { expected: PageId, actual: PageId },

    /// Raised by `PixelClassifier` implementations outside this workspace
    /// (tile caches, remote page stores) when a pixel cannot be read.
    #[error("pixel classifier failed: {0}")]
    Classifier(String),

    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ZonewerkError {
    /// Whether this error came from the pixel classifier rather than from the
    /// zone or the configuration.
    pub fn is_classifier_failure(&self) -> bool {
        matches!(self, Self::PageMismatch { .. } | Self::Classifier(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ZonewerkError>;
