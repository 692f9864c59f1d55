// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fitting configuration, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ZonewerkError};
use crate::types::{FitMode, ThresholdPolicy};

/// Persistent zone-fitting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Smallest zone height (pixels) worth keeping. Thinner fitted or split
    /// zones are discarded.
    pub min_split_height: u32,
    /// Mode used when the caller does not pick one.
    pub default_mode: FitMode,
    /// How page pixels are classified as ink or paper.
    pub threshold: ThresholdPolicy,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_split_height: 8,
            default_mode: FitMode::Block,
            threshold: ThresholdPolicy::default(),
        }
    }
}

impl FitConfig {
    /// Read a config file. Missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "Fit config loaded");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let ThresholdPolicy::Adaptive { block_radius: 0, .. } = self.threshold {
            return Err(ZonewerkError::Config(
                "adaptive threshold needs a block radius of at least 1".into(),
            ));
        }
        Ok(())
    }
}
