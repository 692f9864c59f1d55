// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zone geometry — a zone's four edges in its own unrotated pixel grid, with
// the line scans and edge shrinks the fitting algorithms are built from.

pub mod geometry;

pub use geometry::{Side, ZoneGeometry};
