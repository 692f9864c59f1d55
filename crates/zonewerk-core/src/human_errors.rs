// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for the viewer's status bar.
//
// Every technical error is mapped to plain English with a clear suggestion.
// An empty fit is not an error, but the viewer still tells the user why no
// highlight appeared, so it gets a message here too.

use crate::error::ZonewerkError;
use crate::types::FitMode;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user can fix it (draw again, pick another file, edit settings).
    ActionRequired,
    /// The input cannot be used as-is.
    Permanent,
    /// Something inside the viewer went wrong; worth reporting.
    Bug,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ZonewerkError` into a `HumanError`.
pub fn humanize_error(err: &ZonewerkError) -> HumanError {
    match err {
        ZonewerkError::InvalidZone(_) => HumanError {
            message: "That selection couldn't be used.".into(),
            suggestion: "Try drawing the box again over the text you want to mark.".into(),
            severity: Severity::ActionRequired,
        },

        ZonewerkError::PageMismatch { expected, actual } => HumanError {
            message: "The selection and the page got out of step.".into(),
            suggestion: format!(
                "Try again. If this keeps happening, please report it. (Page {actual} was checked against page {expected}.)"
            ),
            severity: Severity::Bug,
        },

        ZonewerkError::Classifier(_) => HumanError {
            message: "We couldn't read the page under your selection.".into(),
            suggestion: "Try reopening the document. If this keeps happening, please report it.".into(),
            severity: Severity::Bug,
        },

        ZonewerkError::ImageError(_) => HumanError {
            message: "There's a problem with this page image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a PNG or TIFF first.".into(),
            severity: Severity::Permanent,
        },

        ZonewerkError::Config(detail) => HumanError {
            message: "The fitting settings aren't valid.".into(),
            suggestion: format!("Check the settings file and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        ZonewerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Check the file permissions and try again.".into(),
                    severity: Severity::ActionRequired,
                }
            }
        }

        ZonewerkError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "The file may be damaged. Delete it to go back to the default settings.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

/// Message shown when a fit produced no zones and the drawing was dropped.
pub fn humanize_empty_fit(mode: FitMode) -> HumanError {
    let message = match mode {
        FitMode::Line => "No lines of text were found in that selection.",
        FitMode::Block | FitMode::Raw => "No text was found in that selection.",
    };
    HumanError {
        message: message.into(),
        suggestion: "Draw the box over the printed text, or hold the modifier key to keep the box exactly as drawn.".into(),
        severity: Severity::ActionRequired,
    }
}
