// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The single status row at the bottom: spin outcome (or load progress) on the
//! left, keybinding hints on the right.

use std::io::Stdout;

use crossterm::{cursor::MoveTo,
                queue,
                style::{Attribute, Print, ResetColor, SetAttribute}};
use miette::IntoDiagnostic;

use super::{AppState, LoadPhase, UIStrings, list_panel::pad_or_truncate};
use crate::{CommonResult, engine::Outcome, throws};

/// The left-hand status text, by precedence: a transient message (eg a
/// rejected spin) beats the outcome, and a landed outcome stays visible until
/// the next one replaces it.
#[must_use]
pub fn status_text(state: &AppState) -> String {
    if let Some(message) = &state.status_message {
        return message.clone();
    }

    match state.session.outcome() {
        Outcome::Picked(label) => UIStrings::YouShouldEatAt {
            landed: label.clone(),
        }
        .to_string(),
        Outcome::NoCandidates => UIStrings::NoRestaurantsSelected.to_string(),
        Outcome::Pending => match &state.load_phase {
            LoadPhase::Loading => UIStrings::LoadingCandidates.to_string(),
            LoadPhase::Failed(error_message) => UIStrings::FailedToLoadCandidates {
                error_message: error_message.clone(),
            }
            .to_string(),
            LoadPhase::Ready => {
                if state.session.is_spinning() {
                    UIStrings::Spinning.to_string()
                } else {
                    UIStrings::PressSToSpin.to_string()
                }
            }
        },
    }
}

/// Left-align `left`, right-align `right`, and drop `right` when both don't
/// fit.
#[must_use]
pub fn compose_line(left: &str, right: &str, width: usize) -> String {
    let left_count = left.chars().count();
    let right_count = right.chars().count();
    if left_count + right_count + 1 <= width {
        let gap = width - left_count - right_count;
        format!("{left}{}{right}", " ".repeat(gap))
    } else {
        pad_or_truncate(left, width)
    }
}

/// Paint the status row across the full window width.
///
/// # Errors
///
/// When queueing terminal commands fails.
pub fn paint(stdout: &mut Stdout, state: &AppState, cols: u16, row: u16) -> CommonResult<()> {
    throws!({
        let line = compose_line(
            &status_text(state),
            &UIStrings::KeybindingHints.to_string(),
            usize::from(cols),
        );
        queue!(
            stdout,
            MoveTo(0, row),
            ResetColor,
            SetAttribute(Attribute::Reverse),
            Print(line),
            SetAttribute(Attribute::NoReverse)
        )
        .into_diagnostic()?;
    });
}
