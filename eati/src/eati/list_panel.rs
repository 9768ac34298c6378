// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The roster list: one row per candidate with a checkbox, a palette color
//! chip for rows that are on the wheel, and a `›` marker on the cursor row.

use std::io::Stdout;

use crossterm::{cursor::MoveTo,
                queue,
                style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor}};
use miette::IntoDiagnostic;

use super::{AppState, Region, wheel_canvas::to_crossterm_color};
use crate::{CommonResult,
            engine::{CandidateRoster, SEGMENT_PALETTE},
            throws};

mod constants {
    pub const FOCUS_MARKER: char = '›';
    pub const INCLUDED_CHECKBOX: char = '☑';
    pub const EXCLUDED_CHECKBOX: char = '☐';
    pub const COLOR_CHIP: char = '■';
}

/// For each roster row, its position among the active rows (which decides its
/// palette color), or [None] for excluded rows.
#[must_use]
pub fn active_positions(roster: &CandidateRoster) -> Vec<Option<usize>> {
    let mut positions = vec![None; roster.len()];
    for (active_position, (roster_index, _)) in roster.active().enumerate() {
        positions[roster_index] = Some(active_position);
    }
    positions
}

/// The fixed leading part of a list row: focus marker plus checkbox.
#[must_use]
pub fn row_prefix(included: bool, focused: bool) -> String {
    let focus = if focused { constants::FOCUS_MARKER } else { ' ' };
    let checkbox = if included {
        constants::INCLUDED_CHECKBOX
    } else {
        constants::EXCLUDED_CHECKBOX
    };
    format!("{focus} {checkbox} ")
}

/// Truncate `text` to `width` chars, or pad it with trailing spaces out to
/// `width` so the row overwrites whatever was painted before.
#[must_use]
pub fn pad_or_truncate(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    let padding = width.saturating_sub(truncated.chars().count());
    format!("{truncated}{}", " ".repeat(padding))
}

/// Paint the list panel region. Rows outside the scroll window are blanked.
///
/// # Errors
///
/// When queueing terminal commands fails.
pub fn paint(stdout: &mut Stdout, state: &AppState, region: Region) -> CommonResult<()> {
    throws!({
        let roster = state.session.roster();
        let positions = active_positions(roster);

        for panel_row in 0..region.height {
            queue!(
                stdout,
                MoveTo(region.col, region.row + panel_row),
                ResetColor
            )
            .into_diagnostic()?;

            let roster_index = state.scroll_offset + usize::from(panel_row);
            let Some(label) = roster.label(roster_index) else {
                // Past the end of the roster, blank the row.
                queue!(stdout, Print(pad_or_truncate("", usize::from(region.width))))
                    .into_diagnostic()?;
                continue;
            };

            let included = !roster.is_excluded(roster_index);
            let focused = roster_index == state.cursor_index;

            let prefix = row_prefix(included, focused);
            queue!(stdout, Print(&prefix)).into_diagnostic()?;

            match positions[roster_index] {
                Some(active_position) => {
                    let fill = SEGMENT_PALETTE[active_position % SEGMENT_PALETTE.len()];
                    queue!(
                        stdout,
                        SetForegroundColor(to_crossterm_color(fill)),
                        Print(constants::COLOR_CHIP),
                        ResetColor
                    )
                    .into_diagnostic()?;
                }
                None => {
                    queue!(stdout, Print(' ')).into_diagnostic()?;
                }
            }
            queue!(stdout, Print(' ')).into_diagnostic()?;

            let label_width = usize::from(region.width)
                .saturating_sub(prefix.chars().count() + 2);
            if included {
                queue!(stdout, Print(pad_or_truncate(label, label_width)))
                    .into_diagnostic()?;
            } else {
                queue!(
                    stdout,
                    SetAttribute(Attribute::Dim),
                    Print(pad_or_truncate(label, label_width)),
                    SetAttribute(Attribute::NormalIntensity)
                )
                .into_diagnostic()?;
            }
        }
    });
}
