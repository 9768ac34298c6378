// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Paints the wheel as a disc of colored background cells, with a `▼` pointer
//! at twelve o'clock. Terminal cells are roughly twice as tall as they are
//! wide, so all the circle math happens in "column units" where one row counts
//! for two columns.

use std::io::Stdout;

use crossterm::{cursor::MoveTo,
                queue,
                style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor}};
use miette::IntoDiagnostic;

use super::{AppState, LoadPhase, Region, UIStrings};
use crate::{CommonResult,
            engine::{Rgb, WheelHandle, normalize_angle, segment_index_at},
            throws};

mod constants {
    use super::Rgb;

    /// The pointer glyph and its dark gray fill.
    pub const POINTER_GLYPH: char = '▼';
    pub const POINTER_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x33);

    /// The small dead zone at the center of the disc.
    pub const HUB_COLOR: Rgb = Rgb::new(0x22, 0x22, 0x22);
    pub const HUB_RADIUS: f64 = 1.5;

    /// Breathing room between the disc and the region edge, in column units.
    pub const DISC_MARGIN: f64 = 1.0;
}

/// Circle geometry for one canvas region, in region-local column units (a row
/// is two units tall).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl WheelGeometry {
    #[must_use]
    pub fn for_region(region: Region) -> Self {
        let width = f64::from(region.width);
        let height_units = f64::from(region.height) * 2.0;
        let radius = ((width.min(height_units) / 2.0) - constants::DISC_MARGIN).max(1.0);
        Self {
            center_x: width / 2.0,
            center_y: height_units / 2.0,
            radius,
        }
    }
}

/// What one canvas cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasCell {
    Outside,
    /// Part of the disc, filled with this segment's color.
    Disc(usize),
    Hub,
    Pointer,
}

/// Degrees clockwise from twelve o'clock for a vector in screen coordinates,
/// where `dy` grows downward.
#[must_use]
pub fn screen_angle_deg(dx: f64, dy: f64) -> f64 {
    normalize_angle(dx.atan2(-dy).to_degrees())
}

/// The cell the pointer glyph occupies: the top edge of the disc, on the
/// center column.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pointer_cell(geometry: WheelGeometry) -> (u16, u16) {
    let col = (geometry.center_x - 0.5).floor().max(0.0) as u16;
    let row = ((geometry.center_y - geometry.radius - 1.0) / 2.0).ceil().max(0.0) as u16;
    (col, row)
}

/// Classify the cell at region-local `(col, row)`. The pointer wins over the
/// disc cell it covers.
#[must_use]
pub fn classify_cell(
    geometry: WheelGeometry,
    wheel: &WheelHandle,
    col: u16,
    row: u16,
) -> CanvasCell {
    if (col, row) == pointer_cell(geometry) {
        return CanvasCell::Pointer;
    }

    let dx = (f64::from(col) + 0.5) - geometry.center_x;
    let dy = (f64::from(row) * 2.0 + 1.0) - geometry.center_y;
    let distance = dx.hypot(dy);

    if distance > geometry.radius {
        return CanvasCell::Outside;
    }
    if distance <= constants::HUB_RADIUS {
        return CanvasCell::Hub;
    }

    let screen_angle = screen_angle_deg(dx, dy);
    CanvasCell::Disc(segment_index_at(
        wheel.rotation_angle,
        wheel.segment_count(),
        screen_angle,
    ))
}

/// Convert a palette color to the terminal's RGB color type.
#[must_use]
pub fn to_crossterm_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
    }
}

/// Paint the canvas region: the disc when a wheel exists, otherwise a centered
/// placeholder line for the current load phase.
///
/// # Errors
///
/// When queueing terminal commands fails.
pub fn paint(stdout: &mut Stdout, state: &AppState, region: Region) -> CommonResult<()> {
    throws!({
        match state.session.wheel() {
            Some(wheel) => paint_disc(stdout, wheel, region)?,
            None => paint_placeholder(stdout, state, region)?,
        }
    });
}

fn paint_disc(stdout: &mut Stdout, wheel: &WheelHandle, region: Region) -> CommonResult<()> {
    throws!({
        let geometry = WheelGeometry::for_region(region);
        for row in 0..region.height {
            queue!(stdout, MoveTo(region.col, region.row + row)).into_diagnostic()?;
            for col in 0..region.width {
                match classify_cell(geometry, wheel, col, row) {
                    CanvasCell::Outside => {
                        queue!(stdout, ResetColor, Print(' ')).into_diagnostic()?;
                    }
                    CanvasCell::Disc(index) => {
                        let fill = wheel.segments()[index].fill;
                        queue!(
                            stdout,
                            SetBackgroundColor(to_crossterm_color(fill)),
                            Print(' ')
                        )
                        .into_diagnostic()?;
                    }
                    CanvasCell::Hub => {
                        queue!(
                            stdout,
                            SetBackgroundColor(to_crossterm_color(constants::HUB_COLOR)),
                            Print(' ')
                        )
                        .into_diagnostic()?;
                    }
                    CanvasCell::Pointer => {
                        // The pointer sits at screen angle zero, over the
                        // indicated segment.
                        let fill = wheel.indicated_segment().fill;
                        queue!(
                            stdout,
                            SetBackgroundColor(to_crossterm_color(fill)),
                            SetForegroundColor(to_crossterm_color(
                                constants::POINTER_COLOR
                            )),
                            Print(constants::POINTER_GLYPH)
                        )
                        .into_diagnostic()?;
                    }
                }
            }
            queue!(stdout, ResetColor).into_diagnostic()?;
        }
    });
}

#[allow(clippy::cast_possible_truncation)]
fn paint_placeholder(
    stdout: &mut Stdout,
    state: &AppState,
    region: Region,
) -> CommonResult<()> {
    throws!({
        for row in 0..region.height {
            queue!(stdout, MoveTo(region.col, region.row + row), ResetColor)
                .into_diagnostic()?;
            for _ in 0..region.width {
                queue!(stdout, Print(' ')).into_diagnostic()?;
            }
        }

        let text = match &state.load_phase {
            LoadPhase::Loading => UIStrings::LoadingCandidates.to_string(),
            LoadPhase::Failed(error_message) => UIStrings::FailedToLoadCandidates {
                error_message: error_message.clone(),
            }
            .to_string(),
            LoadPhase::Ready => UIStrings::NoRestaurantsSelected.to_string(),
        };
        let text: String = text.chars().take(usize::from(region.width)).collect();
        let text_width = text.chars().count() as u16;
        let text_col = region.col + (region.width.saturating_sub(text_width)) / 2;
        let text_row = region.row + region.height / 2;
        queue!(stdout, MoveTo(text_col, text_row), Print(text)).into_diagnostic()?;
    });
}
