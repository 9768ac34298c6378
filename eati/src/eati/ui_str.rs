// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;

/// Every user visible string in the app, in one place.
#[derive(Display)]
pub enum UIStrings {
    #[strum(serialize = "🎡 eati: spin the wheel, pick a restaurant")]
    TitleBar,

    #[strum(serialize = "You should eat at: {landed}")]
    YouShouldEatAt { landed: String },

    #[strum(serialize = "No restaurants selected!")]
    NoRestaurantsSelected,

    #[strum(serialize = "Wheel is already spinning")]
    WheelIsAlreadySpinning,

    #[strum(serialize = "Wheel is not initialized")]
    WheelIsNotInitialized,

    #[strum(serialize = "Loading restaurants from the sheet ...")]
    LoadingCandidates,

    #[strum(serialize = "Could not load the sheet: {error_message}")]
    FailedToLoadCandidates { error_message: String },

    #[strum(serialize = "Spinning ...")]
    Spinning,

    #[strum(serialize = "Press s to spin")]
    PressSToSpin,

    #[strum(serialize = "↑/↓ move · Space toggle · s spin · q quit")]
    KeybindingHints,

    #[strum(
        serialize = "Terminal too small, need at least {min_cols} x {min_rows} (have {cols} x {rows})"
    )]
    WindowTooSmall {
        min_cols: u16,
        min_rows: u16,
        cols: u16,
        rows: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn landed_message_interpolates_the_label() {
        let text = UIStrings::YouShouldEatAt {
            landed: "Falafel Hut".to_string(),
        }
        .to_string();
        assert_eq2!(text, "You should eat at: Falafel Hut");
    }

    #[test]
    fn empty_roster_message_matches_the_status_line() {
        assert_eq2!(
            UIStrings::NoRestaurantsSelected.to_string(),
            "No restaurants selected!"
        );
    }
}
