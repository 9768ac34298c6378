// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use crate::engine::PickerSession;

/// Everything the painter reads and the input handler mutates. The picker
/// session inside is UI-free; this wraps it with the bits that only matter to
/// the terminal front end (cursor, scroll, transient status line, window size).
#[derive(Debug, Default)]
pub struct AppState {
    pub session: PickerSession,
    pub load_phase: LoadPhase,
    /// Which roster row the selection cursor sits on.
    pub cursor_index: usize,
    /// First roster row visible in the list panel.
    pub scroll_offset: usize,
    /// One-shot message shown in the status bar until the next spin request,
    /// eg a rejected spin.
    pub status_message: Option<String>,
    pub(crate) window_size: (u16, u16),
}

/// Where the initial sheet fetch stands. The wheel only exists once this
/// reaches [LoadPhase::Ready] with a non empty roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadPhase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPhase::Loading => "loading",
            LoadPhase::Ready => "ready",
            LoadPhase::Failed(_) => "failed",
        }
    }
}

mod window {
    use super::*;

    impl AppState {
        pub fn set_window_size(&mut self, cols: u16, rows: u16) {
            self.window_size = (cols, rows);
        }

        #[must_use]
        pub fn window_size(&self) -> (u16, u16) { self.window_size }
    }
}

mod cursor {
    use super::*;

    impl AppState {
        pub fn move_cursor_up(&mut self) {
            self.cursor_index = self.cursor_index.saturating_sub(1);
        }

        pub fn move_cursor_down(&mut self) {
            let row_count = self.session.roster().len();
            if row_count == 0 {
                return;
            }
            self.cursor_index = (self.cursor_index + 1).min(row_count - 1);
        }

        /// A fresh roster invalidates any old cursor position.
        pub fn reset_cursor(&mut self) {
            self.cursor_index = 0;
            self.scroll_offset = 0;
        }

        /// Slide the scroll window so the cursor row is inside the visible part
        /// of the list panel. Called right before painting, when the panel
        /// height is known.
        pub fn ensure_cursor_visible(&mut self, visible_rows: usize) {
            if visible_rows == 0 {
                return;
            }
            if self.cursor_index < self.scroll_offset {
                self.scroll_offset = self.cursor_index;
            }
            if self.cursor_index >= self.scroll_offset + visible_rows {
                self.scroll_offset = self.cursor_index + 1 - visible_rows;
            }
        }
    }
}

mod impl_display {
    use super::*;

    /// Efficient Display implementation for telemetry logging. Called on every
    /// paint, so it avoids walking the roster.
    impl Display for AppState {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            write!(
                f,
                "AppState[load={}, cursor={}, scroll={}, {}]",
                self.load_phase.as_str(),
                self.cursor_index,
                self.scroll_offset,
                self.session
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, engine::CandidateRoster};

    fn state_with_rows(count: usize) -> AppState {
        let labels = (0..count).map(|index| format!("row_{index}")).collect();
        let mut state = AppState::default();
        state.session.apply_roster(CandidateRoster::new(labels));
        state
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut state = state_with_rows(3);

        state.move_cursor_up();
        assert_eq2!(state.cursor_index, 0);

        state.move_cursor_down();
        state.move_cursor_down();
        state.move_cursor_down();
        state.move_cursor_down();
        assert_eq2!(state.cursor_index, 2);
    }

    #[test]
    fn cursor_is_inert_on_an_empty_roster() {
        let mut state = state_with_rows(0);
        state.move_cursor_down();
        state.move_cursor_up();
        assert_eq2!(state.cursor_index, 0);
    }

    #[test]
    fn scroll_follows_the_cursor_down_and_back_up() {
        let mut state = state_with_rows(10);

        for _ in 0..6 {
            state.move_cursor_down();
        }
        state.ensure_cursor_visible(4);
        // Cursor on row 6, window of 4 rows shows rows 3..=6.
        assert_eq2!(state.scroll_offset, 3);

        for _ in 0..6 {
            state.move_cursor_up();
        }
        state.ensure_cursor_visible(4);
        assert_eq2!(state.scroll_offset, 0);
    }

    #[test]
    fn scroll_is_untouched_while_the_cursor_stays_visible() {
        let mut state = state_with_rows(10);
        state.move_cursor_down();
        state.ensure_cursor_visible(4);
        assert_eq2!(state.scroll_offset, 0);
    }

    #[test]
    fn display_is_compact_telemetry() {
        let state = state_with_rows(2);
        let text = format!("{state}");
        assert!(text.starts_with("AppState[load=loading, cursor=0, scroll=0,"));
        assert!(text.contains("candidates=2"));
    }
}
