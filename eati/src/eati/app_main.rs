// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The main event loop: multiplexes terminal input with signals from the spin
//! task and the sheet fetch task, updates the picker session, and repaints.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::{FutureExt, StreamExt};
use miette::IntoDiagnostic;
use tokio::sync::mpsc::{self, Sender};

use super::{AppState, LoadPhase, UIStrings, list_panel, status_bar, wheel_canvas};
use crate::{CommonResult,
            DEVELOPMENT_MODE,
            call_if_true,
            engine::{CandidateRoster, Segment, SpinAnimator, SpinGate, SpinProgress},
            ok,
            send_signal,
            sheets::{SheetSource, try_fetch_labels},
            throws};

pub use layout::*;

/// How many signals the main thread channel buffers. Spin frames go through
/// [Sender::try_send] and get dropped when this fills up.
const CHANNEL_WIDTH: usize = 1_000;

/// Signals that mutate state on the main thread. Sent by the spin task and the
/// sheet fetch task.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum AppSignal {
    RosterLoaded(Vec<String>),
    RosterLoadFailed(String),
    SpinFrame {
        generation: u64,
        rotation_angle: f64,
    },
    SpinLanded {
        generation: u64,
        rotation_angle: f64,
        landed: Segment,
    },
}

/// What the event loop does after handling one event or signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    ContinueAndRepaint,
    Exit,
}

#[derive(Debug)]
pub struct AppMain {
    pub state: AppState,
    pub animator: SpinAnimator,
    pub sheet_source: SheetSource,
}

mod constructor {
    use super::*;

    impl AppMain {
        #[must_use]
        pub fn new(sheet_source: SheetSource) -> Self {
            Self {
                state: AppState::default(),
                animator: SpinAnimator::default(),
                sheet_source,
            }
        }
    }
}

pub mod layout {
    pub const MIN_COLS: u16 = 60;
    pub const MIN_ROWS: u16 = 14;
    pub const LIST_PANEL_WIDTH: u16 = 30;

    /// One rectangular area of the window, in cells.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Region {
        pub col: u16,
        pub row: u16,
        pub width: u16,
        pub height: u16,
    }

    /// Where everything goes: header row on top, status row at the bottom,
    /// list panel and wheel canvas side by side in between.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ScreenRegions {
        pub header_row: u16,
        pub list: Region,
        pub canvas: Region,
        pub status_row: u16,
    }

    /// Split the window, or [None] when it is too small to be usable.
    #[must_use]
    pub fn compute_regions(cols: u16, rows: u16) -> Option<ScreenRegions> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return None;
        }
        let body_height = rows - 2;
        Some(ScreenRegions {
            header_row: 0,
            list: Region {
                col: 0,
                row: 1,
                width: LIST_PANEL_WIDTH,
                height: body_height,
            },
            canvas: Region {
                col: LIST_PANEL_WIDTH,
                row: 1,
                width: cols - LIST_PANEL_WIDTH,
                height: body_height,
            },
            status_row: rows - 1,
        })
    }
}

mod spin_signal_forwarder {
    use super::*;

    /// Bridges the spin task to the main event loop. Frames go through
    /// [Sender::try_send] so a busy loop drops them instead of backing up the
    /// animation; the completion must arrive, so it uses an awaited send.
    pub struct SpinSignalForwarder {
        pub main_thread_channel_sender: Sender<AppSignal>,
    }

    impl SpinProgress for SpinSignalForwarder {
        fn on_frame(&mut self, generation: u64, rotation_angle: f64) {
            // Dropped frames are fine, the completion carries the final angle.
            self.main_thread_channel_sender
                .try_send(AppSignal::SpinFrame {
                    generation,
                    rotation_angle,
                })
                .ok();
        }

        fn on_complete(&mut self, generation: u64, rotation_angle: f64, landed: Segment) {
            send_signal!(
                self.main_thread_channel_sender,
                AppSignal::SpinLanded {
                    generation,
                    rotation_angle,
                    landed
                }
            );
        }
    }
}

mod roster_fetch_task {
    use super::*;

    /// Spawn the one-shot task that loads the candidate sheet and reports back
    /// over the main thread channel.
    pub fn start_roster_fetch_task(
        source: SheetSource,
        main_thread_channel_sender: Sender<AppSignal>,
    ) {
        tokio::spawn(async move {
            match try_fetch_labels(&source).await {
                Ok(labels) => {
                    main_thread_channel_sender
                        .send(AppSignal::RosterLoaded(labels))
                        .await
                        .ok();
                }
                Err(report) => {
                    // % is Display, ? is Debug.
                    tracing::error!(
                        message = "Failed to load candidate sheet",
                        report = ?report
                    );
                    main_thread_channel_sender
                        .send(AppSignal::RosterLoadFailed(report.to_string()))
                        .await
                        .ok();
                }
            }
        });
    }
}

mod event_loop {
    use super::*;

    impl AppMain {
        /// Run until the user quits. The caller owns raw mode setup and
        /// teardown.
        ///
        /// # Errors
        ///
        /// When reading the window size or painting fails.
        pub async fn main_event_loop(&mut self) -> CommonResult<()> {
            throws!({
                let (main_thread_channel_sender, mut main_thread_channel_receiver) =
                    mpsc::channel::<AppSignal>(CHANNEL_WIDTH);

                roster_fetch_task::start_roster_fetch_task(
                    self.sheet_source.clone(),
                    main_thread_channel_sender.clone(),
                );

                let (cols, rows) = crossterm::terminal::size().into_diagnostic()?;
                self.state.set_window_size(cols, rows);
                painting::paint(&mut self.state)?;

                let mut event_stream = EventStream::new();

                loop {
                    let continuation = tokio::select! {
                        // Signals from the spin task and the fetch task.
                        // This branch is cancel safe because recv is cancel safe.
                        maybe_signal = main_thread_channel_receiver.recv() => {
                            match maybe_signal {
                                Some(signal) => self.handle_signal(signal)?,
                                None => Continuation::Exit,
                            }
                        }

                        // Terminal input.
                        // This branch is cancel safe because next is cancel safe.
                        maybe_event = event_stream.next().fuse() => {
                            match maybe_event {
                                Some(Ok(event)) => self.handle_terminal_event(
                                    &event,
                                    &main_thread_channel_sender,
                                )?,
                                Some(Err(error)) => {
                                    // % is Display, ? is Debug.
                                    tracing::error!(
                                        message = "Terminal input stream failed",
                                        error = ?error
                                    );
                                    Continuation::Exit
                                }
                                None => Continuation::Exit,
                            }
                        }
                    };

                    match continuation {
                        Continuation::Continue => {}
                        Continuation::ContinueAndRepaint => {
                            painting::paint(&mut self.state)?;
                        }
                        Continuation::Exit => break,
                    }
                }

                // A spin task must not outlive the loop.
                self.animator.stop()?;
            });
        }
    }
}

mod signal_handling {
    use super::*;

    impl AppMain {
        /// Apply one signal to the session.
        ///
        /// # Errors
        ///
        /// When stopping or clearing a spin task fails.
        pub fn handle_signal(&mut self, signal: AppSignal) -> CommonResult<Continuation> {
            ok!(match signal {
                AppSignal::RosterLoaded(labels) => {
                    // A roster arriving mid-spin kills the spin planned against
                    // the old wheel, same as a toggle.
                    if self.state.session.is_spinning() {
                        self.animator.stop()?;
                    }
                    self.state.session.apply_roster(CandidateRoster::new(labels));
                    self.state.load_phase = LoadPhase::Ready;
                    self.state.reset_cursor();
                    Continuation::ContinueAndRepaint
                }
                AppSignal::RosterLoadFailed(error_message) => {
                    self.state.load_phase = LoadPhase::Failed(error_message);
                    Continuation::ContinueAndRepaint
                }
                AppSignal::SpinFrame {
                    generation,
                    rotation_angle,
                } => {
                    self.state.session.apply_spin_frame(generation, rotation_angle);
                    Continuation::ContinueAndRepaint
                }
                AppSignal::SpinLanded {
                    generation,
                    rotation_angle,
                    landed,
                } => {
                    if self
                        .state
                        .session
                        .complete_spin(generation, rotation_angle, landed)
                    {
                        // The spin task exits after its completion callback;
                        // clear the dead handle so the next spin can start.
                        self.animator.stop()?;
                    }
                    Continuation::ContinueAndRepaint
                }
            })
        }
    }
}

mod input_handling {
    use super::{spin_signal_forwarder::SpinSignalForwarder, *};

    impl AppMain {
        /// Route one terminal event.
        ///
        /// # Errors
        ///
        /// When stopping a spin task mid flight fails.
        pub fn handle_terminal_event(
            &mut self,
            event: &Event,
            main_thread_channel_sender: &Sender<AppSignal>,
        ) -> CommonResult<Continuation> {
            match event {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_press(*key_event, main_thread_channel_sender)
                }
                Event::Resize(cols, rows) => {
                    self.state.set_window_size(*cols, *rows);
                    ok!(Continuation::ContinueAndRepaint)
                }
                _ => ok!(Continuation::Continue),
            }
        }

        fn handle_key_press(
            &mut self,
            key_event: KeyEvent,
            main_thread_channel_sender: &Sender<AppSignal>,
        ) -> CommonResult<Continuation> {
            match key_event.code {
                KeyCode::Char('c')
                    if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    ok!(Continuation::Exit)
                }
                KeyCode::Char('q') | KeyCode::Esc => ok!(Continuation::Exit),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.state.move_cursor_up();
                    ok!(Continuation::ContinueAndRepaint)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.state.move_cursor_down();
                    ok!(Continuation::ContinueAndRepaint)
                }
                KeyCode::Char(' ') => self.toggle_at_cursor(),
                KeyCode::Char('s') | KeyCode::Enter => {
                    self.request_spin(main_thread_channel_sender)
                }
                _ => ok!(Continuation::Continue),
            }
        }

        /// Flip the candidate under the cursor. A spin in flight dies with the
        /// wheel it was planned against.
        fn toggle_at_cursor(&mut self) -> CommonResult<Continuation> {
            let index = self.state.cursor_index;
            if self.state.session.roster().label(index).is_none() {
                return ok!(Continuation::Continue);
            }

            if self.state.session.is_spinning() {
                self.animator.stop()?;
            }

            let include = self.state.session.roster().is_excluded(index);
            self.state.session.toggle_candidate(index, include);
            self.state.status_message = None;
            ok!(Continuation::ContinueAndRepaint)
        }

        fn request_spin(
            &mut self,
            main_thread_channel_sender: &Sender<AppSignal>,
        ) -> CommonResult<Continuation> {
            let mut rng = rand::rng();
            match self.state.session.request_spin(&mut rng) {
                SpinGate::Accepted(plan) => {
                    self.state.status_message = None;
                    self.animator.start(
                        plan,
                        SpinSignalForwarder {
                            main_thread_channel_sender: main_thread_channel_sender
                                .clone(),
                        },
                    );
                }
                SpinGate::NotInitialized => {
                    tracing::warn!(message = "Spin requested with no wheel to spin");
                    self.state.status_message =
                        Some(UIStrings::WheelIsNotInitialized.to_string());
                }
                SpinGate::AlreadySpinning => {
                    tracing::warn!(message = "Spin requested while a spin is in flight");
                    self.state.status_message =
                        Some(UIStrings::WheelIsAlreadySpinning.to_string());
                }
            }
            ok!(Continuation::ContinueAndRepaint)
        }
    }
}

pub mod painting {
    use std::io::{Stdout, Write, stdout};

    use crossterm::{cursor::MoveTo,
                    queue,
                    style::{Attribute, Print, ResetColor, SetAttribute},
                    terminal::{Clear, ClearType}};

    use super::*;

    /// Paint one full frame.
    ///
    /// # Errors
    ///
    /// When queueing or flushing terminal commands fails.
    pub fn paint(state: &mut AppState) -> CommonResult<()> {
        throws!({
            let mut stdout = stdout();
            let (cols, rows) = state.window_size();

            let Some(regions) = layout::compute_regions(cols, rows) else {
                paint_too_small(&mut stdout, cols, rows)?;
                return Ok(());
            };

            state.ensure_cursor_visible(usize::from(regions.list.height));

            paint_header(&mut stdout, cols, regions.header_row)?;
            list_panel::paint(&mut stdout, state, regions.list)?;
            wheel_canvas::paint(&mut stdout, state, regions.canvas)?;
            status_bar::paint(&mut stdout, state, cols, regions.status_row)?;

            stdout.flush().into_diagnostic()?;

            call_if_true!(DEVELOPMENT_MODE, {
                // % is Display, ? is Debug.
                tracing::trace!(message = "Painted frame", state = %state);
            });
        });
    }

    fn paint_header(stdout: &mut Stdout, cols: u16, row: u16) -> CommonResult<()> {
        throws!({
            let line = list_panel::pad_or_truncate(
                &UIStrings::TitleBar.to_string(),
                usize::from(cols),
            );
            queue!(
                stdout,
                MoveTo(0, row),
                ResetColor,
                SetAttribute(Attribute::Bold),
                Print(line),
                SetAttribute(Attribute::NoBold)
            )
            .into_diagnostic()?;
        });
    }

    fn paint_too_small(stdout: &mut Stdout, cols: u16, rows: u16) -> CommonResult<()> {
        throws!({
            let message = UIStrings::WindowTooSmall {
                min_cols: layout::MIN_COLS,
                min_rows: layout::MIN_ROWS,
                cols,
                rows,
            }
            .to_string();
            queue!(
                stdout,
                Clear(ClearType::All),
                MoveTo(0, 0),
                ResetColor,
                Print(message)
            )
            .into_diagnostic()?;
            stdout.flush().into_diagnostic()?;
        });
    }
}
