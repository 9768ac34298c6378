// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{AppMain, CLIArg};
use crate::{CommonResult, throws};

/// Put the terminal into raw mode on the alternate screen, run the app, and
/// restore the terminal even when the loop errors out.
///
/// # Errors
///
/// When terminal setup or teardown fails, or when the event loop itself does.
pub async fn run_app(cli_arg: &CLIArg) -> CommonResult<()> {
    throws!({
        let mut app = AppMain::new(cli_arg.sheet_source());

        raw_terminal::enter()?;
        // Hold the loop's outcome so the terminal is restored before bubbling
        // errors up.
        let result = app.main_event_loop().await;
        raw_terminal::exit()?;
        result?;
    });
}

mod raw_terminal {
    use std::io::{Write, stdout};

    use crossterm::{cursor::{Hide, MoveTo, Show},
                    queue,
                    terminal::{self,
                               Clear,
                               ClearType,
                               EnterAlternateScreen,
                               LeaveAlternateScreen}};
    use miette::IntoDiagnostic;

    use crate::{CommonResult, throws};

    /// # Errors
    ///
    /// When enabling raw mode or queueing terminal commands fails.
    pub fn enter() -> CommonResult<()> {
        throws!({
            terminal::enable_raw_mode().into_diagnostic()?;
            queue!(
                stdout(),
                EnterAlternateScreen,
                MoveTo(0, 0),
                Clear(ClearType::All),
                Hide
            )
            .into_diagnostic()?;
            stdout().flush().into_diagnostic()?;
        });
    }

    /// # Errors
    ///
    /// When disabling raw mode or queueing terminal commands fails.
    pub fn exit() -> CommonResult<()> {
        throws!({
            queue!(stdout(), Show, LeaveAlternateScreen).into_diagnostic()?;
            stdout().flush().into_diagnostic()?;
            terminal::disable_raw_mode().into_diagnostic()?;
        });
    }
}
