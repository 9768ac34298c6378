// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Customize the default global [miette] report handler, which formats any error
//! that escapes `main() -> miette::Result<_>`.
//!
//! The [`miette::set_hook`] registration is lazy: the closure only runs when an
//! error is actually about to be displayed. That is also the right moment to
//! measure the terminal width, so reports wrap correctly even if the window was
//! resized while the app ran. If no error ever occurs, none of this work happens.

use miette::MietteHandlerOpts;

/// Register the global report handler. Call once at startup, before the terminal
/// is put into raw mode.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = crossterm::terminal::size()
            .map(|(columns, _rows)| usize::from(columns))
            .unwrap_or(80);
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "miette::set_hook",
            terminal_width = %terminal_width
        );
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .force_graphical(true)
                .rgb_colors(miette::RgbColors::Always)
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
