// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use mimalloc::MiMalloc;
use r3bl_eati::{CLIArg, CommonResult, run_app,
                setup_default_miette_global_report_handler, throws,
                try_initialize_logging_global};

const ISSUES_URL: &str = "https://github.com/r3bl-org/eati/issues";

/// `mimalloc` is a replacement for the default global allocator. It's optimized for
/// multi-threaded use cases where lots of small objects are created and destroyed.
/// The default allocator is the system allocator that's optimized for single threaded
/// use cases.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
#[allow(clippy::needless_return)]
async fn main() -> CommonResult<()> {
    throws!({
        setup_default_miette_global_report_handler(ISSUES_URL);

        let cli_arg = CLIArg::parse();

        let enable_logging = cli_arg.global_options.enable_logging;
        enable_logging.then(|| {
            try_initialize_logging_global(tracing_core::LevelFilter::DEBUG).ok();
            // % is Display, ? is Debug.
            tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
        });

        launch_eati(cli_arg).await;

        enable_logging.then(|| {
            tracing::debug!(message = "Stop logging...");
        });
    })
}

pub async fn launch_eati(cli_arg: CLIArg) {
    let res = run_app(&cli_arg).await;
    // Handle unrecoverable / unknown errors here.
    if let Err(error) = res {
        // % is Display, ? is Debug.
        tracing::error!(
            message = "Could not run eati due to the following problem",
            error = ?error
        );

        eprintln!(" Could not run eati due to the following problem.\n{error:?}");
    }
}
