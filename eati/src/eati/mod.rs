// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod app_main;
pub mod clap_config;
pub mod launcher;
pub mod list_panel;
pub mod state;
pub mod status_bar;
pub mod ui_str;
pub mod wheel_canvas;

// Re-export.
pub use app_main::*;
pub use clap_config::*;
pub use launcher::*;
pub use state::*;
pub use ui_str::*;
