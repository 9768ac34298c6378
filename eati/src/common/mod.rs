// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod macros;
pub mod miette_setup_global_report_handler;
pub mod result;

// Re-export.
pub use miette_setup_global_report_handler::*;
pub use result::*;
