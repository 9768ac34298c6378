// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod fetch;
pub mod gviz;

// Re-export.
pub use fetch::*;
pub use gviz::*;
