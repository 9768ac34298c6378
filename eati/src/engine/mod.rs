// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The domain model for the picker: candidates, the wheel built from them, and the
//! spin animation that lands on one of them. Everything in this module is UI-free so
//! it can be driven (and tested) without a terminal attached.

// Attach.
pub mod candidates;
pub mod session;
pub mod spin;
pub mod wheel;

// Re-export.
pub use candidates::*;
pub use session::*;
pub use spin::*;
pub use wheel::*;
