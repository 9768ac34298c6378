// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # eati 🎡
//!
//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Introduction](#introduction)
//! - [Installation](#installation)
//! - [Run `eati` binary target](#run-eati-binary-target)
//! - [Point it at your own sheet](#point-it-at-your-own-sheet)
//! - [Build, run, test tasks](#build-run-test-tasks)
//!
//! <!-- /TOC -->
//!
//! # Introduction
//!
//! `eati` answers the oldest question in any team chat: "where should we eat?". It is a
//! TUI app, in the same family as `giti` and `edi` from `r3bl-cmdr`, and it is currently
//! available as early access preview 🐣.
//!
//! - 🌮 It loads a list of restaurants from a Google Sheet that you share with your
//!   friends and co-workers. Everyone can add their favorite spots to the sheet.
//! - 🎡 Each restaurant becomes a colored segment on a wheel of fortune, drawn right in
//!   your terminal. Uncheck the places you are not in the mood for, and the wheel
//!   rebuilds itself from what is left.
//! - 🎉 Press `s` to spin. The wheel decelerates over a few seconds and wherever the
//!   pointer lands, that is where you eat. No takebacks (although nothing stops you from
//!   spinning again).
//!
//! # Installation
//!
//! To install `eati` on your system, run the following command, assuming you have
//! `cargo` on your system:
//!
//! ```bash
//! cargo install r3bl-eati
//! ```
//!
//! If you don't have `cargo` on your system, follow these
//! [instructions](https://rustup.rs/) to install it first.
//!
//! # Run `eati` binary target
//!
//! - Run `eati` from anywhere on your system. It starts with a shared demo sheet, so it
//!   works out of the box.
//! - Try `eati --help` to see the available options.
//! - If you want to generate log output for `eati`, run `eati -l`, and look at the
//!   `log.txt` file in the folder you ran it from.
//!
//! Keybindings:
//!
//! | Key                | Action                                             |
//! | ------------------ | -------------------------------------------------- |
//! | <kbd>↑</kbd> / <kbd>k</kbd> | Move the focus up the restaurant list     |
//! | <kbd>↓</kbd> / <kbd>j</kbd> | Move the focus down the restaurant list   |
//! | <kbd>Space</kbd>   | Toggle the focused restaurant in or out            |
//! | <kbd>s</kbd> / <kbd>Enter</kbd> | Spin the wheel                        |
//! | <kbd>q</kbd> / <kbd>Esc</kbd> / <kbd>Ctrl+C</kbd> | Quit                |
//!
//! # Point it at your own sheet
//!
//! Create a Google Sheet with one restaurant name per cell in a single column, and share
//! it so that "Anyone with the link" can view it. Then pass its pieces on the command
//! line:
//!
//! ```bash
//! eati --spreadsheet-id 1Yum89FFIcJgZ7kH6ZTbfq_5fhxktSu4Cg-juFLkoqts --sheet Sheet1 --column A
//! ```
//!
//! The spreadsheet id is the long opaque segment in the middle of the sheet's URL. The
//! sheet name and column both default to the first one, so most of the time the id is
//! all you need.
//!
//! # Build, run, test tasks
//!
//! | Command       | Description   |
//! | ------------- | ------------- |
//! | `cargo build` | Build         |
//! | `cargo test`  | Run tests     |
//! | `cargo run`   | Run the wheel |
//! | `cargo clippy`| Run clippy    |
//! | `cargo doc`   | Build docs    |

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
// - `#!` (Inner Attribute): The `!` indicates that this is an inner attribute. Inner
//   attributes apply to the entire item containing them. When you use
//   #![warn(clippy::<Lint>)] at the crate level (i.e., in your lib.rs or main.rs), it
//   will make Clippy emit a warning for any `Lint` violations found anywhere within that
//   entire crate. If placed inside a module, it would apply to that module and all its
//   sub-modules.
// - `#` (Outer Attribute): This is an outer attribute. Outer attributes apply to the item
//   immediately following them.
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::cast_sign_loss)]
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::needless_return)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::redundant_else)]
#![warn(clippy::iter_without_into_iter)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::ignored_unit_patterns)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::default_trait_access)]
#![warn(clippy::manual_instant_elapsed)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unused_self)]
#![warn(clippy::single_char_pattern)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::unnecessary_semicolon)]
#![warn(clippy::if_not_else)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::single_match_else)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::needless_pass_by_value)]
// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() freely.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

pub const DEVELOPMENT_MODE: bool = true;

// Attach sources.
pub mod common;
pub mod eati;
pub mod engine;
pub mod log_support;
pub mod sheets;

// Re-export.
pub use common::*;
pub use eati::*;
pub use engine::*;
pub use log_support::*;
pub use sheets::*;
