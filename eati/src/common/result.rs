// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias to make it easy to work with:
/// 1. [`core::result::Result`]
/// 2. [miette::Result] and [miette::Report], which are [std::error::Error] wrappers.
///
/// - It is basically `miette::Result<T, miette::Report>`.
/// - Works hand in hand w/ [GvizError](crate::GvizError) and any other type of error.
///
/// # Example
///
/// ```
/// use r3bl_eati::CommonResult;
///
/// pub fn try_parse_segment_count(arg: &str) -> CommonResult<usize> {
///   match arg.parse::<usize>() {
///     Ok(count) if count > 0 => Ok(count),
///     _ => Err(miette::miette!("Invalid segment count: {:?}", arg)),
///   }
/// }
///
/// assert!(try_parse_segment_count("7").is_ok());
/// assert!(try_parse_segment_count("zero").is_err());
/// ```
pub type CommonResult<T> = miette::Result<T>;
