//! Structured logging facility for HerdView
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Cycle and pasture correlation via `cycle_id` and `pasture_id`
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use herdview_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, [cycle = ctx | pasture = id], ...)` - operation start
//! - `log_op_end!(op, start, [cycle = ctx | pasture = id], ...)` - operation end
//! - `log_op_error!(op, err, start, ...)` - operation failure with the error's context

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
