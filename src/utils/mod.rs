//! Utility functions and helpers for vision-ask.
//!
//! - `logging`: Tracing initialization and secret masking.

pub mod logging;
