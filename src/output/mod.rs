//! Output formatting and display system
//!
//! Console progress lines and the performance summary, with optional
//! terminal colors.

mod console;

pub use console::{format_time, ColorScheme, ConsoleReporter, RULE_WIDTH};
