//! Display formatting for terminal output
//!
//! Provides utilities for formatting rendered audit records for terminal
//! display.

pub mod audit;

pub use audit::{format_audit_table, format_page_footer, format_timestamp};
