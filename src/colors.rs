//! Color constants for the list report.

use crossterm::style::Color;

/// Used for pending rows
pub const PENDING: Color = Color::Blue;
/// Used for completed rows
pub const DONE: Color = Color::DarkGreen;
/// Used for the pending-count footer
pub const SUMMARY: Color = Color::Red;
