// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Terminal color utilities
//!
//! Provides consistent markers across the CLI. Output goes to stderr so
//! generated documents on stdout stay clean.

use colored::Colorize;

/// Disable colors when `NO_COLOR` is set
pub fn configure_colors() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}

/// Print a styled section
pub fn print_section(title: &str) {
    eprintln!();
    eprintln!("{}:", title.bold());
}

/// Print a success check
pub fn print_success(msg: &str) {
    eprintln!("  {} {}", "✓".green(), msg);
}

/// Print an error cross
pub fn print_error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a warning
pub fn print_warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg);
}

/// Print an info item
pub fn print_info(msg: &str) {
    eprintln!("  {} {}", "→".blue(), msg);
}
