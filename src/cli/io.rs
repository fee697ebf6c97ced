use std::fmt;

use crate::cli::output;
use crate::cli::table::{display_width, Table};

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

pub fn print_table(table: &Table) {
    output::info(table.render());
}

/// Prints `label: value` with labels padded to `width` terminal columns.
pub fn print_field(label: &str, value: impl fmt::Display, width: usize) {
    let pad = width.saturating_sub(display_width(label));
    output::info(format!("  {label}{} : {value}", " ".repeat(pad)));
}
