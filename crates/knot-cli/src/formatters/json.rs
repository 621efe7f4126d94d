//! JSON report formatter.

use knot_core::Report;

pub struct JsonFormatter;

pub fn print_json(report: &Report) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Failed to serialize report: {err}"),
    }
}
