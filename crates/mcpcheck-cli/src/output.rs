use mcpcheck_core::config::{ConfigWarning, WarnLevel};
use mcpcheck_core::report::Report;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:width$}", h, width = w))
        .collect();
    println!("{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

pub fn warning_line(w: &ConfigWarning) -> String {
    let prefix = match w.level {
        WarnLevel::Warning => "warning",
        WarnLevel::Error => "error",
    };
    format!("[{prefix}] {}", w.message)
}

/// One line per executed check, then any warnings.
pub fn report_lines(report: &Report) -> Vec<String> {
    let mut lines: Vec<String> = report
        .checks
        .iter()
        .map(|c| {
            let mark = if c.passed { "✅" } else { "❌" };
            match &c.message {
                Some(msg) => format!("{mark} {}: {msg}", c.check.description()),
                None => format!("{mark} {}", c.check.description()),
            }
        })
        .collect();
    lines.extend(report.warnings.iter().map(warning_line));
    lines
}
