//! Console output utilities.

use console::{measure_text_width, style};

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Bill Dedup                                        ║
║     Duplicate bill detection by content hash          ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(mode: &str, upload_dir: &str, detail: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Mode: {}", mode);
    println!("  Uploads: {}", upload_dir);
    println!("  {}", detail);
    println!();
}

/// Render a message inside a box, one string per output line.
pub fn dialog_lines(title: &str, message: &str) -> Vec<String> {
    let width = message
        .lines()
        .map(measure_text_width)
        .chain(std::iter::once(measure_text_width(title) + 2))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    lines.push(format!(
        "┌ {} {}┐",
        title,
        "─".repeat(width - measure_text_width(title))
    ));
    for line in message.lines() {
        lines.push(format!(
            "│ {}{} │",
            line,
            " ".repeat(width - measure_text_width(line))
        ));
    }
    lines.push(format!("└{}┘", "─".repeat(width + 2)));
    lines
}

/// Print an error dialog.
pub fn print_dialog(title: &str, message: &str) {
    for line in dialog_lines(title, message) {
        eprintln!("{}", style(line).red().bold());
    }
}
