//! # Output Formatting
//!
//! Colored, emoji-prefixed status lines for the ferry CLI.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

/// Look up an emoji by shortcode, falling back to a plain character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  emojis::get_by_shortcode(name)
    .map(|emoji| emoji.to_string())
    .unwrap_or_else(|| default.to_string())
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format an issue key
pub fn format_issue_key(key: &str) -> String {
  key.bright_cyan().bold().to_string()
}

/// Format a workflow status name
pub fn format_status(status: &str) -> String {
  match status.to_ascii_lowercase().as_str() {
    "done" | "closed" | "resolved" => status.green().to_string(),
    "in progress" | "in review" => status.yellow().to_string(),
    _ => status.to_string(),
  }
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}
