//! Consolidated styling module for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling
//! - Semantic style constants for domain-specific use
//!
//! Messages are usually built with `color_print::cformat!` tags
//! (`<red>`, `<green>`, `<dim>`, `<bold>`); the constants below cover
//! places where a computed `Style` is needed.

use anstyle::{AnsiColor, Color, Style};

// ============================================================================
// Re-exports from anstream (auto-detecting output)
// ============================================================================

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

/// Auto-detecting eprint that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprint;

// ============================================================================
// Semantic Style Constants
// ============================================================================

/// Error style (red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Error style with bold (red + bold) - use as `{ERROR_BOLD}text{ERROR_BOLD:#}`
pub const ERROR_BOLD: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Warning style (yellow) - use as `{WARNING}text{WARNING:#}`
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Hint style (dimmed) - use as `{HINT}text{HINT:#}`
pub const HINT: Style = Style::new().dimmed();

/// Success style (green)
pub const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

// ============================================================================
// Message Emojis
// ============================================================================

/// Progress emoji: `cformat!("{PROGRESS_EMOJI} <cyan>message</>")`
pub const PROGRESS_EMOJI: &str = "🔄";

/// Success emoji: `cformat!("{SUCCESS_EMOJI} <green>message</>")`
pub const SUCCESS_EMOJI: &str = "✅";

/// Error emoji - use with ERROR style: `eprintln!("{ERROR_EMOJI} {ERROR}message{ERROR:#}");`
pub const ERROR_EMOJI: &str = "❌";

/// Warning emoji - use with WARNING style: `eprintln!("{WARNING_EMOJI} {WARNING}message{WARNING:#}");`
pub const WARNING_EMOJI: &str = "🟡";

/// Hint emoji - use with HINT style: `println!("{HINT_EMOJI} {HINT}message{HINT:#}");`
pub const HINT_EMOJI: &str = "💡";

/// Info emoji: `cformat!("{INFO_EMOJI} message")`
pub const INFO_EMOJI: &str = "⚪";

/// Prompt symbol for interactive questions
pub const PROMPT_SYMBOL: &str = "❓";

// ============================================================================
// Message builders
// ============================================================================

pub fn success_message(msg: impl std::fmt::Display) -> String {
    format!("{SUCCESS_EMOJI} {SUCCESS}{msg}{SUCCESS:#}")
}

pub fn progress_message(msg: impl std::fmt::Display) -> String {
    let cyan = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
    format!("{PROGRESS_EMOJI} {cyan}{msg}{cyan:#}")
}

pub fn info_message(msg: impl std::fmt::Display) -> String {
    format!("{INFO_EMOJI} {msg}")
}

pub fn warning_message(msg: impl std::fmt::Display) -> String {
    format!("{WARNING_EMOJI} {WARNING}{msg}{WARNING:#}")
}

pub fn hint_message(msg: impl std::fmt::Display) -> String {
    format!("{HINT_EMOJI} {HINT}{msg}{HINT:#}")
}

/// Indent each line of `content` under a message, for quoted lists and command output
pub fn format_with_gutter(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("  {HINT}│{HINT:#} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
