//! Module for the colours used by lexclean's terminal output.
//!
//! Each logical part of the output (headers, verdicts, table columns) maps to
//! a 16-colour ANSI foreground. Colours are only applied when the target
//! stream is a terminal.

use owo_colors::{AnsiColors, OwoColorize};
use std::collections::HashMap;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Style for prominent headers or section titles.
    Header,
    /// Style for successful operation messages.
    Success,
    /// Style for general informational messages.
    Info,
    /// Style for warning messages.
    Warn,
    /// Style for error messages.
    Error,
    /// The CLEAN verdict.
    Clean,
    /// The CONTAMINATED verdict.
    Contaminated,
    /// Indicator ids and strategy names in tables.
    SummaryName,
    /// Counts in tables.
    SummaryCount,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 9] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Clean,
        ThemeEntry::Contaminated,
        ThemeEntry::SummaryName,
        ThemeEntry::SummaryCount,
    ];
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeStyle {
    /// An optional foreground colour.
    pub fg: Option<AnsiColors>,
}

impl ThemeStyle {
    fn fg(color: AnsiColors) -> Self {
        Self { fg: Some(color) }
    }

    /// Returns the default theme map.
    pub fn default_theme_map() -> ThemeMap {
        let mut theme = HashMap::new();
        theme.insert(ThemeEntry::Header, Self::fg(AnsiColors::BrightWhite));
        theme.insert(ThemeEntry::Success, Self::fg(AnsiColors::Green));
        theme.insert(ThemeEntry::Info, Self::fg(AnsiColors::Cyan));
        theme.insert(ThemeEntry::Warn, Self::fg(AnsiColors::Yellow));
        theme.insert(ThemeEntry::Error, Self::fg(AnsiColors::Red));
        theme.insert(ThemeEntry::Clean, Self::fg(AnsiColors::BrightGreen));
        theme.insert(ThemeEntry::Contaminated, Self::fg(AnsiColors::BrightRed));
        theme.insert(ThemeEntry::SummaryName, Self::fg(AnsiColors::Magenta));
        theme.insert(ThemeEntry::SummaryCount, Self::fg(AnsiColors::Yellow));
        theme
    }
}

/// Returns the default theme map.
pub fn build_theme_map() -> ThemeMap {
    ThemeStyle::default_theme_map()
}

/// Renders `text` in the entry's colour, or plain when colour is off.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    match theme.get(&entry).and_then(|style| style.fg) {
        Some(color) if enable_colors => text.color(color).to_string(),
        _ => text.to_string(),
    }
}
