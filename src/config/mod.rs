//! User settings.
//!
//! Settings come from a JSON file shaped like an editor settings file. Every
//! key is optional; missing keys fall back to [`Settings::default`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Options shared by all commands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Wrap around when jumping past the first or last candidate.
    pub cycle: bool,

    /// Keep match jumps inside the file group holding the caret.
    pub scope_matches_to_group: bool,

    /// Open results as a transient preview instead of a permanent tab.
    pub transient_preview: bool,

    /// Pane to open results in. `None` uses the active pane.
    pub open_in_pane: Option<usize>,

    /// Highlight the search term in a file opened from the results.
    pub highlight_search_term: bool,

    /// How long to wait for an opened file to load before giving up on the
    /// highlight, in milliseconds.
    pub load_timeout_ms: u64,

    /// Color scheme applied to the results buffer by the toggle command.
    pub color_scheme: Option<String>,

    /// Syntax file suffixes that identify a Find Results view.
    pub find_results_syntaxes: Vec<String>,

    /// Fold the directory prefix shared by all headers when asked to tidy
    /// the buffer.
    pub fold_path_prefix: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cycle: true,
            scope_matches_to_group: true,
            transient_preview: false,
            open_in_pane: None,
            highlight_search_term: true,
            load_timeout_ms: 2000,
            color_scheme: None,
            find_results_syntaxes: vec![
                "Find Results.hidden-tmLanguage".to_string(),
                "Find Results.sublime-syntax".to_string(),
            ],
            fold_path_prefix: false,
        }
    }
}

impl Settings {
    /// Parses settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or a key has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse settings")
    }

    /// Loads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// True if `syntax` names one of the Find Results syntaxes.
    pub fn is_find_results_syntax(&self, syntax: &str) -> bool {
        self.find_results_syntaxes
            .iter()
            .any(|suffix| syntax.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests;
