//! User-facing commands over a Find Results view.
//!
//! Each command reads a fresh snapshot of the results buffer, computes a
//! target with the scanner, model and navigator, and applies it through the
//! [`HostAdapter`]. Commands return [`NavResult`]; [`run`] is the entry point
//! a key binding would call, and turns every error into a silent no-op.

use log::Level;
use serde::{Deserialize, Serialize};

use crate::buffer::{Region, Snapshot};
use crate::config::Settings;
use crate::error::{NavError, NavResult};
use crate::host::{FIND_RESULTS_NAME, HostAdapter, OpenMode, SYNTAX_SETTING, ViewId};
use crate::navigator::Direction;
use crate::telemetry::{LogMessage, log_with_context};

/// Fold the current group, then move on
pub mod fold;
/// File and match jumps
pub mod jump;
/// Opening the file under the caret
pub mod open;
/// Read-only and color scheme toggles
pub mod view_state;

pub use fold::{FoldOutcome, fold_and_advance, fold_path_prefixes, group_body, toggle_path_prefixes};
pub use jump::{JumpOptions, jump_file, jump_match};
pub use open::{OpenOptions, Opened, open_result};
pub use view_state::{FindResultsListener, toggle_color_scheme, toggle_read_only};

/// A command invocation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenFile { transient: bool },
    JumpFile { direction: Direction },
    JumpMatch { direction: Direction },
    FoldAndAdvance,
    TogglePathPrefixes,
    ToggleReadOnly,
    ToggleColorScheme,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Opened(Opened),
    Moved(Region),
    Folded(FoldOutcome),
    PathPrefixesFolded(bool),
    ReadOnly(bool),
    ColorScheme(Option<String>),
}

/// Runs `command` against the active view.
///
/// Errors are logged at debug level and reported as `None`; the user sees
/// nothing happen.
pub async fn run<H>(host: &mut H, settings: &Settings, command: Command) -> Option<Outcome>
where
    H: HostAdapter + ?Sized,
{
    let result = match command {
        Command::OpenFile { transient } => {
            // The binding's flag wins over `transient_preview`
            let mut options = OpenOptions::from_settings(settings);
            options.mode = if transient {
                OpenMode::Transient
            } else {
                OpenMode::Permanent
            };
            open_result(host, settings, &options).await.map(Outcome::Opened)
        }
        Command::JumpFile { direction } => {
            jump_file(host, settings, &JumpOptions::from_settings(settings, direction))
                .map(Outcome::Moved)
        }
        Command::JumpMatch { direction } => {
            jump_match(host, settings, &JumpOptions::from_settings(settings, direction))
                .map(Outcome::Moved)
        }
        Command::FoldAndAdvance => fold_and_advance(host, settings).map(Outcome::Folded),
        Command::TogglePathPrefixes => {
            toggle_path_prefixes(host, settings).map(Outcome::PathPrefixesFolded)
        }
        Command::ToggleReadOnly => toggle_read_only(host, settings).map(Outcome::ReadOnly),
        Command::ToggleColorScheme => {
            toggle_color_scheme(host, settings).map(Outcome::ColorScheme)
        }
    };

    match result {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            log_with_context(
                Level::Debug,
                LogMessage::new("commands", "Command had no effect")
                    .with("command", format!("{:?}", command))
                    .with("reason", err),
            );
            None
        }
    }
}

/// True if `view` is a Find Results buffer, by name or by syntax.
pub fn is_find_results<H>(host: &H, view: ViewId, settings: &Settings) -> bool
where
    H: HostAdapter + ?Sized,
{
    if host.view_name(view).as_deref() == Some(FIND_RESULTS_NAME) {
        return true;
    }

    host.setting(view, SYNTAX_SETTING)
        .is_some_and(|syntax| settings.is_find_results_syntax(&syntax))
}

/// The active view and a snapshot of its text, if it is a Find Results buffer.
pub(crate) fn results_snapshot<H>(host: &H, settings: &Settings) -> NavResult<(ViewId, Snapshot)>
where
    H: HostAdapter + ?Sized,
{
    let view = host.active_view();
    if !is_find_results(host, view, settings) {
        return Err(NavError::NotFindResults);
    }

    Ok((view, Snapshot::new(host.buffer_text(view))))
}
