use log::Level;
use std::time::Duration;

use crate::config::Settings;
use crate::error::NavResult;
use crate::host::{HIGHLIGHT_KEY, HostAdapter, OpenMode, OpenRequest, ViewId};
use crate::loading::after_load;
use crate::scanner::{OpenTarget, find_open_target, find_search_query};
use crate::telemetry::{LogMessage, log_with_context};

use super::results_snapshot;

/// How the file under the caret is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    pub mode: OpenMode,

    /// Pane to open in; `None` uses the active pane
    pub pane: Option<usize>,

    /// Highlight the search term once the file has loaded
    pub highlight: bool,

    pub load_timeout: Duration,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl OpenOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: if settings.transient_preview {
                OpenMode::Transient
            } else {
                OpenMode::Permanent
            },
            pane: settings.open_in_pane,
            highlight: settings.highlight_search_term,
            load_timeout: settings.load_timeout(),
        }
    }
}

/// Result of opening a file from the results buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    pub view: ViewId,
    pub target: OpenTarget,

    /// Number of highlighted occurrences, or `None` if no highlight was drawn
    pub highlighted: Option<usize>,
}

/// Opens the file whose group holds the caret.
///
/// On a numbered line the file opens at that line, with the caret on the
/// same character it had in the results buffer. Elsewhere in a group the
/// file opens without a position. With `highlight` set, the term from the
/// buffer's `Searching` line is highlighted once the view has loaded,
/// replacing any previous highlight.
///
/// # Errors
///
/// Returns an error if there is no single caret, no header with an existing
/// path above it, or the host cannot open the file. A highlight that cannot
/// be drawn (no search line, load timeout) is not an error.
pub async fn open_result<H>(host: &mut H, settings: &Settings, options: &OpenOptions) -> NavResult<Opened>
where
    H: HostAdapter + ?Sized,
{
    let (results, snapshot) = results_snapshot(host, settings)?;
    let selection = host.selection(results);

    let target = find_open_target(&snapshot, &selection)?;
    let query = if options.highlight {
        find_search_query(&snapshot, &selection).ok()
    } else {
        None
    };

    let request = OpenRequest {
        path: target.path.clone(),
        line: target.line,
        column: target.column,
        mode: options.mode,
        pane: options.pane,
    };
    let view = host.open_file(&request)?;

    log_with_context(
        Level::Debug,
        LogMessage::new("open", "Opened result")
            .with("locator", target.encoded())
            .with("mode", format!("{:?}", options.mode)),
    );

    let highlighted = match query {
        Some(query) => {
            let highlight = after_load(host, view, options.load_timeout, |host| {
                let regions = host.find_all(view, &query);
                let count = regions.len();
                host.erase_regions(view, HIGHLIGHT_KEY);
                host.add_regions(view, HIGHLIGHT_KEY, regions);
                count
            })
            .await;

            match highlight {
                Ok(count) => Some(count),
                Err(err) => {
                    log_with_context(
                        Level::Warn,
                        LogMessage::new("open", "Skipped search term highlight")
                            .with("path", target.path.display())
                            .with("reason", err),
                    );
                    None
                }
            }
        }
        None => None,
    };

    Ok(Opened {
        view,
        target,
        highlighted,
    })
}
