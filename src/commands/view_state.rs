use log::Level;

use crate::config::Settings;
use crate::error::{NavError, NavResult};
use crate::host::{COLOR_SCHEME_SETTING, HostAdapter, ViewId};
use crate::telemetry::{LogMessage, log_with_context};

use super::fold::fold_path_prefixes;
use super::{is_find_results, results_snapshot};

/// Keeps Find Results views read-only while they have focus.
///
/// Hook `on_activated`/`on_deactivated` to the host's focus events. Views
/// that are not Find Results buffers are left alone.
#[derive(Debug, Clone, Default)]
pub struct FindResultsListener {
    settings: Settings,
}

impl FindResultsListener {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn on_activated<H>(&self, host: &mut H, view: ViewId)
    where
        H: HostAdapter + ?Sized,
    {
        if !is_find_results(host, view, &self.settings) {
            return;
        }

        host.set_read_only(view, true);

        // Tidy long headers once the buffer is focused
        if self.settings.fold_path_prefix && host.active_view() == view {
            if let Err(err) = fold_path_prefixes(host, &self.settings) {
                log::debug!("path prefixes left unfolded: {}", err);
            }
        }
    }

    pub fn on_deactivated<H>(&self, host: &mut H, view: ViewId)
    where
        H: HostAdapter + ?Sized,
    {
        if is_find_results(host, view, &self.settings) {
            host.set_read_only(view, false);
        }
    }
}

/// Flips the read-only flag of the results buffer.
///
/// # Returns
///
/// The new read-only state.
pub fn toggle_read_only<H>(host: &mut H, settings: &Settings) -> NavResult<bool>
where
    H: HostAdapter + ?Sized,
{
    let (view, _) = results_snapshot(host, settings)?;
    let read_only = !host.is_read_only(view);
    host.set_read_only(view, read_only);
    Ok(read_only)
}

/// Switches the results buffer between the configured color scheme and the
/// host's default.
///
/// # Returns
///
/// The scheme now set on the view, `None` when it fell back to the default.
///
/// # Errors
///
/// [`NavError::NotFound`] if no color scheme is configured.
pub fn toggle_color_scheme<H>(host: &mut H, settings: &Settings) -> NavResult<Option<String>>
where
    H: HostAdapter + ?Sized,
{
    let (view, _) = results_snapshot(host, settings)?;
    let scheme = settings
        .color_scheme
        .clone()
        .ok_or(NavError::NotFound("color scheme"))?;

    let current = host.setting(view, COLOR_SCHEME_SETTING);
    let next = if current.as_deref() == Some(scheme.as_str()) {
        None
    } else {
        Some(scheme)
    };

    host.set_setting(view, COLOR_SCHEME_SETTING, next.clone());
    log_with_context(
        Level::Debug,
        LogMessage::new("view_state", "Toggled color scheme")
            .with("scheme", next.as_deref().unwrap_or("default")),
    );
    Ok(next)
}
