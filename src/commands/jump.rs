use log::Level;

use crate::buffer::Region;
use crate::config::Settings;
use crate::error::{NavError, NavResult};
use crate::host::{HostAdapter, Tag};
use crate::model::filter_to_current_group;
use crate::navigator::{Direction, advance, needs_recenter, pinned_top_offset};
use crate::scanner::single_caret;
use crate::telemetry::{LogMessage, log_with_context};

use super::results_snapshot;

/// How a jump picks its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpOptions {
    pub direction: Direction,

    /// Wrap around at either end of the candidate list
    pub cycle: bool,

    /// Only consider matches in the group holding the caret (match jumps only)
    pub scope_to_group: bool,
}

impl Default for JumpOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            cycle: true,
            scope_to_group: true,
        }
    }
}

impl JumpOptions {
    pub fn from_settings(settings: &Settings, direction: Direction) -> Self {
        Self {
            direction,
            cycle: settings.cycle,
            scope_to_group: settings.scope_matches_to_group,
        }
    }
}

/// Moves the caret to the next or previous file header.
///
/// The caret lands at the start of the header and the view scrolls so the
/// header line is the first visible line.
///
/// # Returns
///
/// The header region jumped to.
///
/// # Errors
///
/// * [`NavError::NotFindResults`] if the active view is not a results buffer
/// * [`NavError::AmbiguousSelection`] unless there is exactly one caret
/// * [`NavError::NoCandidates`] if the buffer has no headers
/// * [`NavError::NotFound`] if there is no header in that direction and
///   cycling is off
pub fn jump_file<H>(host: &mut H, settings: &Settings, options: &JumpOptions) -> NavResult<Region>
where
    H: HostAdapter + ?Sized,
{
    let (view, snapshot) = results_snapshot(host, settings)?;
    let caret = single_caret(&host.selection(view))?;

    let files = host.tagged_regions(view, Tag::FileName);
    if files.is_empty() {
        return Err(NavError::NoCandidates);
    }

    let target = advance(caret.begin, &files, options.direction, options.cycle)
        .ok_or(NavError::NotFound("file header"))?;

    host.set_selection(view, vec![Region::point(target.begin)]);
    let top = pinned_top_offset(&snapshot, target.begin, host.line_height(view));
    host.set_viewport_position(view, (0.0, top));

    log_with_context(
        Level::Debug,
        LogMessage::new("jump", "Moved to file header")
            .with("caret", caret.begin)
            .with("target", target.begin),
    );
    Ok(target)
}

/// Selects the next or previous tagged match.
///
/// A folded target is unfolded. The view only re-centers when the target
/// line is off screen, so short hops keep the surrounding context still.
///
/// # Errors
///
/// Same as [`jump_file`]; [`NavError::NoCandidates`] also covers a group
/// without matches when `scope_to_group` is set.
pub fn jump_match<H>(host: &mut H, settings: &Settings, options: &JumpOptions) -> NavResult<Region>
where
    H: HostAdapter + ?Sized,
{
    let (view, snapshot) = results_snapshot(host, settings)?;
    let caret = single_caret(&host.selection(view))?;

    let mut matches = host.tagged_regions(view, Tag::Match);
    if options.scope_to_group {
        let headers = host.tagged_regions(view, Tag::FileName);
        matches = filter_to_current_group(caret.begin, &matches, &headers, snapshot.len());
    }
    if matches.is_empty() {
        return Err(NavError::NoCandidates);
    }

    let target = advance(caret.begin, &matches, options.direction, options.cycle)
        .ok_or(NavError::NotFound("match"))?;

    host.set_selection(view, vec![target]);
    if host.is_folded(view, target) {
        host.unfold(view, target);
    }
    if needs_recenter(&snapshot, target, host.visible_region(view)) {
        host.show_at_center(view, target);
    }

    log_with_context(
        Level::Debug,
        LogMessage::new("jump", "Moved to match")
            .with("caret", caret.begin)
            .with("target", target.begin),
    );
    Ok(target)
}
