use log::Level;

use crate::buffer::{Region, Snapshot};
use crate::config::Settings;
use crate::error::{NavError, NavResult};
use crate::host::{HostAdapter, Tag, ViewId};
use crate::model::{FileHeader, parse_header_line, path_prefix_regions};
use crate::navigator::Direction;
use crate::scanner::{find_group_header, find_group_terminator, single_caret};
use crate::telemetry::{LogMessage, log_with_context};

use super::jump::{JumpOptions, jump_file, jump_match};
use super::results_snapshot;

/// What [`fold_and_advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldOutcome {
    /// The folded body of the group, if it had one
    pub folded: Option<Region>,

    /// Header jumped to after folding
    pub next_file: Option<Region>,

    /// Match selected in the next group
    pub next_match: Option<Region>,
}

/// Body of the group holding `caret`: from the line after its header to the
/// end of the line before the group's terminator (a blank line or the next
/// header), or to the end of the buffer for a group without one.
pub fn group_body(snapshot: &Snapshot, caret: usize) -> NavResult<Region> {
    let (header, _) = find_group_header(snapshot, caret).ok_or(NavError::NotFound("file header"))?;
    let terminator = snapshot.line_at(find_group_terminator(snapshot, caret).begin);
    let next_header =
        terminator.index > header.index && parse_header_line(&terminator).is_some();

    let begin = snapshot
        .line(header.index + 1)
        .map_or(snapshot.len(), |line| line.region.begin);
    let end = if terminator.is_blank() || next_header {
        terminator
            .index
            .checked_sub(1)
            .and_then(|i| snapshot.line(i))
            .map_or(terminator.region.begin, |line| line.region.end)
    } else {
        snapshot.len()
    };

    Ok(Region::new(begin, end.max(begin)))
}

/// Collapses the group holding the caret, then moves to the first match of
/// the next group.
///
/// The fold happens first: once the caret has moved the group to collapse
/// would no longer be known. Navigation runs forward with the configured
/// cycle and group scoping; a failed jump leaves the fold in place.
///
/// # Errors
///
/// Fails without touching the view if the active view is not a results
/// buffer, the selection is ambiguous, or no header precedes the caret.
pub fn fold_and_advance<H>(host: &mut H, settings: &Settings) -> NavResult<FoldOutcome>
where
    H: HostAdapter + ?Sized,
{
    let (view, snapshot) = results_snapshot(host, settings)?;
    let caret = single_caret(&host.selection(view))?;
    let body = group_body(&snapshot, caret.begin)?;

    let folded = (!body.is_empty() && host.fold(view, body)).then_some(body);

    let options = JumpOptions::from_settings(settings, Direction::Forward);
    let next_file = jump_file(host, settings, &options).ok();
    let next_match = next_file.and_then(|_| jump_match(host, settings, &options).ok());

    log_with_context(
        Level::Debug,
        LogMessage::new("fold", "Folded group and advanced")
            .with("folded", format!("{:?}", folded))
            .with("next_file", format!("{:?}", next_file)),
    );

    Ok(FoldOutcome {
        folded,
        next_file,
        next_match,
    })
}

/// Folds the directory prefix shared by every header. Prefixes that are
/// already folded are left as they are.
///
/// # Returns
///
/// Number of newly folded prefixes.
///
/// # Errors
///
/// [`NavError::NoCandidates`] if the headers share no directory prefix.
pub fn fold_path_prefixes<H>(host: &mut H, settings: &Settings) -> NavResult<usize>
where
    H: HostAdapter + ?Sized,
{
    let (view, prefixes) = prefix_regions(host, settings)?;

    let mut folded = 0;
    for region in prefixes {
        if !host.is_folded(view, region) && host.fold(view, region) {
            folded += 1;
        }
    }
    Ok(folded)
}

/// Folds the shared header prefix, or unfolds it if it is already folded.
///
/// # Returns
///
/// `true` if the prefixes are folded after the call.
pub fn toggle_path_prefixes<H>(host: &mut H, settings: &Settings) -> NavResult<bool>
where
    H: HostAdapter + ?Sized,
{
    let (view, prefixes) = prefix_regions(host, settings)?;

    if prefixes.iter().any(|r| host.is_folded(view, *r)) {
        for region in &prefixes {
            host.unfold(view, *region);
        }
        return Ok(false);
    }

    fold_path_prefixes(host, settings)?;
    Ok(true)
}

fn prefix_regions<H>(host: &H, settings: &Settings) -> NavResult<(ViewId, Vec<Region>)>
where
    H: HostAdapter + ?Sized,
{
    let (view, snapshot) = results_snapshot(host, settings)?;

    // Header paths come from the tagged spans so they match what the host shows
    let headers: Vec<FileHeader> = host
        .tagged_regions(view, Tag::FileName)
        .into_iter()
        .filter_map(|region| {
            let path = snapshot.text().get(region.begin..region.end)?;
            Some(FileHeader {
                offset: region.begin,
                path: path.to_string(),
                region,
            })
        })
        .collect();

    let prefixes = path_prefix_regions(&headers);
    if prefixes.is_empty() {
        return Err(NavError::NoCandidates);
    }
    Ok((view, prefixes))
}
