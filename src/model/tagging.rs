//! Derives match regions from raw text.
//!
//! An editor tags every hit in a results buffer while it runs the search.
//! Outside the editor there are no tags, so the same regions are recovered
//! here by re-running the query from the buffer's `Searching` line over the
//! text of each hit line.

use grep::matcher::Matcher;
use grep::regex::{RegexMatcher, RegexMatcherBuilder};

use crate::buffer::{Region, Snapshot};
use crate::error::{NavError, NavResult};
use crate::model::{SearchQuery, parse_match_line, parse_search_line};

/// Builds a matcher honouring the query's case, word and regex flags.
///
/// # Errors
///
/// Returns [`NavError::NotFound`] if the query is empty or its pattern does not
/// compile.
pub fn build_matcher(query: &SearchQuery) -> NavResult<RegexMatcher> {
    if query.term.is_empty() {
        return Err(NavError::NotFound("search term"));
    }

    let pattern = if query.regex {
        query.term.clone()
    } else {
        regex::escape(&query.term)
    };

    RegexMatcherBuilder::new()
        .case_insensitive(!query.case_sensitive)
        .word(query.whole_word)
        .build(&pattern)
        .map_err(|_| NavError::NotFound("valid search pattern"))
}

/// Every occurrence of `query` in `text`, as byte regions.
pub fn find_all(text: &str, query: &SearchQuery) -> NavResult<Vec<Region>> {
    let matcher = build_matcher(query)?;
    Ok(find_with(&matcher, text, 0))
}

/// Tags the hits of a results buffer.
///
/// Each hit line is searched with the query of the nearest `Searching` line
/// above it. Context lines are never tagged. Lines before any `Searching`
/// line use `fallback`, if given.
pub fn tag_result_matches(snapshot: &Snapshot, fallback: Option<&SearchQuery>) -> Vec<Region> {
    let mut matcher = fallback.and_then(|q| build_matcher(q).ok());
    let mut regions = Vec::new();

    for line in snapshot.lines() {
        if let Some(query) = parse_search_line(&line) {
            matcher = build_matcher(&query).ok();
            continue;
        }

        let (Some(matcher), Some(hit)) = (matcher.as_ref(), parse_match_line(&line)) else {
            continue;
        };
        if !hit.is_hit {
            continue;
        }

        let content = &snapshot.text()[hit.content_offset..line.region.end];
        regions.extend(find_with(matcher, content, hit.content_offset));
    }

    regions
}

fn find_with(matcher: &RegexMatcher, text: &str, base: usize) -> Vec<Region> {
    let mut regions = Vec::new();
    let result = matcher.find_iter(text.as_bytes(), |m| {
        // Zero-width hits cannot be selected meaningfully
        if m.end() > m.start() {
            regions.push(Region::new(base + m.start(), base + m.end()));
        }
        true
    });

    if let Err(err) = result {
        log::debug!("match tagging stopped early: {}", err);
    }
    regions
}
