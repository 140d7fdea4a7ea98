//! An in-memory editor.
//!
//! Views hold a [`Snapshot`] plus the state commands touch: selection, folds,
//! named regions, settings and a simple line-based viewport. Tags come from
//! the result model instead of a tokenizer, and opened files are read from
//! disk.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tokio::sync::watch;

use crate::buffer::{Region, Snapshot};
use crate::error::{NavError, NavResult};
use crate::host::{
    FIND_RESULTS_NAME, HostAdapter, OpenMode, OpenRequest, SYNTAX_SETTING, Tag, ViewId,
};
use crate::model::tagging::{find_all, tag_result_matches};
use crate::model::{SearchQuery, file_match_regions, list_file_headers};

/// Syntax the host assigns to Find Results buffers.
pub const FIND_RESULTS_SYNTAX: &str = "Packages/Default/Find Results.hidden-tmLanguage";

const DEFAULT_LINE_HEIGHT: f64 = 16.0;
const DEFAULT_VISIBLE_LINES: usize = 40;

/// State of one view.
#[derive(Debug)]
pub struct MemoryView {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
    pub snapshot: Snapshot,
    pub selection: Vec<Region>,
    pub folds: Vec<Region>,
    pub regions: HashMap<String, Vec<Region>>,
    pub read_only: bool,
    pub settings: HashMap<String, String>,
    pub viewport: (f64, f64),
    pub line_height: f64,
    pub visible_lines: usize,
    pub transient: bool,
    loaded: watch::Sender<bool>,
}

impl MemoryView {
    fn new(text: impl Into<String>, loaded: bool) -> Self {
        let (loaded, _) = watch::channel(loaded);
        Self {
            name: None,
            path: None,
            snapshot: Snapshot::new(text),
            selection: vec![Region::point(0)],
            folds: Vec::new(),
            regions: HashMap::new(),
            read_only: false,
            settings: HashMap::new(),
            viewport: (0.0, 0.0),
            line_height: DEFAULT_LINE_HEIGHT,
            visible_lines: DEFAULT_VISIBLE_LINES,
            transient: false,
            loaded,
        }
    }

    /// Index of the first line on screen.
    pub fn top_line(&self) -> usize {
        (self.viewport.1 / self.line_height).max(0.0).round() as usize
    }

    pub fn is_loaded(&self) -> bool {
        *self.loaded.borrow()
    }

    pub fn text(&self) -> &str {
        self.snapshot.text()
    }
}

/// Host editor kept entirely in memory.
#[derive(Debug)]
pub struct MemoryHost {
    views: BTreeMap<ViewId, MemoryView>,
    active: ViewId,
    next_id: ViewId,
    defer_loads: bool,
    opened: Vec<OpenRequest>,
}

impl MemoryHost {
    /// Creates a host whose active view is a Find Results buffer holding `text`.
    pub fn with_results(text: impl Into<String>) -> Self {
        let mut view = MemoryView::new(text, true);
        view.name = Some(FIND_RESULTS_NAME.to_string());
        view.settings
            .insert(SYNTAX_SETTING.to_string(), FIND_RESULTS_SYNTAX.to_string());

        let mut host = Self {
            views: BTreeMap::new(),
            active: 1,
            next_id: 2,
            defer_loads: false,
            opened: Vec::new(),
        };
        host.views.insert(1, view);
        host
    }

    /// Adds a plain view and returns its id without activating it.
    pub fn add_view(&mut self, name: Option<&str>, text: impl Into<String>) -> ViewId {
        let id = self.allocate_id();
        let mut view = MemoryView::new(text, true);
        view.name = name.map(str::to_string);
        self.views.insert(id, view);
        id
    }

    pub fn activate(&mut self, view: ViewId) {
        if self.views.contains_key(&view) {
            self.active = view;
        }
    }

    /// When set, opened views stay loading until [`MemoryHost::finish_loading`].
    pub fn defer_loads(&mut self, defer: bool) {
        self.defer_loads = defer;
    }

    pub fn finish_loading(&mut self, view: ViewId) {
        if let Some(v) = self.views.get(&view) {
            v.loaded.send_replace(true);
        }
    }

    /// A sender that completes loading of `view` from another task.
    pub fn load_handle(&self, view: ViewId) -> Option<watch::Sender<bool>> {
        self.views.get(&view).map(|v| v.loaded.clone())
    }

    pub fn view(&self, view: ViewId) -> Option<&MemoryView> {
        self.views.get(&view)
    }

    pub fn view_mut(&mut self, view: ViewId) -> Option<&mut MemoryView> {
        self.views.get_mut(&view)
    }

    /// Puts a single caret at `offset` in `view`.
    pub fn set_caret(&mut self, view: ViewId, offset: usize) {
        self.set_selection(view, vec![Region::point(offset)]);
    }

    /// Requests passed to [`HostAdapter::open_file`], oldest first.
    pub fn opened_requests(&self) -> &[OpenRequest] {
        &self.opened
    }

    fn allocate_id(&mut self) -> ViewId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn existing_view_for(&self, request: &OpenRequest) -> Option<ViewId> {
        self.views.iter().find_map(|(id, v)| {
            let same_path = v.path.as_deref() == Some(request.path.as_path());
            let reusable = match request.mode {
                // A preview replaces the previous preview
                OpenMode::Transient => v.transient || same_path,
                OpenMode::Permanent => same_path,
            };
            reusable.then_some(*id)
        })
    }
}

impl HostAdapter for MemoryHost {
    fn active_view(&self) -> ViewId {
        self.active
    }

    fn view_name(&self, view: ViewId) -> Option<String> {
        self.views.get(&view).and_then(|v| v.name.clone())
    }

    fn buffer_text(&self, view: ViewId) -> String {
        self.views
            .get(&view)
            .map(|v| v.text().to_string())
            .unwrap_or_default()
    }

    fn selection(&self, view: ViewId) -> Vec<Region> {
        self.views
            .get(&view)
            .map(|v| v.selection.clone())
            .unwrap_or_default()
    }

    fn set_selection(&mut self, view: ViewId, regions: Vec<Region>) {
        if let Some(v) = self.views.get_mut(&view) {
            v.selection = regions;
        }
    }

    fn tagged_regions(&self, view: ViewId, tag: Tag) -> Vec<Region> {
        let Some(v) = self.views.get(&view) else {
            return Vec::new();
        };

        match tag {
            Tag::FileName => file_match_regions(&list_file_headers(&v.snapshot)),
            Tag::Match => tag_result_matches(&v.snapshot, None),
        }
    }

    fn line_height(&self, view: ViewId) -> f64 {
        self.views
            .get(&view)
            .map_or(DEFAULT_LINE_HEIGHT, |v| v.line_height)
    }

    fn visible_region(&self, view: ViewId) -> Region {
        let Some(v) = self.views.get(&view) else {
            return Region::point(0);
        };

        let top = v.top_line();
        let bottom = top + v.visible_lines.saturating_sub(1);
        let begin = v.snapshot.line(top).map_or(v.snapshot.len(), |l| l.region.begin);
        let end = v
            .snapshot
            .line(bottom.min(v.snapshot.line_count() - 1))
            .map_or(v.snapshot.len(), |l| l.region.end);
        Region::new(begin, end.max(begin))
    }

    fn set_viewport_position(&mut self, view: ViewId, position: (f64, f64)) {
        if let Some(v) = self.views.get_mut(&view) {
            v.viewport = position;
        }
    }

    fn show_at_center(&mut self, view: ViewId, region: Region) {
        if let Some(v) = self.views.get_mut(&view) {
            let line = v.snapshot.line_index_of(region.begin);
            let top = line.saturating_sub(v.visible_lines / 2);
            v.viewport = (v.viewport.0, top as f64 * v.line_height);
        }
    }

    fn fold(&mut self, view: ViewId, region: Region) -> bool {
        let Some(v) = self.views.get_mut(&view) else {
            return false;
        };

        let in_bounds = region.end <= v.snapshot.len();
        let overlaps = v
            .folds
            .iter()
            .any(|f| f.begin < region.end && region.begin < f.end);
        if region.is_empty() || !in_bounds || overlaps {
            return false;
        }

        v.folds.push(region);
        v.folds.sort();
        true
    }

    fn unfold(&mut self, view: ViewId, region: Region) {
        if let Some(v) = self.views.get_mut(&view) {
            v.folds
                .retain(|f| !(f.begin <= region.end && region.begin <= f.end));
        }
    }

    fn is_folded(&self, view: ViewId, region: Region) -> bool {
        self.views.get(&view).is_some_and(|v| {
            v.folds
                .iter()
                .any(|f| f.begin <= region.begin && region.end <= f.end)
        })
    }

    fn is_read_only(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| v.read_only)
    }

    fn set_read_only(&mut self, view: ViewId, read_only: bool) {
        if let Some(v) = self.views.get_mut(&view) {
            v.read_only = read_only;
        }
    }

    fn setting(&self, view: ViewId, key: &str) -> Option<String> {
        self.views.get(&view).and_then(|v| v.settings.get(key).cloned())
    }

    fn set_setting(&mut self, view: ViewId, key: &str, value: Option<String>) {
        if let Some(v) = self.views.get_mut(&view) {
            match value {
                Some(value) => v.settings.insert(key.to_string(), value),
                None => v.settings.remove(key),
            };
        }
    }

    fn open_file(&mut self, request: &OpenRequest) -> NavResult<ViewId> {
        let text = std::fs::read_to_string(&request.path).map_err(|e| {
            NavError::Host(format!("cannot open {}: {}", request.path.display(), e))
        })?;
        self.opened.push(request.clone());

        let id = match self.existing_view_for(request) {
            Some(id) => id,
            None => self.allocate_id(),
        };

        let mut view = MemoryView::new(text, !self.defer_loads);
        // A reused view keeps its load signal so existing subscribers see the reload
        if let Some(previous) = self.views.get(&id) {
            view.loaded = previous.loaded.clone();
            view.loaded.send_replace(!self.defer_loads);
        }
        view.name = request
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        view.path = Some(request.path.clone());
        view.transient = request.mode == OpenMode::Transient;
        if let Some(line) = request.line {
            let offset = view
                .snapshot
                .offset_of(line as usize, request.column.unwrap_or(1));
            view.selection = vec![Region::point(offset)];
        }

        self.views.insert(id, view);
        self.active = id;
        Ok(id)
    }

    fn load_signal(&self, view: ViewId) -> watch::Receiver<bool> {
        match self.views.get(&view) {
            Some(v) => v.loaded.subscribe(),
            // Unknown views never load
            None => watch::channel(false).1,
        }
    }

    fn add_regions(&mut self, view: ViewId, key: &str, regions: Vec<Region>) {
        if let Some(v) = self.views.get_mut(&view) {
            v.regions.insert(key.to_string(), regions);
        }
    }

    fn erase_regions(&mut self, view: ViewId, key: &str) {
        if let Some(v) = self.views.get_mut(&view) {
            v.regions.remove(key);
        }
    }

    fn find_all(&self, view: ViewId, query: &SearchQuery) -> Vec<Region> {
        self.views
            .get(&view)
            .and_then(|v| find_all(v.text(), query).ok())
            .unwrap_or_default()
    }
}
