//! The editor seen from this crate.
//!
//! Commands never reach into editor globals; they receive a [`HostAdapter`]
//! and only use the capabilities listed here. [`memory::MemoryHost`] is an
//! in-memory implementation used by the command-line tool and the tests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::watch;

use crate::buffer::Region;
use crate::error::NavResult;
use crate::model::SearchQuery;

/// In-memory host
pub mod memory;

/// Identifier of a view (an open buffer) in the host.
pub type ViewId = u64;

/// Name the host gives to the search output buffer.
pub const FIND_RESULTS_NAME: &str = "Find Results";

/// Key of the highlight regions drawn on a file opened from the results.
pub const HIGHLIGHT_KEY: &str = "better_find_buffer.highlight";

/// Setting holding the syntax definition of a view.
pub const SYNTAX_SETTING: &str = "syntax";

/// Setting holding the color scheme of a view.
pub const COLOR_SCHEME_SETTING: &str = "color_scheme";

/// Semantic tags a search engine attaches to regions of a results buffer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The path span of a header line
    FileName,

    /// A single hit inside a match line
    Match,
}

/// Whether an opened file replaces the preview or stays open.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    #[default]
    Permanent,
    Transient,
}

/// A request to open a file, optionally at a position and in a given pane.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub path: PathBuf,
    pub line: Option<u64>,
    pub column: Option<usize>,
    pub mode: OpenMode,

    /// Pane (split group) index; `None` opens in the active pane
    pub pane: Option<usize>,
}

/// Capabilities this crate needs from the host editor.
///
/// Offsets are byte offsets into the view's text.
pub trait HostAdapter {
    /// View the command was invoked on.
    fn active_view(&self) -> ViewId;

    fn view_name(&self, view: ViewId) -> Option<String>;

    /// Current text of the view.
    fn buffer_text(&self, view: ViewId) -> String;

    fn selection(&self, view: ViewId) -> Vec<Region>;

    /// Replaces the selection.
    fn set_selection(&mut self, view: ViewId, regions: Vec<Region>);

    /// Regions the search engine tagged with `tag`, in buffer order.
    fn tagged_regions(&self, view: ViewId, tag: Tag) -> Vec<Region>;

    fn line_height(&self, view: ViewId) -> f64;

    /// Region currently visible on screen.
    fn visible_region(&self, view: ViewId) -> Region;

    /// Scrolls so the layout position `(x, y)` is at the top left.
    fn set_viewport_position(&mut self, view: ViewId, position: (f64, f64));

    fn show_at_center(&mut self, view: ViewId, region: Region);

    /// Folds `region`. Returns false if nothing was folded.
    fn fold(&mut self, view: ViewId, region: Region) -> bool;

    fn unfold(&mut self, view: ViewId, region: Region);

    fn is_folded(&self, view: ViewId, region: Region) -> bool;

    fn is_read_only(&self, view: ViewId) -> bool;

    fn set_read_only(&mut self, view: ViewId, read_only: bool);

    fn setting(&self, view: ViewId, key: &str) -> Option<String>;

    /// Sets a view setting; `None` erases it.
    fn set_setting(&mut self, view: ViewId, key: &str, value: Option<String>);

    /// Opens a file and returns its view. Loading may finish later; see
    /// [`HostAdapter::load_signal`].
    fn open_file(&mut self, request: &OpenRequest) -> NavResult<ViewId>;

    /// Watch channel that turns `true` once the view has finished loading.
    fn load_signal(&self, view: ViewId) -> watch::Receiver<bool>;

    /// Replaces the regions stored under `key`.
    fn add_regions(&mut self, view: ViewId, key: &str, regions: Vec<Region>);

    fn erase_regions(&mut self, view: ViewId, key: &str);

    /// Every occurrence of `query` in the view.
    fn find_all(&self, view: ViewId, query: &SearchQuery) -> Vec<Region>;
}
