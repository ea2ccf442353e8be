//! App state - pure data structure with no I/O logic

use std::path::PathBuf;

use crate::messages::render::{DetailView, RowView};
use crate::messages::RenderState;
use crate::table::ChildrenTable;

/// Where child records come from
#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    /// The hosted backend, through the shared client
    Backend,
    /// A local JSON array of records
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Backend => String::from("backend"),
            DataSource::File(path) => format!("file: {}", path.display()),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub table: ChildrenTable,
    pub source: DataSource,

    // Fetch tracking
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    /// One-line message shown in the status bar
    pub status: Option<String>,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        AppState {
            table: ChildrenTable::default(),
            source,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            status: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            title: self.table.title(),
            rows: self.table.displayed().iter().map(RowView::from).collect(),
            cursor: self.table.state().cursor,
            disclosure: self
                .table
                .has_disclosure()
                .then(|| self.table.disclosure_label()),
            dialog: self.table.selected_child().map(DetailView::from),
            is_loading: self.is_loading,
            status: self.status.clone(),
            source: self.source.describe(),
            show_help: self.show_help,
        }
    }
}
