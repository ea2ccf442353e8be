//! State transitions triggered by UI events and network responses

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::state::{AppState, DataSource};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Child;

impl AppState {
    // ========================
    // Table
    // ========================

    pub fn next_row(&mut self) {
        self.table.next_row();
    }

    pub fn prev_row(&mut self) {
        self.table.prev_row();
    }

    pub fn toggle_show_all(&mut self) {
        if self.table.has_disclosure() {
            self.table.toggle_disclosure();
        }
    }

    // ========================
    // Details dialog
    // ========================

    pub fn view_child(&mut self) {
        self.table.view_at_cursor();
    }

    pub fn close_dialog(&mut self) {
        self.table.close_dialog();
    }

    pub fn contribute(&mut self) {
        if let Some(notice) = self.table.contribute() {
            tracing::info!(notice = %notice, "Contribute requested");
            self.status = Some(notice);
        }
    }

    // ========================
    // Data loading
    // ========================

    /// Start a reload. Backend sources return the command to dispatch;
    /// file sources are read in place.
    pub fn refresh(&mut self) -> Option<NetworkCommand> {
        match self.source.clone() {
            DataSource::Backend => {
                let id = self.next_id();
                self.is_loading = true;
                self.pending_request_id = Some(id);
                self.status = Some(String::from("Loading children..."));
                Some(NetworkCommand::FetchChildren { id })
            }
            DataSource::File(path) => {
                match load_children_file(&path) {
                    Ok(children) => self.install(children, None),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to load children file");
                        self.status = Some(format!("Error: {:#}", e));
                    }
                }
                None
            }
        }
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Ignoring stale response");
            return;
        }
        self.pending_request_id = None;
        self.is_loading = false;

        match response {
            NetworkResponse::Children { children, time_ms, .. } => {
                self.install(children, Some(time_ms));
            }
            NetworkResponse::Error { message, .. } => {
                self.status = Some(format!("Error: {}", message));
            }
        }
    }

    fn install(&mut self, children: Vec<Child>, time_ms: Option<u64>) {
        let count = children.len();
        self.table.replace_children(children);
        self.status = Some(match time_ms {
            Some(ms) => format!("Loaded {} children in {}ms", count, ms),
            None => format!("Loaded {} children", count),
        });
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

/// Read a JSON array of child records
pub fn load_children_file(path: &Path) -> Result<Vec<Child>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
