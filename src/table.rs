//! Children table - paginated record list with a details dialog
//!
//! Holds the supplied records (never mutated) and the transient view
//! state. The state is rebuilt from scratch whenever the table is remounted
//! with a new collection.

use std::fmt;

use crate::constants::COLLAPSED_ROWS;
use crate::models::Child;

/// Called with the record whenever "view" is requested
pub type ViewHandler = Box<dyn FnMut(&Child) + Send>;

/// Transient UI state, owned by one table instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableState {
    pub show_all: bool,
    /// Index into the supplied collection
    pub selected: Option<usize>,
    pub dialog_open: bool,
    /// Highlighted row within the displayed slice
    pub cursor: usize,
}

pub struct ChildrenTable {
    children: Vec<Child>,
    state: TableState,
    on_view: Option<ViewHandler>,
}

impl fmt::Debug for ChildrenTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildrenTable")
            .field("children", &self.children.len())
            .field("state", &self.state)
            .field("on_view", &self.on_view.is_some())
            .finish()
    }
}

impl Default for ChildrenTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChildrenTable {
    pub fn new(children: Vec<Child>) -> Self {
        ChildrenTable {
            children,
            state: TableState::default(),
            on_view: None,
        }
    }

    pub fn with_view_handler(mut self, handler: ViewHandler) -> Self {
        self.on_view = Some(handler);
        self
    }

    pub fn set_view_handler(&mut self, handler: ViewHandler) {
        self.on_view = Some(handler);
    }

    /// Remount with a new collection; transient state starts over
    pub fn replace_children(&mut self, children: Vec<Child>) {
        self.children = children;
        self.state = TableState::default();
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.children.len()
    }

    pub fn title(&self) -> String {
        format!("Children Registry ({} total)", self.total())
    }

    /// Rows currently on screen, in input order
    pub fn displayed(&self) -> &[Child] {
        if self.state.show_all {
            &self.children
        } else {
            &self.children[..self.children.len().min(COLLAPSED_ROWS)]
        }
    }

    /// Whether the Show More / Show Less control exists at all
    pub fn has_disclosure(&self) -> bool {
        self.children.len() > COLLAPSED_ROWS
    }

    pub fn disclosure_label(&self) -> &'static str {
        if self.state.show_all {
            "Show Less"
        } else {
            "Show More"
        }
    }

    pub fn toggle_disclosure(&mut self) {
        self.state.show_all = !self.state.show_all;
        self.clamp_cursor();
    }

    pub fn next_row(&mut self) {
        if self.state.cursor + 1 < self.displayed().len() {
            self.state.cursor += 1;
        }
    }

    pub fn prev_row(&mut self) {
        self.state.cursor = self.state.cursor.saturating_sub(1);
    }

    /// Open the dialog for the row at `index` of the displayed slice
    pub fn view(&mut self, index: usize) -> Option<&Child> {
        if index >= self.displayed().len() {
            return None;
        }
        self.state.selected = Some(index);
        self.state.dialog_open = true;
        self.state.cursor = index;

        let child = &self.children[index];
        if let Some(handler) = self.on_view.as_mut() {
            handler(child);
        }
        Some(child)
    }

    pub fn view_at_cursor(&mut self) -> Option<&Child> {
        self.view(self.state.cursor)
    }

    /// Hide the dialog; the selection is kept but not shown
    pub fn close_dialog(&mut self) {
        self.state.dialog_open = false;
    }

    /// The record shown in the dialog, if it is open
    pub fn selected_child(&self) -> Option<&Child> {
        if !self.state.dialog_open {
            return None;
        }
        self.state.selected.and_then(|i| self.children.get(i))
    }

    /// Placeholder contribution action. No backend effect.
    pub fn contribute(&self) -> Option<String> {
        self.selected_child()
            .map(|child| format!("Contribute to {}", child.name))
    }

    fn clamp_cursor(&mut self) {
        let len = self.displayed().len();
        if self.state.cursor >= len {
            self.state.cursor = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::verification_badge;
    use crate::models::sample_child;
    use std::sync::{Arc, Mutex};

    fn table_of(n: usize) -> ChildrenTable {
        ChildrenTable::new((0..n).map(|i| sample_child(i, i % 2 == 0)).collect())
    }

    #[test]
    fn test_small_collection_shows_everything() {
        for n in 0..=COLLAPSED_ROWS {
            let table = table_of(n);
            assert_eq!(table.displayed().len(), n);
            assert!(!table.has_disclosure());
        }
    }

    #[test]
    fn test_disclosure_toggles_between_truncated_and_full() {
        let mut table = table_of(12);
        let ids = |t: &ChildrenTable| t.displayed().iter().map(|c| c.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(&table), (0..5).map(|i| format!("child-{}", i)).collect::<Vec<_>>());
        table.toggle_disclosure();
        assert_eq!(ids(&table), (0..12).map(|i| format!("child-{}", i)).collect::<Vec<_>>());
        table.toggle_disclosure();
        assert_eq!(table.displayed().len(), 5);
    }

    #[test]
    fn test_seven_alternating_records() {
        let mut table = table_of(7);
        assert!(table.has_disclosure());
        assert_eq!(table.disclosure_label(), "Show More");

        let labels: Vec<_> = table
            .displayed()
            .iter()
            .map(|c| verification_badge(c).label)
            .collect();
        assert_eq!(labels, ["Verified", "Pending", "Verified", "Pending", "Verified"]);

        table.toggle_disclosure();
        assert_eq!(table.displayed().len(), 7);
        assert_eq!(table.disclosure_label(), "Show Less");
    }

    #[test]
    fn test_collapsing_clamps_cursor() {
        let mut table = table_of(8);
        table.toggle_disclosure();
        for _ in 0..10 {
            table.next_row();
        }
        assert_eq!(table.state().cursor, 7);
        table.toggle_disclosure();
        assert_eq!(table.state().cursor, 4);
    }

    #[test]
    fn test_view_opens_dialog_with_that_record() {
        let mut table = table_of(3);
        assert!(table.selected_child().is_none());

        let name = table.view(1).map(|c| c.name.clone());
        assert_eq!(name.as_deref(), Some("Child 1"));
        assert_eq!(table.selected_child().unwrap().id, "child-1");

        table.close_dialog();
        assert!(table.selected_child().is_none());

        table.view(2);
        assert_eq!(table.selected_child().unwrap().id, "child-2");
    }

    #[test]
    fn test_view_hidden_row_is_ignored() {
        let mut table = table_of(7);
        assert!(table.view(6).is_none());
        assert!(!table.state().dialog_open);
        table.toggle_disclosure();
        assert!(table.view(6).is_some());
    }

    #[test]
    fn test_view_handler_receives_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut table = table_of(4).with_view_handler(Box::new(move |child: &Child| {
            sink.lock().unwrap().push(child.id.clone());
        }));

        table.view(3);
        table.view(0);
        assert_eq!(*seen.lock().unwrap(), ["child-3", "child-0"]);
    }

    #[test]
    fn test_contribute_only_with_open_dialog() {
        let mut table = table_of(2);
        assert_eq!(table.contribute(), None);
        table.view_at_cursor();
        assert_eq!(table.contribute().as_deref(), Some("Contribute to Child 0"));
    }

    #[test]
    fn test_replace_children_resets_state() {
        let mut table = table_of(9);
        table.toggle_disclosure();
        table.view(7);
        table.replace_children(vec![sample_child(20, true)]);
        assert_eq!(table.state(), TableState::default());
        assert_eq!(table.title(), "Children Registry (1 total)");
    }
}
