//! Render state - data structure sent from App layer to UI for rendering

use crate::display::{self, Badge};
use crate::models::Child;

/// One table row, already mapped to display text
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub name: String,
    pub details: String,
    pub district: String,
    pub location: String,
    pub education: Badge,
    pub health: Badge,
    pub verification: Badge,
}

impl From<&Child> for RowView {
    fn from(child: &Child) -> Self {
        RowView {
            name: child.name.clone(),
            details: display::details_line(child),
            district: child.district.clone(),
            location: child.location.clone(),
            education: display::education_badge(child),
            health: display::health_badge(child),
            verification: display::verification_badge(child),
        }
    }
}

/// Contents of the details dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub name: String,
    /// Label/value pairs in display order
    pub fields: Vec<(&'static str, String)>,
}

impl From<&Child> for DetailView {
    fn from(child: &Child) -> Self {
        DetailView {
            name: child.name.clone(),
            fields: vec![
                ("Name", child.name.clone()),
                ("Age", child.age.to_string()),
                ("Gender", display::gender_label(&child.gender)),
                ("District", child.district.clone()),
                ("Location", child.location.clone()),
                ("Education Status", display::education_badge(child).label),
                ("Health Status", display::health_badge(child).label),
                ("Status", display::verification_badge(child).label),
            ],
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub title: String,
    pub rows: Vec<RowView>,
    pub cursor: usize,
    /// Label of the Show More / Show Less control, absent for short lists
    pub disclosure: Option<&'static str>,
    pub dialog: Option<DetailView>,
    pub is_loading: bool,
    pub status: Option<String>,
    pub source: String,
    pub show_help: bool,
}
