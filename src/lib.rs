//! # CareTrack TUI
//!
//! A terminal dashboard for the children registry of a charity.
//!
//! ## Features
//! - Paginated registry table (first 5 rows, Show More / Show Less)
//! - Details dialog with a contribute action
//! - Education, health and verification badges
//! - Hosted backend client with persisted sessions
//! - Offline mode from a local JSON file
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod models;
pub mod display;
pub mod table;
pub mod config;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Child, EducationStatus, Gender, HealthStatus};
pub use display::{Badge, BadgeVariant, StatusBadge};
pub use table::{ChildrenTable, TableState};
pub use config::{AuthOptions, BackendConfig};
pub use storage::{FileStore, MemoryStore, SessionStore};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, DataSource};
pub use network::{BackendClient, NetworkActor, Session};
