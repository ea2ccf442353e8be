//! Network messages - communication between App and Network layers

use crate::models::Child;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load every row of the children table
    FetchChildren { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Rows fetched successfully
    Children {
        id: u64,
        children: Vec<Child>,
        time_ms: u64,
    },
    /// Fetch failed
    Error {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Children { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
