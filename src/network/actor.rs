//! Network actor - runs backend calls in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::BackendClient;

/// Network actor that processes fetch commands against the shared client
pub struct NetworkActor {
    client: Arc<BackendClient>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: Arc<BackendClient>, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchChildren { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = Arc::clone(&self.client);

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Fetching children");
                                let start = Instant::now();
                                let result = client.fetch_children().await;
                                let time_ms = start.elapsed().as_millis() as u64;

                                let response = match result {
                                    Ok(children) => {
                                        tracing::info!(id, count = children.len(), time_ms, "Fetch completed");
                                        NetworkResponse::Children { id, children, time_ms }
                                    }
                                    Err(e) => {
                                        tracing::error!(id, error = %e, "Fetch failed");
                                        NetworkResponse::Error { id, message: format!("{:#}", e), time_ms }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active_requests.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
