//! Backend client - one configured handle to the hosted data/auth service
//!
//! Built once during startup and shared as `Arc<BackendClient>`. The
//! configuration never changes after construction; only the session slot
//! is mutable.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::constants::{CHILDREN_TABLE, REQUEST_TIMEOUT_SECS};
use crate::models::Child;
use crate::storage::SessionStore;

/// An authenticated session issued by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
    store: Arc<dyn SessionStore>,
    session: RwLock<Option<Session>>,
}

impl BackendClient {
    /// Validate `config`, restore any persisted session and build the handle
    pub fn new(config: BackendConfig, store: Arc<dyn SessionStore>) -> Result<Arc<Self>> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("building HTTP client")?;

        let session = if config.auth.persist_session {
            restore_session(store.as_ref(), &config)
        } else {
            None
        };

        tracing::info!(
            url = %config.url,
            persist_session = config.auth.persist_session,
            auto_refresh_token = config.auth.auto_refresh_token,
            restored_session = session.is_some(),
            "Backend client initialized"
        );

        Ok(Arc::new(BackendClient {
            config,
            http,
            store,
            session: RwLock::new(session),
        }))
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|s| s.as_ref().cloned())
    }

    /// Install a session obtained elsewhere; persisted when enabled
    pub fn store_session(&self, session: Session) -> Result<()> {
        if self.config.auth.persist_session {
            let raw = serde_json::to_string(&session)?;
            self.store.set(&self.config.storage_key(), &raw)?;
        }
        *self
            .session
            .write()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))? = Some(session);
        Ok(())
    }

    pub fn clear_session(&self) -> Result<()> {
        *self
            .session
            .write()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))? = None;
        if self.config.auth.persist_session {
            self.store.remove(&self.config.storage_key())?;
        }
        Ok(())
    }

    /// Bearer token for the next request: the live session, else the anon key.
    /// Never touches the store; expired sessions are pruned at construction.
    pub fn access_token(&self) -> String {
        match self.session() {
            Some(session) if !session.is_expired(Utc::now()) => session.access_token,
            _ => self.config.anon_key.clone(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.access_token()))
            .header("Accept", "application/json")
    }

    /// All rows of the children table, in the order the backend returns them
    pub async fn fetch_children(&self) -> Result<Vec<Child>> {
        let url = self.rest_url(CHILDREN_TABLE);
        let resp = self
            .get(&url)
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(describe_send_error)?;

        let status = resp.status();
        let body = resp.text().await.context("reading response body")?;
        if !status.is_success() {
            bail!("backend returned {}: {}", status.as_u16(), body);
        }

        serde_json::from_str(&body).context("decoding children rows")
    }
}

/// Load the persisted session. An expired one is dropped from the store
/// unless an external refresher can still exchange its refresh token.
fn restore_session(store: &dyn SessionStore, config: &BackendConfig) -> Option<Session> {
    let key = config.storage_key();
    let raw = store.get(&key)?;
    let session: Session = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable persisted session");
            return None;
        }
    };

    if !session.is_expired(Utc::now()) {
        return Some(session);
    }
    if config.auth.auto_refresh_token && session.refresh_token.is_some() {
        return Some(session);
    }

    tracing::info!("Persisted session expired, dropping it");
    if let Err(e) = store.remove(&key) {
        tracing::warn!(error = %e, "Failed to clear expired session");
    }
    None
}

fn describe_send_error(e: reqwest::Error) -> anyhow::Error {
    if e.is_timeout() {
        anyhow::anyhow!("Request timed out ({}s)", REQUEST_TIMEOUT_SECS)
    } else if e.is_connect() {
        anyhow::anyhow!("Connection failed: {}", e)
    } else {
        anyhow::anyhow!("Request failed: {}", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthOptions;
    use crate::storage::MemoryStore;
    use chrono::Duration as ChronoDuration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn session(token: &str, expires_in: i64, refresh: Option<&str>) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: refresh.map(String::from),
            expires_at: Utc::now() + ChronoDuration::seconds(expires_in),
        }
    }

    fn client_with(auth: AuthOptions, store: Arc<dyn SessionStore>) -> Arc<BackendClient> {
        let config = BackendConfig {
            auth,
            ..BackendConfig::default()
        };
        BackendClient::new(config, store).unwrap()
    }

    #[test]
    fn test_anon_key_without_session() {
        let client = client_with(AuthOptions::default(), Arc::new(MemoryStore::new()));
        assert_eq!(client.access_token(), client.config().anon_key);
    }

    #[test]
    fn test_persisted_session_is_restored() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let first = client_with(AuthOptions::default(), Arc::clone(&store));
        first.store_session(session("live", 3600, None)).unwrap();

        let second = client_with(AuthOptions::default(), store);
        assert_eq!(second.access_token(), "live");
    }

    #[test]
    fn test_session_not_persisted_when_disabled() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let auth = AuthOptions {
            persist_session: false,
            ..AuthOptions::default()
        };
        let client = client_with(auth, Arc::clone(&store));
        client.store_session(session("mem", 3600, None)).unwrap();
        assert_eq!(client.access_token(), "mem");
        assert_eq!(store.get(&client.config().storage_key()), None);
    }

    #[test]
    fn test_expired_session_falls_back_to_anon_key() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let client = client_with(AuthOptions::default(), Arc::clone(&store));
        client.store_session(session("old", -10, None)).unwrap();

        assert_eq!(client.access_token(), client.config().anon_key);
        // Reading the token leaves the store alone
        assert!(store.get(&client.config().storage_key()).is_some());

        let restarted = client_with(AuthOptions::default(), Arc::clone(&store));
        assert!(restarted.session().is_none());
        assert_eq!(store.get(&restarted.config().storage_key()), None);
    }

    #[test]
    fn test_expired_refreshable_session_is_kept() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let client = client_with(AuthOptions::default(), Arc::clone(&store));
        client.store_session(session("old", -10, Some("r1"))).unwrap();
        assert_eq!(client.access_token(), client.config().anon_key);

        let restarted = client_with(AuthOptions::default(), store);
        assert_eq!(restarted.session().unwrap().refresh_token.as_deref(), Some("r1"));
        assert_eq!(restarted.access_token(), restarted.config().anon_key);
    }

    #[test]
    fn test_poisoned_session_lock_is_reported() {
        let client = client_with(AuthOptions::default(), Arc::new(MemoryStore::new()));
        let holder = Arc::clone(&client);
        let _ = std::thread::spawn(move || {
            let _guard = holder.session.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(client.store_session(session("t", 3600, None)).is_err());
        assert!(client.clear_session().is_err());
    }

    #[test]
    fn test_request_carries_key_and_bearer() {
        let client = client_with(AuthOptions::default(), Arc::new(MemoryStore::new()));
        let anon = client.config().anon_key.clone();

        let request = client
            .get(&client.rest_url(CHILDREN_TABLE))
            .query(&[("select", "*")])
            .build()
            .unwrap();
        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://zvwtmkouonvgjfgllnsb.supabase.co/rest/v1/children?select=*"
        );
        assert_eq!(request.headers()["apikey"].to_str().unwrap(), anon);
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            format!("Bearer {}", anon)
        );

        client.store_session(session("user-jwt", 3600, None)).unwrap();
        let request = client.get(&client.rest_url(CHILDREN_TABLE)).build().unwrap();
        assert_eq!(request.headers()["apikey"].to_str().unwrap(), anon);
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer user-jwt"
        );
    }

    /// Answer exactly one request with a canned response; returns the base url
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    fn local_client(url: String) -> Arc<BackendClient> {
        let config = BackendConfig {
            url,
            ..BackendConfig::default()
        };
        BackendClient::new(config, Arc::new(MemoryStore::new())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_error_status_carries_code_and_body() {
        let url = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;
        let err = local_client(url).fetch_children().await.unwrap_err();
        let text = format!("{:#}", err);
        assert!(text.contains("500"), "{}", text);
        assert!(text.contains(r#"{"message":"boom"}"#), "{}", text);
    }

    #[tokio::test]
    async fn test_fetch_decodes_rows_in_order() {
        let body = r#"[
            {"id":"b","name":"Bina","age":7,"gender":"female","district":"D","location":"L",
             "education_status":"primary","health_status":"good","verified":true},
            {"id":"a","name":"Arun","age":11,"gender":"male","district":"D","location":"L",
             "education_status":"none","health_status":"poor","verified":false}
        ]"#;
        let url = serve_once("200 OK", body).await;
        let children = local_client(url).fetch_children().await.unwrap();
        let ids: Vec<_> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(children[1].education_status, crate::models::EducationStatus::None);
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_body() {
        let url = serve_once("200 OK", r#"{"not":"an array"}"#).await;
        let err = local_client(url).fetch_children().await.unwrap_err();
        assert!(format!("{:#}", err).contains("decoding children rows"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = BackendConfig {
            url: String::from("ftp://example.com"),
            ..BackendConfig::default()
        };
        assert!(BackendClient::new(config, Arc::new(MemoryStore::new())).is_err());
    }

    #[test]
    fn test_rest_url() {
        let config = BackendConfig {
            url: String::from("https://abc.example.co/"),
            ..BackendConfig::default()
        };
        let client = BackendClient::new(config, Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(client.rest_url("children"), "https://abc.example.co/rest/v1/children");
    }
}
