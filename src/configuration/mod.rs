use crate::api::{ApiClient, Configuration};
use crate::auth::Session;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const CONFIGURATION_PATH: &str = "configuration";

/// Terminal result of a configuration submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server did not persist the submitted configuration.
    Rejected,
    /// Persisted; the tunnel was not asked to start.
    Saved,
    /// Persisted and the tunnel came up; local state was re-fetched from
    /// the server.
    TunnelStarted,
    /// Persisted, but the tunnel failed to start.
    TunnelStartFailed,
}

/// Fetches and submits the tunnel server configuration, sequencing the
/// dependent calls: persist, conditionally start the tunnel, then re-fetch
/// the authoritative state.
///
/// The busy flag gates UI re-entrancy. It is set exactly once when a
/// submission begins and cleared exactly once on every terminal branch,
/// error returns included.
pub struct ConfigurationClient {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    current: RwLock<Option<Configuration>>,
    busy: AtomicBool,
}

impl ConfigurationClient {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            current: RwLock::new(None),
            busy: AtomicBool::new(false),
        }
    }

    /// Last-known configuration: the server's copy after a fetch, or the
    /// operator's edit after a submission that was not re-synced.
    pub fn configuration(&self) -> Option<Configuration> {
        self.current.read().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// GET the authoritative configuration, replace the local copy and
    /// clear the busy flag.
    pub async fn fetch(&self) -> Result<Configuration> {
        let configuration: Configuration = self
            .api
            .get_entity(CONFIGURATION_PATH, self.session.auth_headers())
            .await
            .context("Failed to fetch configuration")?;

        *self.current.write() = Some(configuration.clone());
        self.busy.store(false, Ordering::SeqCst);
        Ok(configuration)
    }

    /// POST the configuration. Persisted means the server answered with
    /// exactly 200; any other status is a normal negative outcome, not an
    /// error.
    pub async fn update_configuration(&self, configuration: &Configuration) -> Result<bool> {
        let response = self
            .api
            .post(
                CONFIGURATION_PATH,
                Some(configuration),
                self.session.auth_headers(),
            )
            .await
            .context("Failed to submit configuration")?;

        Ok(response.status() == StatusCode::OK)
    }

    /// PUT with no body triggers a tunnel start; started means status 200.
    pub async fn start_tunnel(&self) -> Result<bool> {
        let response = self
            .api
            .put::<()>(CONFIGURATION_PATH, None, self.session.auth_headers())
            .await
            .context("Failed to request tunnel start")?;

        Ok(response.status() == StatusCode::OK)
    }

    /// Submit an edited configuration and run the dependent chain to its
    /// terminal branch.
    pub async fn submit(&self, configuration: Configuration) -> Result<SubmitOutcome> {
        self.busy.store(true, Ordering::SeqCst);
        let outcome = self.run_submit(configuration).await;
        if outcome.is_err() {
            self.busy.store(false, Ordering::SeqCst);
        }
        outcome
    }

    async fn run_submit(&self, configuration: Configuration) -> Result<SubmitOutcome> {
        // The local copy tracks the operator's edit until a fetch replaces
        // it with the server's authoritative state.
        *self.current.write() = Some(configuration.clone());

        if !self.update_configuration(&configuration).await? {
            log::warn!("Server rejected the configuration update");
            self.busy.store(false, Ordering::SeqCst);
            return Ok(SubmitOutcome::Rejected);
        }

        if !configuration.tunnel_enabled {
            self.busy.store(false, Ordering::SeqCst);
            return Ok(SubmitOutcome::Saved);
        }

        if !self.start_tunnel().await? {
            log::warn!("Configuration persisted but the tunnel did not start");
            self.busy.store(false, Ordering::SeqCst);
            return Ok(SubmitOutcome::TunnelStartFailed);
        }

        log::info!("Tunnel started, re-fetching configuration");
        self.fetch()
            .await
            .context("Tunnel started but re-fetching the configuration failed")?;

        Ok(SubmitOutcome::TunnelStarted)
    }
}
