use crate::api::{ApiClient, ApiResult, BackendApi};
use crate::app::Action;
use crate::auth::AuthSession;
use crate::config::AppConfig;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::poller::DeploymentPoller;

/// Builds the backend client for a signed-in session
pub type Connector = Box<dyn Fn(&AppConfig, &AuthSession) -> ApiResult<Arc<dyn BackendApi>> + Send>;

/// Long-lived collaborators of the action handler: configuration, the
/// authenticated client and the deployment poller that uses it.
pub struct Services {
    pub config: AppConfig,
    api: Option<Arc<dyn BackendApi>>,
    poller: Option<DeploymentPoller>,
    poll_sequence: Arc<AtomicU64>,
    /// Bumped on every connect and disconnect. Background results tagged
    /// with an older value belong to a previous session.
    generation: u64,
    connector: Connector,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        Self::with_connector(
            config,
            Box::new(|config, session| {
                let client = ApiClient::new(config, session)?;
                Ok(Arc::new(client) as Arc<dyn BackendApi>)
            }),
        )
    }

    pub fn with_connector(config: AppConfig, connector: Connector) -> Self {
        Self {
            config,
            api: None,
            poller: None,
            poll_sequence: Arc::new(AtomicU64::new(0)),
            generation: 0,
            connector,
        }
    }

    pub fn api(&self) -> Option<Arc<dyn BackendApi>> {
        self.api.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a background result started under `generation` still
    /// belongs to the live connection
    pub fn is_current(&self, generation: u64) -> bool {
        self.api.is_some() && generation == self.generation
    }

    #[cfg(test)]
    pub fn is_connected(&self) -> bool {
        self.api.is_some()
    }

    #[cfg(test)]
    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    /// Build the client for `session` and start polling with it. Any
    /// previous connection is torn down first.
    pub fn connect(
        &mut self,
        session: &AuthSession,
        action_tx: &mpsc::UnboundedSender<Action>,
    ) -> ApiResult<()> {
        self.disconnect();

        let api = (self.connector)(&self.config, session)?;
        self.generation += 1;
        self.poller = Some(DeploymentPoller::spawn(
            Arc::clone(&api),
            self.config.poll_interval(),
            Arc::clone(&self.poll_sequence),
            self.generation,
            action_tx.clone(),
        ));
        self.api = Some(api);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.poller = None;
        self.api = None;
        self.generation += 1;
    }
}
