//! Application state for the chat server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::pipeline::RagPipeline;
use crate::providers::Providers;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Pipeline, absent when the backend credential is missing
    pipeline: Option<RagPipeline>,
}

impl AppState {
    /// Create state with providers for the configured backend.
    ///
    /// A missing credential is not fatal: the server still starts and every
    /// question is answered with the credential error.
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state (backend: {:?})", config.backend);

        let pipeline = match Providers::from_config(&config) {
            Ok(providers) => Some(RagPipeline::new(&config, providers)?),
            Err(Error::MissingCredential { env_var }) => {
                tracing::warn!(
                    "{} is not set; questions will be rejected until it is provided",
                    env_var
                );
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        })
    }

    /// Create state over explicit providers
    pub fn with_providers(config: RagConfig, providers: Providers) -> Result<Self> {
        let pipeline = RagPipeline::new(&config, providers)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline: Some(pipeline),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the pipeline, or the credential error when none is configured
    pub fn pipeline(&self) -> Result<&RagPipeline> {
        self.inner
            .pipeline
            .as_ref()
            .ok_or_else(|| self.inner.config.missing_credential())
    }

    /// Whether questions can be answered
    pub fn is_ready(&self) -> bool {
        self.inner.pipeline.is_some()
    }
}
