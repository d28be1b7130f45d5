use crate::config::ExplorerConfig;
use crate::errors::ExplorerError;
use crate::state::{AppState, ViewTicket};
use crate::verify::RecordVerifier;
use crate::xrpc::{RecordSource, XrpcClient};
use atscope_core::LinkTemplateRegistry;
use atscope_identity::IdentityResolver;
use atscope_render::ValueRenderer;
use std::sync::Arc;

/// Wires normalization, resolution, fetching and rendering into views.
///
/// One explorer is shared by every view of a session; the DID document
/// cache and the application state live here.
pub struct Explorer {
    pub(crate) state: AppState,
    pub(crate) resolver: IdentityResolver,
    pub(crate) records: Arc<dyn RecordSource>,
    pub(crate) verifier: Option<Arc<dyn RecordVerifier>>,
    pub(crate) renderer: ValueRenderer,
    pub(crate) links: LinkTemplateRegistry,
}

impl Explorer {
    /// Creates an explorer with default state and rendering, and no verifier.
    pub fn new(resolver: IdentityResolver, records: Arc<dyn RecordSource>) -> Self {
        Self {
            state: AppState::default(),
            resolver,
            records,
            verifier: None,
            renderer: ValueRenderer::default(),
            links: LinkTemplateRegistry::new(),
        }
    }

    /// Creates an explorer talking HTTP to the configured services.
    pub fn from_config(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        let resolver = IdentityResolver::from_config(config.directory_config())?;
        let records = Arc::new(XrpcClient::new(config.timeout_secs)?);
        Ok(Self::new(resolver, records)
            .with_state(AppState::new(config.theme))
            .with_renderer(ValueRenderer::new(config.render_options())))
    }

    /// Installs a record verifier.
    pub fn with_verifier(mut self, verifier: Arc<dyn RecordVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Replaces the renderer.
    pub fn with_renderer(mut self, renderer: ValueRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces the state store.
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = state;
        self
    }

    /// Shared application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Identity resolver and its document cache.
    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Renderer used by the record view.
    pub fn renderer(&self) -> &ValueRenderer {
        &self.renderer
    }

    /// Fails with [`ExplorerError::Superseded`] once `ticket` is stale.
    pub(crate) fn ensure_active(&self, ticket: ViewTicket) -> Result<(), ExplorerError> {
        if self.state.is_active(ticket) {
            Ok(())
        } else {
            tracing::debug!("view superseded, abandoning load");
            Err(ExplorerError::Superseded)
        }
    }

    /// Publishes a failure notice for `ticket` and returns the error.
    pub(crate) fn fail<T>(&self, ticket: ViewTicket, err: ExplorerError) -> Result<T, ExplorerError> {
        self.state.set_notice(ticket, err.notice());
        Err(err)
    }
}
