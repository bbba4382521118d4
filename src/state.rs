use std::sync::Arc;

use crate::application::services::{AliasGenerator, CredentialHasher, LinkDirectory, SessionService};
use crate::config::Config;
use crate::domain::repositories::{AccountRepository, RedirectRepository};
use crate::infrastructure::cache::AliasCache;
use crate::infrastructure::captcha::TurnstileVerifier;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<LinkDirectory>,
    pub generator: Arc<AliasGenerator>,
    pub hasher: Arc<CredentialHasher>,
    pub sessions: Arc<SessionService>,
    pub accounts: Arc<dyn AccountRepository>,
    pub captcha: Arc<TurnstileVerifier>,
    pub allow_self_registration: bool,
    pub shared_secret_hash: Option<String>,
}

impl AppState {
    /// Wires the service graph over the given repositories and cache.
    pub fn new(
        redirects: Arc<dyn RedirectRepository>,
        accounts: Arc<dyn AccountRepository>,
        cache: Arc<dyn AliasCache>,
        config: &Config,
    ) -> Self {
        Self {
            directory: Arc::new(LinkDirectory::new(redirects.clone(), cache.clone())),
            generator: Arc::new(AliasGenerator::new(redirects, cache)),
            hasher: Arc::new(CredentialHasher::new()),
            sessions: Arc::new(SessionService::new(&config.session_secret)),
            accounts,
            captcha: Arc::new(TurnstileVerifier::new(config.turnstile_secret_key.clone())),
            allow_self_registration: config.allow_self_registration,
            shared_secret_hash: config.shared_secret_hash.clone(),
        }
    }
}
