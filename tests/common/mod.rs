#![allow(dead_code)]

use std::sync::Arc;

use linkdir::application::services::{
    AliasGenerator, CredentialHasher, LinkDirectory, SessionService,
};
use linkdir::domain::entities::{Account, NewAccount};
use linkdir::domain::repositories::{AccountRepository, RedirectRepository};
use linkdir::infrastructure::cache::{AliasCache, MemoryCache};
use linkdir::infrastructure::captcha::TurnstileVerifier;
use linkdir::infrastructure::persistence::{
    InMemoryAccountRepository, InMemoryRedirectRepository,
};
use linkdir::state::AppState;

pub const TEST_SESSION_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Cheap derivation for tests; the encoded format embeds the count, so
/// verification is unaffected.
pub const TEST_ITERATIONS: u32 = 1_000;

/// In-memory application state plus direct handles on the repositories
/// for seeding and assertions.
pub struct TestHarness {
    pub state: AppState,
    pub redirects: Arc<InMemoryRedirectRepository>,
    pub accounts: Arc<InMemoryAccountRepository>,
}

/// Builds the full service graph over in-memory infrastructure.
///
/// `shared_secret` configures the legacy surface with the hash of the
/// given secret; `None` leaves it closed.
pub fn test_harness(allow_self_registration: bool, shared_secret: Option<&str>) -> TestHarness {
    let redirects = Arc::new(InMemoryRedirectRepository::new());
    let accounts = Arc::new(InMemoryAccountRepository::new());

    let redirects_dyn: Arc<dyn RedirectRepository> = redirects.clone();
    let accounts_dyn: Arc<dyn AccountRepository> = accounts.clone();
    let cache: Arc<dyn AliasCache> = Arc::new(MemoryCache::new(10_000));

    let hasher = Arc::new(CredentialHasher::with_iterations(TEST_ITERATIONS));
    let shared_secret_hash = shared_secret.map(|secret| hasher.hash_blocking(secret));

    let state = AppState {
        directory: Arc::new(LinkDirectory::new(redirects_dyn.clone(), cache.clone())),
        generator: Arc::new(AliasGenerator::new(redirects_dyn, cache)),
        hasher,
        sessions: Arc::new(SessionService::new(TEST_SESSION_SECRET)),
        accounts: accounts_dyn,
        captcha: Arc::new(TurnstileVerifier::new(None)),
        allow_self_registration,
        shared_secret_hash,
    };

    TestHarness {
        state,
        redirects,
        accounts,
    }
}

/// Inserts an account directly into the repository, hashing the password
/// with the test iteration count.
pub async fn seed_account(
    harness: &TestHarness,
    username: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> Account {
    let password_hash = harness.state.hasher.hash_blocking(password);

    harness
        .accounts
        .insert(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            is_admin,
        })
        .await
        .expect("failed to seed account")
}
