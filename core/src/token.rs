use crate::clock::Clock;
use crate::error::CredentialError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub expires_at: i64,
}

/// What a credential exchange hands back: a token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}

/// Single-slot bearer token cache. The slot lock is held across a refresh,
/// so concurrent callers wait for the one exchange in flight instead of
/// starting their own.
pub struct CredentialTokenCache {
    slot: Mutex<Option<Token>>,
    safety_margin: Duration,
    clock: Arc<dyn Clock>,
}

impl CredentialTokenCache {
    pub fn new(clock: Arc<dyn Clock>, safety_margin: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            safety_margin,
            clock,
        }
    }

    pub async fn get_token<F, Fut>(&self, refresh: F) -> Result<String, CredentialError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenGrant, CredentialError>>,
    {
        let mut slot = self.slot.lock().await;
        let now = self.clock.now();
        let margin = self.safety_margin.as_secs() as i64;

        if let Some(token) = slot.as_ref() {
            if token.expires_at - margin > now {
                debug!("Reusing cached access token");
                return Ok(token.value.clone());
            }
        }

        // Never serve an expired token, even if the refresh below fails
        *slot = None;

        let grant = match refresh().await {
            Ok(grant) => grant,
            Err(e) => {
                warn!(error = %e, "Access token refresh failed");
                return Err(e);
            }
        };

        if grant.access_token.trim().is_empty() || grant.expires_in <= 0 {
            warn!("Access token refresh returned an unusable token");
            return Err(CredentialError::MissingToken);
        }

        let token = Token {
            value: grant.access_token,
            expires_at: self.clock.now() + grant.expires_in,
        };
        info!(expires_at = token.expires_at, "Refreshed access token");

        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    /// Currently cached token, fresh or not.
    pub async fn current(&self) -> Option<Token> {
        self.slot.lock().await.clone()
    }
}
